use serde::Serialize;

use super::algorithms::{DiffAlgorithm, DiffAlgorithmType};
use super::align::{align_rows, has_changes};
use super::formatter::PlainFormatter;
use super::mode::DiffMode;
use super::model::{Row, Segment};
use super::render::{highlight_row, HighlightSpan};
use super::stats::DiffStats;
use super::text::normalize_newlines;

/// Highlight spans of one row, left pane then right pane
pub type RowHighlight = (Vec<HighlightSpan>, Vec<HighlightSpan>);

/// Everything a view needs to show one comparison
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffOutput {
    pub mode: DiffMode,
    pub segments: Vec<Segment>,
    pub rows: Vec<Row>,
    #[serde(skip)]
    pub highlights: Vec<RowHighlight>,
    pub plain_left: Vec<String>,
    pub plain_right: Vec<String>,
    /// Aggregate plain form, used for copy and export
    pub plain_text: String,
    pub has_changes: bool,
    pub stats: DiffStats,
}

/// High-level diff generator that can use different line algorithms
pub struct DiffGenerator {
    algorithm: Box<dyn DiffAlgorithm>,
}

impl DiffGenerator {
    /// Create a new diff generator with the specified algorithm
    pub fn new(algorithm_type: DiffAlgorithmType) -> Self {
        Self {
            algorithm: algorithm_type.create(),
        }
    }

    /// Normalize both inputs and run the line diff
    pub fn segments(&self, left: &str, right: &str) -> Vec<Segment> {
        if left.is_empty() && right.is_empty() {
            return Vec::new();
        }
        self.algorithm
            .diff_lines(&normalize_newlines(left), &normalize_newlines(right))
    }

    /// Compute rows, highlights and plain forms for a pair of inputs
    pub fn generate(&self, left: &str, right: &str, mode: DiffMode) -> DiffOutput {
        let segments = self.segments(left, right);
        let rows = align_rows(&segments);
        let highlights = rows.iter().map(|row| highlight_row(row, mode)).collect();
        let (plain_left, plain_right) = PlainFormatter::format_rows(&rows);
        let plain_text = PlainFormatter::aggregate_text(&segments);
        let has_changes = has_changes(&rows);
        let stats = DiffStats::from_rows(&rows);

        tracing::debug!(
            algorithm = self.algorithm.name(),
            ?mode,
            rows = rows.len(),
            changes = stats.total_changes(),
            "generated diff"
        );

        DiffOutput {
            mode,
            segments,
            rows,
            highlights,
            plain_left,
            plain_right,
            plain_text,
            has_changes,
            stats,
        }
    }

    /// Get the current algorithm name
    pub fn algorithm_name(&self) -> &str {
        self.algorithm.name()
    }

    /// Get the current algorithm description
    pub fn algorithm_description(&self) -> &str {
        self.algorithm.description()
    }
}

impl Default for DiffGenerator {
    fn default() -> Self {
        Self::new(DiffAlgorithmType::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::model::RowKind;
    use crate::diff::render::SpanClass;

    #[test]
    fn test_generate_example() {
        let output = DiffGenerator::default().generate("line1\nline2", "line1\nline3", DiffMode::Line);

        assert!(output.has_changes);
        assert_eq!(output.plain_text, "  line1\n- line2\n+ line3");
        assert_eq!(output.rows[1].kind, RowKind::Modified);
        assert_eq!(output.plain_left, vec!["  line1", "- line2"]);
        assert_eq!(output.plain_right, vec!["  line1", "+ line3"]);
        assert_eq!(output.highlights.len(), output.rows.len());
    }

    #[test]
    fn test_generate_empty_inputs() {
        let output = DiffGenerator::default().generate("", "", DiffMode::Word);

        assert!(output.segments.is_empty());
        assert!(output.rows.is_empty());
        assert!(!output.has_changes);
        assert_eq!(output.plain_text, "No differences");
    }

    #[test]
    fn test_generate_normalizes_crlf() {
        let output = DiffGenerator::default().generate("a\r\nb\r\n", "a\nb\n", DiffMode::Line);
        assert!(!output.has_changes);
        assert_eq!(output.rows.len(), 2);
    }

    #[test]
    fn test_word_mode_highlights() {
        let output = DiffGenerator::new(DiffAlgorithmType::Patience)
            .generate("keep\nred apple\n", "keep\ngreen apple\n", DiffMode::Word);
        let (left, right) = &output.highlights[1];

        assert!(left.len() > 1);
        assert!(left.iter().any(|s| s.class == SpanClass::Unchanged && s.text.contains("apple")));
        assert!(right.iter().any(|s| s.class == SpanClass::Added && s.text == "green"));
    }
}
