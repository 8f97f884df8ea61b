use super::model::{Row, RowKind, Segment, Side};
use super::stats::DiffStats;
use super::text::normalize_newlines;

/// Sentinel emitted by the aggregate form when there is nothing to show
pub const NO_DIFFERENCES: &str = "No differences";

/// Formats diffs into plain-text representations
pub struct PlainFormatter;

impl PlainFormatter {
    /// Single-stream form used for copy and export.
    ///
    /// Works on the raw segments: every line of every segment is written as
    /// `"{prefix} {line}"`, with only the trailing-newline artifact of each
    /// segment dropped.
    pub fn format_aggregate(segments: &[Segment]) -> Vec<String> {
        let mut lines = Vec::new();

        for segment in segments {
            let prefix = segment.prefix();
            let normalized = normalize_newlines(&segment.value);
            let parts: Vec<&str> = normalized.split('\n').collect();
            let last = parts.len() - 1;

            for (index, line) in parts.iter().enumerate() {
                if index == last && line.is_empty() {
                    continue;
                }
                lines.push(format!("{} {}", prefix, line));
            }
        }

        if lines.is_empty() {
            lines.push(NO_DIFFERENCES.to_string());
        }
        lines
    }

    /// Aggregate form joined into one string
    pub fn aggregate_text(segments: &[Segment]) -> String {
        Self::format_aggregate(segments).join("\n")
    }

    /// Prefix for one side of a row in the split plain view
    pub fn row_prefix(kind: RowKind, side: Side) -> char {
        match side {
            Side::Left if matches!(kind, RowKind::Removed | RowKind::Modified) => '-',
            Side::Right if matches!(kind, RowKind::Added | RowKind::Modified) => '+',
            _ => ' ',
        }
    }

    /// One side of a row; an absent side is an empty line.
    pub fn format_row_side(row: &Row, side: Side) -> String {
        match row.text(side) {
            Some(text) => format!("{} {}", Self::row_prefix(row.kind, side), text),
            None => String::new(),
        }
    }

    /// Per-row form for the split plain view, one line per row on each side
    pub fn format_rows(rows: &[Row]) -> (Vec<String>, Vec<String>) {
        rows.iter()
            .map(|row| (Self::format_row_side(row, Side::Left), Self::format_row_side(row, Side::Right)))
            .unzip()
    }

    /// Format diff statistics as a summary
    pub fn format_stats(stats: &DiffStats) -> String {
        if stats.total_changes() == 0 {
            return "No changes".to_string();
        }

        let mut parts = Vec::new();

        if stats.rows_modified > 0 {
            parts.push(format!("{} modified", stats.rows_modified));
        }

        if stats.rows_added > 0 {
            parts.push(format!("{} insertion{}",
                stats.rows_added,
                if stats.rows_added == 1 { "" } else { "s" }
            ));
        }

        if stats.rows_removed > 0 {
            parts.push(format!("{} deletion{}",
                stats.rows_removed,
                if stats.rows_removed == 1 { "" } else { "s" }
            ));
        }

        parts.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::algorithms::{DiffAlgorithm, MyersAlgorithm};
    use crate::diff::align::align_rows;

    #[test]
    fn test_aggregate_example() {
        let segments = MyersAlgorithm.diff_lines("line1\nline2", "line1\nline3");

        assert_eq!(
            PlainFormatter::format_aggregate(&segments),
            vec!["  line1", "- line2", "+ line3"]
        );
    }

    #[test]
    fn test_aggregate_no_differences() {
        assert_eq!(PlainFormatter::format_aggregate(&[]), vec![NO_DIFFERENCES]);
        assert_eq!(PlainFormatter::aggregate_text(&[]), "No differences");
        assert_eq!(
            PlainFormatter::format_aggregate(&[Segment::unchanged("")]),
            vec![NO_DIFFERENCES]
        );
    }

    #[test]
    fn test_aggregate_keeps_interior_empty_lines() {
        let segments = vec![Segment::removed("a\n\n"), Segment::added("\r\nb")];

        assert_eq!(PlainFormatter::format_aggregate(&segments), vec!["- a", "- ", "+ ", "+ b"]);
    }

    #[test]
    fn test_aggregate_identical_input_lists_all_lines() {
        let segments = MyersAlgorithm.diff_lines("a\nb\n", "a\nb\n");
        assert_eq!(PlainFormatter::aggregate_text(&segments), "  a\n  b");
    }

    #[test]
    fn test_row_prefixes() {
        assert_eq!(PlainFormatter::row_prefix(RowKind::Removed, Side::Left), '-');
        assert_eq!(PlainFormatter::row_prefix(RowKind::Removed, Side::Right), ' ');
        assert_eq!(PlainFormatter::row_prefix(RowKind::Added, Side::Right), '+');
        assert_eq!(PlainFormatter::row_prefix(RowKind::Modified, Side::Left), '-');
        assert_eq!(PlainFormatter::row_prefix(RowKind::Modified, Side::Right), '+');
        assert_eq!(PlainFormatter::row_prefix(RowKind::Unchanged, Side::Left), ' ');
    }

    #[test]
    fn test_format_rows() {
        let rows = align_rows(&MyersAlgorithm.diff_lines("keep\nold\ngone\n", "keep\nnew\n"));
        let (left, right) = PlainFormatter::format_rows(&rows);

        assert_eq!(left, vec!["  keep", "- old", "- gone"]);
        assert_eq!(right, vec!["  keep", "+ new", ""]);
    }

    #[test]
    fn test_format_stats() {
        let stats = DiffStats { rows_unchanged: 3, rows_added: 2, rows_removed: 1, rows_modified: 1 };
        assert_eq!(PlainFormatter::format_stats(&stats), "1 modified, 2 insertions, 1 deletion");
        assert_eq!(PlainFormatter::format_stats(&DiffStats::default()), "No changes");
    }
}
