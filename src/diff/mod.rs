//! Diff computation, row alignment and formatting
//!
//! A line diff from one of the [`DiffAlgorithm`] engines is aligned into
//! side-by-side [`Row`]s, which are then highlighted (optionally word by
//! word) or serialized as plain text. Everything in here is pure and
//! synchronous.

pub mod algorithms;
pub mod align;
pub mod formatter;
pub mod generator;
pub mod mode;
pub mod model;
pub mod render;
pub mod stats;
pub mod text;

// Re-export the main types for easier use
pub use algorithms::{
    diff_words_with_space, DiffAlgorithm, DiffAlgorithmType, LcsAlgorithm, MyersAlgorithm,
    PatienceAlgorithm,
};
pub use align::{align_rows, has_changes, AlignState};
pub use formatter::{PlainFormatter, NO_DIFFERENCES};
pub use generator::{DiffGenerator, DiffOutput, RowHighlight};
pub use mode::{DiffMode, FormatMode};
pub use model::{Row, RowKind, Segment, Side};
pub use render::{highlight_line, highlight_row, row_class, HighlightSpan, SpanClass};
pub use stats::DiffStats;
pub use text::{normalize_newlines, split_lines_no_trailing_empty};

/// Convenience function to align two texts into rows with default settings
pub fn diff_rows(left: &str, right: &str) -> Vec<Row> {
    align_rows(&DiffGenerator::default().segments(left, right))
}

/// Convenience function to get the aggregate plain diff with default settings
pub fn plain_diff(left: &str, right: &str) -> String {
    PlainFormatter::aggregate_text(&DiffGenerator::default().segments(left, right))
}
