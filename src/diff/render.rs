//! Highlight spans for the split view
//!
//! Rows are drawn as a list of classified spans per side. In word mode a
//! `modified` row is refined with a word-and-whitespace diff of its two
//! texts; everything else is drawn as one span whose class comes from the
//! row kind.

use serde::{Deserialize, Serialize};

use super::algorithms::diff_words_with_space;
use super::mode::DiffMode;
use super::model::{Row, RowKind, Segment, Side};

/// Visual class of a highlighted span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpanClass {
    Unchanged,
    Added,
    Removed,
}

impl SpanClass {
    pub fn of_segment(segment: &Segment) -> Self {
        if segment.added {
            Self::Added
        } else if segment.removed {
            Self::Removed
        } else {
            Self::Unchanged
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightSpan {
    pub class: SpanClass,
    pub text: String,
}

impl HighlightSpan {
    pub fn new(class: SpanClass, text: impl Into<String>) -> Self {
        Self { class, text: text.into() }
    }
}

/// Class of a whole-line span for the given side.
pub fn row_class(kind: RowKind, side: Side) -> SpanClass {
    match (kind, side) {
        (RowKind::Unchanged, _) => SpanClass::Unchanged,
        (RowKind::Removed, Side::Left) => SpanClass::Removed,
        (RowKind::Removed, Side::Right) => SpanClass::Unchanged,
        (RowKind::Added, Side::Left) => SpanClass::Unchanged,
        (RowKind::Added, Side::Right) => SpanClass::Added,
        (RowKind::Modified, Side::Left) => SpanClass::Removed,
        (RowKind::Modified, Side::Right) => SpanClass::Added,
    }
}

/// Keep the word segments visible on one side: the left never shows
/// insertions and the right never shows deletions.
pub fn refine_side(segments: &[Segment], side: Side) -> Vec<HighlightSpan> {
    segments
        .iter()
        .filter(|segment| match side {
            Side::Left => !segment.added,
            Side::Right => !segment.removed,
        })
        .map(|segment| HighlightSpan::new(SpanClass::of_segment(segment), segment.value.clone()))
        .collect()
}

fn word_refinement(row: &Row, mode: DiffMode) -> Option<Vec<Segment>> {
    if mode != DiffMode::Word || row.kind != RowKind::Modified {
        return None;
    }
    match (row.left_text.as_deref(), row.right_text.as_deref()) {
        (Some(left), Some(right)) => Some(diff_words_with_space(left, right)),
        _ => None,
    }
}

fn whole_line(row: &Row, side: Side) -> Vec<HighlightSpan> {
    match row.text(side) {
        Some(text) => vec![HighlightSpan::new(row_class(row.kind, side), text)],
        None => vec![HighlightSpan::new(SpanClass::Unchanged, "")],
    }
}

/// Spans for one side of a row.
pub fn highlight_line(row: &Row, side: Side, mode: DiffMode) -> Vec<HighlightSpan> {
    if row.text(side).is_none() {
        return whole_line(row, side);
    }
    match word_refinement(row, mode) {
        Some(segments) => refine_side(&segments, side),
        None => whole_line(row, side),
    }
}

/// Spans for both sides of a row, running the word diff at most once.
pub fn highlight_row(row: &Row, mode: DiffMode) -> (Vec<HighlightSpan>, Vec<HighlightSpan>) {
    match word_refinement(row, mode) {
        Some(segments) => (refine_side(&segments, Side::Left), refine_side(&segments, Side::Right)),
        None => (whole_line(row, Side::Left), whole_line(row, Side::Right)),
    }
}
