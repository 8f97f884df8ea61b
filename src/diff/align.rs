//! Row alignment for the split view
//!
//! Turns a line-level segment stream into display rows. Deleted and inserted
//! lines that fall in the same changed block (between two unchanged runs) are
//! paired strictly by position: the i-th deleted line sits next to the i-th
//! inserted line, whatever their content. Surplus lines on either side become
//! plain `removed` or `added` rows.
//!
//! The aligner is written as a reducer over [`AlignState`] so that each step
//! can be checked on its own.

use super::model::{Row, Segment};
use super::text::split_lines_no_trailing_empty;

/// Aligner state carried between segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignState {
    pub pending_removed: Vec<String>,
    pub pending_added: Vec<String>,
    /// Next line number on the left side (1-based)
    pub left_line_number: usize,
    /// Next line number on the right side (1-based)
    pub right_line_number: usize,
}

impl Default for AlignState {
    fn default() -> Self {
        Self {
            pending_removed: Vec::new(),
            pending_added: Vec::new(),
            left_line_number: 1,
            right_line_number: 1,
        }
    }
}

impl AlignState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume one segment, returning the next state and the rows it emits.
    ///
    /// Changed segments only buffer lines; an unchanged segment flushes the
    /// buffered block before emitting its own rows.
    pub fn step(mut self, segment: &Segment) -> (Self, Vec<Row>) {
        let lines = split_lines_no_trailing_empty(&segment.value);

        if segment.removed {
            self.pending_removed.extend(lines);
            return (self, Vec::new());
        }
        if segment.added {
            self.pending_added.extend(lines);
            return (self, Vec::new());
        }

        let (mut state, mut rows) = self.flush();
        rows.reserve(lines.len());
        for line in lines {
            rows.push(Row::unchanged(line, state.left_line_number, state.right_line_number));
            state.left_line_number += 1;
            state.right_line_number += 1;
        }
        (state, rows)
    }

    /// Emit rows for the buffered changed block, pairing by index.
    pub fn flush(mut self) -> (Self, Vec<Row>) {
        let removed = std::mem::take(&mut self.pending_removed);
        let added = std::mem::take(&mut self.pending_added);
        let count = removed.len().max(added.len());

        let mut rows = Vec::with_capacity(count);
        let mut removed = removed.into_iter();
        let mut added = added.into_iter();

        for _ in 0..count {
            match (removed.next(), added.next()) {
                (Some(left), Some(right)) => {
                    rows.push(Row::modified(left, right, self.left_line_number, self.right_line_number));
                    self.left_line_number += 1;
                    self.right_line_number += 1;
                }
                (Some(left), None) => {
                    rows.push(Row::removed(left, self.left_line_number));
                    self.left_line_number += 1;
                }
                (None, Some(right)) => {
                    rows.push(Row::added(right, self.right_line_number));
                    self.right_line_number += 1;
                }
                (None, None) => break,
            }
        }

        (self, rows)
    }

    /// Flush whatever is still buffered at end of stream.
    pub fn finish(self) -> Vec<Row> {
        self.flush().1
    }
}

/// Align a full segment stream into rows.
pub fn align_rows(segments: &[Segment]) -> Vec<Row> {
    let (state, mut rows) = segments.iter().fold(
        (AlignState::new(), Vec::new()),
        |(state, mut rows), segment| {
            let (next, emitted) = state.step(segment);
            rows.extend(emitted);
            (next, rows)
        },
    );
    rows.extend(state.finish());

    tracing::trace!(segments = segments.len(), rows = rows.len(), "aligned diff rows");
    rows
}

/// True iff any row carries a change.
pub fn has_changes(rows: &[Row]) -> bool {
    rows.iter().any(Row::is_change)
}
