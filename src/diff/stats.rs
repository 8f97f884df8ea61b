use serde::{Deserialize, Serialize};

use super::model::{Row, RowKind};

/// Row counts per classification
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffStats {
    pub rows_unchanged: usize,
    pub rows_added: usize,
    pub rows_removed: usize,
    pub rows_modified: usize,
}

impl DiffStats {
    pub fn from_rows(rows: &[Row]) -> Self {
        rows.iter().fold(Self::default(), |mut stats, row| {
            match row.kind {
                RowKind::Unchanged => stats.rows_unchanged += 1,
                RowKind::Added => stats.rows_added += 1,
                RowKind::Removed => stats.rows_removed += 1,
                RowKind::Modified => stats.rows_modified += 1,
            }
            stats
        })
    }

    pub fn total_changes(&self) -> usize {
        self.rows_added + self.rows_removed + self.rows_modified
    }
}
