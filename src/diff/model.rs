use serde::{Deserialize, Serialize};

/// A maximal run of text produced by a line or word diff.
///
/// `added` and `removed` are never both set; neither set means the text is
/// common to both inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub value: String,
    pub added: bool,
    pub removed: bool,
}

impl Segment {
    pub fn unchanged(value: impl Into<String>) -> Self {
        Self { value: value.into(), added: false, removed: false }
    }

    pub fn added(value: impl Into<String>) -> Self {
        Self { value: value.into(), added: true, removed: false }
    }

    pub fn removed(value: impl Into<String>) -> Self {
        Self { value: value.into(), added: false, removed: true }
    }

    pub fn is_change(&self) -> bool {
        self.added || self.removed
    }

    /// Single-character marker used by the plain formatter.
    pub fn prefix(&self) -> char {
        if self.added {
            '+'
        } else if self.removed {
            '-'
        } else {
            ' '
        }
    }
}

/// Classification of a display row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowKind {
    Unchanged,
    Removed,
    Added,
    Modified,
}

impl RowKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Unchanged => "unchanged",
            Self::Removed => "removed",
            Self::Added => "added",
            Self::Modified => "modified",
        }
    }
}

impl std::fmt::Display for RowKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One line of the split view, pairing at most one line from each side.
///
/// Build rows through the constructors; they keep the presence of texts and
/// line numbers consistent with `kind`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    pub kind: RowKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left_line_number: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right_line_number: Option<usize>,
}

impl Row {
    pub fn unchanged(text: impl Into<String>, left_line: usize, right_line: usize) -> Self {
        let text = text.into();
        Self {
            kind: RowKind::Unchanged,
            left_text: Some(text.clone()),
            right_text: Some(text),
            left_line_number: Some(left_line),
            right_line_number: Some(right_line),
        }
    }

    pub fn removed(text: impl Into<String>, left_line: usize) -> Self {
        Self {
            kind: RowKind::Removed,
            left_text: Some(text.into()),
            right_text: None,
            left_line_number: Some(left_line),
            right_line_number: None,
        }
    }

    pub fn added(text: impl Into<String>, right_line: usize) -> Self {
        Self {
            kind: RowKind::Added,
            left_text: None,
            right_text: Some(text.into()),
            left_line_number: None,
            right_line_number: Some(right_line),
        }
    }

    pub fn modified(
        left: impl Into<String>,
        right: impl Into<String>,
        left_line: usize,
        right_line: usize,
    ) -> Self {
        Self {
            kind: RowKind::Modified,
            left_text: Some(left.into()),
            right_text: Some(right.into()),
            left_line_number: Some(left_line),
            right_line_number: Some(right_line),
        }
    }

    pub fn is_change(&self) -> bool {
        self.kind != RowKind::Unchanged
    }

    pub fn text(&self, side: Side) -> Option<&str> {
        match side {
            Side::Left => self.left_text.as_deref(),
            Side::Right => self.right_text.as_deref(),
        }
    }

    pub fn line_number(&self, side: Side) -> Option<usize> {
        match side {
            Side::Left => self.left_line_number,
            Side::Right => self.right_line_number,
        }
    }
}

/// Which pane of the split view a rendering refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_prefix() {
        assert_eq!(Segment::added("x").prefix(), '+');
        assert_eq!(Segment::removed("x").prefix(), '-');
        assert_eq!(Segment::unchanged("x").prefix(), ' ');
    }

    #[test]
    fn test_row_constructors_respect_kind() {
        let removed = Row::removed("gone", 3);
        assert_eq!(removed.text(Side::Left), Some("gone"));
        assert_eq!(removed.text(Side::Right), None);
        assert_eq!(removed.line_number(Side::Right), None);

        let added = Row::added("new", 7);
        assert_eq!(added.left_line_number, None);
        assert_eq!(added.right_line_number, Some(7));

        let unchanged = Row::unchanged("same", 1, 2);
        assert_eq!(unchanged.left_text, unchanged.right_text);
        assert!(!unchanged.is_change());
    }

    #[test]
    fn test_row_json_shape() {
        let row = Row::modified("line2", "modified", 2, 2);
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "kind": "modified",
                "leftText": "line2",
                "rightText": "modified",
                "leftLineNumber": 2,
                "rightLineNumber": 2,
            })
        );

        let added = serde_json::to_value(Row::added("x", 1)).unwrap();
        assert!(added.get("leftText").is_none());
        assert!(added.get("leftLineNumber").is_none());
    }
}
