use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use similar::{Algorithm, ChangeTag, TextDiff};

use super::model::Segment;

/// Trait defining a line-granularity diff engine
///
/// Implementations return maximal segments that together cover both inputs:
/// the non-added segments concatenate to `old`, the non-removed ones to `new`.
pub trait DiffAlgorithm: Send + Sync {
    /// Diff two already-normalized strings line by line
    fn diff_lines(&self, old: &str, new: &str) -> Vec<Segment>;

    /// Get the algorithm name
    fn name(&self) -> &'static str;

    /// Get algorithm description
    fn description(&self) -> &'static str;
}

/// Myers diff algorithm implementation
pub struct MyersAlgorithm;

impl DiffAlgorithm for MyersAlgorithm {
    fn diff_lines(&self, old: &str, new: &str) -> Vec<Segment> {
        self.diff_line_tokens(Algorithm::Myers, old, new)
    }

    fn name(&self) -> &'static str {
        "Myers"
    }

    fn description(&self) -> &'static str {
        "Myers' O(ND) diff algorithm - fast and widely used"
    }
}

/// Patience diff algorithm implementation
pub struct PatienceAlgorithm;

impl DiffAlgorithm for PatienceAlgorithm {
    fn diff_lines(&self, old: &str, new: &str) -> Vec<Segment> {
        self.diff_line_tokens(Algorithm::Patience, old, new)
    }

    fn name(&self) -> &'static str {
        "Patience"
    }

    fn description(&self) -> &'static str {
        "Patience diff - anchors on unique lines, good for reordered blocks"
    }
}

/// LCS (Longest Common Subsequence) diff algorithm
pub struct LcsAlgorithm;

impl DiffAlgorithm for LcsAlgorithm {
    fn diff_lines(&self, old: &str, new: &str) -> Vec<Segment> {
        self.diff_line_tokens(Algorithm::Lcs, old, new)
    }

    fn name(&self) -> &'static str {
        "LCS"
    }

    fn description(&self) -> &'static str {
        "Longest Common Subsequence - produces minimal diffs"
    }
}

// Shared implementation for folding similar's per-token changes into maximal segments
trait DiffConverter {
    /// Lines end at `\n` only, so a lone `\r` stays inside its line.
    fn diff_line_tokens(&self, algorithm: Algorithm, old: &str, new: &str) -> Vec<Segment> {
        let old_lines: Vec<&str> = old.split_inclusive('\n').collect();
        let new_lines: Vec<&str> = new.split_inclusive('\n').collect();

        let diff = TextDiff::configure()
            .algorithm(algorithm)
            .diff_slices(old_lines.as_slice(), new_lines.as_slice());

        self.convert_to_segments(&diff)
    }

    fn convert_to_segments<'a>(&self, diff: &TextDiff<'a, 'a, '_, str>) -> Vec<Segment> {
        coalesce_changes(diff)
    }
}

impl DiffConverter for MyersAlgorithm {}
impl DiffConverter for PatienceAlgorithm {}
impl DiffConverter for LcsAlgorithm {}

fn coalesce_changes<'a>(diff: &TextDiff<'a, 'a, '_, str>) -> Vec<Segment> {
    let mut segments: Vec<Segment> = Vec::new();

    for change in diff.iter_all_changes() {
        let tag = change.tag();
        let value = change.value();

        match segments.last_mut() {
            Some(last) if tag_of(last) == tag => last.value.push_str(value),
            _ => segments.push(match tag {
                ChangeTag::Equal => Segment::unchanged(value),
                ChangeTag::Insert => Segment::added(value),
                ChangeTag::Delete => Segment::removed(value),
            }),
        }
    }

    segments
}

fn tag_of(segment: &Segment) -> ChangeTag {
    if segment.added {
        ChangeTag::Insert
    } else if segment.removed {
        ChangeTag::Delete
    } else {
        ChangeTag::Equal
    }
}

/// Diff two single lines at word granularity, with every whitespace run
/// treated as a token of its own.
pub fn diff_words_with_space(old: &str, new: &str) -> Vec<Segment> {
    let diff = TextDiff::configure()
        .algorithm(Algorithm::Myers)
        .diff_words(old, new);

    coalesce_changes(&diff)
}

/// Available line diff algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffAlgorithmType {
    #[default]
    Myers,
    Patience,
    Lcs,
}

impl DiffAlgorithmType {
    pub fn all() -> &'static [DiffAlgorithmType] {
        &[Self::Myers, Self::Patience, Self::Lcs]
    }

    pub fn create(&self) -> Box<dyn DiffAlgorithm> {
        match self {
            Self::Myers => Box::new(MyersAlgorithm),
            Self::Patience => Box::new(PatienceAlgorithm),
            Self::Lcs => Box::new(LcsAlgorithm),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Myers => "Myers",
            Self::Patience => "Patience",
            Self::Lcs => "LCS",
        }
    }
}

impl std::fmt::Display for DiffAlgorithmType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for DiffAlgorithmType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "myers" => Ok(Self::Myers),
            "patience" => Ok(Self::Patience),
            "lcs" => Ok(Self::Lcs),
            other => Err(format!("unknown diff algorithm: {}", other)),
        }
    }
}
