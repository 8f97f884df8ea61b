use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Granularity used when highlighting modified rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffMode {
    /// Whole lines are highlighted
    #[default]
    Line,
    /// Modified lines are refined word by word
    Word,
}

impl DiffMode {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Line => "Line by line",
            Self::Word => "Word level",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Self::Line => Self::Word,
            Self::Word => Self::Line,
        }
    }
}

impl std::str::FromStr for DiffMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "line" => Ok(Self::Line),
            "word" => Ok(Self::Word),
            other => Err(format!("unknown diff mode: {}", other)),
        }
    }
}

/// How the split panes are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatMode {
    /// Colored spans per change class
    #[default]
    Highlight,
    /// `+`/`-` prefixed plain text
    Plain,
}

impl FormatMode {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Highlight => "Highlighted",
            Self::Plain => "Plain text",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Self::Highlight => Self::Plain,
            Self::Plain => Self::Highlight,
        }
    }
}
