//! Configuration management for splitdiff
//!
//! This module provides configuration structures and defaults for diffing,
//! caching, input watching, export and the terminal UI. Values come from an
//! optional TOML file, then environment variables, then command-line flags.

use std::num::NonZeroUsize;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::diff::{DiffAlgorithmType, DiffMode, FormatMode};
use crate::export::EXPORT_FILE_NAME;

/// Global configuration for splitdiff
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitDiffConfig {
    /// Diff computation defaults
    pub diff: DiffConfig,
    /// Caching configuration
    pub cache: CacheConfig,
    /// Input watcher configuration
    pub watcher: WatcherConfig,
    /// Export configuration
    pub export: ExportSettings,
    /// UI configuration
    pub ui: UiConfig,
}

/// Defaults for how diffs are computed and shown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffConfig {
    pub mode: DiffMode,
    pub format: FormatMode,
    pub algorithm: DiffAlgorithmType,
}

/// Configuration for the result cache
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Number of diff results kept; one is enough for a single live view
    pub result_cache_size: usize,
}

/// Configuration for watching the compared files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatcherConfig {
    /// Quiet period before a changed input is reloaded, in milliseconds
    pub event_debounce_ms: u64,
    /// How often the UI polls for watcher events, in milliseconds
    pub poll_interval_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// File name used when exporting into a directory
    pub file_name: String,
}

/// Configuration for user interface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Rows moved by PageUp/PageDown
    pub scroll_step: usize,
    /// Show the line-number gutter in the split panes
    pub show_line_numbers: bool,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            mode: DiffMode::Line,
            format: FormatMode::Highlight,
            algorithm: DiffAlgorithmType::Myers,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { result_cache_size: 1 }
    }
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            event_debounce_ms: 150,
            poll_interval_ms: 50,
        }
    }
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            file_name: EXPORT_FILE_NAME.to_string(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            scroll_step: 10,
            show_line_numbers: true,
        }
    }
}

impl CacheConfig {
    /// Cache capacity, never below one entry
    pub fn result_cache_capacity(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.result_cache_size).unwrap_or(NonZeroUsize::MIN)
    }
}

impl WatcherConfig {
    /// Get event debounce duration
    pub fn event_debounce_duration(&self) -> Duration {
        Duration::from_millis(self.event_debounce_ms)
    }

    /// Get poll interval duration
    pub fn poll_interval_duration(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Configuration loading and management
impl SplitDiffConfig {
    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Load from the given file if any, then apply environment overrides
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        let base = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        Ok(base.with_env_overrides())
    }

    fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply `SPLITDIFF_*` overrides read through `lookup`
    fn with_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("SPLITDIFF_RESULT_CACHE_SIZE") {
            if let Ok(size) = val.parse::<usize>() {
                self.cache.result_cache_size = size;
            }
        }

        if let Some(val) = lookup("SPLITDIFF_EVENT_DEBOUNCE_MS") {
            if let Ok(ms) = val.parse::<u64>() {
                self.watcher.event_debounce_ms = ms;
            }
        }

        if let Some(val) = lookup("SPLITDIFF_DEFAULT_MODE") {
            if let Ok(mode) = val.parse::<DiffMode>() {
                self.diff.mode = mode;
            }
        }

        if let Some(val) = lookup("SPLITDIFF_ALGORITHM") {
            if let Ok(algorithm) = val.parse::<DiffAlgorithmType>() {
                self.diff.algorithm = algorithm;
            }
        }

        self
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.cache.result_cache_size == 0 {
            return Err("result_cache_size must be greater than 0".to_string());
        }

        if self.watcher.event_debounce_ms == 0 {
            return Err("event_debounce_ms must be greater than 0".to_string());
        }

        if self.watcher.poll_interval_ms == 0 {
            return Err("poll_interval_ms must be greater than 0".to_string());
        }

        if self.export.file_name.trim().is_empty() {
            return Err("export file_name must not be empty".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = SplitDiffConfig::default();

        assert_eq!(config.cache.result_cache_size, 1);
        assert_eq!(config.diff.mode, DiffMode::Line);
        assert_eq!(config.diff.format, FormatMode::Highlight);
        assert_eq!(config.export.file_name, "text-diff.txt");
    }

    #[test]
    fn test_config_validation() {
        let mut config = SplitDiffConfig::default();
        assert!(config.validate().is_ok());

        config.cache.result_cache_size = 0;
        assert!(config.validate().is_err());

        config.cache.result_cache_size = 1;
        config.export.file_name = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_duration_conversions() {
        let config = WatcherConfig::default();

        assert_eq!(config.event_debounce_duration(), Duration::from_millis(150));
        assert_eq!(config.poll_interval_duration(), Duration::from_millis(50));
    }

    #[test]
    fn test_cache_capacity_floor() {
        let config = CacheConfig { result_cache_size: 0 };
        assert_eq!(config.result_cache_capacity().get(), 1);
    }

    #[test]
    fn test_load_partial_toml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("splitdiff.toml");
        std::fs::write(
            &path,
            "[diff]\nmode = \"word\"\nalgorithm = \"patience\"\n\n[ui]\nscroll_step = 5\n",
        )
        .unwrap();

        let config = SplitDiffConfig::load(&path).unwrap();
        assert_eq!(config.diff.mode, DiffMode::Word);
        assert_eq!(config.diff.algorithm, DiffAlgorithmType::Patience);
        assert_eq!(config.diff.format, FormatMode::Highlight);
        assert_eq!(config.ui.scroll_step, 5);
        assert!(config.ui.show_line_numbers);
    }

    #[test]
    fn test_load_rejects_bad_toml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.toml");
        std::fs::write(&path, "[diff]\nmode = \"sideways\"\n").unwrap();

        assert!(SplitDiffConfig::load(&path).is_err());
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("SPLITDIFF_RESULT_CACHE_SIZE", "4"),
            ("SPLITDIFF_ALGORITHM", "lcs"),
            ("SPLITDIFF_DEFAULT_MODE", "word"),
            ("SPLITDIFF_EVENT_DEBOUNCE_MS", "not-a-number"),
        ]
        .into_iter()
        .collect();

        let config = SplitDiffConfig::default()
            .with_overrides_from(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.cache.result_cache_size, 4);
        assert_eq!(config.diff.algorithm, DiffAlgorithmType::Lcs);
        assert_eq!(config.diff.mode, DiffMode::Word);
        assert_eq!(config.watcher.event_debounce_ms, 150);
    }
}
