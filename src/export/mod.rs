//! Export and copy sinks for the aggregate plain diff
//!
//! The exported text is always the aggregate plain form; the split view is a
//! display format only.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use arboard::Clipboard;

use crate::diff::DiffOutput;

/// Default file name for exports
pub const EXPORT_FILE_NAME: &str = "text-diff.txt";
/// Extension forced onto exported files
pub const EXPORT_EXTENSION: &str = "txt";
/// MIME type of the exported text
pub const EXPORT_MIME_TYPE: &str = "text/plain";

/// Export configuration
#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub file_name: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            file_name: EXPORT_FILE_NAME.to_string(),
        }
    }
}

/// Writes the aggregate plain diff to files or writers
pub struct DiffExporter {
    config: ExportConfig,
}

impl DiffExporter {
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    /// Resolve the destination: directories get the configured file name and
    /// files always end in `.txt`.
    pub fn resolve_path(&self, target: &Path) -> PathBuf {
        let path = if target.is_dir() {
            target.join(&self.config.file_name)
        } else {
            target.to_path_buf()
        };

        let has_txt = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(EXPORT_EXTENSION));
        if has_txt {
            path
        } else {
            let mut name = path.clone().into_os_string();
            name.push(".");
            name.push(EXPORT_EXTENSION);
            PathBuf::from(name)
        }
    }

    /// Export the plain diff to a file, returning where it was written.
    ///
    /// Returns `Ok(None)` without touching the filesystem when there is no
    /// text to export.
    pub fn export_plain<P: AsRef<Path>>(&self, output: &DiffOutput, target: P) -> Result<Option<PathBuf>> {
        if output.plain_text.is_empty() {
            return Ok(None);
        }

        let path = self.resolve_path(target.as_ref());
        fs::write(&path, &output.plain_text)
            .with_context(|| format!("Failed to write diff to {}", path.display()))?;

        tracing::info!(path = %path.display(), mime = EXPORT_MIME_TYPE, "exported diff");
        Ok(Some(path))
    }

    /// Export to a writer (for streaming or custom outputs)
    pub fn export_to_writer<W: Write>(&self, output: &DiffOutput, writer: &mut W) -> Result<()> {
        write!(writer, "{}", output.plain_text)?;
        writer.flush()?;
        Ok(())
    }
}

impl Default for DiffExporter {
    fn default() -> Self {
        Self::new(ExportConfig::default())
    }
}

/// Status text shown after an export attempt
pub fn export_status(result: &Result<Option<PathBuf>>) -> String {
    match result {
        Ok(Some(path)) => format!("Exported diff to {}", path.display()),
        Ok(None) => String::new(),
        Err(err) => format!("Failed to export diff: {:#}", err),
    }
}

/// System clipboard sink
pub struct ClipboardSink {
    clipboard: Option<Clipboard>,
}

impl ClipboardSink {
    pub fn new() -> Self {
        let clipboard = match Clipboard::new() {
            Ok(clipboard) => Some(clipboard),
            Err(err) => {
                tracing::warn!("Clipboard not available: {}", err);
                None
            }
        };
        Self { clipboard }
    }

    pub fn copy_to_clipboard(&mut self, text: &str) -> Result<(), String> {
        if let Some(ref mut clipboard) = self.clipboard {
            clipboard
                .set_text(text.to_string())
                .map_err(|e| format!("Failed to set clipboard text: {}", e))
        } else {
            Err("Clipboard not available".to_string())
        }
    }

    /// Copy the plain diff and describe the outcome as status text
    pub fn copy_diff(&mut self, output: &DiffOutput) -> String {
        if output.plain_text.is_empty() {
            return String::new();
        }
        match self.copy_to_clipboard(&output.plain_text) {
            Ok(()) => "Copied diff to clipboard".to_string(),
            Err(err) => {
                tracing::warn!("{}", err);
                "Failed to copy to clipboard".to_string()
            }
        }
    }
}

impl Default for ClipboardSink {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::{DiffGenerator, DiffMode};
    use tempfile::TempDir;

    fn sample() -> DiffOutput {
        DiffGenerator::default().generate("old\nline", "new\nline", DiffMode::Line)
    }

    #[test]
    fn test_export_into_directory() {
        let temp_dir = TempDir::new().unwrap();

        let written = DiffExporter::default()
            .export_plain(&sample(), temp_dir.path())
            .unwrap()
            .unwrap();

        assert_eq!(written, temp_dir.path().join("text-diff.txt"));
        let content = fs::read_to_string(written).unwrap();
        assert_eq!(content, "- old\n+ new\n  line");
    }

    #[test]
    fn test_export_adds_txt_extension() {
        let temp_dir = TempDir::new().unwrap();
        let exporter = DiffExporter::default();

        assert_eq!(
            exporter.resolve_path(&temp_dir.path().join("result")),
            temp_dir.path().join("result.txt")
        );
        assert_eq!(
            exporter.resolve_path(&temp_dir.path().join("result.TXT")),
            temp_dir.path().join("result.TXT")
        );
        assert_eq!(
            exporter.resolve_path(&temp_dir.path().join("result.diff")),
            temp_dir.path().join("result.diff.txt")
        );
    }

    #[test]
    fn test_export_empty_text_is_noop() {
        let temp_dir = TempDir::new().unwrap();
        let mut output = sample();
        output.plain_text.clear();

        let result = DiffExporter::default().export_plain(&output, temp_dir.path());
        assert_eq!(result.unwrap(), None);
        assert!(!temp_dir.path().join(EXPORT_FILE_NAME).exists());
    }

    #[test]
    fn test_export_to_writer() {
        let mut buffer = Vec::new();
        DiffExporter::default().export_to_writer(&sample(), &mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "- old\n+ new\n  line");
    }

    #[test]
    fn test_export_status_messages() {
        let ok: Result<Option<PathBuf>> = Ok(Some(PathBuf::from("out.txt")));
        assert_eq!(export_status(&ok), "Exported diff to out.txt");

        let err: Result<Option<PathBuf>> = Err(anyhow::anyhow!("disk full"));
        assert!(export_status(&err).starts_with("Failed to export diff"));
    }
}
