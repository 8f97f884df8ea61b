//! Loading compared texts from disk
//!
//! Read and decode failures are returned as [`InputError`], whose display
//! text is meant to be shown to the user as a status message.

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("Failed to read file: {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read file: {} is not valid UTF-8 ({source})", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: std::string::FromUtf8Error,
    },
}

/// A successfully loaded input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedText {
    pub text: String,
    pub filename: String,
}

/// Read a file as UTF-8 text.
pub fn load_text<P: AsRef<Path>>(path: P) -> Result<LoadedText, InputError> {
    let path = path.as_ref();

    let bytes = std::fs::read(path).map_err(|source| InputError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8(bytes).map_err(|source| InputError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    let filename = path
        .file_name()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
        .unwrap_or_else(|| path.display().to_string());

    tracing::debug!(path = %path.display(), bytes = text.len(), "loaded input");
    Ok(LoadedText { text, filename })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_text() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("left.txt");
        std::fs::write(&path, "hello\r\nworld\n").unwrap();

        let loaded = load_text(&path).unwrap();
        assert_eq!(loaded.text, "hello\r\nworld\n");
        assert_eq!(loaded.filename, "left.txt");
    }

    #[test]
    fn test_missing_file_message() {
        let temp_dir = TempDir::new().unwrap();
        let err = load_text(temp_dir.path().join("missing.txt")).unwrap_err();

        assert!(matches!(err, InputError::Read { .. }));
        assert!(err.to_string().starts_with("Failed to read file: "));
    }

    #[test]
    fn test_invalid_utf8_message() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("binary.bin");
        std::fs::write(&path, [0x66, 0x6f, 0xff, 0xfe]).unwrap();

        let err = load_text(&path).unwrap_err();
        assert!(matches!(err, InputError::Decode { .. }));
        assert!(err.to_string().contains("not valid UTF-8"));
    }
}
