//! Log ingestion layer: defines a generic interface for loading log text from sources.
//!
//! The driver depends on the `LogSource` abstraction rather than on a concrete file
//! reader, so each pipeline can be exercised with in-memory text.

use std::path::PathBuf;

use anyhow::{Context, Result};

/// Generic trait for log sources.
///
/// Implementors return the complete text of the log in one read.
#[async_trait::async_trait]
pub trait LogSource: Send + Sync {
    /// Human-readable name used as the table title and in diagnostics.
    fn name(&self) -> String;

    async fn read_all(&self) -> Result<String>;
}

/// Concrete file source. The whole file is read at once.
pub struct FileSource {
    pub path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait::async_trait]
impl LogSource for FileSource {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    async fn read_all(&self) -> Result<String> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .with_context(|| format!("failed to read log file {}", self.path.display()))?;
        // Invalid UTF-8 only ever spoils the lines it appears on.
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn reads_whole_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "first\nsecond\n").unwrap();

        let source = FileSource::new(file.path());
        assert_eq!(source.read_all().await.unwrap(), "first\nsecond\n");
    }

    #[tokio::test]
    async fn missing_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.log");

        let err = FileSource::new(&path).read_all().await.unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("nope.log"), "{msg}");
    }

    #[tokio::test]
    async fn invalid_utf8_is_replaced() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"ok\n\xff\xfe\n").unwrap();

        let text = FileSource::new(file.path()).read_all().await.unwrap();
        assert!(text.starts_with("ok\n"));
        assert!(text.contains('\u{FFFD}'));
    }
}
