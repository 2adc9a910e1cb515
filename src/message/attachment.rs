//! File attachments

use std::fs::File;
use std::path::{Path, PathBuf};

use crate::error::{MailError, Result};

/// A file to bundle with an outgoing message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// Location of the file on disk
    pub path: PathBuf,
    /// Name shown to recipients; falls back to the file name
    pub name: Option<String>,
}

impl Attachment {
    /// Check that `path` is a readable regular file and wrap it
    ///
    /// Only the file's metadata is probed and the file is opened once; its
    /// contents are read by the mailer at send time.
    pub fn open(path: impl Into<PathBuf>, name: Option<String>) -> Result<Self> {
        let path = path.into();
        check_readable(&path)?;
        Ok(Self { path, name })
    }

    /// The name recipients will see
    pub fn display_name(&self) -> String {
        if let Some(ref name) = self.name {
            return name.clone();
        }
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "attachment".to_string())
    }

    /// Read the file contents
    #[cfg(feature = "smtp")]
    pub(crate) async fn read(&self) -> Result<Vec<u8>> {
        tokio::fs::read(&self.path)
            .await
            .map_err(|e| MailError::invalid_attachment(&self.path, format!("failed to read file: {}", e)))
    }
}

fn check_readable(path: &Path) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => MailError::invalid_attachment(path, "file does not exist"),
        _ => MailError::invalid_attachment(path, format!("cannot stat file: {}", e)),
    })?;

    if !metadata.is_file() {
        return Err(MailError::invalid_attachment(path, "not a regular file"));
    }

    File::open(path)
        .map_err(|e| MailError::invalid_attachment(path, format!("file is not readable: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_open_existing_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "report contents").unwrap();

        let attachment = Attachment::open(file.path(), Some("report.txt".to_string())).unwrap();
        assert_eq!(attachment.path, file.path());
        assert_eq!(attachment.display_name(), "report.txt");
    }

    #[test]
    fn test_display_name_defaults_to_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("invoice.pdf");
        std::fs::write(&path, b"%PDF").unwrap();

        let attachment = Attachment::open(&path, None).unwrap();
        assert_eq!(attachment.display_name(), "invoice.pdf");
    }

    #[test]
    fn test_open_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Attachment::open(dir.path().join("nope.txt"), None).unwrap_err();
        assert!(matches!(err, MailError::InvalidAttachment { .. }));
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_open_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = Attachment::open(dir.path(), None).unwrap_err();
        assert!(err.to_string().contains("not a regular file"));
    }
}
