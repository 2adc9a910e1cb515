use std::path::{Path, PathBuf};

use crate::message::FormatError;

/// The main error type for tideway-mail
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("Invalid attachment {}: {reason}", .path.display())]
    InvalidAttachment { path: PathBuf, reason: String },

    #[error("Subject format error: {0}")]
    Format(#[from] FormatError),

    #[error("Invalid '{field}' address '{address}': {reason}")]
    InvalidAddress {
        field: &'static str,
        address: String,
        reason: String,
    },

    #[error("Missing field: {0}")]
    MissingField(&'static str),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Failed to build email: {0}")]
    Build(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl MailError {
    pub fn invalid_attachment(path: impl AsRef<Path>, reason: impl Into<String>) -> Self {
        Self::InvalidAttachment {
            path: path.as_ref().to_path_buf(),
            reason: reason.into(),
        }
    }

    pub fn invalid_address(
        field: &'static str,
        address: impl Into<String>,
        reason: impl std::fmt::Display,
    ) -> Self {
        Self::InvalidAddress {
            field,
            address: address.into(),
            reason: reason.to_string(),
        }
    }

    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    pub fn build(msg: impl Into<String>) -> Self {
        Self::Build(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether the caller handed in something unusable, as opposed to a
    /// failure in the mail backend.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidAttachment { .. }
                | Self::Format(_)
                | Self::InvalidAddress { .. }
                | Self::MissingField(_)
        )
    }
}

/// Result type alias for tideway-mail operations
pub type Result<T> = std::result::Result<T, MailError>;

impl From<serde_json::Error> for MailError {
    fn from(err: serde_json::Error) -> Self {
        MailError::Config(format!("JSON error: {}", err))
    }
}
