//! Error types for ndkwrap
//!
//! Centralized error handling using thiserror. Every resolution failure is
//! fatal; nothing here is retried.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for ndkwrap
#[derive(Error, Debug)]
pub enum WrapperError {
    #[error("Invalid setting `{field}`: {reason}")]
    InvalidSettings { field: &'static str, reason: String },

    #[error("Android NDK not found: {0}")]
    NdkNotFound(String),

    #[error("Unsupported host: {0}")]
    UnsupportedHost(String),

    #[error("NDK revision missing in {path:?}: {reason}")]
    RevisionMissing { path: PathBuf, reason: String },

    #[error("Failed to write toolchain file {path:?}: {source}")]
    TemplateWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for ndkwrap operations
pub type Result<T> = std::result::Result<T, WrapperError>;

impl WrapperError {
    /// Shorthand for an `InvalidSettings` error
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        WrapperError::InvalidSettings {
            field,
            reason: reason.into(),
        }
    }

    /// Process exit code for this error, one per error kind
    pub fn exit_code(&self) -> u8 {
        match self {
            WrapperError::InvalidSettings { .. } => 2,
            WrapperError::NdkNotFound(_) => 3,
            WrapperError::UnsupportedHost(_) => 4,
            WrapperError::RevisionMissing { .. } => 5,
            WrapperError::TemplateWriteFailed { .. } => 6,
            WrapperError::Config(_)
            | WrapperError::TomlParse(_)
            | WrapperError::TomlSerialize(_) => 7,
            WrapperError::Io(_) | WrapperError::Json(_) => 1,
        }
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            WrapperError::InvalidSettings { field, reason } => {
                format!("Setting `{}` is invalid: {}", field, reason)
            }
            WrapperError::NdkNotFound(msg) => format!(
                "Android NDK not found ({}). Pass --ndk-path or set ANDROID_NDK_HOME.",
                msg
            ),
            WrapperError::UnsupportedHost(msg) => {
                format!("This host cannot run the NDK prebuilt toolchains: {}", msg)
            }
            WrapperError::RevisionMissing { path, .. } => format!(
                "Could not read `Pkg.Revision` from {}. Is this a complete NDK?",
                path.display()
            ),
            WrapperError::TemplateWriteFailed { path, source } => {
                format!("Could not write {}: {}", path.display(), source)
            }
            WrapperError::Io(e) => format!("File operation failed: {}", e),
            WrapperError::Config(msg) => format!("Configuration error: {}", msg),
            _ => self.to_string(),
        }
    }
}
