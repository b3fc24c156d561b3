//! Error types for the userdeck plugin.
//!
//! This module defines the crate-wide error type [`UserdeckError`], the
//! [`LoadError`] raised by the one-shot remote fetch, and a [`Result`] alias.
//! All errors derive their `Error` implementations through `thiserror`.

use thiserror::Error;

/// Failure of the one-shot user fetch.
///
/// The query store only distinguishes success from failure; the variants exist
/// so the cause can be traced before it is collapsed into the fixed
/// user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// The endpoint answered with a non-success HTTP status.
    #[error("endpoint returned HTTP {0}")]
    Status(u16),

    /// The response body was not a list of user records.
    #[error("failed to decode users: {0}")]
    Decode(String),

    /// The host refused the web access permission.
    #[error("web access permission denied")]
    PermissionDenied,
}

/// The main error type for userdeck operations.
///
/// Covers everything outside the remote fetch: exporting, file I/O,
/// serialization, theme loading, worker communication and configuration.
///
/// # Examples
///
/// ```
/// use userdeck::UserdeckError;
///
/// fn validate_export_dir(dir: &str) -> Result<(), UserdeckError> {
///     if dir.is_empty() {
///         return Err(UserdeckError::Config("export_dir is empty".to_string()));
///     }
///     Ok(())
/// }
/// ```
#[derive(Debug, Error)]
pub enum UserdeckError {
    /// Loading users from the remote endpoint failed.
    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    /// Shaping or offering an export file failed.
    #[error("Export error: {0}")]
    Export(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Theme parsing or application failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Communication with the background worker failed.
    #[error("Worker communication error: {0}")]
    Worker(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for userdeck operations.
pub type Result<T> = std::result::Result<T, UserdeckError>;
