//! Error types for the updater crate

use thiserror::Error;

/// Errors that can occur while reconciling the local installation.
///
/// At the boundary of the update flow these are reduced to display
/// strings in the report; the enum itself is the structured code
/// available to internal callers.
#[derive(Debug, Error)]
pub enum UpdateError {
    /// Network failure during a version check or download
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Remote server answered with a non-success status
    #[error("Server returned {status} for {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    /// Local filesystem failure during write or extraction
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Downloaded resource bundle is not a valid zip archive
    #[error("Invalid archive: {0}")]
    Archive(#[from] zip::result::ZipError),
}
