//! Error types for the launcher crate

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while spawning or supervising worker scripts.
#[derive(Debug, Error)]
pub enum LauncherError {
    /// The requested worker script is not installed
    #[error("Worker script not found: {0}")]
    MissingScript(PathBuf),

    /// No usable Python interpreter was detected
    #[error("No Python interpreter available; install Python or set WINTER_PYTHON")]
    NoInterpreter,

    /// Process or filesystem failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
