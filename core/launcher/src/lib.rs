//! Launcher shell support for the Winter Event macro
//!
//! Everything the control-panel binary needs around the update
//! reconciler: the installation layout, persisted launcher settings,
//! startup capability detection, the file-check report, and the worker
//! process runner that relays macro output line by line.

mod capabilities;
mod config;
mod error;
mod filecheck;
mod runner;
mod settings;

pub use capabilities::{Capabilities, PYTHON_ENV};
pub use config::Layout;
pub use error::LauncherError;
pub use filecheck::{run_file_check, FileCheckEntry};
pub use runner::{WorkerHandle, WorkerRunner};
pub use settings::{LauncherSettings, SettingsError};
