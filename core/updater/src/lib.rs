//! Update reconciler for the Winter Event macro distribution
//!
//! This crate keeps a local installation of the macro worker script and
//! its image-resource bundle in sync with the upstream GitHub repository:
//! - Scanning script sources for the `VERSION_N` marker line
//! - Comparing local and remote versions (string equality, never ordering)
//! - Downloading the script and the resource bundle, extracting the
//!   latter over the install root
//!
//! All replace/no-replace decisions go through [`decide`], shared by the
//! auto-confirm and interactive paths; interactive input is injected via
//! the [`Prompt`] trait so headless callers never touch stdin.

mod archive;
mod config;
mod error;
mod models;
mod prompt;
mod service;
mod version;

pub use config::{UpdateConfig, DEFAULT_RESOURCES_URL, DEFAULT_SCRIPT_URL};
pub use error::UpdateError;
pub use models::{UpdateDecision, UpdateOutcome, UpdateReport, VersionInfo};
pub use prompt::{Prompt, SilentPrompt, TermPrompt};
pub use service::{decide, RunOptions, Updater};
pub use version::{read_version_marker, VersionMarker, VERSION_TOKEN};
