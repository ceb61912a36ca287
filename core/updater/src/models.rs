//! Data models for the update flow

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::version::VersionMarker;

/// Local and remote version state gathered before deciding.
#[derive(Debug, Clone, Default, Serialize)]
pub struct VersionInfo {
    /// Marker found in the local worker script, if any
    pub current: Option<VersionMarker>,

    /// Marker found in the remote script, if the check succeeded
    pub latest: Option<VersionMarker>,

    /// Version-check failure, reduced to a display string
    pub check_error: Option<String>,

    /// When the check ran
    pub checked_at: Option<DateTime<Utc>>,
}

impl VersionInfo {
    /// Extracted local version value, if known.
    pub fn current_value(&self) -> Option<&str> {
        self.current.as_ref().map(|m| m.value.as_str())
    }

    /// Extracted remote version value, if known.
    pub fn latest_value(&self) -> Option<&str> {
        self.latest.as_ref().map(|m| m.value.as_str())
    }

    /// Whether auto-confirm mode would replace the script.
    ///
    /// An unknown latest version never equals any current version, so a
    /// failed or markerless check still counts as an update.
    pub fn update_available(&self) -> bool {
        self.latest_value().is_none() || self.current_value() != self.latest_value()
    }
}

/// What the reconciler decided to do.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UpdateDecision {
    /// Replace the local worker script
    pub replace_script: bool,

    /// Refresh the resource bundle
    pub replace_resources: bool,

    /// A preserved local script was deliberately left in place
    pub skipped_script: bool,
}

/// File operations actually performed by the apply phase.
#[derive(Debug, Clone, Default)]
pub struct UpdateOutcome {
    pub updated_script: bool,
    pub updated_resources: bool,
    pub skipped_script: bool,

    /// First failure, reduced to a display string; later steps were not
    /// attempted
    pub error: Option<String>,
}

/// Outcome record for one update invocation.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateReport {
    pub updated_script: bool,
    pub updated_resources: bool,
    pub skipped_script: bool,

    /// Fatal failure during the apply phase, if any
    pub error: Option<String>,

    /// Non-fatal version-check failure
    pub check_warning: Option<String>,

    pub current_version: Option<String>,
    pub latest_version: Option<String>,

    /// Marker value re-read from disk after the update
    pub post_update_version: Option<String>,
}
