//! Persisted launcher settings

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use updater::UpdateConfig;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("{operation} '{path}': {source}")]
    Io {
        operation: &'static str,
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Failed to serialize TOML: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Launcher settings persisted as TOML next to the installation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LauncherSettings {
    /// Explicit Python interpreter; overrides detection
    pub python: Option<PathBuf>,

    /// Override for the worker script URL
    pub script_url: Option<String>,

    /// Override for the resource bundle URL
    pub resources_url: Option<String>,

    /// Make update decisions without prompting
    pub auto_confirm: bool,

    /// Never overwrite the local worker script during updates
    pub preserve_local_script: bool,

    /// Version-check timeout in seconds
    pub check_timeout_secs: u64,

    /// Download timeout in seconds
    pub download_timeout_secs: u64,
}

impl Default for LauncherSettings {
    fn default() -> Self {
        Self {
            python: None,
            script_url: None,
            resources_url: None,
            auto_confirm: false,
            preserve_local_script: false,
            check_timeout_secs: 20,
            download_timeout_secs: 60,
        }
    }
}

impl LauncherSettings {
    /// Load settings from file, creating it with defaults when missing.
    ///
    /// The file is written back on every load so fields added in newer
    /// releases get persisted with their default values.
    pub async fn load_or_create(path: &Path) -> Result<Self, SettingsError> {
        match tokio::fs::read_to_string(path).await {
            Ok(content) => {
                let settings: Self = toml::from_str(&content)?;
                settings.save(path).await?;
                Ok(settings)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                if let Some(parent) = path.parent() {
                    tokio::fs::create_dir_all(parent)
                        .await
                        .map_err(|e| SettingsError::Io {
                            operation: "Failed to create settings directory",
                            path: parent.display().to_string(),
                            source: e,
                        })?;
                }
                let default = Self::default();
                default.save(path).await?;
                Ok(default)
            }
            Err(e) => Err(SettingsError::Io {
                operation: "Failed to read settings file",
                path: path.display().to_string(),
                source: e,
            }),
        }
    }

    /// Write settings atomically using the temp file + rename pattern.
    pub async fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let toml_str = toml::to_string_pretty(self)?;
        let tmp_path = path.with_extension("toml.tmp");
        tokio::fs::write(&tmp_path, &toml_str)
            .await
            .map_err(|e| SettingsError::Io {
                operation: "Failed to write settings temp file",
                path: tmp_path.display().to_string(),
                source: e,
            })?;
        tokio::fs::rename(&tmp_path, path)
            .await
            .map_err(|e| SettingsError::Io {
                operation: "Failed to rename settings file",
                path: path.display().to_string(),
                source: e,
            })?;
        Ok(())
    }

    /// Apply URL and timeout overrides onto an update configuration.
    pub fn apply_to(&self, mut config: UpdateConfig) -> UpdateConfig {
        if let Some(url) = &self.script_url {
            config = config.script_url(url.clone());
        }
        if let Some(url) = &self.resources_url {
            config = config.resources_url(url.clone());
        }
        config
            .check_timeout(Duration::from_secs(self.check_timeout_secs))
            .download_timeout(Duration::from_secs(self.download_timeout_secs))
    }
}
