//! Update flow implementation

use std::path::Path;

use chrono::Utc;
use tokio::io::AsyncWriteExt;

use crate::archive::extract_zip;
use crate::config::UpdateConfig;
use crate::error::UpdateError;
use crate::models::{UpdateDecision, UpdateOutcome, UpdateReport, VersionInfo};
use crate::prompt::Prompt;
use crate::version::{read_version_marker, VersionMarker};

/// Caller-selected behavior for one update invocation.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Make every replace/no-replace decision without prompting
    pub auto_confirm: bool,

    /// Never overwrite an existing local worker script
    pub preserve_local: bool,
}

/// Decide which parts of the installation to replace.
///
/// Precedence: a missing local script forces a full install; preserve-local
/// pins an existing script; auto-confirm replaces the script only when the
/// remote version is unknown or differs from the current one. Everything
/// else asks the prompt, defaulting to "no".
pub fn decide(
    local_exists: bool,
    preserve_local: bool,
    auto_confirm: bool,
    current: Option<&str>,
    latest: Option<&str>,
    prompt: &mut dyn Prompt,
) -> UpdateDecision {
    let mut decision = UpdateDecision::default();

    if !local_exists {
        if auto_confirm
            || prompt.confirm("Would you like to download the worker script and resources? [Y/N]")
        {
            decision.replace_script = true;
            decision.replace_resources = true;
        }
        return decision;
    }

    if preserve_local {
        decision.skipped_script = true;
        decision.replace_resources =
            auto_confirm || prompt.confirm("Would you like to update resources? [Y/N]");
        return decision;
    }

    if auto_confirm {
        decision.replace_resources = true;
        decision.replace_script = latest.is_none() || current != latest;
        return decision;
    }

    if current == latest {
        decision.replace_script =
            prompt.confirm("The local script is already up to date, replace it anyway? [Y/N]");
        decision.replace_resources =
            prompt.confirm("Would you like to update resources? [Y/N]");
    } else if prompt
        .confirm("The local script is out of date. Update? This also updates resources. [Y/N]")
    {
        decision.replace_script = true;
        decision.replace_resources = true;
    }
    decision
}

/// Update reconciler bound to one installation root.
///
/// One logical operation per invocation; no internal locking. Concurrent
/// invocations against the same install root are unsupported.
pub struct Updater {
    config: UpdateConfig,
    http_client: reqwest::Client,
}

impl Updater {
    /// Create an updater with a shared HTTP client.
    pub fn new(config: UpdateConfig, http_client: reqwest::Client) -> Self {
        Self {
            config,
            http_client,
        }
    }

    pub fn config(&self) -> &UpdateConfig {
        &self.config
    }

    /// Fetch the remote script and scan it for the version marker.
    ///
    /// `Ok(None)` means the body carried no token; timeouts, connection
    /// failures and non-2xx answers are errors.
    pub async fn fetch_remote_marker(&self) -> Result<Option<VersionMarker>, UpdateError> {
        let url = &self.config.script_url;
        let response = self
            .http_client
            .get(url)
            .timeout(self.config.check_timeout)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(UpdateError::Status {
                status: response.status(),
                url: url.clone(),
            });
        }
        let body = response.text().await?;
        Ok(VersionMarker::scan(&body))
    }

    /// Gather local and remote version state.
    ///
    /// A failed remote check is reduced to a warning string so the flow
    /// can still proceed with the latest version unknown.
    pub async fn version_info(&self) -> VersionInfo {
        let current = match read_version_marker(&self.config.script_path()) {
            Ok(marker) => marker,
            Err(e) => {
                tracing::warn!("Failed to read local script: {}", e);
                None
            }
        };
        let (latest, check_error) = match self.fetch_remote_marker().await {
            Ok(marker) => (marker, None),
            Err(e) => {
                tracing::warn!("Version check failed: {}", e);
                (None, Some(e.to_string()))
            }
        };
        VersionInfo {
            current,
            latest,
            check_error,
            checked_at: Some(Utc::now()),
        }
    }

    /// Perform the file operations implied by a decision.
    ///
    /// The script replacement runs before the resource refresh; the first
    /// failure is reduced to a display string and later steps are not
    /// attempted.
    pub async fn apply(&self, decision: &UpdateDecision) -> UpdateOutcome {
        let mut outcome = UpdateOutcome {
            skipped_script: decision.skipped_script,
            ..UpdateOutcome::default()
        };

        if decision.replace_script {
            match self.download_script().await {
                Ok(()) => outcome.updated_script = true,
                Err(e) => {
                    tracing::error!("Script update failed: {}", e);
                    outcome.error = Some(e.to_string());
                    return outcome;
                }
            }
        }

        if decision.replace_resources {
            match self.refresh_resources().await {
                Ok(()) => outcome.updated_resources = true,
                Err(e) => {
                    tracing::error!("Resource update failed: {}", e);
                    outcome.error = Some(e.to_string());
                }
            }
        }
        outcome
    }

    /// Run the full update flow.
    ///
    /// Version-check failures are reported as a warning and the flow
    /// proceeds with the latest version unknown; apply-phase failures end
    /// up in the report's `error`.
    pub async fn run(&self, options: RunOptions, prompt: &mut dyn Prompt) -> UpdateReport {
        let info = self.version_info().await;
        let local_exists = self.config.script_path().exists();

        let mut report = UpdateReport {
            check_warning: info.check_error.clone(),
            current_version: info.current_value().map(str::to_string),
            latest_version: info.latest_value().map(str::to_string),
            ..UpdateReport::default()
        };

        if local_exists {
            prompt.line("It looks like you already have the files.");
            prompt.line(&format!(
                "Current version: {}",
                report.current_version.as_deref().unwrap_or("unknown")
            ));
            prompt.line(&format!(
                "Latest version: {}",
                report.latest_version.as_deref().unwrap_or("unknown")
            ));
            if let Some(warning) = &report.check_warning {
                prompt.line(&format!("Version check warning: {}", warning));
            }
            if options.auto_confirm && options.preserve_local {
                prompt.line("Preserve mode: the local worker script will not be replaced.");
            }
        }

        let decision = decide(
            local_exists,
            options.preserve_local,
            options.auto_confirm,
            info.current_value(),
            info.latest_value(),
            prompt,
        );

        let outcome = self.apply(&decision).await;
        report.updated_script = outcome.updated_script;
        report.updated_resources = outcome.updated_resources;
        report.skipped_script = outcome.skipped_script;
        report.error = outcome.error;

        report.post_update_version = read_version_marker(&self.config.script_path())
            .ok()
            .flatten()
            .map(|m| m.value);

        if let Some(error) = &report.error {
            prompt.line(error);
        } else if !decision.replace_script && !decision.replace_resources {
            prompt.line("No update actions selected.");
        } else if decision.replace_resources
            && !decision.replace_script
            && report.current_version == report.latest_version
        {
            prompt.line("The worker script is already up to date. Resources updated.");
        } else {
            prompt.line("Update finished.");
        }

        report
    }

    async fn download_script(&self) -> Result<(), UpdateError> {
        let path = self.config.script_path();
        tracing::info!("Downloading {} to {:?}", self.config.script_url, path);
        self.download_to(&self.config.script_url, &path).await
    }

    async fn refresh_resources(&self) -> Result<(), UpdateError> {
        let archive_path = self.config.archive_path();
        tracing::info!(
            "Downloading {} to {:?}",
            self.config.resources_url,
            archive_path
        );
        self.download_to(&self.config.resources_url, &archive_path)
            .await?;
        extract_zip(archive_path.clone(), self.config.install_root.clone()).await?;
        tokio::fs::remove_file(&archive_path).await?;
        Ok(())
    }

    /// Stream a remote resource to a local file.
    async fn download_to(&self, url: &str, path: &Path) -> Result<(), UpdateError> {
        let mut response = self
            .http_client
            .get(url)
            .timeout(self.config.download_timeout)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(UpdateError::Status {
                status: response.status(),
                url: url.to_string(),
            });
        }
        let mut file = tokio::fs::File::create(path).await?;
        while let Some(chunk) = response.chunk().await? {
            file.write_all(&chunk).await?;
        }
        file.flush().await?;
        Ok(())
    }
}
