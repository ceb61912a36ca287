//! Worker process supervision
//!
//! Spawns the macro worker through the resolved interpreter and relays
//! its combined stdout/stderr line by line over a channel, the way the
//! shell's terminal pane consumes it.

use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::{Child, Command};
use tokio::sync::mpsc;

use crate::capabilities::Capabilities;
use crate::config::Layout;
use crate::error::LauncherError;

/// A running worker process with its output relay.
///
/// Dropping the handle kills the child.
pub struct WorkerHandle {
    child: Child,
    /// Lines of combined stdout/stderr output
    pub output: mpsc::UnboundedReceiver<String>,
}

impl WorkerHandle {
    /// Whether the child is still running.
    pub fn is_running(&mut self) -> bool {
        matches!(self.child.try_wait(), Ok(None))
    }

    /// Wait for the worker to exit.
    pub async fn wait(&mut self) -> std::io::Result<std::process::ExitStatus> {
        self.child.wait().await
    }

    /// Kill the worker and reap it.
    pub async fn stop(&mut self) -> std::io::Result<()> {
        self.child.start_kill()?;
        self.child.wait().await?;
        Ok(())
    }
}

/// Spawns worker scripts for one installation.
pub struct WorkerRunner {
    layout: Layout,
    capabilities: Capabilities,
}

impl WorkerRunner {
    pub fn new(layout: Layout, capabilities: Capabilities) -> Self {
        Self {
            layout,
            capabilities,
        }
    }

    /// Spawn a script with captured, line-relayed output.
    pub fn spawn(&self, script: &Path) -> Result<WorkerHandle, LauncherError> {
        let mut command = self.build_command(script, false)?;
        command
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = command.spawn()?;
        let (sender, output) = mpsc::unbounded_channel();

        if let Some(stdout) = child.stdout.take() {
            relay_lines(stdout, sender.clone());
        }
        if let Some(stderr) = child.stderr.take() {
            relay_lines(stderr, sender);
        }

        tracing::info!("Worker started: {:?}", script);
        Ok(WorkerHandle { child, output })
    }

    /// Fire-and-forget launch without output capture (position helper).
    ///
    /// Prefers the console-less interpreter when one is available.
    pub fn spawn_detached(&self, script: &Path) -> Result<(), LauncherError> {
        let mut command = self.build_command(script, true)?;
        command
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        command.spawn()?;
        tracing::info!("Helper started: {:?}", script);
        Ok(())
    }

    fn build_command(&self, script: &Path, windowless: bool) -> Result<Command, LauncherError> {
        if !script.exists() {
            return Err(LauncherError::MissingScript(script.to_path_buf()));
        }
        let interpreter = if windowless {
            self.capabilities
                .windowless_python
                .as_ref()
                .or(self.capabilities.python.as_ref())
        } else {
            self.capabilities.python.as_ref()
        }
        .ok_or(LauncherError::NoInterpreter)?;

        let mut command = Command::new(interpreter);
        command
            .arg(script)
            .current_dir(self.layout.root())
            .env("PYTHONUNBUFFERED", "1")
            .env("PYTHONPATH", self.python_path())
            .kill_on_drop(true);
        Ok(command)
    }

    /// PYTHONPATH with the install root first, preserving any inherited
    /// value.
    fn python_path(&self) -> OsString {
        let mut paths: Vec<PathBuf> = vec![self.layout.root().to_path_buf()];
        if let Some(existing) = env::var_os("PYTHONPATH") {
            paths.extend(env::split_paths(&existing));
        }
        env::join_paths(paths)
            .unwrap_or_else(|_| self.layout.root().as_os_str().to_os_string())
    }
}

fn relay_lines<R>(reader: R, sender: mpsc::UnboundedSender<String>)
where
    R: tokio::io::AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut lines = BufReader::new(reader).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            if sender.send(line).is_err() {
                break;
            }
        }
    });
}
