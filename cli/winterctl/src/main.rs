use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use launcher::{run_file_check, Capabilities, LauncherSettings, Layout, WorkerRunner};
use updater::{Prompt, RunOptions, SilentPrompt, TermPrompt, UpdateConfig, Updater};

#[derive(Parser, Debug)]
#[command(
    name = "winterctl",
    version,
    about = "Control panel for the Winter Event macro: keep it updated, launch it, watch it"
)]
struct Cli {
    /// Installation root (defaults to the executable's directory)
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compare the local worker script version against the remote source
    Check {
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Download or refresh the worker script and resource bundle
    Update {
        /// Answer yes to everything (no prompts)
        #[arg(long, short = 'y')]
        yes: bool,
        /// Never overwrite the local worker script
        #[arg(long)]
        preserve_local: bool,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Report which files of the installation are present
    Doctor,
    /// Start the macro worker and relay its output until it exits
    Run {
        /// Skip the automatic install of a missing distribution
        #[arg(long)]
        no_update: bool,
    },
    /// Launch the window-positioning helper and return immediately
    Position,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let layout = Layout::new(cli.root.clone().unwrap_or_else(Layout::default_root));
    let settings = LauncherSettings::load_or_create(&layout.settings_path()).await?;
    let mut capabilities = Capabilities::detect();
    if let Some(python) = &settings.python {
        capabilities.python = Some(python.clone());
    }

    match cli.command {
        Commands::Check { json } => check(&layout, &settings, json).await,
        Commands::Update {
            yes,
            preserve_local,
            json,
        } => update(&layout, &settings, &capabilities, yes, preserve_local, json).await,
        Commands::Doctor => {
            doctor(&layout);
            Ok(())
        }
        Commands::Run { no_update } => {
            run_worker(&layout, &settings, &capabilities, no_update).await
        }
        Commands::Position => position(&layout, &capabilities),
    }
}

fn build_updater(layout: &Layout, settings: &LauncherSettings) -> Updater {
    let config = settings.apply_to(UpdateConfig::new(layout.root()));
    Updater::new(config, reqwest::Client::new())
}

async fn check(layout: &Layout, settings: &LauncherSettings, json: bool) -> Result<()> {
    let updater = build_updater(layout, settings);
    let info = updater.version_info().await;

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!(
        "Current version: {}",
        info.current_value().unwrap_or("unknown")
    );
    println!(
        "Latest version:  {}",
        info.latest_value().unwrap_or("unknown")
    );
    if let Some(warning) = &info.check_error {
        println!("Version check warning: {}", warning);
    } else if info.update_available() {
        println!("An update is available; run `winterctl update`.");
    } else {
        println!("The worker script is up to date.");
    }
    Ok(())
}

async fn update(
    layout: &Layout,
    settings: &LauncherSettings,
    capabilities: &Capabilities,
    yes: bool,
    preserve_local: bool,
    json: bool,
) -> Result<()> {
    let updater = build_updater(layout, settings);
    let options = RunOptions {
        // Prompting needs a terminal; JSON output and non-tty callers get
        // every decision made programmatically.
        auto_confirm: yes || json || settings.auto_confirm || !capabilities.interactive,
        preserve_local: preserve_local || settings.preserve_local_script,
    };

    let report = {
        let mut prompt: Box<dyn Prompt> = if json {
            Box::new(SilentPrompt)
        } else {
            Box::new(TermPrompt)
        };
        updater.run(options, prompt.as_mut()).await
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    if report.error.is_some() {
        anyhow::bail!("update failed");
    }
    Ok(())
}

fn doctor(layout: &Layout) {
    println!("Running file check...");
    println!("Install root: {}", layout.root().display());
    for entry in run_file_check(layout) {
        let status = if entry.exists { "ok" } else { "MISSING" };
        println!("{:>8}  {}  ({})", status, entry.path.display(), entry.label);
    }
}

async fn run_worker(
    layout: &Layout,
    settings: &LauncherSettings,
    capabilities: &Capabilities,
    no_update: bool,
) -> Result<()> {
    if !no_update && !layout.worker_script().exists() {
        tracing::info!("Worker script missing; installing the distribution first");
        let updater = build_updater(layout, settings);
        let options = RunOptions {
            auto_confirm: true,
            preserve_local: settings.preserve_local_script,
        };
        let report = updater.run(options, &mut TermPrompt).await;
        if let Some(error) = report.error {
            anyhow::bail!("install failed: {}", error);
        }
    }

    let runner = WorkerRunner::new(layout.clone(), capabilities.clone());
    let mut worker = runner.spawn(&layout.worker_script())?;
    println!("Macro started. Press Ctrl-C to stop it.");

    loop {
        tokio::select! {
            line = worker.output.recv() => {
                match line {
                    Some(line) => println!("{}", line),
                    None => break,
                }
            }
            _ = tokio::signal::ctrl_c() => {
                println!("Stopping the worker...");
                worker.stop().await?;
                println!("Macro stopped.");
                return Ok(());
            }
        }
    }

    let status = worker.wait().await?;
    if status.success() {
        println!("Macro process exited normally.");
    } else {
        println!("Macro process exited with {}.", status);
    }
    Ok(())
}

fn position(layout: &Layout, capabilities: &Capabilities) -> Result<()> {
    let runner = WorkerRunner::new(layout.clone(), capabilities.clone());
    runner.spawn_detached(&layout.position_script())?;
    println!("Waiting for position. Press Start when ready.");
    Ok(())
}
