//! LabelKeeper CLI entry point.
//!
//! This binary is the composition root. Responsibilities:
//!
//! 1. **Parse configuration**: flags, environment, and the optional
//!    `.labelkeeper/config.toml` settings file.
//! 2. **Wire observability**: `tracing-subscriber` with an `EnvFilter` read
//!    from `LABELKEEPER_LOG` and an optional JSON layer. Logs go to stderr so
//!    stdout carries only command output.
//! 3. **Construct the catalog and collaborators** and inject them into the
//!    engines and the [`handlers::Bot`].
//!
//! ## Commands
//!
//! - `catalog`: print the preset catalog
//! - `plan`: reconcile a list of remote labels and print the plan
//! - `changelog`: draft a release body from JSON snapshots
//! - `milestone`: print the congratulation for an issue count, if any
//! - `replay`: run a webhook payload through the bot against a recorded
//!   platform snapshot and print the requested mutations

mod config;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;

use handlers::{Bot, PlatformSnapshot, RecordingPlatform};
use presets::milestone::{is_milestone, message};
use presets::{
    reconcile, ChangelogDrafter, EventPayload, InboundEvent, LabelCatalog, PullRequest, Release,
    RemoteLabel, RemotePullRequest,
};

use crate::config::Settings;

#[derive(Parser)]
#[command(name = "labelkeeper")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Keeps repository labels on a preset catalog and drafts release changelogs")]
struct Cli {
    /// Enable debug logging (ignored when LABELKEEPER_LOG is set)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true, env = "LABELKEEPER_JSON_LOGS")]
    json: bool,

    /// Settings file
    #[arg(
        long,
        global = true,
        env = "LABELKEEPER_CONFIG",
        default_value = ".labelkeeper/config.toml"
    )]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the preset label catalog as JSON
    Catalog,

    /// Reconcile remote labels against the catalog and print the plan
    Plan {
        /// JSON array of remote labels (`name`, `description`, `color`)
        #[arg(short, long)]
        labels: PathBuf,
    },

    /// Draft the changelog of a release and print the new body
    Changelog {
        /// JSON release object
        #[arg(short, long)]
        release: PathBuf,

        /// JSON array of pull requests
        #[arg(short, long)]
        pull_requests: PathBuf,

        /// JSON object of the last published release
        #[arg(short, long)]
        last_published: Option<PathBuf>,
    },

    /// Print the congratulation for an author's issue count, if it is a milestone
    Milestone {
        count: u64,
    },

    /// Run a webhook payload through the bot against a recorded platform
    Replay {
        /// Webhook event name (e.g. `pull_request`, `issues`, `label`)
        #[arg(short, long)]
        event: String,

        /// JSON webhook payload
        #[arg(short, long)]
        payload: PathBuf,

        /// JSON platform snapshot served to the bot
        #[arg(short, long)]
        snapshot: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.json, cli.verbose);

    let settings = Settings::load(&cli.config).context("Failed to load settings")?;
    let catalog = Arc::new(LabelCatalog::preset().context("Preset catalog is invalid")?);
    info!(labels = catalog.len(), "Catalog loaded");

    match cli.command {
        Commands::Catalog => print_json(&catalog.collections()),
        Commands::Plan { labels } => {
            let remote: Vec<RemoteLabel> = read_json(&labels)?;
            print_json(&reconcile(&remote, &catalog))
        }
        Commands::Changelog {
            release,
            pull_requests,
            last_published,
        } => {
            let current: Release = read_json(&release)?;
            let last: Option<Release> = last_published.as_deref().map(read_json).transpose()?;
            let merged: Vec<PullRequest> = read_json::<Vec<RemotePullRequest>>(&pull_requests)?
                .iter()
                .map(|pr| PullRequest::from_remote(pr, &catalog))
                .collect();

            let drafter = ChangelogDrafter::new(settings.changelog);
            print!("{}", drafter.draft_release(&current, last.as_ref(), &merged));
            Ok(())
        }
        Commands::Milestone { count } => {
            if is_milestone(count) {
                println!("{}", message(count));
            } else {
                info!(count, "Not a milestone");
            }
            Ok(())
        }
        Commands::Replay {
            event,
            payload,
            snapshot,
        } => cmd_replay(catalog, settings, event, &payload, snapshot.as_deref()).await,
    }
}

async fn cmd_replay(
    catalog: Arc<LabelCatalog>,
    settings: Settings,
    event: String,
    payload: &Path,
    snapshot: Option<&Path>,
) -> Result<()> {
    let payload: EventPayload = read_json(payload)?;
    let snapshot: PlatformSnapshot = snapshot.map(read_json).transpose()?.unwrap_or_default();

    let platform = Arc::new(RecordingPlatform::new(snapshot));
    let bot = Bot::new(catalog, platform.clone(), platform.clone(), platform.clone())
        .with_changelog_settings(settings.changelog);

    let report = bot.handle(&InboundEvent::new(event, payload)).await;

    let mut failed = 0;
    let results: Vec<serde_json::Value> = report
        .results
        .iter()
        .map(|(task, result)| match result {
            Ok(outcome) => json!({ "task": task, "result": outcome }),
            Err(err) => {
                failed += 1;
                json!({ "task": task, "error": err.to_string() })
            }
        })
        .collect();

    print_json(&json!({
        "pass": report.pass,
        "results": results,
        "mutations": platform.mutations().await,
    }))?;

    if failed > 0 {
        bail!("{failed} task(s) failed");
    }
    Ok(())
}

fn init_tracing(json: bool, verbose: bool) {
    let filter = EnvFilter::try_from_env("LABELKEEPER_LOG")
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse {}", path.display()))
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
