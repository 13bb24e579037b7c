use std::path::{Path, PathBuf};

mod appointments;
mod patients;
mod providers;
mod status;
mod terminal;

use anyhow::Context;
use appointments::Appointments;
use chrono::{DateTime, Utc};
use clap::ArgAction;
use clinica::{Config, FileStore, Registry};
use patients::Patients;
use providers::Providers;
use status::Status;

/// Parse an RFC 3339 timestamp from the command line, normalizing any
/// offset to UTC.
///
/// This is a CLI boundary function; the core only ever sees UTC instants.
fn parse_start(s: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("{e} (expected e.g. 2024-06-01T10:00:00Z)"))
}

/// Opens the registry over the data directory at `root`.
fn open_registry(root: &Path) -> anyhow::Result<Registry<FileStore>> {
    let store = FileStore::open(root)
        .with_context(|| format!("failed to open data directory {}", root.display()))?;
    Registry::open(store).context("failed to load clinic records")
}

/// Loads the practice configuration, falling back to defaults.
fn load_config(root: &Path) -> Config {
    let path = root.join("config.toml");
    Config::load(&path).unwrap_or_else(|e| {
        tracing::debug!("Failed to load config: {e}");
        Config::default()
    })
}

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// The path to the clinic data directory
    #[arg(short, long, default_value = ".", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        self.command
            .unwrap_or_else(|| Command::Status(Status::default()))
            .run(&self.root)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Show the practice overview (default)
    Status(Status),

    /// Manage providers
    #[command(subcommand)]
    Providers(Providers),

    /// Manage patients
    #[command(subcommand)]
    Patients(Patients),

    /// Manage appointments and check availability
    #[command(subcommand)]
    Appointments(Appointments),
}

impl Command {
    fn run(self, root: &Path) -> anyhow::Result<()> {
        match self {
            Self::Status(command) => command.run(root),
            Self::Providers(command) => command.run(root),
            Self::Patients(command) => command.run(root),
            Self::Appointments(command) => command.run(root),
        }
    }
}
