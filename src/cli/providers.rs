use std::{path::Path, process};

use clap::Parser;
use clinica::{Provider, Specialty, registry::DeleteError};
use dialoguer::Confirm;
use tracing::instrument;

use super::terminal::Colorize;

/// Parse a specialty from user input.
///
/// This is a CLI boundary function; shorthands like "general" or "surgery"
/// are accepted.
fn parse_specialty(s: &str) -> Result<Specialty, String> {
    s.parse().map_err(|e| format!("{e}"))
}

/// Subcommands for `clinic providers`.
#[derive(Debug, Parser)]
pub enum Providers {
    /// List providers sorted by name
    List,
    /// Add a provider, or replace one by id
    Add(Add),
    /// Remove a provider (blocked while they have future appointments)
    Remove(Remove),
}

impl Providers {
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        match self {
            Self::List => list(root),
            Self::Add(command) => command.run(root),
            Self::Remove(command) => command.run(root),
        }
    }
}

fn list(root: &Path) -> anyhow::Result<()> {
    let registry = super::open_registry(root)?;
    for provider in registry.providers() {
        println!(
            "{}  {} — {} <{}>",
            provider.id.dim(),
            provider.name,
            provider.specialty,
            provider.email
        );
    }
    Ok(())
}

/// Command arguments for `clinic providers add`.
#[derive(Debug, Parser)]
pub struct Add {
    /// Id of an existing provider to replace (omit to create)
    #[arg(long, value_name = "ID", default_value = "")]
    id: String,

    /// Full name
    #[arg(long)]
    name: String,

    /// Specialty (general, orthodontics, endodontics, surgery, pediatric)
    #[arg(long, value_parser = parse_specialty)]
    specialty: Specialty,

    /// Contact email address
    #[arg(long)]
    email: String,
}

impl Add {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let mut registry = super::open_registry(root)?;
        let stored = registry.upsert_provider(Provider {
            id: self.id,
            name: self.name,
            specialty: self.specialty,
            email: self.email,
        })?;
        println!("{} {}", "Stored provider".success(), stored.id);
        Ok(())
    }
}

/// Command arguments for `clinic providers remove`.
#[derive(Debug, Parser)]
pub struct Remove {
    /// Id of the provider to remove
    id: String,

    /// Skip the confirmation prompt
    #[arg(long)]
    yes: bool,
}

impl Remove {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        if !self.yes
            && !Confirm::new()
                .with_prompt(format!("Remove provider {}?", self.id))
                .default(false)
                .interact()?
        {
            return Ok(());
        }

        let mut registry = super::open_registry(root)?;
        match registry.delete_provider(&self.id) {
            Ok(()) => {
                println!("Removed provider {}", self.id);
                Ok(())
            }
            Err(error @ DeleteError::FutureAppointments(_)) => {
                eprintln!("{}", error.to_string().warning());
                process::exit(1);
            }
            Err(error) => Err(error.into()),
        }
    }
}
