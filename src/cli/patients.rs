use std::{path::Path, process};

use chrono::NaiveDate;
use clap::Parser;
use clinica::{Patient, registry::DeleteError};
use dialoguer::Confirm;
use tracing::instrument;

use super::terminal::Colorize;

/// Subcommands for `clinic patients`.
#[derive(Debug, Parser)]
pub enum Patients {
    /// List patients sorted by name
    List,
    /// Add a patient, or replace one by id
    Add(Add),
    /// Remove a patient (blocked while they have future appointments)
    Remove(Remove),
}

impl Patients {
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
    for patient in registry.patients() {
        let subscriber = if patient.subscriber { " [subscriber]" } else { "" };
        println!(
            "{}  {} ({}) {}{}",
            patient.id.dim(),
            patient.name,
            patient.birth_date,
            patient.phone,
            subscriber.success(),
        );
    }
    Ok(())
}

/// Command arguments for `clinic patients add`.
#[derive(Debug, Parser)]
pub struct Add {
    /// Id of an existing patient to replace (omit to create)
    #[arg(long, value_name = "ID", default_value = "")]
    id: String,

    /// Full name
    #[arg(long)]
    name: String,

    /// Birth date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    birth_date: NaiveDate,

    /// Contact phone number
    #[arg(long)]
    phone: String,

    /// Contact email address (optional)
    #[arg(long)]
    email: Option<String>,

    /// Mark the patient as a subscriber
    #[arg(long)]
    subscriber: bool,
}

impl Add {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let mut registry = super::open_registry(root)?;
        let stored = registry.upsert_patient(Patient {
            id: self.id,
            name: self.name,
            birth_date: self.birth_date,
            phone: self.phone,
            email: self.email,
            subscriber: self.subscriber,
        })?;
        println!("{} {}", "Stored patient".success(), stored.id);
        Ok(())
    }
}

/// Command arguments for `clinic patients remove`.
#[derive(Debug, Parser)]
pub struct Remove {
    /// Id of the patient to remove
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
                .with_prompt(format!("Remove patient {}?", self.id))
                .default(false)
                .interact()?
        {
            return Ok(());
        }

        let mut registry = super::open_registry(root)?;
        match registry.delete_patient(&self.id) {
            Ok(()) => {
                println!("Removed patient {}", self.id);
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
