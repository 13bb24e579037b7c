use std::{path::Path, process};

use chrono::{DateTime, Utc};
use clap::Parser;
use clinica::{Appointment, FileStore, Registry, registry::ScheduleError};
use dialoguer::Confirm;
use tracing::instrument;

use super::terminal::Colorize;

/// Subcommands for `clinic appointments`.
#[derive(Debug, Parser)]
pub enum Appointments {
    /// List appointments sorted by start, optionally one provider's agenda
    List(List),
    /// Schedule a new appointment, or reschedule one by id
    Schedule(Schedule),
    /// Cancel an appointment
    Cancel(Cancel),
    /// Check whether a slot is free before committing to it
    Check(Check),
}

impl Appointments {
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        match self {
            Self::List(command) => command.run(root),
            Self::Schedule(command) => command.run(root),
            Self::Cancel(command) => command.run(root),
            Self::Check(command) => command.run(root),
        }
    }
}

/// Command arguments for `clinic appointments list`.
#[derive(Debug, Parser)]
pub struct List {
    /// Restrict to one provider's agenda
    #[arg(long, value_name = "ID")]
    provider: Option<String>,
}

impl List {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let registry = super::open_registry(root)?;
        let appointments = self.provider.as_deref().map_or_else(
            || registry.appointments(),
            |id| registry.appointments_for_provider(id),
        );

        for appointment in appointments {
            print_row(&registry, &appointment);
        }
        Ok(())
    }
}

fn print_row(registry: &Registry<FileStore>, appointment: &Appointment) {
    let provider = registry
        .provider(&appointment.provider_id)
        .map_or_else(|| "(removed provider)".to_string(), |p| p.name.clone());
    let patient = registry
        .patient(&appointment.patient_id)
        .map_or_else(|| "(removed patient)".to_string(), |p| p.name.clone());
    println!(
        "{}  {}–{}  {patient} with {provider} — {}",
        appointment.id.dim(),
        appointment.start.format("%Y-%m-%d %H:%M"),
        appointment.end().format("%H:%M"),
        appointment.reason
    );
}

/// Command arguments for `clinic appointments schedule`.
#[derive(Debug, Parser)]
pub struct Schedule {
    /// Id of an existing appointment to reschedule (omit to create)
    #[arg(long, value_name = "ID", default_value = "")]
    id: String,

    /// Id of the provider
    #[arg(long, value_name = "ID")]
    provider: String,

    /// Id of the patient
    #[arg(long, value_name = "ID")]
    patient: String,

    /// Start instant, RFC 3339 (e.g. 2024-06-01T10:00:00Z)
    #[arg(long, value_parser = super::parse_start)]
    start: DateTime<Utc>,

    /// Reason for the visit
    #[arg(long)]
    reason: String,
}

impl Schedule {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let mut registry = super::open_registry(root)?;
        let result = registry.upsert_appointment(Appointment {
            id: self.id,
            provider_id: self.provider,
            patient_id: self.patient,
            start: self.start,
            reason: self.reason,
        });

        match result {
            Ok(stored) => {
                println!("{} {}", "Scheduled appointment".success(), stored.id);
                Ok(())
            }
            Err(error @ ScheduleError::Store(_)) => Err(error.into()),
            Err(refusal) => {
                // Business-rule refusal: the registry was left untouched.
                eprintln!("{}", refusal.to_string().warning());
                process::exit(1);
            }
        }
    }
}

/// Command arguments for `clinic appointments cancel`.
#[derive(Debug, Parser)]
pub struct Cancel {
    /// Id of the appointment to cancel
    id: String,

    /// Skip the confirmation prompt
    #[arg(long)]
    yes: bool,
}

impl Cancel {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        if !self.yes
            && !Confirm::new()
                .with_prompt(format!("Cancel appointment {}?", self.id))
                .default(false)
                .interact()?
        {
            return Ok(());
        }

        let mut registry = super::open_registry(root)?;
        registry.delete_appointment(&self.id)?;
        println!("Cancelled appointment {}", self.id);
        Ok(())
    }
}

/// Command arguments for `clinic appointments check`.
#[derive(Debug, Parser)]
pub struct Check {
    /// Id of the provider
    #[arg(value_name = "PROVIDER_ID")]
    provider: String,

    /// Candidate start instant, RFC 3339
    #[arg(value_parser = super::parse_start)]
    start: DateTime<Utc>,
}

impl Check {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let registry = super::open_registry(root)?;
        let verdict = registry.check_availability(&self.provider, self.start, None);
        if verdict.is_free() {
            println!("{}", verdict.to_string().success());
            Ok(())
        } else {
            eprintln!("{}", verdict.to_string().warning());
            process::exit(1);
        }
    }
}
