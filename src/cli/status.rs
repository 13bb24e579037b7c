use std::path::Path;

use chrono::Utc;
use clap::Parser;
use tracing::instrument;

use super::terminal::Colorize;

/// Command arguments for `clinic status`.
#[derive(Debug, Parser, Default)]
#[command(about = "Show record counts and upcoming appointments")]
pub struct Status {
    /// Number of upcoming appointments to display
    #[arg(long, value_name = "N", default_value_t = 5)]
    upcoming: usize,
}

impl Status {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let config = super::load_config(root);
        let registry = super::open_registry(root)?;

        println!("{}", config.name.info());
        println!(
            "{} providers, {} patients, {} appointments",
            registry.providers().len(),
            registry.patients().len(),
            registry.appointments().len(),
        );

        let now = Utc::now();
        let upcoming: Vec<_> = registry
            .appointments()
            .into_iter()
            .filter(|a| a.start > now)
            .take(self.upcoming)
            .collect();

        if upcoming.is_empty() {
            println!("{}", "No upcoming appointments.".dim());
            return Ok(());
        }

        println!();
        for appointment in upcoming {
            let provider = registry
                .provider(&appointment.provider_id)
                .map_or_else(|| "(removed provider)".to_string(), |p| p.name.clone());
            let patient = registry
                .patient(&appointment.patient_id)
                .map_or_else(|| "(removed patient)".to_string(), |p| p.name.clone());
            println!(
                "  {}  {patient} with {provider} — {}",
                appointment.start.format("%Y-%m-%d %H:%M").to_string().info(),
                appointment.reason
            );
        }

        Ok(())
    }
}
