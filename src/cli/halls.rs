//! `halls` and `stands` commands: read-only views of the hall data.

use clap::Args;
use serde::Serialize;

use crate::cli::common::{CliContext, CliError, CliResult};
use crate::models::{HallId, Stand};
use crate::services::build_stands;

/// List the halls of the data directory
#[derive(Debug, Clone, Args)]
pub struct HallsArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl HallsArgs {
    /// Execute the halls command
    pub fn execute(&self, ctx: &CliContext) -> CliResult<()> {
        let index = ctx
            .data_source()
            .fetch_index()
            .map_err(|e| CliError::io(format!("Failed to load hall index: {e:#}")))?;

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&index)
                    .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?
            );
            return Ok(());
        }

        if index.maps.is_empty() {
            println!("No halls");
        }
        for hall in &index.maps {
            println!("{}\t{}\t{}x{}", hall.id, hall.name, hall.width, hall.height);
        }
        Ok(())
    }
}

/// List the stands of one hall with their exhibitors
#[derive(Debug, Clone, Args)]
pub struct StandsArgs {
    /// Hall identifier
    #[arg(long, value_name = "ID")]
    pub hall: HallId,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON row of the stands command
#[derive(Debug, Serialize)]
struct StandRow<'a> {
    label: &'a str,
    title: &'a str,
    website: Option<&'a str>,
    siblings: &'a [String],
    exhibitors: usize,
}

impl<'a> From<&'a Stand> for StandRow<'a> {
    fn from(stand: &'a Stand) -> Self {
        Self {
            label: &stand.label,
            title: &stand.info.title,
            website: stand.info.website.as_deref(),
            siblings: &stand.info.siblings,
            exhibitors: stand.info.match_count,
        }
    }
}

impl StandsArgs {
    /// Execute the stands command
    pub fn execute(&self, ctx: &CliContext) -> CliResult<()> {
        let source = ctx.data_source();
        let index = source
            .fetch_index()
            .map_err(|e| CliError::io(format!("Failed to load hall index: {e:#}")))?;
        if index.get(self.hall).is_none() {
            return Err(CliError::validation(format!("Unknown hall {}", self.hall)));
        }

        let data = source
            .fetch_hall(self.hall)
            .map_err(|e| CliError::io(format!("Failed to load hall {}: {e:#}", self.hall)))?;
        let stands = build_stands(&data, ctx.config.viewer.coordinate_policy)
            .map_err(|e| CliError::validation(format!("Invalid hall data: {e:#}")))?;

        if self.json {
            let rows: Vec<StandRow<'_>> = stands.iter().map(StandRow::from).collect();
            println!(
                "{}",
                serde_json::to_string_pretty(&rows)
                    .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?
            );
            return Ok(());
        }

        for stand in &stands {
            println!("{}\t{}", stand.label, stand.info.title);
        }
        println!("{} stand(s)", stands.len());
        Ok(())
    }
}
