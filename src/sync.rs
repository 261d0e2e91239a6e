use tracing::{info, instrument};

use crate::config::RunConfig;
use crate::diff::diff_rosters;
use crate::enrich::{self, PasswordGenerator};
use crate::error::{Result, ToolError};
use crate::format::build_output_table;
use crate::io::{csv_write, excel_read};
use crate::model::{DROPPED_COLUMNS, OutputTable, RunSummary};

/// The two tables produced by one run, before they are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterTables {
    pub joined: OutputTable,
    pub retired: OutputTable,
    pub old_count: usize,
    pub new_count: usize,
}

/// Loads, compares, and enriches the rosters named in `config` without
/// touching the output paths.
#[instrument(
    level = "info",
    skip_all,
    fields(
        input = %config.input_path.display(),
        old = %config.old_sheet,
        new = %config.new_sheet
    )
)]
pub fn build_tables(config: &RunConfig) -> Result<RosterTables> {
    config.validate()?;
    if !config.input_path.exists() {
        return Err(ToolError::MissingInput(config.input_path.clone()));
    }

    let (old, new) = excel_read::read_rosters(
        &config.input_path,
        &config.old_sheet,
        &config.new_sheet,
        config.validate_schema,
    )?;
    info!(old = old.len(), new = new.len(), "rosters loaded");

    let diff = diff_rosters(&old, &new);

    let generator = if config.generate_credentials {
        Some(PasswordGenerator::new(config.password_length)?)
    } else {
        None
    };
    let joined = enrich::enrich_joined(
        diff.joined,
        config.name_policy,
        generator.as_ref(),
    )?;
    let retired = enrich::enrich_retired(diff.retired, config.name_policy)?;

    Ok(RosterTables {
        joined: build_output_table(&joined, &DROPPED_COLUMNS, true),
        retired: build_output_table(&retired, &DROPPED_COLUMNS, false),
        old_count: old.len(),
        new_count: new.len(),
    })
}

/// Runs the whole pipeline and writes both output tables.
#[instrument(
    level = "info",
    skip_all,
    fields(
        joined = %config.output_joined_path.display(),
        retired = %config.output_retired_path.display()
    )
)]
pub fn run(config: &RunConfig) -> Result<RunSummary> {
    let tables = build_tables(config)?;
    csv_write::write_table_pair(
        &config.output_joined_path,
        &tables.joined,
        &config.output_retired_path,
        &tables.retired,
    )?;

    let summary = RunSummary {
        old_count: tables.old_count,
        new_count: tables.new_count,
        joined: tables.joined.rows.len(),
        retired: tables.retired.rows.len(),
        joined_path: config.output_joined_path.clone(),
        retired_path: config.output_retired_path.clone(),
    };
    info!(
        joined = summary.joined,
        retired = summary.retired,
        "roster tables written"
    );
    Ok(summary)
}
