use std::path::Path;
use std::process::Command;

use tracing::{info, instrument, warn};

use crate::error::{Result, ToolError};

/// Checks that a provisioning program given as a path exists. Bare program
/// names are left to the `PATH` lookup at spawn time.
pub fn ensure_available(program: &Path) -> Result<()> {
    let is_path = program.components().count() > 1 || program.is_absolute();
    if is_path && !program.is_file() {
        return Err(ToolError::MissingInput(program.to_path_buf()));
    }
    Ok(())
}

/// Runs `program` with the joined-members table as its only argument.
///
/// The tables are left in place whatever the outcome.
#[instrument(
    level = "info",
    skip_all,
    fields(program = %program.display(), table = %table.display())
)]
pub fn invoke(program: &Path, table: &Path) -> Result<()> {
    let status = Command::new(program)
        .arg(table)
        .status()
        .map_err(|source| ToolError::ProvisionerSpawn {
            program: program.to_path_buf(),
            source,
        })?;
    if status.success() {
        info!("provisioning step completed");
        return Ok(());
    }

    warn!(%status, "provisioning step failed");
    Err(ToolError::Provisioning {
        program: program.display().to_string(),
        status: status.to_string(),
    })
}
