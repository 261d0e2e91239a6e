use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::{debug, instrument};

use crate::error::{Result, ToolError};
use crate::model::OutputTable;

/// Writes `table` as a header-carrying CSV document to any writer.
pub fn write_table<W: Write>(writer: W, table: &OutputTable) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(&table.columns)?;
    for row in &table.rows {
        csv_writer.write_record(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Writes both tables next to their destinations first and only moves them
/// into place once both have been written, so a failure leaves neither file
/// half-written.
#[instrument(
    level = "debug",
    skip_all,
    fields(joined = %joined_path.display(), retired = %retired_path.display())
)]
pub fn write_table_pair(
    joined_path: &Path,
    joined: &OutputTable,
    retired_path: &Path,
    retired: &OutputTable,
) -> Result<()> {
    let joined_file = stage_table(joined_path, joined)?;
    let retired_file = stage_table(retired_path, retired)?;

    joined_file
        .persist(joined_path)
        .map_err(|error| ToolError::Io(error.error))?;
    retired_file
        .persist(retired_path)
        .map_err(|error| ToolError::Io(error.error))?;
    debug!(
        joined_rows = joined.rows.len(),
        retired_rows = retired.rows.len(),
        "tables written"
    );
    Ok(())
}

fn stage_table(destination: &Path, table: &OutputTable) -> Result<NamedTempFile> {
    let directory = match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staged = NamedTempFile::new_in(directory)?;
    write_table(staged.as_file_mut(), table)?;
    staged.as_file().sync_all()?;
    Ok(staged)
}
