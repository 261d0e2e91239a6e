use std::io::{Read, Seek};
use std::path::Path;

use calamine::{DataType, Range, Reader, Xlsx, open_workbook};
use tracing::instrument;

use crate::error::{Result, ToolError};
use crate::model::{Member, ROSTER_COLUMNS, Roster};

/// Position of each [`ROSTER_COLUMNS`] entry inside a sheet row.
type ColumnIndex = [usize; ROSTER_COLUMNS.len()];

/// Reads the old and new rosters from the workbook at `path`.
///
/// With `validate_schema` the header row of both sheets must equal
/// [`ROSTER_COLUMNS`] exactly; otherwise columns are located by name.
#[instrument(
    level = "debug",
    skip_all,
    fields(workbook = %path.display(), old_sheet = %old_sheet, new_sheet = %new_sheet)
)]
pub fn read_rosters(
    path: &Path,
    old_sheet: &str,
    new_sheet: &str,
    validate_schema: bool,
) -> Result<(Roster, Roster)> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;

    let old_range = sheet_range(&mut workbook, path, old_sheet)?;
    let new_range = sheet_range(&mut workbook, path, new_sheet)?;

    let old = range_to_roster(&old_range, old_sheet, validate_schema)?;
    let new = range_to_roster(&new_range, new_sheet, validate_schema)?;
    Ok((old, new))
}

/// Reads a single roster sheet.
pub fn read_roster(path: &Path, sheet: &str, validate_schema: bool) -> Result<Roster> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let range = sheet_range(&mut workbook, path, sheet)?;
    range_to_roster(&range, sheet, validate_schema)
}

/// Missing sheets are reported by name, together with the workbook searched.
fn sheet_range<R: Read + Seek>(
    workbook: &mut Xlsx<R>,
    path: &Path,
    sheet: &str,
) -> Result<Range<DataType>> {
    match workbook.worksheet_range(sheet) {
        Some(range) => Ok(range?),
        None => Err(ToolError::SheetNotFound {
            sheet: sheet.to_string(),
            workbook: path.to_path_buf(),
        }),
    }
}

fn range_to_roster(range: &Range<DataType>, sheet: &str, validate_schema: bool) -> Result<Roster> {
    let headers: Vec<String> = match range.rows().next() {
        Some(first_row) => first_row
            .iter()
            .map(|cell| cell_text(Some(cell)))
            .collect(),
        None => Vec::new(),
    };

    let index = if validate_schema {
        check_headers(sheet, &headers)?;
        std::array::from_fn(|position| position)
    } else {
        locate_columns(sheet, &headers)?
    };

    let mut members = Vec::new();
    for row in range.rows().skip(1) {
        let values = index.map(|col| cell_text(row.get(col)));
        if values.iter().all(String::is_empty) {
            continue;
        }
        let [course, name, class, major, email, group] = values;
        members.push(Member {
            course,
            name,
            class,
            major,
            email,
            group,
        });
    }

    Ok(Roster::new(sheet, members))
}

/// Positional comparison of a header row against [`ROSTER_COLUMNS`]. Extra,
/// missing, or reordered columns are all mismatches.
pub fn check_headers(sheet: &str, headers: &[String]) -> Result<()> {
    let matches = headers.len() == ROSTER_COLUMNS.len()
        && headers
            .iter()
            .zip(ROSTER_COLUMNS)
            .all(|(found, expected)| found == expected);
    if matches {
        Ok(())
    } else {
        Err(ToolError::SchemaMismatch {
            sheet: sheet.to_string(),
            found: headers.to_vec(),
        })
    }
}

fn locate_columns(sheet: &str, headers: &[String]) -> Result<ColumnIndex> {
    let mut index: ColumnIndex = [0; ROSTER_COLUMNS.len()];
    for (slot, column) in index.iter_mut().zip(ROSTER_COLUMNS) {
        *slot = headers
            .iter()
            .position(|header| header == column)
            .ok_or_else(|| ToolError::MissingColumn {
                sheet: sheet.to_string(),
                column: column.to_string(),
            })?;
    }
    Ok(index)
}

/// Text of a roster cell. Blank and absent cells are empty, and numbers use
/// their shortest form, so a Group of `4.0` reads as `4`.
fn cell_text(cell: Option<&DataType>) -> String {
    match cell {
        None | Some(DataType::Empty) => String::new(),
        Some(DataType::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}
