use std::path::Path;

use roster_tools::io::excel_read;
use roster_tools::model::ROSTER_COLUMNS;
use roster_tools::{NamePolicy, RunConfig, ToolError, sync};
use rust_xlsxwriter::Workbook;
use tempfile::{TempDir, tempdir};

type Row<'a> = [&'a str; 6];

const ANN: Row = ["ITO 4310", "Ann Lee", "Senior", "MIS", "a@x.com", "1"];
const BO: Row = ["ITO 4310", "Bo Park", "Junior", "CS", "b@x.com", "2"];
const CAT: Row = ["ITO 4320", "Cat Ng", "Senior", "MIS", "c@x.com", "2"];

fn write_workbook(path: &Path, sheets: &[(&str, &[&str], &[Row])]) {
    let mut workbook = Workbook::new();
    for (name, headers, rows) in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(*name).expect("sheet named");
        for (col_idx, header) in headers.iter().enumerate() {
            worksheet
                .write_string(0, col_idx as u16, *header)
                .expect("header written");
        }
        for (row_idx, row) in rows.iter().enumerate() {
            for (col_idx, cell) in row.iter().enumerate() {
                worksheet
                    .write_string((row_idx + 1) as u32, col_idx as u16, *cell)
                    .expect("cell written");
            }
        }
    }
    workbook.save(path).expect("workbook saved");
}

fn fixture(old: &[Row], new: &[Row]) -> (TempDir, RunConfig) {
    let dir = tempdir().expect("temporary directory");
    let workbook = dir.path().join("rosters.xlsx");
    write_workbook(
        &workbook,
        &[
            ("Roster S22", &ROSTER_COLUMNS[..], old),
            ("Roster F22", &ROSTER_COLUMNS[..], new),
        ],
    );
    let config = config_in(dir.path(), &workbook);
    (dir, config)
}

/// Compares the two standard sheets, writing both tables into `dir`.
fn config_in(dir: &Path, workbook: &Path) -> RunConfig {
    let joined = dir.join("users_new.csv");
    let retired = dir.join("users_retired.csv");
    RunConfig::new(workbook, "Roster S22", "Roster F22")
        .with_outputs(joined, retired)
}

fn read_csv(path: &Path) -> (Vec<String>, Vec<Vec<String>>) {
    let mut reader = csv::Reader::from_path(path).expect("CSV opened");
    let headers = reader
        .headers()
        .expect("headers read")
        .iter()
        .map(str::to_string)
        .collect();
    let rows = reader
        .records()
        .map(|record| {
            record
                .expect("record read")
                .iter()
                .map(str::to_string)
                .collect()
        })
        .collect();
    (headers, rows)
}

fn is_complex(password: &str) -> bool {
    password.len() >= 12
        && password.bytes().any(|b| b.is_ascii_uppercase())
        && password.bytes().any(|b| b.is_ascii_lowercase())
        && password.bytes().any(|b| b.is_ascii_digit())
        && password.bytes().any(|b| b.is_ascii_punctuation())
}

#[test]
fn joined_and_retired_tables_are_written() {
    let (_dir, config) = fixture(&[ANN, BO], &[BO, CAT]);

    let summary = sync::run(&config).expect("pipeline ran");
    assert_eq!((summary.old_count, summary.new_count), (2, 2));
    assert_eq!((summary.joined, summary.retired), (1, 1));

    let (headers, rows) = read_csv(&config.output_joined_path);
    assert_eq!(
        headers.join(","),
        "Username,Name,Firstname,Lastname,Group,TempPassword"
    );
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][..5], ["c", "Cat Ng", "Cat", "Ng", "2"]);
    assert!(is_complex(&rows[0][5]), "weak password {}", rows[0][5]);

    let (headers, rows) = read_csv(&config.output_retired_path);
    assert_eq!(headers.join(","), "Username,Name,Firstname,Lastname,Group");
    assert_eq!(rows, [["a", "Ann Lee", "Ann", "Lee", "1"]]);
}

#[test]
fn identical_sheets_yield_header_only_tables() {
    let (_dir, config) = fixture(&[ANN, BO], &[ANN, BO]);

    let summary = sync::run(&config).expect("pipeline ran");
    assert_eq!((summary.joined, summary.retired), (0, 0));

    let (headers, rows) = read_csv(&config.output_joined_path);
    assert_eq!(headers.len(), 6);
    assert!(rows.is_empty());
    let (headers, rows) = read_csv(&config.output_retired_path);
    assert_eq!(headers.len(), 5);
    assert!(rows.is_empty());
}

#[test]
fn reruns_keep_membership_but_change_credentials() {
    let (_dir, config) = fixture(&[ANN], &[ANN, BO, CAT]);

    let first = sync::build_tables(&config).expect("first run");
    let second = sync::build_tables(&config).expect("second run");

    let usernames = first.joined.column("Username");
    assert_eq!(usernames, second.joined.column("Username"));
    assert_eq!(first.retired, second.retired);

    let passwords = first.joined.column("TempPassword");
    assert_ne!(passwords, second.joined.column("TempPassword"));
}

#[test]
fn swapped_columns_are_rejected() {
    let dir = tempdir().expect("temporary directory");
    let workbook = dir.path().join("rosters.xlsx");
    let swapped = ["Course", "Name", "Major", "Class", "Email", "Group"];
    write_workbook(
        &workbook,
        &[
            ("Roster S22", &ROSTER_COLUMNS[..], &[ANN][..]),
            ("Roster F22", &swapped[..], &[BO][..]),
        ],
    );
    let config = config_in(dir.path(), &workbook);

    match sync::run(&config) {
        Err(ToolError::SchemaMismatch { sheet, .. }) => assert_eq!(sheet, "Roster F22"),
        other => panic!("unexpected result {other:?}"),
    }
    assert!(!config.output_joined_path.exists());
    assert!(!config.output_retired_path.exists());
}

#[test]
fn missing_sheet_names_sheet_and_workbook() {
    let (_dir, config) = fixture(&[ANN], &[BO]);
    let config = RunConfig {
        new_sheet: "Roster X99".to_string(),
        ..config
    };

    let error = sync::run(&config).expect_err("sheet missing");
    match &error {
        ToolError::SheetNotFound { sheet, workbook } => {
            assert_eq!(sheet, "Roster X99");
            assert_eq!(workbook, &config.input_path);
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert!(error.to_string().contains("rosters.xlsx"));
}

#[test]
fn missing_workbook_is_reported() {
    let dir = tempdir().expect("temporary directory");
    let config = RunConfig::new(dir.path().join("absent.xlsx"), "old", "new");
    let result = sync::run(&config);
    assert!(matches!(result, Err(ToolError::MissingInput(_))));
}

#[test]
fn unvalidated_sheets_are_read_by_column_name() {
    let dir = tempdir().expect("temporary directory");
    let workbook = dir.path().join("rosters.xlsx");
    let reordered = ["Email", "Group", "Name", "Course", "Class", "Major"];
    let old_rows = [reorder(ANN)];
    let new_rows = [reorder(ANN), reorder(CAT)];
    write_workbook(
        &workbook,
        &[
            ("Roster S22", &reordered[..], &old_rows[..]),
            ("Roster F22", &reordered[..], &new_rows[..]),
        ],
    );
    let config = config_in(dir.path(), &workbook)
        .with_schema_validation(false)
        .with_credentials(false);

    let tables = sync::build_tables(&config).expect("tables built");
    assert_eq!(tables.joined.column("Username"), Some(vec!["c"]));
    assert_eq!(tables.joined.column("Group"), Some(vec!["2"]));
    assert_eq!(tables.joined.column("TempPassword"), Some(vec![""]));

    let roster = excel_read::read_roster(&workbook, "Roster F22", false)
        .expect("roster read");
    assert_eq!(roster.members[1].email, "c@x.com");
    let strict = excel_read::read_roster(&workbook, "Roster F22", true);
    assert!(strict.is_err());
}

/// Moves a roster row into the Email, Group, Name, Course, Class, Major order.
fn reorder(row: Row<'static>) -> Row<'static> {
    [row[4], row[5], row[1], row[0], row[2], row[3]]
}

#[test]
fn numeric_cells_and_blank_rows_are_normalised() {
    let dir = tempdir().expect("temporary directory");
    let workbook_path = dir.path().join("rosters.xlsx");
    let mut workbook = Workbook::new();
    for name in ["Roster S22", "Roster F22"] {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(name).expect("sheet named");
        for (col_idx, header) in ROSTER_COLUMNS.iter().enumerate() {
            worksheet
                .write_string(0, col_idx as u16, *header)
                .expect("header written");
        }
    }
    let new_sheet = workbook
        .worksheet_from_name("Roster F22")
        .expect("sheet found");
    for (col_idx, cell) in CAT.iter().enumerate() {
        if col_idx == 5 {
            new_sheet.write_number(2, 5, 4.0).expect("number written");
        } else {
            new_sheet
                .write_string(2, col_idx as u16, *cell)
                .expect("cell written");
        }
    }
    workbook.save(&workbook_path).expect("workbook saved");

    let roster = excel_read::read_roster(&workbook_path, "Roster F22", true)
        .expect("roster read");
    assert_eq!(roster.len(), 1);
    assert_eq!(roster.members[0].group, "4");
}

#[test]
fn malformed_names_abort_before_writing() {
    let prince: Row = ["ITO 4310", "Prince", "Senior", "MIS", "p@x.com", "1"];
    let (_dir, config) = fixture(&[ANN], &[prince]);

    let error = sync::run(&config).expect_err("name rejected");
    assert!(matches!(error, ToolError::NameFormat { tokens: 1, .. }));
    assert!(!config.output_joined_path.exists());

    let three_words: Row = ["ITO 4310", "Mary Ann Lee", "Senior", "MIS", "m@x.com", "1"];
    let (_lenient_dir, lenient) = fixture(&[ANN], &[three_words]);
    let lenient = lenient.with_name_policy(NamePolicy::Remainder);
    let tables = sync::build_tables(&lenient).expect("remainder accepted");
    assert_eq!(tables.joined.column("Firstname"), Some(vec!["Mary"]));
    assert_eq!(tables.joined.column("Lastname"), Some(vec!["Ann Lee"]));
}
