use std::path::PathBuf;

use thiserror::Error;

use crate::model::ROSTER_COLUMNS;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, ToolError>;

/// Error type covering the different failure cases that can occur when the
/// tool loads rosters, derives member fields, or writes the output tables.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Wrapper for IO failures such as reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when JSON serialization of the run summary fails.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Errors bubbled up from the Excel reader implementation. Anything the
    /// reader reports that is not a missing sheet lands here.
    #[error("unexpected error while reading workbook: {0}")]
    ExcelRead(#[from] calamine::XlsxError),

    /// Errors bubbled up from the CSV writer.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Raised when a requested worksheet is absent from the workbook.
    #[error("worksheet '{sheet}' not found in '{}'", .workbook.display())]
    SheetNotFound { sheet: String, workbook: PathBuf },

    /// Raised when a roster sheet does not carry the expected header row.
    #[error(
        "invalid headers in '{sheet}': found [{}], expected [{}]; hint: copy the 'Roster Template' sheet to get the correct headers",
        .found.join(", "),
        ROSTER_COLUMNS.join(", ")
    )]
    SchemaMismatch { sheet: String, found: Vec<String> },

    /// Raised when schema validation is disabled and a required column cannot
    /// be located by name.
    #[error("column '{column}' missing from sheet '{sheet}'")]
    MissingColumn { sheet: String, column: String },

    /// Raised when a member name cannot be split into first and last name.
    #[error("cannot split name '{name}' into first and last name ({tokens} tokens)")]
    NameFormat { name: String, tokens: usize },

    /// Raised when the run configuration is inconsistent.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Raised when the user provides a path that does not exist.
    #[error("'{}' does not exist", .0.display())]
    MissingInput(PathBuf),

    /// Raised when the external provisioning program cannot be started.
    #[error("failed to start provisioning step '{}': {source}", .program.display())]
    ProvisionerSpawn {
        program: PathBuf,
        source: std::io::Error,
    },

    /// Raised when the external provisioning program exits unsuccessfully.
    #[error("provisioning step '{program}' failed with {status}")]
    Provisioning { program: String, status: String },

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}
