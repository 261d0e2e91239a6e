use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::error::{Result, ToolError};

/// Default location of the joined-members table.
pub const DEFAULT_JOINED_OUTPUT: &str = "users_new.csv";
/// Default location of the retired-members table.
pub const DEFAULT_RETIRED_OUTPUT: &str = "users_retired.csv";
/// Shortest credential the directory service accepts.
pub const MIN_PASSWORD_LENGTH: usize = 12;
/// Longest credential the generator produces.
pub const MAX_PASSWORD_LENGTH: usize = 256;

/// How a member's Name is split into Firstname and Lastname.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NamePolicy {
    /// Exactly two whitespace-separated tokens, anything else is an error.
    #[default]
    Strict,
    /// First token is the first name, the remaining tokens form the last name.
    Remainder,
}

/// Everything a pipeline run needs to know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub input_path: PathBuf,
    pub old_sheet: String,
    pub new_sheet: String,
    pub output_joined_path: PathBuf,
    pub output_retired_path: PathBuf,
    pub password_length: usize,
    pub generate_credentials: bool,
    pub validate_schema: bool,
    pub name_policy: NamePolicy,
}

impl RunConfig {
    /// Creates a configuration with the default output paths and the
    /// validating, credential-generating behaviour.
    pub fn new(
        input_path: impl Into<PathBuf>,
        old_sheet: impl Into<String>,
        new_sheet: impl Into<String>,
    ) -> Self {
        Self {
            input_path: input_path.into(),
            old_sheet: old_sheet.into(),
            new_sheet: new_sheet.into(),
            output_joined_path: PathBuf::from(DEFAULT_JOINED_OUTPUT),
            output_retired_path: PathBuf::from(DEFAULT_RETIRED_OUTPUT),
            password_length: MIN_PASSWORD_LENGTH,
            generate_credentials: true,
            validate_schema: true,
            name_policy: NamePolicy::Strict,
        }
    }

    pub fn with_outputs(mut self, joined: impl Into<PathBuf>, retired: impl Into<PathBuf>) -> Self {
        self.output_joined_path = joined.into();
        self.output_retired_path = retired.into();
        self
    }

    pub fn with_password_length(mut self, length: usize) -> Self {
        self.password_length = length;
        self
    }

    pub fn with_credentials(mut self, enabled: bool) -> Self {
        self.generate_credentials = enabled;
        self
    }

    pub fn with_schema_validation(mut self, enabled: bool) -> Self {
        self.validate_schema = enabled;
        self
    }

    pub fn with_name_policy(mut self, policy: NamePolicy) -> Self {
        self.name_policy = policy;
        self
    }

    /// Checks the settings that can be rejected before any file is touched.
    pub fn validate(&self) -> Result<()> {
        if self.old_sheet.is_empty() || self.new_sheet.is_empty() {
            return Err(ToolError::InvalidConfig(
                "sheet names must not be empty".to_string(),
            ));
        }
        check_password_length(self.password_length)?;
        if resolve(&self.output_joined_path) == resolve(&self.output_retired_path) {
            return Err(ToolError::InvalidConfig(format!(
                "joined and retired tables both point at '{}'",
                self.output_joined_path.display()
            )));
        }
        Ok(())
    }
}

/// Rejects password lengths outside `MIN_PASSWORD_LENGTH..=MAX_PASSWORD_LENGTH`.
pub fn check_password_length(length: usize) -> Result<()> {
    if (MIN_PASSWORD_LENGTH..=MAX_PASSWORD_LENGTH).contains(&length) {
        return Ok(());
    }
    Err(ToolError::InvalidConfig(format!(
        "password length {length} outside {MIN_PASSWORD_LENGTH}..={MAX_PASSWORD_LENGTH}"
    )))
}

/// Drops `.` components and canonicalises the parent directory when it
/// exists, so two spellings of the same output file compare equal.
fn resolve(path: &Path) -> PathBuf {
    let stripped: PathBuf = path
        .components()
        .filter(|component| !matches!(component, Component::CurDir))
        .collect();
    let parent = match stripped.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    if let (Ok(directory), Some(name)) = (fs::canonicalize(parent), stripped.file_name()) {
        return directory.join(name);
    }
    stripped
}
