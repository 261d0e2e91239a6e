use std::path::PathBuf;

use serde::Serialize;

/// Header row every roster sheet must carry, in order.
pub const ROSTER_COLUMNS: [&str; 6] = ["Course", "Name", "Class", "Major", "Email", "Group"];

/// Columns removed from both output tables once enrichment has run.
pub const DROPPED_COLUMNS: [&str; 4] = ["Course", "Major", "Class", "Email"];

/// One roster row. `email` is the identifier used to match members across
/// snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub course: String,
    pub name: String,
    pub class: String,
    pub major: String,
    pub email: String,
    pub group: String,
}

/// Members loaded from one named sheet, in sheet order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    pub sheet: String,
    pub members: Vec<Member>,
}

impl Roster {
    pub fn new(sheet: impl Into<String>, members: Vec<Member>) -> Self {
        Self {
            sheet: sheet.into(),
            members,
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Members classified by comparing two rosters on their email values.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DiffResult {
    /// Present in the new roster, absent from the old one.
    pub joined: Vec<Member>,
    /// Present in the old roster, absent from the new one.
    pub retired: Vec<Member>,
}

/// A member with the fields derived for the directory service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionedMember {
    pub member: Member,
    pub username: String,
    pub firstname: String,
    pub lastname: String,
    /// Only set for joined members when credential generation is enabled.
    pub temp_password: Option<String>,
}

impl ProvisionedMember {
    /// Column names in the order produced by inserting the derived fields
    /// into the roster layout, before any column is dropped.
    pub fn expanded_columns(with_password: bool) -> Vec<&'static str> {
        let mut columns = vec![
            "Username",
            "Course",
            "Name",
            "Firstname",
            "Lastname",
            "Class",
            "Major",
            "Email",
            "Group",
        ];
        if with_password {
            columns.push("TempPassword");
        }
        columns
    }

    /// Values matching [`ProvisionedMember::expanded_columns`].
    pub fn expanded_values(&self, with_password: bool) -> Vec<String> {
        let member = &self.member;
        let mut values = vec![
            self.username.clone(),
            member.course.clone(),
            member.name.clone(),
            self.firstname.clone(),
            self.lastname.clone(),
            member.class.clone(),
            member.major.clone(),
            member.email.clone(),
            member.group.clone(),
        ];
        if with_password {
            values.push(self.temp_password.clone().unwrap_or_default());
        }
        values
    }
}

/// A table ready to be written as CSV.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl OutputTable {
    /// Returns the values of the named column, if present.
    pub fn column(&self, name: &str) -> Option<Vec<&str>> {
        let index = self.columns.iter().position(|column| column == name)?;
        Some(
            self.rows
                .iter()
                .map(|row| row.get(index).map(String::as_str).unwrap_or_default())
                .collect(),
        )
    }
}

/// Outcome of a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub old_count: usize,
    pub new_count: usize,
    pub joined: usize,
    pub retired: usize,
    pub joined_path: PathBuf,
    pub retired_path: PathBuf,
}
