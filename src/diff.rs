use std::collections::HashSet;

use tracing::{info, instrument};

use crate::model::{DiffResult, Member, Roster};

/// Classifies members by whether their email appears in the other roster.
///
/// Emails are compared verbatim. Duplicate emails inside one roster are kept:
/// every copy survives or is removed together.
#[instrument(
    level = "info",
    skip_all,
    fields(old = %old.sheet, new = %new.sheet)
)]
pub fn diff_rosters(old: &Roster, new: &Roster) -> DiffResult {
    let retired = members_absent_from(&old.members, &new.members);
    let joined = members_absent_from(&new.members, &old.members);
    info!(
        joined = joined.len(),
        retired = retired.len(),
        "rosters compared"
    );
    DiffResult { joined, retired }
}

fn members_absent_from(source: &[Member], other: &[Member]) -> Vec<Member> {
    let emails: HashSet<&str> = other.iter().map(|member| member.email.as_str()).collect();
    source
        .iter()
        .filter(|member| !emails.contains(member.email.as_str()))
        .cloned()
        .collect()
}
