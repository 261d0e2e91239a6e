//! Derives the directory-service fields for classified members.

pub mod password;

use tracing::{debug, instrument};

use crate::config::NamePolicy;
use crate::error::{Result, ToolError};
use crate::model::{Member, ProvisionedMember};

pub use password::PasswordGenerator;

/// Account name: everything before the first `@` of the email.
pub fn username(email: &str) -> &str {
    email.split_once('@').map_or(email, |(local, _)| local)
}

/// Splits a display name into first and last name according to `policy`.
pub fn split_name(name: &str, policy: NamePolicy) -> Result<(String, String)> {
    let tokens: Vec<&str> = name.split_whitespace().collect();
    match (policy, tokens.as_slice()) {
        (_, [first, last]) => Ok((first.to_string(), last.to_string())),
        (NamePolicy::Remainder, [first, rest @ ..]) if !rest.is_empty() => {
            Ok((first.to_string(), rest.join(" ")))
        }
        _ => Err(ToolError::NameFormat {
            name: name.to_string(),
            tokens: tokens.len(),
        }),
    }
}

fn provision(
    member: Member,
    policy: NamePolicy,
    temp_password: Option<String>,
) -> Result<ProvisionedMember> {
    let (firstname, lastname) = split_name(&member.name, policy)?;
    Ok(ProvisionedMember {
        username: username(&member.email).to_string(),
        firstname,
        lastname,
        temp_password,
        member,
    })
}

/// Enriches joined members, attaching a fresh credential to each when a
/// generator is supplied.
#[instrument(
    level = "debug",
    skip_all,
    fields(count = members.len(), credentials = generator.is_some())
)]
pub fn enrich_joined(
    members: Vec<Member>,
    policy: NamePolicy,
    generator: Option<&PasswordGenerator>,
) -> Result<Vec<ProvisionedMember>> {
    let enriched = members
        .into_iter()
        .map(|member| provision(member, policy, generator.map(PasswordGenerator::generate)))
        .collect::<Result<Vec<_>>>()?;
    debug!("joined members enriched");
    Ok(enriched)
}

/// Enriches retired members. No credentials are generated.
pub fn enrich_retired(members: Vec<Member>, policy: NamePolicy) -> Result<Vec<ProvisionedMember>> {
    members
        .into_iter()
        .map(|member| provision(member, policy, None))
        .collect()
}
