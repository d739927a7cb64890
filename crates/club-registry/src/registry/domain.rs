use chrono::{DateTime, Local};
use serde::{Deserialize, Deserializer, Serialize};

use super::catalog::{resolve_role, Role, Status};

/// Actor recorded on audit lines when the caller does not name one.
pub const DEFAULT_ACTOR: &str = "Admin";

/// What an applicant provides; everything else on the stored record is
/// assigned by the repository at submission time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationSubmission {
    pub full_name: String,
    pub email: String,
    pub role_id: u32,
    pub reason_to_apply: String,
}

/// A stored application record.
///
/// `id` is unique and monotonic (derived from the submission timestamp),
/// `action_log` is an append-only trail of decision lines, and records are
/// never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateRegistration {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    #[serde(deserialize_with = "role_from_stored")]
    pub role: Role,
    pub reason_to_apply: String,
    pub status: Status,
    #[serde(default)]
    pub note: String,
    pub created_at: DateTime<Local>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_log: Option<String>,
}

/// An administrator's call on a pending application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Approve,
    Reject,
}

impl Decision {
    pub const fn status(self) -> Status {
        match self {
            Decision::Approve => Status::Approved,
            Decision::Reject => Status::Rejected,
        }
    }

    /// Past-tense verb used in audit lines.
    pub const fn verb(self) -> &'static str {
        match self {
            Decision::Approve => "approved",
            Decision::Reject => "rejected",
        }
    }
}

/// An approved candidate with an assignable team label. Persisted flat so the
/// overlay collection mirrors the candidate records it derives from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    #[serde(flatten)]
    pub registration: CandidateRegistration,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
}

impl Member {
    /// The label the member is counted and exported under: the assigned team
    /// when one is set, otherwise the role-derived default.
    pub fn team_label(&self) -> String {
        match &self.team {
            Some(team) if !team.trim().is_empty() => team.clone(),
            _ => default_team(&self.registration.role),
        }
    }
}

/// Default team for members that were never explicitly assigned.
pub fn default_team(role: &Role) -> String {
    format!("Team {}", role.name)
}

/// Older writes stored the role as a bare id instead of the embedded object.
/// Both shapes are normalized to an embedded role at the load boundary so the
/// rest of the crate never sees a bare id.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StoredRole {
    Embedded(Role),
    Id(u32),
}

fn role_from_stored<'de, D>(deserializer: D) -> Result<Role, D::Error>
where
    D: Deserializer<'de>,
{
    match StoredRole::deserialize(deserializer)? {
        StoredRole::Embedded(role) => Ok(role),
        StoredRole::Id(id) => Ok(resolve_role(id)),
    }
}
