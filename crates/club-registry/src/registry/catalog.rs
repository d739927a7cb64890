use serde::{Deserialize, Serialize};

/// Lifecycle state of a submitted application.
///
/// `Pending` is the only non-terminal state; an application settles into
/// `Approved` or `Rejected` exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Pending,
    Approved,
    Rejected,
}

impl Status {
    pub const fn label(self) -> &'static str {
        match self {
            Status::Pending => "pending",
            Status::Approved => "approved",
            Status::Rejected => "rejected",
        }
    }

    pub const fn is_terminal(self) -> bool {
        !matches!(self, Status::Pending)
    }

    /// Parses a filter value such as `"APPROVED"` or `"approved"`.
    pub fn parse(value: &str) -> Option<Status> {
        match value.trim().to_ascii_uppercase().as_str() {
            "PENDING" => Some(Status::Pending),
            "APPROVED" => Some(Status::Approved),
            "REJECTED" => Some(Status::Rejected),
            _ => None,
        }
    }
}

/// A club role candidates apply for. Applications embed a copy rather than a
/// bare id so records stay readable on their own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: u32,
    pub name: String,
}

impl Role {
    fn new(id: u32, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
        }
    }
}

/// Name reported for role ids the catalog does not know.
pub const UNKNOWN_ROLE_NAME: &str = "Unknown";

/// The fixed role catalog, in display order.
pub fn roles() -> Vec<Role> {
    vec![
        Role::new(1, "Design"),
        Role::new(2, "Development"),
        Role::new(3, "Media"),
        Role::new(4, "Marketing"),
        Role::new(5, "Event"),
    ]
}

/// Resolves a role id against the catalog, falling back to an unknown-named
/// role that keeps the original id.
pub fn resolve_role(id: u32) -> Role {
    roles()
        .into_iter()
        .find(|role| role.id == id)
        .unwrap_or_else(|| Role {
            id,
            name: UNKNOWN_ROLE_NAME.to_string(),
        })
}

/// Catalog name for a role id, `"Unknown"` when unrecognized.
pub fn role_name(id: u32) -> String {
    resolve_role(id).name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_five_roles_in_display_order() {
        let names: Vec<String> = roles().into_iter().map(|role| role.name).collect();
        assert_eq!(names, ["Design", "Development", "Media", "Marketing", "Event"]);
    }

    #[test]
    fn resolve_role_falls_back_to_unknown() {
        let role = resolve_role(42);
        assert_eq!(role.id, 42);
        assert_eq!(role.name, UNKNOWN_ROLE_NAME);
        assert_eq!(role_name(2), "Development");
    }

    #[test]
    fn status_parse_accepts_any_case() {
        assert_eq!(Status::parse("approved"), Some(Status::Approved));
        assert_eq!(Status::parse(" PENDING "), Some(Status::Pending));
        assert_eq!(Status::parse("waitlisted"), None);
    }

    #[test]
    fn status_serializes_as_screaming_snake_case() {
        let encoded = serde_json::to_string(&Status::Rejected).expect("status encodes");
        assert_eq!(encoded, "\"REJECTED\"");
    }
}
