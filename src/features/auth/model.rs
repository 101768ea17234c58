use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The three roles recognized by the system. Authorization is exact equality
/// on the role string; there is no hierarchy and no permission model beyond
/// this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Victim,
    Officer,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Victim => "victim",
            Role::Officer => "officer",
            Role::Admin => "admin",
        }
    }

    pub fn parse(s: &str) -> Option<Role> {
        match s {
            "victim" => Some(Role::Victim),
            "officer" => Some(Role::Officer),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity resolved from the session cookie, inserted into request
/// extensions by the session middleware.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    pub user_id: i64,
    pub email: String,
    pub role: Role,
}

impl AuthenticatedUser {
    pub fn is_victim(&self) -> bool {
        self.role == Role::Victim
    }

    pub fn is_officer(&self) -> bool {
        self.role == Role::Officer
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_strings() {
        for role in [Role::Victim, Role::Officer, Role::Admin] {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
    }

    #[test]
    fn unknown_role_strings_are_rejected() {
        assert_eq!(Role::parse("superadmin"), None);
        assert_eq!(Role::parse("Victim"), None);
        assert_eq!(Role::parse(""), None);
    }
}
