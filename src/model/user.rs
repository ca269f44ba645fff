// 👤 Users - name-keyed identities with a parent/child role and a balance
//
// A user record is created the first time a name is seen. The role is
// derived once from the parent roster and never changes afterwards; the
// balance starts at zero and is only ever mutated by reconciliation.

use serde::{Deserialize, Serialize};

// ============================================================================
// ROLE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Parent,
    Child,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Parent => "parent",
            Role::Child => "child",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// USER
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Exact name as first entered - the unique key
    pub name: String,
    pub role: Role,
    pub balance: f64,
}

impl User {
    pub fn new(name: String, role: Role) -> Self {
        User {
            name,
            role,
            balance: 0.0,
        }
    }

    pub fn is_child(&self) -> bool {
        self.role == Role::Child
    }
}

// ============================================================================
// PARENT ROSTER
// ============================================================================

/// The configured set of parent names.
///
/// Membership is case-insensitive: "Aaron", "aaron" and "AARON" all resolve
/// to parent. Note the asymmetry with user storage, which keys on the exact
/// string - "Aaron" and "aaron" are two distinct user records that happen to
/// share the parent role.
#[derive(Debug, Clone)]
pub struct ParentRoster {
    /// Lowercased parent names
    names: Vec<String>,
}

impl ParentRoster {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        ParentRoster {
            names: names
                .into_iter()
                .map(|n| n.as_ref().trim().to_lowercase())
                .filter(|n| !n.is_empty())
                .collect(),
        }
    }

    /// Derive the role for a free-text name. Pure, no side effects.
    pub fn role_for(&self, name: &str) -> Role {
        let lower = name.to_lowercase();
        if self.names.iter().any(|n| *n == lower) {
            Role::Parent
        } else {
            Role::Child
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}

impl Default for ParentRoster {
    /// The reference household: aaron and janet are the parents.
    fn default() -> Self {
        ParentRoster::new(["aaron", "janet"])
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_roster_roles() {
        let roster = ParentRoster::default();

        assert_eq!(roster.role_for("aaron"), Role::Parent);
        assert_eq!(roster.role_for("Aaron"), Role::Parent);
        assert_eq!(roster.role_for("JANET"), Role::Parent);
        assert_eq!(roster.role_for("Sam"), Role::Child);
        assert_eq!(roster.role_for(""), Role::Child);

        println!("✅ Default roster test passed");
    }

    #[test]
    fn test_custom_roster() {
        let roster = ParentRoster::new(["Maria", " jose "]);

        assert_eq!(roster.role_for("maria"), Role::Parent);
        assert_eq!(roster.role_for("Jose"), Role::Parent);
        assert_eq!(roster.role_for("aaron"), Role::Child);
    }

    #[test]
    fn test_blank_roster_entries_ignored() {
        let roster = ParentRoster::new(["", "  ", "ana"]);

        assert_eq!(roster.names(), &["ana".to_string()]);
        assert_eq!(roster.role_for(""), Role::Child);
        assert_eq!(roster.role_for("  "), Role::Child);
    }

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_string(&Role::Parent).unwrap(), "\"parent\"");
        assert_eq!(serde_json::to_string(&Role::Child).unwrap(), "\"child\"");
    }

    #[test]
    fn test_new_user_starts_at_zero() {
        let user = User::new("Sam".to_string(), Role::Child);

        assert_eq!(user.balance, 0.0);
        assert!(user.is_child());
    }
}
