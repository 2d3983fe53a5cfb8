//! Identity of the logged-in user as issued by the server at login

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// User role. The set is closed; unknown strings fail to deserialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[display("student")]
    Student,
    #[display("instructor")]
    Instructor,
    #[display("admin")]
    Admin,
}

impl Role {
    /// All roles, in ascending order of privilege
    pub const ALL: [Role; 3] = [Role::Student, Role::Instructor, Role::Admin];

    /// Whether a user holding this role may use something that requires `required`.
    ///
    /// Admins also get instructor tools (course creation, teaching views).
    pub fn grants(self, required: Role) -> bool {
        self == required || (self == Role::Admin && required == Role::Instructor)
    }

    /// Human readable label for menus and badges
    pub fn label(self) -> &'static str {
        match self {
            Role::Student => "Student",
            Role::Instructor => "Instructor",
            Role::Admin => "Administrator",
        }
    }
}

/// Authenticated user's identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Server-side user id. The login endpoint does not always send it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub full_name: String,
    pub email: String,
    pub role: Role,
}

/// Editable profile fields. Role and id are never client-editable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub full_name: String,
    pub email: String,
}

impl Identity {
    /// Apply a profile edit, keeping id and role as the server issued them
    pub fn with_profile(mut self, update: ProfileUpdate) -> Self {
        self.full_name = update.full_name;
        self.email = update.email;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        assert_eq!(
            serde_json::from_str::<Role>("\"instructor\"").unwrap(),
            Role::Instructor
        );
        assert_eq!(Role::Student.to_string(), "student");
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        assert!(serde_json::from_str::<Role>("\"superuser\"").is_err());
        assert!(serde_json::from_str::<Role>("\"Admin\"").is_err());
    }

    #[test]
    fn test_role_grants() {
        assert!(Role::Admin.grants(Role::Admin));
        assert!(Role::Admin.grants(Role::Instructor));
        assert!(!Role::Admin.grants(Role::Student));
        assert!(!Role::Instructor.grants(Role::Admin));
        assert!(!Role::Student.grants(Role::Instructor));
        assert!(Role::Student.grants(Role::Student));
    }

    #[test]
    fn test_identity_without_id() {
        let json = r#"{"email":"a@b.co","full_name":"Ada","role":"student"}"#;
        let identity: Identity = serde_json::from_str(json).unwrap();
        assert_eq!(identity.id, None);
        assert_eq!(identity.role, Role::Student);

        let back = serde_json::to_string(&identity).unwrap();
        assert!(!back.contains("\"id\""));
    }

    #[test]
    fn test_with_profile_keeps_role_and_id() {
        let identity = Identity {
            id: Some(7),
            full_name: "Old".to_string(),
            email: "old@example.com".to_string(),
            role: Role::Instructor,
        };
        let updated = identity.with_profile(ProfileUpdate {
            full_name: "New".to_string(),
            email: "new@example.com".to_string(),
        });
        assert_eq!(updated.id, Some(7));
        assert_eq!(updated.role, Role::Instructor);
        assert_eq!(updated.full_name, "New");
        assert_eq!(updated.email, "new@example.com");
    }
}
