//! LMS API payloads
//!
//! These are transient view models rebuilt from every response; none of them
//! carries client-side invariants.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::session::{Identity, Role};

/// Minimum password length enforced by the server
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Login request body
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response: token pair plus the identity the server issued
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access: String,
    pub refresh: String,
    pub user: Identity,
}

/// Self-registration form. New accounts are students; the server assigns the role.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub full_name: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct ForgotPasswordRequest<'a> {
    pub email: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct ResetPasswordRequest<'a> {
    pub token: &'a str,
    pub new_password: &'a str,
}

/// Generic `{"message": ..}` acknowledgement
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

/// Profile as returned by `/api/profile/`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Profile {
    pub email: String,
    pub full_name: String,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Category {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub courses_count: Option<u64>,
}

/// Course row in listings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CourseSummary {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: Option<u64>,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub instructor: Option<u64>,
    #[serde(default)]
    pub instructor_name: Option<String>,
    #[serde(default)]
    pub enrollments_count: u64,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Instructor {
    pub id: u64,
    pub full_name: String,
    pub email: String,
}

/// Full course page
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CourseDetail {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub instructor: Option<Instructor>,
    #[serde(default)]
    pub enrollments_count: u64,
    #[serde(default)]
    pub is_enrolled: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Course creation form
#[derive(Debug, Clone, Serialize)]
pub struct NewCourse {
    pub title: String,
    pub description: String,
    pub category: u64,
}

/// A student's enrollment
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StudentEnrollment {
    pub id: u64,
    pub course: CourseSummary,
    #[serde(default)]
    pub enrolled_at: Option<String>,
}

/// Courses shown on the "My Courses" page, which depends on the role
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MyCourses {
    Enrolled(Vec<StudentEnrollment>),
    Teaching(Vec<CourseSummary>),
}

impl MyCourses {
    pub fn len(&self) -> usize {
        match self {
            MyCourses::Enrolled(items) => items.len(),
            MyCourses::Teaching(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Admin form creating a staff account
#[derive(Debug, Clone, Serialize)]
pub struct NewStaffAccount {
    pub email: String,
    pub full_name: String,
    pub password: String,
    pub role: Role,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StaffAccountCreated {
    #[serde(default)]
    pub message: String,
    pub user: Identity,
}

/// Row of the admin user list
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserRow {
    pub id: u64,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    #[serde(default)]
    pub date_joined: Option<String>,
}

/// Role-dependent dashboard. `summary` holds the headline counters; the rest
/// (recent enrollments, popular courses, ...) stays as raw JSON.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Dashboard {
    pub role: Role,
    #[serde(default)]
    pub summary: BTreeMap<String, i64>,
    #[serde(flatten)]
    pub details: serde_json::Map<String, serde_json::Value>,
}

impl Dashboard {
    /// Summary counters with human readable labels, e.g. `total_users` -> `total users`
    pub fn summary_cards(&self) -> Vec<(String, i64)> {
        self.summary
            .iter()
            .map(|(key, value)| (key.replace('_', " "), *value))
            .collect()
    }
}

/// Admin statistics endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatisticsKind {
    Users,
    Courses,
    Enrollments,
}

impl StatisticsKind {
    pub fn path(self) -> &'static str {
        match self {
            StatisticsKind::Users => "/api/statistics/users/",
            StatisticsKind::Courses => "/api/statistics/courses/",
            StatisticsKind::Enrollments => "/api/statistics/enrollments/",
        }
    }
}

/// Loosely-shaped JSON report (reports, statistics)
pub type Report = serde_json::Map<String, serde_json::Value>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_response_deserialization() {
        let json = r#"{
            "message": "Login successful",
            "access": "eyJ.access",
            "refresh": "eyJ.refresh",
            "user": {"email": "s@example.com", "full_name": "Sam", "role": "student"}
        }"#;
        let resp: LoginResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.access, "eyJ.access");
        assert_eq!(resp.user.role, Role::Student);
        assert_eq!(resp.user.id, None);
    }

    #[test]
    fn test_course_detail_deserialization() {
        let json = r#"{
            "id": 4,
            "title": "Rust 101",
            "description": "Ownership and borrowing",
            "category": {"id": 1, "name": "Programming", "description": "", "courses_count": 3},
            "instructor": {"id": 9, "full_name": "Ferris", "email": "ferris@example.com"},
            "enrollments_count": 12,
            "is_enrolled": true,
            "created_at": "2025-01-01T00:00:00Z",
            "updated_at": "2025-01-02T00:00:00Z"
        }"#;
        let course: CourseDetail = serde_json::from_str(json).unwrap();
        assert_eq!(course.category.unwrap().name, "Programming");
        assert_eq!(course.instructor.unwrap().full_name, "Ferris");
        assert!(course.is_enrolled);
    }

    #[test]
    fn test_student_enrollment_deserialization() {
        let json = r#"[{
            "id": 1,
            "course": {"id": 4, "title": "Rust 101", "category_name": "Programming",
                       "instructor_name": "Ferris", "enrollments_count": 2},
            "enrolled_at": "2025-03-01T10:00:00Z"
        }]"#;
        let items: Vec<StudentEnrollment> = serde_json::from_str(json).unwrap();
        assert_eq!(items[0].course.title, "Rust 101");
        assert_eq!(items[0].course.description, "");
        assert_eq!(MyCourses::Enrolled(items).len(), 1);
    }

    #[test]
    fn test_dashboard_keeps_role_specific_details() {
        let json = r#"{
            "role": "admin",
            "summary": {"total_users": 10, "total_courses": 4},
            "users_by_role": {"student": 8, "admin": 2},
            "popular_courses": []
        }"#;
        let dashboard: Dashboard = serde_json::from_str(json).unwrap();
        assert_eq!(dashboard.role, Role::Admin);
        assert_eq!(dashboard.summary["total_users"], 10);
        assert!(dashboard.details.contains_key("users_by_role"));
        assert_eq!(
            dashboard.summary_cards(),
            vec![
                ("total courses".to_string(), 4),
                ("total users".to_string(), 10)
            ]
        );
    }

    #[test]
    fn test_new_staff_account_serialization() {
        let account = NewStaffAccount {
            email: "t@example.com".to_string(),
            full_name: "Teacher".to_string(),
            password: "longenough".to_string(),
            role: Role::Instructor,
        };
        let value = serde_json::to_value(&account).unwrap();
        assert_eq!(value["role"], "instructor");
    }

    #[test]
    fn test_statistics_paths() {
        assert_eq!(StatisticsKind::Users.path(), "/api/statistics/users/");
        assert_eq!(
            StatisticsKind::Enrollments.path(),
            "/api/statistics/enrollments/"
        );
    }
}
