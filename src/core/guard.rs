//! Route guard
//!
//! Decides per navigation whether a view may render for the current session.
//! The policy lives in one declarative table mapping each role to the views
//! it may open. This only shapes the UI; the server enforces authorization
//! on every request.

use crate::core::session::{KeyValueStorage, Role, SessionStore};

/// Every routable view of the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Home,
    Login,
    Register,
    ForgotPassword,
    ResetPassword,
    /// Public course catalog
    Catalog,
    /// Public course page
    CatalogCourse,
    Dashboard,
    /// Course list inside the dashboard
    BrowseCourses,
    /// Course page inside the dashboard (with enrollment)
    CourseDetail,
    CreateCourse,
    /// Admin form creating instructor or admin accounts
    CreateUser,
    MyCourses,
    Users,
    Reports,
    Profile,
}

/// Who may open a view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    /// Only without a session (login, register)
    GuestOnly,
    /// Any logged-in user whose role lists the view
    Authenticated,
}

/// Outcome of a guard check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    RedirectTo(String),
}

/// Where anonymous users are sent
pub const LOGIN_REDIRECT: &str = "/login";
/// Where users lacking a role are sent
pub const DENIED_REDIRECT: &str = "/dashboard";

const PUBLIC_VIEWS: &[View] = &[
    View::Home,
    View::ForgotPassword,
    View::ResetPassword,
    View::Catalog,
    View::CatalogCourse,
];

const GUEST_ONLY_VIEWS: &[View] = &[View::Login, View::Register];

const STUDENT_VIEWS: &[View] = &[
    View::Dashboard,
    View::BrowseCourses,
    View::CourseDetail,
    View::MyCourses,
    View::Profile,
];

const INSTRUCTOR_VIEWS: &[View] = &[
    View::Dashboard,
    View::BrowseCourses,
    View::CourseDetail,
    View::CreateCourse,
    View::MyCourses,
    View::Profile,
];

const ADMIN_VIEWS: &[View] = &[
    View::Dashboard,
    View::BrowseCourses,
    View::CourseDetail,
    View::CreateCourse,
    View::MyCourses,
    View::Users,
    View::CreateUser,
    View::Reports,
    View::Profile,
];

/// Role capability table
const CAPABILITIES: [(Role, &[View]); 3] = [
    (Role::Student, STUDENT_VIEWS),
    (Role::Instructor, INSTRUCTOR_VIEWS),
    (Role::Admin, ADMIN_VIEWS),
];

/// Sidebar order
const NAVIGATION_ORDER: &[View] = &[
    View::Dashboard,
    View::BrowseCourses,
    View::CreateCourse,
    View::MyCourses,
    View::Users,
    View::CreateUser,
    View::Reports,
    View::Profile,
];

/// Views a role may open once logged in
pub fn capabilities(role: Role) -> &'static [View] {
    CAPABILITIES
        .iter()
        .find(|(r, _)| *r == role)
        .map(|(_, views)| *views)
        .unwrap_or(&[])
}

impl View {
    pub const ALL: [View; 16] = [
        View::Home,
        View::Login,
        View::Register,
        View::ForgotPassword,
        View::ResetPassword,
        View::Catalog,
        View::CatalogCourse,
        View::Dashboard,
        View::BrowseCourses,
        View::CourseDetail,
        View::CreateCourse,
        View::CreateUser,
        View::MyCourses,
        View::Users,
        View::Reports,
        View::Profile,
    ];

    /// Route pattern; `:id` marks a course id segment
    pub fn path(self) -> &'static str {
        match self {
            View::Home => "/",
            View::Login => "/login",
            View::Register => "/register",
            View::ForgotPassword => "/forgot-password",
            View::ResetPassword => "/reset-password",
            View::Catalog => "/courses",
            View::CatalogCourse => "/courses/:id",
            View::Dashboard => "/dashboard",
            View::BrowseCourses => "/dashboard/courses",
            View::CourseDetail => "/dashboard/courses/:id",
            View::CreateCourse => "/create-course",
            View::CreateUser => "/create-instructor",
            View::MyCourses => "/my-courses",
            View::Users => "/users",
            View::Reports => "/reports",
            View::Profile => "/profile",
        }
    }

    /// Menu label
    pub fn title(self) -> &'static str {
        match self {
            View::Home => "Home",
            View::Login => "Sign In",
            View::Register => "Create Account",
            View::ForgotPassword => "Forgot Password",
            View::ResetPassword => "Reset Password",
            View::Catalog | View::BrowseCourses => "All Courses",
            View::CatalogCourse | View::CourseDetail => "Course",
            View::Dashboard => "Dashboard",
            View::CreateCourse => "Create Course",
            View::CreateUser => "Create User",
            View::MyCourses => "My Courses",
            View::Users => "Users",
            View::Reports => "Reports",
            View::Profile => "Profile",
        }
    }

    pub fn access(self) -> Access {
        if PUBLIC_VIEWS.contains(&self) {
            Access::Public
        } else if GUEST_ONLY_VIEWS.contains(&self) {
            Access::GuestOnly
        } else {
            Access::Authenticated
        }
    }

    /// Resolve a concrete URL path (e.g. `/dashboard/courses/12`) to its view
    pub fn from_path(path: &str) -> Option<View> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        View::ALL.into_iter().find(|view| {
            let pattern: Vec<&str> = view.path().split('/').filter(|s| !s.is_empty()).collect();
            pattern.len() == segments.len()
                && pattern
                    .iter()
                    .zip(&segments)
                    .all(|(p, s)| *p == ":id" || p == s)
        })
    }

    /// Concrete path for views that take a course id
    pub fn href_with_id(self, id: u64) -> String {
        self.path().replace(":id", &id.to_string())
    }
}

/// Route guard over the session store
#[derive(Debug, Clone)]
pub struct RouteGuard<S> {
    session: SessionStore<S>,
}

impl<S: KeyValueStorage> RouteGuard<S> {
    pub fn new(session: SessionStore<S>) -> Self {
        Self { session }
    }

    /// Whether `view` may render, optionally also requiring `required_role`
    pub fn can_enter(&self, view: View, required_role: Option<Role>) -> GuardDecision {
        let access = view.access();

        if access == Access::Public && required_role.is_none() {
            return GuardDecision::Allow;
        }

        let identity = self.session.current_identity();

        if access == Access::GuestOnly {
            return match identity {
                Some(_) => GuardDecision::RedirectTo(DENIED_REDIRECT.to_string()),
                None => GuardDecision::Allow,
            };
        }

        let Some(identity) = identity else {
            tracing::debug!("Guard: {:?} requires login", view);
            return GuardDecision::RedirectTo(LOGIN_REDIRECT.to_string());
        };

        if access == Access::Authenticated && !capabilities(identity.role).contains(&view) {
            tracing::debug!("Guard: {:?} not available to {}", view, identity.role);
            return GuardDecision::RedirectTo(DENIED_REDIRECT.to_string());
        }

        if let Some(required) = required_role {
            if !identity.role.grants(required) {
                tracing::debug!("Guard: {:?} requires {}, have {}", view, required, identity.role);
                return GuardDecision::RedirectTo(DENIED_REDIRECT.to_string());
            }
        }

        GuardDecision::Allow
    }

    /// Guard a concrete URL path. Unknown paths are allowed so the 404 page can render.
    pub fn can_enter_path(&self, path: &str) -> GuardDecision {
        match View::from_path(path) {
            Some(view) => self.can_enter(view, None),
            None => GuardDecision::Allow,
        }
    }

    /// Sidebar entries for the current user, empty when anonymous
    pub fn navigation(&self) -> Vec<View> {
        let Some(identity) = self.session.current_identity() else {
            return Vec::new();
        };
        let allowed = capabilities(identity.role);
        NAVIGATION_ORDER
            .iter()
            .copied()
            .filter(|view| allowed.contains(view))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::session::{Identity, MemoryStorage};

    fn guard_with(role: Option<Role>) -> RouteGuard<MemoryStorage> {
        let store = SessionStore::new(MemoryStorage::new());
        if let Some(role) = role {
            let identity = Identity {
                id: Some(3),
                full_name: "Test User".to_string(),
                email: "test@example.com".to_string(),
                role,
            };
            store.save("access", "refresh", &identity).unwrap();
        }
        RouteGuard::new(store)
    }

    fn redirect(path: &str) -> GuardDecision {
        GuardDecision::RedirectTo(path.to_string())
    }

    // ========================================================================
    // Capability table
    // ========================================================================

    #[test]
    fn test_every_protected_view_is_reachable_by_some_role() {
        for view in View::ALL {
            if view.access() == Access::Authenticated {
                assert!(
                    Role::ALL.iter().any(|r| capabilities(*r).contains(&view)),
                    "{:?} is unreachable",
                    view
                );
            }
        }
    }

    #[test]
    fn test_admin_only_views() {
        for view in [View::Users, View::CreateUser, View::Reports] {
            assert!(capabilities(Role::Admin).contains(&view));
            assert!(!capabilities(Role::Instructor).contains(&view));
            assert!(!capabilities(Role::Student).contains(&view));
        }
    }

    #[test]
    fn test_create_course_roles() {
        assert!(capabilities(Role::Instructor).contains(&View::CreateCourse));
        assert!(capabilities(Role::Admin).contains(&View::CreateCourse));
        assert!(!capabilities(Role::Student).contains(&View::CreateCourse));
    }

    // ========================================================================
    // can_enter
    // ========================================================================

    #[test]
    fn test_anonymous_dashboard_redirects_to_login() {
        let guard = guard_with(None);
        assert_eq!(guard.can_enter(View::Dashboard, None), redirect("/login"));
        assert_eq!(guard.can_enter(View::Profile, None), redirect("/login"));
    }

    #[test]
    fn test_student_denied_admin_page() {
        let guard = guard_with(Some(Role::Student));
        assert_eq!(
            guard.can_enter(View::Users, Some(Role::Admin)),
            redirect("/dashboard")
        );
        assert_eq!(guard.can_enter(View::Users, None), redirect("/dashboard"));
    }

    #[test]
    fn test_admin_allowed_admin_page() {
        let guard = guard_with(Some(Role::Admin));
        assert_eq!(
            guard.can_enter(View::Users, Some(Role::Admin)),
            GuardDecision::Allow
        );
    }

    #[test]
    fn test_explicit_role_requirement_with_elevation() {
        let admin = guard_with(Some(Role::Admin));
        assert_eq!(
            admin.can_enter(View::CreateCourse, Some(Role::Instructor)),
            GuardDecision::Allow
        );

        let instructor = guard_with(Some(Role::Instructor));
        assert_eq!(
            instructor.can_enter(View::Dashboard, Some(Role::Admin)),
            redirect("/dashboard")
        );
        assert_eq!(
            instructor.can_enter(View::Dashboard, Some(Role::Student)),
            redirect("/dashboard")
        );
    }

    #[test]
    fn test_public_views_always_allowed() {
        for role in [None, Some(Role::Student), Some(Role::Admin)] {
            let guard = guard_with(role);
            assert_eq!(guard.can_enter(View::Home, None), GuardDecision::Allow);
            assert_eq!(guard.can_enter(View::Catalog, None), GuardDecision::Allow);
            assert_eq!(
                guard.can_enter(View::CatalogCourse, None),
                GuardDecision::Allow
            );
        }
    }

    #[test]
    fn test_public_view_with_required_role_needs_session() {
        let guard = guard_with(None);
        assert_eq!(
            guard.can_enter(View::Catalog, Some(Role::Student)),
            redirect("/login")
        );
    }

    #[test]
    fn test_guest_only_views() {
        let anonymous = guard_with(None);
        assert_eq!(anonymous.can_enter(View::Login, None), GuardDecision::Allow);
        assert_eq!(anonymous.can_enter(View::Register, None), GuardDecision::Allow);

        let student = guard_with(Some(Role::Student));
        assert_eq!(student.can_enter(View::Login, None), redirect("/dashboard"));
    }

    #[test]
    fn test_guard_follows_session_changes() {
        let guard = guard_with(Some(Role::Student));
        assert_eq!(guard.can_enter(View::Dashboard, None), GuardDecision::Allow);

        guard.session.clear().unwrap();
        assert_eq!(guard.can_enter(View::Dashboard, None), redirect("/login"));
    }

    // ========================================================================
    // Paths and navigation
    // ========================================================================

    #[test]
    fn test_from_path() {
        assert_eq!(View::from_path("/"), Some(View::Home));
        assert_eq!(View::from_path("/dashboard"), Some(View::Dashboard));
        assert_eq!(View::from_path("/dashboard/"), Some(View::Dashboard));
        assert_eq!(View::from_path("/dashboard/courses"), Some(View::BrowseCourses));
        assert_eq!(
            View::from_path("/dashboard/courses/42"),
            Some(View::CourseDetail)
        );
        assert_eq!(View::from_path("/courses/7?tab=info"), Some(View::CatalogCourse));
        assert_eq!(View::from_path("/nope"), None);
    }

    #[test]
    fn test_href_with_id() {
        assert_eq!(View::CourseDetail.href_with_id(5), "/dashboard/courses/5");
        assert_eq!(View::CatalogCourse.href_with_id(9), "/courses/9");
    }

    #[test]
    fn test_can_enter_path() {
        let guard = guard_with(Some(Role::Instructor));
        assert_eq!(guard.can_enter_path("/reports"), redirect("/dashboard"));
        assert_eq!(guard.can_enter_path("/create-course"), GuardDecision::Allow);
        assert_eq!(guard.can_enter_path("/does-not-exist"), GuardDecision::Allow);
    }

    #[test]
    fn test_navigation_per_role() {
        assert!(guard_with(None).navigation().is_empty());

        assert_eq!(
            guard_with(Some(Role::Student)).navigation(),
            vec![
                View::Dashboard,
                View::BrowseCourses,
                View::MyCourses,
                View::Profile
            ]
        );

        let admin = guard_with(Some(Role::Admin)).navigation();
        assert_eq!(admin.first(), Some(&View::Dashboard));
        assert!(admin.contains(&View::Reports));
        assert!(admin.contains(&View::CreateUser));
        assert!(!admin.contains(&View::CourseDetail));
    }
}
