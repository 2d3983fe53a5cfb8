//! Typed client for the LMS REST API

use serde::de::DeserializeOwned;

use super::models::{
    Category, CourseDetail, CourseSummary, Dashboard, ForgotPasswordRequest, LoginRequest,
    LoginResponse, MIN_PASSWORD_LENGTH, MessageResponse, MyCourses, NewCourse, NewStaffAccount,
    Profile, RegisterRequest, Report, ResetPasswordRequest, StaffAccountCreated, StatisticsKind,
    StudentEnrollment, UserRow,
};
use crate::core::api::{
    ApiError, ApiRequest, AuthFailure, AuthenticatedExecutor, HttpTransport, LOGIN_PATH,
};
use crate::core::guard::RouteGuard;
use crate::core::session::{Identity, KeyValueStorage, ProfileUpdate, Role, SessionStore};

const REGISTER_PATH: &str = "/api/register/";
const FORGOT_PASSWORD_PATH: &str = "/api/password/forgot/";
const RESET_PASSWORD_PATH: &str = "/api/password/reset/";
const PROFILE_PATH: &str = "/api/profile/";
const DASHBOARD_PATH: &str = "/api/dashboard/";
const REPORTS_PATH: &str = "/api/reports/";
const USERS_PATH: &str = "/api/users/";
const CREATE_STAFF_PATH: &str = "/api/admin/create-instructor/";
const COURSES_PATH: &str = "/lms/courses/";
const CREATE_COURSE_PATH: &str = "/lms/courses/create/";
const CATEGORIES_PATH: &str = "/lms/categories/";
const STUDENT_ENROLLMENTS_PATH: &str = "/lms/student/enrollments/";
const INSTRUCTOR_COURSES_PATH: &str = "/lms/instructor/courses/";

fn course_path(id: u64) -> String {
    format!("{}{}/", COURSES_PATH, id)
}

fn enroll_path(id: u64) -> String {
    format!("{}{}/enroll/", COURSES_PATH, id)
}

fn unenroll_path(id: u64) -> String {
    format!("{}{}/unenroll/", COURSES_PATH, id)
}

fn check_password(password: &str) -> Result<(), ApiError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ApiError::Validation(format!(
            "Password must be at least {} characters long",
            MIN_PASSWORD_LENGTH
        )));
    }
    Ok(())
}

fn require(value: &str, message: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::Validation(message.to_string()));
    }
    Ok(())
}

/// LMS API client bound to a session store
#[derive(Clone)]
pub struct LmsClient<T, S> {
    executor: AuthenticatedExecutor<T, S>,
}

impl<T: HttpTransport, S: KeyValueStorage> LmsClient<T, S> {
    pub fn new(transport: T, storage: S) -> Self {
        Self::from_executor(AuthenticatedExecutor::new(
            transport,
            SessionStore::new(storage),
        ))
    }

    pub fn from_executor(executor: AuthenticatedExecutor<T, S>) -> Self {
        Self { executor }
    }

    pub fn executor(&self) -> &AuthenticatedExecutor<T, S> {
        &self.executor
    }

    pub fn session(&self) -> &SessionStore<S> {
        self.executor.session()
    }

    /// Route guard sharing this client's session
    pub fn route_guard(&self) -> RouteGuard<S>
    where
        S: Clone,
    {
        RouteGuard::new(self.session().clone())
    }

    // ========================================================================
    // Authentication
    // ========================================================================

    /// Log in and persist the returned session.
    ///
    /// Rejected credentials come back as `ApiError::Application` with the
    /// server's message; the stored session is left untouched in that case.
    pub async fn login(&self, email: &str, password: &str) -> Result<Identity, ApiError> {
        require(email, "Email is required")?;
        require(password, "Password is required")?;

        let request = ApiRequest::post(LOGIN_PATH).json(&LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        })?;

        let login: LoginResponse = self
            .executor
            .send_public(&request)
            .await?
            .error_for_status()?
            .json()?;

        self.session()
            .save(&login.access, &login.refresh, &login.user)?;
        tracing::info!("Logged in as {} ({})", login.user.email, login.user.role);
        Ok(login.user)
    }

    /// Create a student account. Does not log in.
    pub async fn register(&self, form: &RegisterRequest) -> Result<(), ApiError> {
        require(&form.email, "Email is required")?;
        require(&form.full_name, "Full name is required")?;
        check_password(&form.password)?;

        let request = ApiRequest::post(REGISTER_PATH).json(form)?;
        self.executor
            .send_public(&request)
            .await?
            .error_for_status()?;
        tracing::info!("Registered {}", form.email);
        Ok(())
    }

    /// Register, then log in with the same credentials
    pub async fn register_and_login(&self, form: &RegisterRequest) -> Result<Identity, ApiError> {
        self.register(form).await?;
        self.login(&form.email, &form.password).await
    }

    /// Drop the local session. Tokens are opaque to the client, so there is
    /// nothing to revoke server-side.
    pub fn logout(&self) -> Result<(), ApiError> {
        self.session().clear()?;
        tracing::info!("Logged out");
        Ok(())
    }

    /// Ask the server to mail a reset link. Returns the server's message.
    pub async fn request_password_reset(&self, email: &str) -> Result<String, ApiError> {
        require(email, "Email is required")?;
        let request =
            ApiRequest::post(FORGOT_PASSWORD_PATH).json(&ForgotPasswordRequest { email })?;
        let ack: MessageResponse = self
            .executor
            .send_public(&request)
            .await?
            .error_for_status()?
            .json()?;
        Ok(ack.message)
    }

    /// Set a new password using the emailed `uid:token` value
    pub async fn reset_password(&self, token: &str, new_password: &str) -> Result<String, ApiError> {
        require(token, "Reset token is required")?;
        check_password(new_password)?;
        let request = ApiRequest::post(RESET_PASSWORD_PATH).json(&ResetPasswordRequest {
            token,
            new_password,
        })?;
        let ack: MessageResponse = self
            .executor
            .send_public(&request)
            .await?
            .error_for_status()?
            .json()?;
        Ok(ack.message)
    }

    // ========================================================================
    // Public catalog
    // ========================================================================

    pub async fn courses(&self) -> Result<Vec<CourseSummary>, ApiError> {
        self.get_public(COURSES_PATH).await
    }

    pub async fn course(&self, id: u64) -> Result<CourseDetail, ApiError> {
        self.get_public(&course_path(id)).await
    }

    pub async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        self.get_public(CATEGORIES_PATH).await
    }

    // ========================================================================
    // Authenticated
    // ========================================================================

    pub async fn dashboard(&self) -> Result<Dashboard, ApiError> {
        self.get_authenticated(DASHBOARD_PATH).await
    }

    /// Course page with the caller's enrollment status
    pub async fn course_for_user(&self, id: u64) -> Result<CourseDetail, ApiError> {
        self.get_authenticated(&course_path(id)).await
    }

    pub async fn profile(&self) -> Result<Profile, ApiError> {
        self.get_authenticated(PROFILE_PATH).await
    }

    /// Save profile edits and mirror the server's answer into the stored identity
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<Identity, ApiError> {
        require(&update.full_name, "Full name is required")?;
        require(&update.email, "Email is required")?;

        let request = ApiRequest::put(PROFILE_PATH).json(update)?;
        let profile: Profile = self.send_authenticated(&request).await?;

        let identity = self
            .session()
            .update_identity(ProfileUpdate {
                full_name: profile.full_name,
                email: profile.email,
            })?
            .ok_or(AuthFailure::NoSession)?;
        Ok(identity)
    }

    pub async fn create_course(&self, course: &NewCourse) -> Result<CourseSummary, ApiError> {
        require(&course.title, "Title is required")?;
        let request = ApiRequest::post(CREATE_COURSE_PATH).json(course)?;
        self.send_authenticated(&request).await
    }

    pub async fn enroll(&self, course_id: u64) -> Result<(), ApiError> {
        self.executor
            .execute(&ApiRequest::post(enroll_path(course_id)))
            .await?
            .error_for_status()?;
        tracing::info!("Enrolled in course {}", course_id);
        Ok(())
    }

    pub async fn unenroll(&self, course_id: u64) -> Result<(), ApiError> {
        self.executor
            .execute(&ApiRequest::post(unenroll_path(course_id)))
            .await?
            .error_for_status()?;
        tracing::info!("Left course {}", course_id);
        Ok(())
    }

    /// Enrollments for students, taught courses for instructors and admins
    pub async fn my_courses(&self) -> Result<MyCourses, ApiError> {
        let identity = self
            .session()
            .current_identity()
            .ok_or(AuthFailure::NoSession)?;

        match identity.role {
            Role::Student => {
                let items: Vec<StudentEnrollment> =
                    self.get_authenticated(STUDENT_ENROLLMENTS_PATH).await?;
                Ok(MyCourses::Enrolled(items))
            }
            Role::Instructor | Role::Admin => {
                let items: Vec<CourseSummary> =
                    self.get_authenticated(INSTRUCTOR_COURSES_PATH).await?;
                Ok(MyCourses::Teaching(items))
            }
        }
    }

    /// Admin only: create an instructor or admin account
    pub async fn create_staff_account(
        &self,
        account: &NewStaffAccount,
    ) -> Result<StaffAccountCreated, ApiError> {
        if account.role == Role::Student {
            return Err(ApiError::Validation(
                "Role must be either instructor or admin".to_string(),
            ));
        }
        require(&account.email, "Email is required")?;
        require(&account.full_name, "Full name is required")?;
        check_password(&account.password)?;

        let request = ApiRequest::post(CREATE_STAFF_PATH).json(account)?;
        let created: StaffAccountCreated = self.send_authenticated(&request).await?;
        tracing::info!("Created {} account {}", created.user.role, created.user.email);
        Ok(created)
    }

    pub async fn users(&self) -> Result<Vec<UserRow>, ApiError> {
        self.get_authenticated(USERS_PATH).await
    }

    pub async fn reports(&self) -> Result<Report, ApiError> {
        self.get_authenticated(REPORTS_PATH).await
    }

    pub async fn statistics(&self, kind: StatisticsKind) -> Result<Report, ApiError> {
        self.get_authenticated(kind.path()).await
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    async fn get_public<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        self.executor
            .send_public(&ApiRequest::get(path))
            .await?
            .error_for_status()?
            .json()
    }

    async fn get_authenticated<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        self.send_authenticated(&ApiRequest::get(path)).await
    }

    async fn send_authenticated<R: DeserializeOwned>(
        &self,
        request: &ApiRequest,
    ) -> Result<R, ApiError> {
        self.executor
            .execute(request)
            .await?
            .error_for_status()?
            .json()
    }
}
