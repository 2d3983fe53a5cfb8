//! Client-side session, API access and route guarding for the LMS front end

pub mod api;
pub mod config;
pub mod guard;
pub mod lms;
pub mod session;

pub use config::ClientConfig;
pub use guard::{Access, GuardDecision, RouteGuard, View};
pub use lms::LmsClient;
pub use session::{Identity, Role, SessionState, SessionStore};
