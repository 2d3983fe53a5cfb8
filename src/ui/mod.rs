//! Leptos front end: session context, guarded routes, sidebar and pages

pub mod pages;
pub mod protected;
pub mod session_context;
pub mod sidebar;

pub use protected::Guarded;
pub use session_context::{SessionContext, provide_session_context, use_session_context};
pub use sidebar::{DashboardLayout, Sidebar};
