//! Application pages

mod admin;
mod auth;
mod courses;
mod dashboard;
mod home;
mod not_found;
mod profile;

pub use admin::{CreateUserPage, ReportsPage, UsersPage};
pub use auth::{ForgotPasswordPage, LoginPage, RegisterPage, ResetPasswordPage};
pub use courses::{CatalogPage, CoursePage, CreateCoursePage, MyCoursesPage};
pub use dashboard::DashboardPage;
pub use home::HomePage;
pub use not_found::NotFoundPage;
pub use profile::ProfilePage;

use std::future::Future;

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use crate::core::api::ApiError;
use crate::ui::session_context::SessionContext;

/// Await an API call, handing failures to the session context
async fn settle<T>(
    session: SessionContext,
    call: impl Future<Output = Result<T, ApiError>>,
) -> Option<T> {
    match call.await {
        Ok(value) => Some(value),
        Err(e) => {
            session.report(&e);
            None
        }
    }
}

/// Course id from the `:id` route segment
fn course_id_param() -> Memo<Option<u64>> {
    let params = use_params_map();
    Memo::new(move |_| params.with(|p| p.get("id")).and_then(|id| id.parse().ok()))
}

const INPUT_CLASS: &str = "w-full px-3 py-2 border border-slate-300 rounded-lg focus:outline-none focus:ring-2 focus:ring-indigo-500";
const BUTTON_CLASS: &str = "px-4 py-2 bg-indigo-600 hover:bg-indigo-700 text-white font-medium rounded-lg transition-colors disabled:opacity-50";

#[component]
fn Loading() -> impl IntoView {
    view! { <p class="text-slate-500">"Loading..."</p> }
}

/// Inline error or notice under a form
#[component]
fn FormMessage(message: RwSignal<Option<String>>, #[prop(optional)] success: bool) -> impl IntoView {
    let class = if success {
        "p-3 bg-green-100 border border-green-300 rounded-lg text-sm text-green-700"
    } else {
        "p-3 bg-red-100 border border-red-300 rounded-lg text-sm text-red-700"
    };
    move || message.get().map(|text| view! { <div class=class>{text}</div> })
}
