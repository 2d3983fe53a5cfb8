//! Landing page

use leptos::prelude::*;
use leptos_router::components::A;

use crate::core::guard::View;
use crate::ui::session_context::use_session_context;

#[component]
pub fn HomePage() -> impl IntoView {
    let session = use_session_context();

    let actions = move || {
        if session.is_authenticated() {
            view! {
                <A href=View::Dashboard.path() attr:class="px-6 py-3 bg-indigo-600 hover:bg-indigo-700 text-white font-medium rounded-lg">
                    "Go to Dashboard"
                </A>
            }
            .into_any()
        } else {
            view! {
                <A href=View::Register.path() attr:class="px-6 py-3 bg-indigo-600 hover:bg-indigo-700 text-white font-medium rounded-lg">
                    "Get Started"
                </A>
                <A href=View::Login.path() attr:class="px-6 py-3 border border-slate-300 text-slate-700 font-medium rounded-lg hover:bg-slate-100">
                    "Sign In"
                </A>
            }
            .into_any()
        }
    };

    view! {
        <div class="min-h-screen bg-slate-50 flex flex-col items-center justify-center p-8 text-center">
            <h1 class="text-5xl font-bold text-slate-900">"Learn at your own pace"</h1>
            <p class="mt-4 max-w-xl text-lg text-slate-600">
                "Browse courses from our instructors, enroll in a click and keep track of your progress."
            </p>
            <div class="mt-8 flex gap-4">
                {actions}
            </div>
            <A href=View::Catalog.path() attr:class="mt-6 text-indigo-600 hover:underline">
                "Browse the catalog"
            </A>
        </div>
    }
}
