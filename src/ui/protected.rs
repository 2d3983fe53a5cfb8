//! Guarded route wrapper
//!
//! Renders its children only when the route guard allows the view, and
//! navigates to the guard's redirect otherwise.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use super::session_context::use_session_context;
use crate::core::guard::{GuardDecision, View};

#[component]
pub fn Guarded(
    /// View being entered
    target: View,
    children: ChildrenFn,
) -> impl IntoView {
    let session = use_session_context();
    let navigate = use_navigate();

    let decision = Memo::new(move |_| {
        session.state.track();
        session.guard().can_enter(target, None)
    });

    Effect::new(move |_| {
        if !session.ready.get() {
            return;
        }
        if let GuardDecision::RedirectTo(path) = decision.get() {
            navigate(
                &path,
                NavigateOptions {
                    replace: true,
                    ..Default::default()
                },
            );
        }
    });

    let allowed = move || session.ready.get() && decision.get() == GuardDecision::Allow;

    view! {
        <Show when=allowed fallback=|| view! { <Pending/> }>
            {children()}
        </Show>
    }
}

#[component]
fn Pending() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center py-24">
            <div class="w-8 h-8 border-4 border-indigo-500 border-t-transparent rounded-full animate-spin"></div>
        </div>
    }
}
