//! Role-aware sidebar and the dashboard layout around it

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::{use_location, use_navigate};

use super::session_context::use_session_context;
use crate::core::guard::{LOGIN_REDIRECT, View};

/// Sidebar listing the views the current user may open
#[component]
pub fn Sidebar() -> impl IntoView {
    let session = use_session_context();
    let pathname = use_location().pathname;
    let navigate = use_navigate();

    let entries = Memo::new(move |_| {
        session.state.track();
        session.guard().navigation()
    });

    let on_logout = move |_| {
        session.logout();
        navigate(LOGIN_REDIRECT, Default::default());
    };

    view! {
        <aside class="w-64 shrink-0 bg-slate-900 text-slate-100 min-h-screen flex flex-col">
            <div class="px-6 py-5 border-b border-slate-800">
                <A href=View::Home.path() attr:class="text-xl font-bold">"LMS"</A>
            </div>

            <nav class="flex-1 px-3 py-4 space-y-1">
                <For
                    each=move || entries.get()
                    key=|entry| *entry
                    children=move |entry| {
                        let class = move || {
                            if pathname.get() == entry.path() {
                                "block px-3 py-2 rounded-lg text-sm bg-slate-800"
                            } else {
                                "block px-3 py-2 rounded-lg text-sm hover:bg-slate-800 transition-colors"
                            }
                        };
                        view! {
                            <A href=entry.path() attr:class=class>
                                {entry.title()}
                            </A>
                        }
                    }
                />
            </nav>

            {move || {
                session.identity().map(|identity| {
                    view! {
                        <div class="px-6 py-4 border-t border-slate-800">
                            <p class="text-sm font-medium truncate">{identity.full_name.clone()}</p>
                            <p class="text-xs text-slate-400 truncate">{identity.email.clone()}</p>
                            <span class="inline-block mt-2 px-2 py-0.5 text-xs rounded bg-indigo-600">
                                {identity.role.label()}
                            </span>
                        </div>
                    }
                })
            }}

            <button
                class="mx-3 mb-4 px-3 py-2 text-sm text-left rounded-lg hover:bg-slate-800"
                on:click=on_logout
            >
                "Log out"
            </button>
        </aside>
    }
}

/// Page frame for authenticated views
#[component]
pub fn DashboardLayout(
    /// Page heading
    #[prop(into)]
    title: String,
    children: Children,
) -> impl IntoView {
    let session = use_session_context();

    view! {
        <div class="flex min-h-screen bg-slate-50">
            <Sidebar/>
            <main class="flex-1 p-8">
                <h1 class="text-2xl font-semibold text-slate-900 mb-6">{title}</h1>
                {move || {
                    session.error.get().map(|message| {
                        view! {
                            <div class="mb-6 p-3 bg-red-100 border border-red-300 rounded-lg flex justify-between">
                                <p class="text-sm text-red-700">{message}</p>
                                <button class="text-sm text-red-700" on:click=move |_| session.clear_error()>
                                    "Dismiss"
                                </button>
                            </div>
                        }
                    })
                }}
                {children()}
            </main>
        </div>
    }
}
