//! Role-dependent dashboard

use leptos::prelude::*;
use leptos_router::components::A;

use super::{Loading, settle};
use crate::core::lms::Dashboard;
use crate::ui::session_context::use_session_context;
use crate::ui::sidebar::DashboardLayout;

/// Headline counters returned by `/api/dashboard/`
#[component]
fn SummaryCards(dashboard: Dashboard) -> impl IntoView {
    view! {
        <div class="grid gap-4 sm:grid-cols-2 lg:grid-cols-4">
            {dashboard
                .summary_cards()
                .into_iter()
                .map(|(label, value)| {
                    view! {
                        <div class="bg-white rounded-xl shadow p-5">
                            <p class="text-xs uppercase tracking-wide text-slate-400">{label}</p>
                            <p class="mt-2 text-3xl font-semibold text-slate-900">{value}</p>
                        </div>
                    }
                })
                .collect_view()}
        </div>
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let session = use_session_context();

    let dashboard = LocalResource::new(move || async move {
        let client = session.client();
        settle(session, client.dashboard()).await
    });

    let greeting = move || {
        session
            .identity()
            .map(|identity| format!("Welcome back, {}", identity.full_name))
            .unwrap_or_default()
    };

    view! {
        <DashboardLayout title="Dashboard">
            <p class="mb-6 text-slate-600">{greeting}</p>
            <Suspense fallback=|| view! { <Loading/> }>
                {move || {
                    dashboard
                        .get()
                        .flatten()
                        .map(|dashboard| view! { <SummaryCards dashboard=dashboard/> })
                }}
            </Suspense>
            <div class="mt-8 flex gap-4 text-sm">
                {move || {
                    session
                        .guard()
                        .navigation()
                        .into_iter()
                        .skip(1)
                        .take(3)
                        .map(|entry| {
                            view! {
                                <A href=entry.path() attr:class="text-indigo-600 hover:underline">
                                    {entry.title()}
                                </A>
                            }
                        })
                        .collect_view()
                }}
            </div>
        </DashboardLayout>
    }
}
