//! Administrator pages: user list, staff account creation, reports

use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{BUTTON_CLASS, FormMessage, INPUT_CLASS, Loading, settle};
use crate::core::lms::{NewStaffAccount, Report, StatisticsKind};
use crate::core::session::Role;
use crate::ui::session_context::use_session_context;
use crate::ui::sidebar::DashboardLayout;

#[component]
pub fn UsersPage() -> impl IntoView {
    let session = use_session_context();

    let users = LocalResource::new(move || async move {
        let client = session.client();
        settle(session, client.users()).await.unwrap_or_default()
    });

    view! {
        <DashboardLayout title="Users">
            <Suspense fallback=|| view! { <Loading/> }>
                <table class="w-full bg-white rounded-xl shadow text-sm">
                    <thead class="text-left text-slate-400">
                        <tr>
                            <th class="p-3">"Name"</th>
                            <th class="p-3">"Email"</th>
                            <th class="p-3">"Role"</th>
                            <th class="p-3">"Joined"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            users
                                .get()
                                .unwrap_or_default()
                                .into_iter()
                                .map(|user| {
                                    view! {
                                        <tr class="border-t border-slate-100">
                                            <td class="p-3">{user.full_name}</td>
                                            <td class="p-3">{user.email}</td>
                                            <td class="p-3">{user.role.label()}</td>
                                            <td class="p-3">{user.date_joined.unwrap_or_default()}</td>
                                        </tr>
                                    }
                                })
                                .collect_view()
                        }}
                    </tbody>
                </table>
            </Suspense>
        </DashboardLayout>
    }
}

/// Admin form for instructor and admin accounts
#[component]
pub fn CreateUserPage() -> impl IntoView {
    let session = use_session_context();

    let full_name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let role = RwSignal::new(Role::Instructor);
    let error = RwSignal::new(None::<String>);
    let notice = RwSignal::new(None::<String>);

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        error.set(None);
        notice.set(None);

        let account = NewStaffAccount {
            email: email.get_untracked(),
            full_name: full_name.get_untracked(),
            password: password.get_untracked(),
            role: role.get_untracked(),
        };
        spawn_local(async move {
            let client = session.client();
            match client.create_staff_account(&account).await {
                Ok(created) => {
                    notice.set(Some(format!(
                        "Created {} account for {}",
                        created.user.role, created.user.email
                    )));
                    full_name.set(String::new());
                    email.set(String::new());
                    password.set(String::new());
                }
                Err(e) if e.requires_login() => session.report(&e),
                Err(e) => error.set(Some(e.to_string())),
            }
        });
    };

    view! {
        <DashboardLayout title="Create User">
            <form on:submit=on_submit class="max-w-xl space-y-4 bg-white rounded-xl shadow p-6">
                <FormMessage message=error/>
                <FormMessage message=notice success=true/>
                <input
                    type="text"
                    placeholder="Full name"
                    class=INPUT_CLASS
                    prop:value=move || full_name.get()
                    on:input=move |ev| full_name.set(event_target_value(&ev))
                />
                <input
                    type="email"
                    placeholder="Email"
                    class=INPUT_CLASS
                    prop:value=move || email.get()
                    on:input=move |ev| email.set(event_target_value(&ev))
                />
                <input
                    type="password"
                    placeholder="Temporary password (8+ characters)"
                    autocomplete="new-password"
                    class=INPUT_CLASS
                    prop:value=move || password.get()
                    on:input=move |ev| password.set(event_target_value(&ev))
                />
                <select
                    class=INPUT_CLASS
                    on:change=move |ev| {
                        let value = event_target_value(&ev);
                        role.set(if value == "admin" { Role::Admin } else { Role::Instructor });
                    }
                >
                    <option value="instructor">{Role::Instructor.label()}</option>
                    <option value="admin">{Role::Admin.label()}</option>
                </select>
                <button type="submit" class=BUTTON_CLASS>"Create Account"</button>
            </form>
        </DashboardLayout>
    }
}

/// Key/value table for a loosely-shaped report
#[component]
fn ReportTable(#[prop(into)] title: String, report: Report) -> impl IntoView {
    view! {
        <section class="bg-white rounded-xl shadow p-5">
            <h2 class="font-semibold text-slate-900 mb-3">{title}</h2>
            <dl class="grid grid-cols-2 gap-2 text-sm">
                {report
                    .into_iter()
                    .map(|(key, value)| {
                        let value = match value {
                            serde_json::Value::String(s) => s,
                            other => other.to_string(),
                        };
                        view! {
                            <dt class="text-slate-400">{key.replace('_', " ")}</dt>
                            <dd class="break-all">{value}</dd>
                        }
                    })
                    .collect_view()}
            </dl>
        </section>
    }
}

#[component]
pub fn ReportsPage() -> impl IntoView {
    let session = use_session_context();

    let reports = LocalResource::new(move || async move {
        let client = session.client();
        let overview = settle(session, client.reports()).await?;
        let mut sections = vec![("Overview", overview)];
        for (title, kind) in [
            ("Users", StatisticsKind::Users),
            ("Courses", StatisticsKind::Courses),
            ("Enrollments", StatisticsKind::Enrollments),
        ] {
            if let Some(report) = settle(session, client.statistics(kind)).await {
                sections.push((title, report));
            }
        }
        Some(sections)
    });

    view! {
        <DashboardLayout title="Reports">
            <Suspense fallback=|| view! { <Loading/> }>
                <div class="grid gap-4 lg:grid-cols-2">
                    {move || {
                        reports
                            .get()
                            .flatten()
                            .unwrap_or_default()
                            .into_iter()
                            .map(|(title, report)| view! { <ReportTable title=title report=report/> })
                            .collect_view()
                    }}
                </div>
            </Suspense>
        </DashboardLayout>
    }
}
