//! Profile page

use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{BUTTON_CLASS, FormMessage, INPUT_CLASS};
use crate::core::session::ProfileUpdate;
use crate::ui::session_context::use_session_context;
use crate::ui::sidebar::DashboardLayout;

#[component]
pub fn ProfilePage() -> impl IntoView {
    let session = use_session_context();

    let full_name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let notice = RwSignal::new(None::<String>);

    // Prefill from the stored identity
    Effect::new(move |_| {
        if let Some(identity) = session.identity() {
            full_name.set(identity.full_name);
            email.set(identity.email);
        }
    });

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        error.set(None);
        notice.set(None);

        let update = ProfileUpdate {
            full_name: full_name.get_untracked(),
            email: email.get_untracked(),
        };
        spawn_local(async move {
            let client = session.client();
            match client.update_profile(&update).await {
                Ok(_) => {
                    session.sync();
                    notice.set(Some("Profile updated".to_string()));
                }
                Err(e) if e.requires_login() => session.report(&e),
                Err(e) => error.set(Some(e.to_string())),
            }
        });
    };

    let role = move || {
        session
            .identity()
            .map(|identity| identity.role.label())
            .unwrap_or_default()
    };

    view! {
        <DashboardLayout title="Profile">
            <form on:submit=on_submit class="max-w-xl space-y-4 bg-white rounded-xl shadow p-6">
                <FormMessage message=error/>
                <FormMessage message=notice success=true/>
                <label class="block text-sm text-slate-500">"Full name"</label>
                <input
                    type="text"
                    class=INPUT_CLASS
                    prop:value=move || full_name.get()
                    on:input=move |ev| full_name.set(event_target_value(&ev))
                />
                <label class="block text-sm text-slate-500">"Email"</label>
                <input
                    type="email"
                    class=INPUT_CLASS
                    prop:value=move || email.get()
                    on:input=move |ev| email.set(event_target_value(&ev))
                />
                <p class="text-sm text-slate-500">"Role: " {role}</p>
                <button type="submit" class=BUTTON_CLASS>"Save Changes"</button>
            </form>
        </DashboardLayout>
    }
}
