//! Sign-in, registration and password reset pages

use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::{use_navigate, use_query_map};

use super::{BUTTON_CLASS, FormMessage, INPUT_CLASS};
use crate::core::guard::View;
use crate::core::lms::RegisterRequest;
use crate::ui::session_context::use_session_context;

/// Centered card used by every auth page
#[component]
fn AuthCard(#[prop(into)] title: String, #[prop(into)] subtitle: String, children: Children) -> impl IntoView {
    view! {
        <div class="min-h-screen bg-slate-50 flex items-center justify-center p-4">
            <div class="w-full max-w-md bg-white rounded-xl shadow p-8 space-y-6">
                <div class="text-center">
                    <h2 class="text-2xl font-bold text-slate-900">{title}</h2>
                    <p class="mt-2 text-sm text-slate-500">{subtitle}</p>
                </div>
                {children()}
            </div>
        </div>
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = use_session_context();
    let navigate = use_navigate();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let pending = RwSignal::new(false);

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        error.set(None);
        pending.set(true);

        let navigate = navigate.clone();
        let email = email.get_untracked();
        let password = password.get_untracked();
        spawn_local(async move {
            let client = session.client();
            let result = client.login(&email, &password).await;
            pending.set(false);
            match result {
                Ok(_) => {
                    session.sync();
                    navigate(View::Dashboard.path(), Default::default());
                }
                Err(e) => error.set(Some(e.to_string())),
            }
        });
    };

    view! {
        <AuthCard title="Welcome Back" subtitle="Sign in to continue learning">
            <form on:submit=on_submit class="space-y-4">
                <FormMessage message=error/>
                <input
                    type="email"
                    placeholder="you@example.com"
                    autocomplete="email"
                    class=INPUT_CLASS
                    prop:value=move || email.get()
                    on:input=move |ev| email.set(event_target_value(&ev))
                />
                <input
                    type="password"
                    placeholder="Password"
                    autocomplete="current-password"
                    class=INPUT_CLASS
                    prop:value=move || password.get()
                    on:input=move |ev| password.set(event_target_value(&ev))
                />
                <button type="submit" class=format!("w-full {}", BUTTON_CLASS) disabled=move || pending.get()>
                    {move || if pending.get() { "Signing in..." } else { "Sign In" }}
                </button>
            </form>
            <div class="flex justify-between text-sm">
                <A href=View::ForgotPassword.path() attr:class="text-indigo-600">"Forgot password?"</A>
                <A href=View::Register.path() attr:class="text-indigo-600">"Create an account"</A>
            </div>
        </AuthCard>
    }
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let session = use_session_context();
    let navigate = use_navigate();

    let full_name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let pending = RwSignal::new(false);

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        error.set(None);

        if password.get_untracked() != confirm.get_untracked() {
            error.set(Some("Passwords do not match".to_string()));
            return;
        }

        let form = RegisterRequest {
            email: email.get_untracked(),
            full_name: full_name.get_untracked(),
            password: password.get_untracked(),
        };
        let navigate = navigate.clone();
        pending.set(true);
        spawn_local(async move {
            let client = session.client();
            let result = client.register(&form).await;
            pending.set(false);
            match result {
                Ok(()) => navigate(View::Login.path(), Default::default()),
                Err(e) => error.set(Some(e.to_string())),
            }
        });
    };

    view! {
        <AuthCard title="Create Account" subtitle="Join as a student">
            <form on:submit=on_submit class="space-y-4">
                <FormMessage message=error/>
                <input
                    type="text"
                    placeholder="Full name"
                    class=INPUT_CLASS
                    prop:value=move || full_name.get()
                    on:input=move |ev| full_name.set(event_target_value(&ev))
                />
                <input
                    type="email"
                    placeholder="you@example.com"
                    class=INPUT_CLASS
                    prop:value=move || email.get()
                    on:input=move |ev| email.set(event_target_value(&ev))
                />
                <input
                    type="password"
                    placeholder="Password (8+ characters)"
                    autocomplete="new-password"
                    class=INPUT_CLASS
                    prop:value=move || password.get()
                    on:input=move |ev| password.set(event_target_value(&ev))
                />
                <input
                    type="password"
                    placeholder="Confirm password"
                    autocomplete="new-password"
                    class=INPUT_CLASS
                    prop:value=move || confirm.get()
                    on:input=move |ev| confirm.set(event_target_value(&ev))
                />
                <button type="submit" class=format!("w-full {}", BUTTON_CLASS) disabled=move || pending.get()>
                    "Create Account"
                </button>
            </form>
            <p class="text-sm text-center">
                "Already registered? "
                <A href=View::Login.path() attr:class="text-indigo-600">"Sign in"</A>
            </p>
        </AuthCard>
    }
}

#[component]
pub fn ForgotPasswordPage() -> impl IntoView {
    let session = use_session_context();

    let email = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let notice = RwSignal::new(None::<String>);

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        error.set(None);
        notice.set(None);

        let email = email.get_untracked();
        spawn_local(async move {
            let client = session.client();
            match client.request_password_reset(&email).await {
                Ok(message) => notice.set(Some(message)),
                Err(e) => error.set(Some(e.to_string())),
            }
        });
    };

    view! {
        <AuthCard title="Forgot Password" subtitle="We will email you a reset link">
            <form on:submit=on_submit class="space-y-4">
                <FormMessage message=error/>
                <FormMessage message=notice success=true/>
                <input
                    type="email"
                    placeholder="you@example.com"
                    class=INPUT_CLASS
                    prop:value=move || email.get()
                    on:input=move |ev| email.set(event_target_value(&ev))
                />
                <button type="submit" class=format!("w-full {}", BUTTON_CLASS)>"Send Reset Link"</button>
            </form>
            <A href=View::Login.path() attr:class="block text-sm text-center text-indigo-600">"Back to sign in"</A>
        </AuthCard>
    }
}

#[component]
pub fn ResetPasswordPage() -> impl IntoView {
    let session = use_session_context();
    let query = use_query_map();

    let token = Memo::new(move |_| query.with(|q| q.get("token")).unwrap_or_default());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let notice = RwSignal::new(None::<String>);

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        error.set(None);
        notice.set(None);

        if password.get_untracked() != confirm.get_untracked() {
            error.set(Some("Passwords do not match".to_string()));
            return;
        }

        let token = token.get_untracked();
        let password = password.get_untracked();
        spawn_local(async move {
            let client = session.client();
            match client.reset_password(&token, &password).await {
                Ok(message) => notice.set(Some(message)),
                Err(e) => error.set(Some(e.to_string())),
            }
        });
    };

    view! {
        <AuthCard title="Reset Password" subtitle="Choose a new password">
            <form on:submit=on_submit class="space-y-4">
                <FormMessage message=error/>
                <FormMessage message=notice success=true/>
                <input
                    type="password"
                    placeholder="New password"
                    autocomplete="new-password"
                    class=INPUT_CLASS
                    prop:value=move || password.get()
                    on:input=move |ev| password.set(event_target_value(&ev))
                />
                <input
                    type="password"
                    placeholder="Confirm new password"
                    autocomplete="new-password"
                    class=INPUT_CLASS
                    prop:value=move || confirm.get()
                    on:input=move |ev| confirm.set(event_target_value(&ev))
                />
                <button type="submit" class=format!("w-full {}", BUTTON_CLASS)>"Reset Password"</button>
            </form>
            <A href=View::Login.path() attr:class="block text-sm text-center text-indigo-600">"Back to sign in"</A>
        </AuthCard>
    }
}
