//! Reactive session context
//!
//! Wraps the LMS client and mirrors the stored session into a signal so views
//! re-render when the user logs in, logs out or the session expires.

use leptos::prelude::*;

use crate::core::api::ApiError;
use crate::core::guard::RouteGuard;
use crate::core::session::{Identity, SessionState};
use crate::core::{ClientConfig, LmsClient};

#[cfg(feature = "hydrate")]
pub type AppStorage = crate::core::session::BrowserStorage;
#[cfg(not(feature = "hydrate"))]
pub type AppStorage = crate::core::session::MemoryStorage;

#[cfg(feature = "hydrate")]
pub type AppTransport = crate::core::api::FetchTransport;
#[cfg(not(feature = "hydrate"))]
pub type AppTransport = crate::core::api::OfflineTransport;

/// Client type used by the UI in the current build
pub type AppClient = LmsClient<AppTransport, AppStorage>;

#[cfg(feature = "hydrate")]
fn build_client(config: &ClientConfig) -> AppClient {
    LmsClient::new(
        AppTransport::new(config.api_base_url.clone()),
        AppStorage::default(),
    )
}

// Server rendering never sees the browser's session
#[cfg(not(feature = "hydrate"))]
fn build_client(_config: &ClientConfig) -> AppClient {
    LmsClient::new(AppTransport::default(), AppStorage::default())
}

/// Session state shared through the component tree
#[derive(Clone, Copy)]
pub struct SessionContext {
    /// Mirror of the stored session
    pub state: RwSignal<SessionState>,
    /// False until the stored session has been read on the client
    pub ready: RwSignal<bool>,
    /// Last error worth showing as a banner
    pub error: RwSignal<Option<String>>,
    client: StoredValue<AppClient>,
}

impl SessionContext {
    pub fn client(&self) -> AppClient {
        self.client.get_value()
    }

    pub fn guard(&self) -> RouteGuard<AppStorage> {
        self.client.with_value(|client| client.route_guard())
    }

    pub fn identity(&self) -> Option<Identity> {
        self.state.with(|state| state.identity().cloned())
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.with(SessionState::is_authenticated)
    }

    /// Re-read the store; call after anything that may have changed it
    pub fn sync(&self) {
        let state = self.client.with_value(|client| client.session().state());
        self.state.set(state);
    }

    pub fn clear_error(&self) {
        self.error.set(None);
    }

    /// Route an API error: auth failures drop the session (the guard then
    /// redirects), everything else becomes the banner message.
    pub fn report(&self, error: &ApiError) {
        if error.requires_login() {
            tracing::info!("Session ended: {}", error);
            self.sync();
        } else {
            self.error.set(Some(error.to_string()));
        }
    }

    pub fn logout(&self) {
        if let Err(e) = self.client.with_value(|client| client.logout()) {
            tracing::warn!("Logout failed: {}", e);
        }
        self.sync();
    }
}

/// Provide the session context to the component tree
pub fn provide_session_context() -> SessionContext {
    let config = ClientConfig::from_env();
    let ctx = SessionContext {
        // Anonymous on both server and client so hydration matches
        state: RwSignal::new(SessionState::Anonymous),
        ready: RwSignal::new(false),
        error: RwSignal::new(None),
        client: StoredValue::new(build_client(&config)),
    };

    #[cfg(feature = "hydrate")]
    Effect::new(move |_| {
        ctx.sync();
        ctx.ready.set(true);
    });

    provide_context(ctx);
    ctx
}

/// Get the session context from the component tree
pub fn use_session_context() -> SessionContext {
    expect_context::<SessionContext>()
}
