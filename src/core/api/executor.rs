//! Authenticated request executor
//!
//! Attaches the stored access token to every request and recovers from a
//! single expired token per call: on 401 it refreshes once and retries the
//! original request once. Any unrecoverable auth failure clears the session.

use std::sync::Arc;

use futures::lock::Mutex;
use serde::{Deserialize, Serialize};

use super::TOKEN_REFRESH_PATH;
use super::error::{ApiError, AuthFailure};
use super::request::{ApiRequest, ApiResponse};
use super::transport::HttpTransport;
use crate::core::session::{KeyValueStorage, SessionStore};

#[derive(Debug, Serialize)]
struct RefreshRequest<'a> {
    refresh: &'a str,
}

#[derive(Debug, Deserialize)]
struct RefreshResponse {
    access: String,
}

/// Executes API requests on behalf of the stored session
#[derive(Clone)]
pub struct AuthenticatedExecutor<T, S> {
    transport: T,
    session: SessionStore<S>,
    /// Serializes refresh calls so concurrent 401s share one refresh
    refresh_lock: Arc<Mutex<()>>,
}

impl<T: HttpTransport, S: KeyValueStorage> AuthenticatedExecutor<T, S> {
    pub fn new(transport: T, session: SessionStore<S>) -> Self {
        Self {
            transport,
            session,
            refresh_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn session(&self) -> &SessionStore<S> {
        &self.session
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send a request that needs no credentials
    pub async fn send_public(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        tracing::debug!("{} {} (public)", request.method, request.path);
        Ok(self.transport.send(request, None).await?)
    }

    /// Send a request with the current access token.
    ///
    /// Non-2xx statuses other than 401 are returned as ordinary responses and
    /// leave the session untouched.
    pub async fn execute(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        let session = self.session.load().ok_or(AuthFailure::NoSession)?;
        let mut token = session.access_token;
        // Identifies the login this call belongs to
        let refresh_token = session.refresh_token;
        let mut refreshed = false;

        // At most two sends: the original and one retry after a refresh
        loop {
            tracing::debug!("{} {}", request.method, request.path);
            let response = self.transport.send(request, Some(&token)).await?;

            if !response.is_unauthorized() {
                return Ok(response);
            }

            if refreshed {
                tracing::warn!(
                    "{} {} rejected again after token refresh",
                    request.method,
                    request.path
                );
                return Err(self.expire());
            }

            token = self.refresh(&token, &refresh_token).await?;
            refreshed = true;
        }
    }

    /// Obtain a fresh access token to replace `stale_token`.
    ///
    /// `refresh_token` is the one stored when the call started. If the stored
    /// session no longer carries it, a different login replaced the session and
    /// the call fails with `Expired`, leaving the newer session in place.
    async fn refresh(&self, stale_token: &str, refresh_token: &str) -> Result<String, ApiError> {
        let _guard = self.refresh_lock.lock().await;

        let Some(session) = self.session.load() else {
            tracing::debug!("Session disappeared before refresh");
            return Err(self.expire());
        };

        if session.refresh_token != refresh_token {
            tracing::debug!("Session replaced by another login, not retrying");
            return Err(AuthFailure::Expired.into());
        }

        if session.access_token != stale_token {
            tracing::debug!("Access token already refreshed by a concurrent request");
            return Ok(session.access_token);
        }

        let request = ApiRequest::post(TOKEN_REFRESH_PATH).json(&RefreshRequest {
            refresh: &session.refresh_token,
        })?;

        let response = match self.transport.send(&request, None).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Token refresh failed: {}", e);
                return Err(self.expire());
            }
        };

        if !response.is_success() {
            tracing::warn!("Token refresh rejected with status {}", response.status);
            return Err(self.expire());
        }

        let access = match response.json::<RefreshResponse>() {
            Ok(body) => body.access,
            Err(e) => {
                tracing::warn!("Token refresh returned an unreadable body: {}", e);
                return Err(self.expire());
            }
        };

        if self.session.refresh_token().as_deref() != Some(refresh_token) {
            tracing::debug!("Session replaced during token refresh, discarding new token");
            return Err(AuthFailure::Expired.into());
        }

        match self.session.update_access_token(&access) {
            Ok(true) => {
                tracing::info!("Access token refreshed for {}", session.identity.email);
                Ok(access)
            }
            Ok(false) => Err(AuthFailure::Expired.into()),
            Err(e) => {
                // Never keep the stale token around after a successful refresh
                self.expire();
                Err(e.into())
            }
        }
    }

    /// Clear the session and report expiry
    fn expire(&self) -> ApiError {
        if let Err(e) = self.session.clear() {
            tracing::warn!("Failed to clear expired session: {}", e);
        }
        AuthFailure::Expired.into()
    }
}
