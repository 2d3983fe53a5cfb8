//! HTTP transports
//!
//! A transport performs exactly one HTTP exchange and never interprets the
//! status code. Browser builds use `gloo-net` fetch, native builds `reqwest`.

use super::error::TransportError;
use super::request::{ApiRequest, ApiResponse};
#[cfg(any(feature = "hydrate", feature = "ssr"))]
use super::request::Method;

/// One HTTP round trip against the API
#[allow(async_fn_in_trait)]
pub trait HttpTransport {
    /// Send `request`, adding `Authorization: Bearer <token>` when `bearer` is set
    async fn send(
        &self,
        request: &ApiRequest,
        bearer: Option<&str>,
    ) -> Result<ApiResponse, TransportError>;
}

/// Join the API base URL and a request path without doubling slashes
pub fn endpoint_url(base_url: &str, path: &str) -> String {
    let base = base_url.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}

fn bearer_header(token: &str) -> String {
    format!("Bearer {}", token)
}

/// Browser fetch transport
#[cfg(feature = "hydrate")]
#[derive(Debug, Clone)]
pub struct FetchTransport {
    base_url: String,
}

#[cfg(feature = "hydrate")]
impl FetchTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

#[cfg(feature = "hydrate")]
impl HttpTransport for FetchTransport {
    async fn send(
        &self,
        request: &ApiRequest,
        bearer: Option<&str>,
    ) -> Result<ApiResponse, TransportError> {
        use gloo_net::http::Request;

        let url = endpoint_url(&self.base_url, &request.path);
        let mut builder = match request.method {
            Method::Get => Request::get(&url),
            Method::Post => Request::post(&url),
            Method::Put => Request::put(&url),
            Method::Patch => Request::patch(&url),
            Method::Delete => Request::delete(&url),
        };
        if let Some(token) = bearer {
            builder = builder.header("Authorization", &bearer_header(token));
        }

        let sent = match &request.body {
            Some(body) => builder
                .json(body)
                .map_err(|e| TransportError(e.to_string()))?
                .send()
                .await,
            None => builder.send().await,
        };
        let response = sent.map_err(|e| TransportError(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError(e.to_string()))?;
        Ok(ApiResponse { status, body })
    }
}

/// Native transport backed by `reqwest`
#[cfg(feature = "ssr")]
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    base_url: String,
}

#[cfg(feature = "ssr")]
impl ReqwestTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[cfg(feature = "ssr")]
impl HttpTransport for ReqwestTransport {
    async fn send(
        &self,
        request: &ApiRequest,
        bearer: Option<&str>,
    ) -> Result<ApiResponse, TransportError> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        };

        let url = endpoint_url(&self.base_url, &request.path);
        let mut builder = self.client.request(method, url);
        if let Some(token) = bearer {
            builder = builder.header(reqwest::header::AUTHORIZATION, bearer_header(token));
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError(e.to_string()))?;
        Ok(ApiResponse { status, body })
    }
}

/// Transport used while rendering on the server, where no user session exists
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineTransport;

impl HttpTransport for OfflineTransport {
    async fn send(
        &self,
        request: &ApiRequest,
        _bearer: Option<&str>,
    ) -> Result<ApiResponse, TransportError> {
        Err(TransportError(format!(
            "{} {} is not available during server rendering",
            request.method, request.path
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_url_joins_cleanly() {
        assert_eq!(
            endpoint_url("http://localhost:8000", "/api/login/"),
            "http://localhost:8000/api/login/"
        );
        assert_eq!(
            endpoint_url("http://localhost:8000/", "/api/login/"),
            "http://localhost:8000/api/login/"
        );
        assert_eq!(
            endpoint_url("http://localhost:8000//", "lms/courses/"),
            "http://localhost:8000/lms/courses/"
        );
        assert_eq!(endpoint_url("", "/api/profile/"), "/api/profile/");
    }

    #[test]
    fn test_bearer_header() {
        assert_eq!(bearer_header("abc"), "Bearer abc");
    }

    #[tokio::test]
    async fn test_offline_transport_always_fails() {
        let err = OfflineTransport
            .send(&ApiRequest::get("/api/dashboard/"), Some("t"))
            .await
            .unwrap_err();
        assert!(err.0.contains("GET /api/dashboard/"));
    }
}
