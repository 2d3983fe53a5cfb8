//! Transport-neutral request and response values

use derive_more::Display;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::error::ApiError;

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Method {
    #[display("GET")]
    Get,
    #[display("POST")]
    Post,
    #[display("PUT")]
    Put,
    #[display("PATCH")]
    Patch,
    #[display("DELETE")]
    Delete,
}

/// A request against the API, relative to the configured base URL
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Attach a JSON body
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, ApiError> {
        let value = serde_json::to_value(body).map_err(|e| ApiError::Encode(e.to_string()))?;
        self.body = Some(value);
        Ok(self)
    }
}

/// Raw response: status plus body text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }

    /// Decode the body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_str(&self.body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Server-provided error message.
    ///
    /// Understands `{"error": ..}`, `{"detail": ..}`, `{"message": ..}` and
    /// field error maps like `{"email": ["already exists"]}`.
    pub fn error_message(&self) -> String {
        let fallback = || format!("Request failed with status {}", self.status);

        let Ok(serde_json::Value::Object(map)) = serde_json::from_str(&self.body) else {
            return fallback();
        };

        for key in ["error", "detail", "message"] {
            if let Some(serde_json::Value::String(message)) = map.get(key) {
                return message.clone();
            }
        }

        map.values()
            .find_map(|value| match value {
                serde_json::Value::Array(items) => items.iter().find_map(|i| i.as_str()),
                serde_json::Value::String(s) => Some(s.as_str()),
                _ => None,
            })
            .map(str::to_string)
            .unwrap_or_else(fallback)
    }

    /// Turn a non-2xx response into `ApiError::Application`
    pub fn error_for_status(self) -> Result<Self, ApiError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(ApiError::Application {
                status: self.status,
                message: self.error_message(),
            })
        }
    }
}
