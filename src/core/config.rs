//! Client configuration.
//!
//! On the server, call `dotenvy::dotenv()` before `ClientConfig::from_env()`.
//! The WASM bundle has no environment, so the base URL is baked in at compile time.

/// Environment variable holding the API base URL
pub const API_BASE_URL_ENV: &str = "LMS_API_BASE_URL";

/// API base URL used when nothing is configured
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Where the LMS API lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL without a trailing slash, e.g. `https://lms.example.com`
    pub api_base_url: String,
}

impl ClientConfig {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self::from_value(Some(api_base_url.into()))
    }

    /// Load configuration from the environment (server) or the build (WASM)
    pub fn from_env() -> Self {
        #[cfg(not(target_arch = "wasm32"))]
        let value = std::env::var(API_BASE_URL_ENV).ok();
        #[cfg(target_arch = "wasm32")]
        let value = option_env!("LMS_API_BASE_URL").map(str::to_string);

        Self::from_value(value)
    }

    fn from_value(value: Option<String>) -> Self {
        let api_base_url = value
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        Self { api_base_url }
    }

    /// Check if the default local API is in use
    pub fn is_default(&self) -> bool {
        self.api_base_url == DEFAULT_API_BASE_URL
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // Value normalization (no env var dependencies - thread safe)
    // ========================================================================

    #[test]
    fn test_config_with_explicit_url() {
        let config = ClientConfig::new("https://lms.example.com");
        assert_eq!(config.api_base_url, "https://lms.example.com");
        assert!(!config.is_default());
    }

    #[test]
    fn test_config_trims_trailing_slashes() {
        let config = ClientConfig::new("https://lms.example.com//");
        assert_eq!(config.api_base_url, "https://lms.example.com");
    }

    #[test]
    fn test_config_trims_whitespace() {
        let config = ClientConfig::new("  http://10.0.0.5:8000/ \n");
        assert_eq!(config.api_base_url, "http://10.0.0.5:8000");
    }

    #[test]
    fn test_config_missing_value_uses_default() {
        let config = ClientConfig::from_value(None);
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert!(config.is_default());
    }

    #[test]
    fn test_config_empty_value_uses_default() {
        assert!(ClientConfig::new("").is_default());
        assert!(ClientConfig::new("   ").is_default());
        assert!(ClientConfig::new("/").is_default());
    }

    #[test]
    fn test_config_default_calls_from_env() {
        assert_eq!(ClientConfig::default(), ClientConfig::from_env());
    }
}
