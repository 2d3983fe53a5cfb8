//! API boundary: requests, transports and the authenticated executor

mod error;
mod executor;
mod request;
mod transport;

pub use error::{ApiError, AuthFailure, TransportError};
pub use executor::AuthenticatedExecutor;
pub use request::{ApiRequest, ApiResponse, Method};
#[cfg(feature = "hydrate")]
pub use transport::FetchTransport;
#[cfg(feature = "ssr")]
pub use transport::ReqwestTransport;
pub use transport::{HttpTransport, OfflineTransport, endpoint_url};

/// Login endpoint, `{email, password}` -> `{access, refresh, user}`
pub const LOGIN_PATH: &str = "/api/login/";

/// Token refresh endpoint, `{refresh}` -> `{access}`
pub const TOKEN_REFRESH_PATH: &str = "/api/token/refresh/";
