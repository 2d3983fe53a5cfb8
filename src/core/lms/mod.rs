//! LMS domain: payload types and the typed API client

mod client;
mod models;

pub use client::LmsClient;
pub use models::*;
