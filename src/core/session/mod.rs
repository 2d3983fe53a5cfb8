//! Client-side session management
//!
//! - `identity`: roles and the user identity issued at login
//! - `storage`: key/value backends (`localStorage`, in-memory)
//! - `store`: the all-or-nothing session store

mod identity;
mod storage;
mod store;

pub use identity::{Identity, ProfileUpdate, Role};
#[cfg(feature = "hydrate")]
pub use storage::BrowserStorage;
pub use storage::{KeyValueStorage, MemoryStorage, StorageError};
pub use store::{
    ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, Session, SessionState, SessionStore, USER_KEY,
};
