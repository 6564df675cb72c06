#![forbid(unsafe_code)]

//! Credential state shared between a host application and the Parley API
//! client: a redacting [`Secret`] wrapper and the [`TokenStore`] capability
//! the client reads before every request and clears on authentication
//! expiry.

pub mod secret;
pub mod store;

pub use secret::Secret;
pub use store::{FileTokenStore, MemoryTokenStore, TokenStore};
