//! HTTP client for the Parley chat backend.
//!
//! Wraps one shared [`reqwest::Client`] with a base address, bearer-token
//! injection from a [`parley_session::TokenStore`], and centralized error
//! classification: every failure is logged once and re-surfaced to the
//! caller, and a `401` clears the stored credential and fires the
//! host-installed expiry hook.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod types;

pub use client::{AuthExpiredHook, ChatClient};
pub use config::{ApiConfig, Config, DEFAULT_BASE_URL};
pub use error::{ApiError, Result};
pub use types::{ChatMessage, Conversation};
