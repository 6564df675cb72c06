//! Shared HTTP client construction for consistent timeout and header configuration.

use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};

/// Ceiling applied uniformly to every request, chat completions included.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Create the shared HTTP client used for every Parley request.
///
/// Config: 30s request timeout, `application/json` default content type,
/// `parley/{version}` user-agent.
///
/// # Panics
///
/// Panics if the TLS backend cannot be initialized (should never happen with rustls).
#[must_use]
pub fn default_client() -> reqwest::Client {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .default_headers(headers)
        .user_agent(concat!("parley/", env!("CARGO_PKG_VERSION")))
        .build()
        .expect("default HTTP client construction must not fail")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_builds_successfully() {
        let _client = default_client();
    }
}
