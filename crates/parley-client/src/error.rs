use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server answered with a non-success status.
    #[error("server returned {status} for {url}: {message}")]
    Status {
        status: StatusCode,
        message: String,
        url: String,
    },

    /// The request went out but no response ever arrived.
    #[error("no response from server: {0}")]
    NoResponse(#[source] reqwest::Error),

    /// The request failed locally before reaching the server.
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// A success response carried a body that did not decode as JSON.
    #[error("JSON decode failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl ApiError {
    /// Classify a transport-level failure: timeouts and connection errors
    /// mean the server never answered; everything else failed locally.
    #[must_use]
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() || err.is_connect() {
            Self::NoResponse(err)
        } else {
            Self::Request(err)
        }
    }

    /// True when the server reported the credential invalid.
    #[must_use]
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::Status { status, .. } if *status == StatusCode::UNAUTHORIZED)
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
