use std::fmt;
use std::sync::Arc;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;

use parley_session::TokenStore;

use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::http;
use crate::types::{ChatMessage, ChatRequest, Conversation, NewConversation};

/// Host-installed reaction to an expired credential, e.g. navigating to a
/// login screen. Invoked at most once per `401` response, after the token
/// store has been cleared. The client itself performs no navigation.
pub type AuthExpiredHook = Arc<dyn Fn() + Send + Sync>;

/// Client for the Parley chat backend.
///
/// Cheap to clone; all clones share one connection pool. Every request
/// inherits the base address, the 30s timeout, and the JSON content type,
/// and carries `Authorization: Bearer <token>` whenever the token store
/// holds a non-empty credential.
#[derive(Clone)]
pub struct ChatClient {
    http: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
    on_auth_expired: Option<AuthExpiredHook>,
}

impl fmt::Debug for ChatClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatClient")
            .field("base_url", &self.base_url)
            .field("tokens", &"<dyn TokenStore>")
            .field("on_auth_expired", &self.on_auth_expired.is_some())
            .finish_non_exhaustive()
    }
}

impl ChatClient {
    #[must_use]
    pub fn new(config: &Config, tokens: Arc<dyn TokenStore>) -> Self {
        let mut base_url = config.api.base_url.clone();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            http: http::default_client(),
            base_url,
            tokens,
            on_auth_expired: None,
        }
    }

    /// Override the HTTP client. Intended for tests.
    #[must_use]
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.http = client;
        self
    }

    /// Install the credential-expiry hook.
    #[must_use]
    pub fn with_auth_expired(mut self, hook: AuthExpiredHook) -> Self {
        self.on_auth_expired = Some(hook);
        self
    }

    /// Send a user message to an existing conversation.
    ///
    /// # Errors
    /// Returns [`ApiError`] on transport failure or any non-success status.
    pub async fn send_message(&self, conversation_id: &str, message: &str) -> Result<Value> {
        let url = self.url("/chat");
        let body = ChatRequest {
            conversation_id,
            message,
        };
        self.execute(self.http.post(&url).json(&body), url).await
    }

    /// List all conversations for the current user.
    ///
    /// # Errors
    /// Returns [`ApiError`] on transport failure or any non-success status.
    pub async fn conversations(&self) -> Result<Vec<Conversation>> {
        let url = self.url("/conversations");
        self.execute(self.http.get(&url), url).await
    }

    /// List the messages of one conversation.
    ///
    /// # Errors
    /// Returns [`ApiError`] on transport failure or any non-success status.
    pub async fn messages(&self, conversation_id: &str) -> Result<Vec<ChatMessage>> {
        let url = self.url(&format!("/conversations/{conversation_id}/messages"));
        self.execute(self.http.get(&url), url).await
    }

    /// Create a conversation with the given title.
    ///
    /// # Errors
    /// Returns [`ApiError`] on transport failure or any non-success status.
    pub async fn create_conversation(&self, title: &str) -> Result<Conversation> {
        let url = self.url("/conversations");
        let body = NewConversation { title };
        self.execute(self.http.post(&url).json(&body), url).await
    }

    /// Delete a conversation.
    ///
    /// # Errors
    /// Returns [`ApiError`] on transport failure or any non-success status.
    pub async fn delete_conversation(&self, conversation_id: &str) -> Result<Value> {
        let url = self.url(&format!("/conversations/{conversation_id}"));
        self.execute(self.http.delete(&url), url).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Single choke point for every request: bearer injection on the way
    /// out, failure classification on the way back. Each failure is logged
    /// exactly once and always re-surfaced to the caller.
    async fn execute<T: DeserializeOwned>(
        &self,
        req: reqwest::RequestBuilder,
        url: String,
    ) -> Result<T> {
        let req = match self.tokens.get() {
            Some(token) if !token.is_empty() => req.bearer_auth(token.expose()),
            _ => req,
        };

        let resp = match req.send().await {
            Ok(resp) => resp,
            Err(e) => {
                let err = ApiError::from_transport(e);
                match &err {
                    ApiError::NoResponse(_) => {
                        tracing::error!("no response from server for {url}");
                    }
                    ApiError::Request(e) => {
                        tracing::error!("request for {url} failed before reaching the server: {e}");
                    }
                    ApiError::Status { .. } | ApiError::Json(_) => {}
                }
                return Err(err);
            }
        };

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let message = error_message(&body);
            if status == StatusCode::UNAUTHORIZED {
                self.tokens.clear();
                if let Some(hook) = &self.on_auth_expired {
                    hook();
                }
            }
            tracing::error!(%status, %url, %message, "API error");
            return Err(ApiError::Status {
                status,
                message,
                url,
            });
        }

        let text = resp.text().await.map_err(ApiError::from_transport)?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// Pull a human-readable message out of an error body: the `message`
/// field, else `detail`, else the literal `"Unknown error"`.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            v.get("message")
                .or_else(|| v.get("detail"))
                .and_then(Value::as_str)
                .map(str::to_owned)
        })
        .unwrap_or_else(|| "Unknown error".to_owned())
}
