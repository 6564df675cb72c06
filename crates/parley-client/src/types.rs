use serde::{Deserialize, Serialize};

/// Body of `POST /chat`.
#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest<'a> {
    pub conversation_id: &'a str,
    pub message: &'a str,
}

/// Body of `POST /conversations`.
#[derive(Debug, Serialize)]
pub(crate) struct NewConversation<'a> {
    pub title: &'a str,
}

/// A server-owned conversation.
///
/// Everything beyond the id is optional: the server defines the shape, and
/// a response it considered valid is never rejected here.
#[derive(Debug, Clone, Deserialize)]
pub struct Conversation {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// One message within a conversation.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatMessage {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}
