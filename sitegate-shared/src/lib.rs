use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

/// Request from the browser chat UI to the gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    #[serde(default)]
    pub system: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub stream: Option<bool>,
}

/// Merged request body the gateway forwards to the inference upstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamChatRequest {
    pub model: String,
    pub stream: bool,
    pub messages: Vec<ChatMessage>,
}

impl ChatRequest {
    /// Builds the upstream body: an optional system message first, then the
    /// caller's messages exactly as supplied. Defaults are applied for
    /// `model` and `stream`.
    pub fn into_upstream(self, default_model: &str) -> UpstreamChatRequest {
        let mut messages = Vec::with_capacity(self.messages.len() + 1);
        if let Some(system) = self.system {
            messages.push(ChatMessage {
                role: MessageRole::System,
                content: system,
            });
        }
        messages.extend(self.messages);

        UpstreamChatRequest {
            model: self.model.unwrap_or_else(|| default_model.to_string()),
            stream: self.stream.unwrap_or(true),
            messages,
        }
    }
}

/// Contact form submission. `hp` is a honeypot field that genuine
/// submissions leave empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactPayload {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub hp: String,
}

/// Outcome of one contact dispatch attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionResult {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SubmissionResult {
    pub fn success(id: Option<String>) -> Self {
        Self {
            ok: true,
            id,
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            id: None,
            error: Some(error.into()),
        }
    }
}
