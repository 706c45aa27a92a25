//! Chat message types shared by the pipeline, the tool-call loop, and every
//! outbound provider/service client.

use serde::{Deserialize, Serialize};

/// Role of a [`ChatMessage`] in a conversation, per spec §3.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    System,
    User,
    Assistant,
    Tool,
}

/// Reference to an image or audio attachment on a [`ChatMessage`] (by URL or
/// inline base64), used by the remote-escalation and multimodal-lane logic
/// in the Pre stage.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Attachment {
    Image { url: Option<String>, base64: Option<String> },
    Audio { url: Option<String>, base64: Option<String> },
}

/// One message in the conversation, per spec §3's `ChatMessage` record.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
            name: None,
            tool_call_id: None,
            attachments: Vec::new(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            name: None,
            tool_call_id: None,
            attachments: Vec::new(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            name: None,
            tool_call_id: None,
            attachments: Vec::new(),
        }
    }

    pub fn tool(name: impl Into<String>, tool_call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: Role::Tool,
            content: content.into(),
            name: Some(name.into()),
            tool_call_id: Some(tool_call_id.into()),
            attachments: Vec::new(),
        }
    }

    pub fn has_image(&self) -> bool {
        self.attachments.iter().any(|a| matches!(a, Attachment::Image { .. }))
    }

    pub fn has_audio(&self) -> bool {
        self.attachments.iter().any(|a| matches!(a, Attachment::Audio { .. }))
    }
}

/// A tool call requested by the model (OpenAI-compatible shape).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    /// Raw arguments as returned by the model: usually a JSON-encoded string,
    /// parsed by the tool-call loop before dispatch (spec §4.4).
    pub arguments: String,
}
