//! Request DTO sent to an OpenAI-compatible model provider (spec §6:
//! `POST /chat/completions {model,messages,temperature,max_tokens,tools?,stream?}`).

use serde::Serialize;

use crate::message::{ChatMessage, Role};

#[derive(Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ProviderMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<serde_json::Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<&'static str>,
    pub stream: bool,
}

/// Provider-facing message shape: `role` as a lowercase string, `content`
/// possibly absent for assistant messages that only carry `tool_calls`.
#[derive(Clone, Serialize)]
pub struct ProviderMessage {
    pub role: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

impl From<&ChatMessage> for ProviderMessage {
    fn from(m: &ChatMessage) -> Self {
        let role = match m.role {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::Tool => "tool",
        };
        Self {
            role,
            content: Some(m.content.clone()),
            name: m.name.clone(),
            tool_call_id: m.tool_call_id.clone(),
        }
    }
}

impl ChatCompletionRequest {
    pub fn new(model: impl Into<String>, messages: &[ChatMessage], temperature: f32, max_tokens: u32) -> Self {
        Self {
            model: model.into(),
            messages: messages.iter().map(ProviderMessage::from).collect(),
            temperature,
            max_tokens,
            tools: None,
            tool_choice: None,
            stream: false,
        }
    }

    pub fn with_tools(mut self, tools: Vec<serde_json::Value>) -> Self {
        if !tools.is_empty() {
            self.tools = Some(tools);
            self.tool_choice = Some("auto");
        }
        self
    }

    pub fn streaming(mut self) -> Self {
        self.stream = true;
        self
    }
}
