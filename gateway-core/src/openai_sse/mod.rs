//! Streaming adapters on both sides of the gateway:
//!
//! - [`chunk`]/[`request`]: DTOs for the upstream, OpenAI-compatible model
//!   provider (`data: <json>` SSE lines terminated by `data: [DONE]`).
//! - [`GatewayStreamWriter`]: the gateway's own, simpler outbound framing for
//!   `POST /v1/chat/completions/stream` — newline-delimited JSON
//!   `{"delta":"…"}` lines terminated by the literal `[DONE]` (spec §6).

pub mod chunk;
pub mod request;

pub use chunk::{ChatCompletionChunk, ChatCompletionResponse, Choice, ChunkChoice, Delta, DeltaToolCall, Usage};
pub use request::{ChatCompletionRequest, ProviderMessage};

use serde::Serialize;

/// The literal sentinel that terminates a gateway stream (spec §6).
pub const DONE_SENTINEL: &str = "[DONE]";

#[derive(Clone, Serialize)]
struct DeltaFrame<'a> {
    delta: &'a str,
}

/// One `{"delta":"…"}\n` line for the gateway's own streaming response body.
pub fn write_delta_line(delta: &str) -> String {
    let frame = DeltaFrame { delta };
    format!("{}\n", serde_json::to_string(&frame).expect("DeltaFrame always serializes"))
}

/// Accumulates provider chunks into gateway delta lines, tracking the final
/// assistant text for the Post stage's memory-candidate write (spec §4.1
/// Streaming variant: "memory candidates use accumulated text").
#[derive(Default)]
pub struct GatewayStreamWriter {
    accumulated: String,
}

impl GatewayStreamWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one upstream chunk's delta content (if any) and returns the
    /// gateway-framed line to relay to the client.
    pub fn feed(&mut self, chunk: &ChatCompletionChunk) -> Option<String> {
        let content = chunk.choices.first()?.delta.content.as_deref()?;
        if content.is_empty() {
            return None;
        }
        self.accumulated.push_str(content);
        Some(write_delta_line(content))
    }

    /// The terminating line for a gateway stream.
    pub fn done_line() -> String {
        format!("{DONE_SENTINEL}\n")
    }

    pub fn accumulated_text(&self) -> &str {
        &self.accumulated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_delta_line_is_valid_json_plus_newline() {
        let line = write_delta_line("hello");
        assert!(line.ends_with('\n'));
        let value: serde_json::Value = serde_json::from_str(line.trim_end()).unwrap();
        assert_eq!(value["delta"], "hello");
    }

    #[test]
    fn writer_accumulates_text_across_chunks() {
        let mut writer = GatewayStreamWriter::new();
        let chunk_a = ChatCompletionChunk {
            id: "c1".into(),
            model: "m".into(),
            choices: vec![ChunkChoice {
                index: 0,
                delta: Delta { role: None, content: Some("Hel".into()), tool_calls: None },
                finish_reason: None,
            }],
            usage: None,
        };
        let chunk_b = ChatCompletionChunk {
            id: "c1".into(),
            model: "m".into(),
            choices: vec![ChunkChoice {
                index: 0,
                delta: Delta { role: None, content: Some("lo".into()), tool_calls: None },
                finish_reason: None,
            }],
            usage: None,
        };
        writer.feed(&chunk_a);
        writer.feed(&chunk_b);
        assert_eq!(writer.accumulated_text(), "Hello");
    }
}
