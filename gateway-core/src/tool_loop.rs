//! Bounded iterative Tool-Call Loop (spec §4.4).

use tracing::{debug, instrument};

use crate::clients::provider::ProviderClient;
use crate::clients::tools::ToolsClient;
use crate::error::ToolLoopError;
use crate::message::ChatMessage;
use crate::openai_sse::request::ChatCompletionRequest;

/// Temperature used for every Tool-Call Loop iteration (spec §4.4 step 1).
const LOOP_TEMPERATURE: f32 = 0.3;

/// Default bound on loop iterations (spec §4.4).
pub const DEFAULT_MAX_ITERS: u32 = 3;

pub struct ToolLoopOutcome {
    pub final_text: String,
    pub messages: Vec<ChatMessage>,
    pub tool_calls_total: u32,
}

/// Runs the Tool-Call Loop against `provider`, executing each model tool
/// call sequentially via `tools` (spec §5: "Tool-Call Loop executes tool
/// calls sequentially within one iteration; iterations are strictly
/// sequential").
#[instrument(skip(provider, tools, messages, tool_schema))]
pub async fn run(
    provider: &ProviderClient,
    tools: &ToolsClient,
    request_id: &str,
    model: &str,
    mut messages: Vec<ChatMessage>,
    tool_schema: Vec<serde_json::Value>,
    max_iters: u32,
    max_tokens: u32,
) -> Result<ToolLoopOutcome, ToolLoopError> {
    let mut tool_calls_total = 0u32;
    let mut last_text = String::new();

    // spec §8: max_iters = 0 means the model may be called once, but no
    // returned tool call is ever executed.
    if max_iters == 0 {
        let request = ChatCompletionRequest::new(model, &messages, LOOP_TEMPERATURE, max_tokens)
            .with_tools(tool_schema.clone());
        let response = provider.complete(request_id, &request).await?;
        if let Some(choice) = response.choices.into_iter().next() {
            last_text = choice.message.content.unwrap_or_default();
        }
        return Ok(ToolLoopOutcome { final_text: last_text, messages, tool_calls_total });
    }

    for iteration in 0..max_iters {
        let request = ChatCompletionRequest::new(model, &messages, LOOP_TEMPERATURE, max_tokens)
            .with_tools(tool_schema.clone());
        let response = provider.complete(request_id, &request).await?;
        let Some(choice) = response.choices.into_iter().next() else {
            break;
        };

        let assistant_text = choice.message.content.clone().unwrap_or_default();
        let tool_calls = choice.message.tool_calls.unwrap_or_default();

        if tool_calls.is_empty() {
            last_text = assistant_text;
            break;
        }

        if !assistant_text.is_empty() {
            messages.push(ChatMessage::assistant(assistant_text.clone()));
        }
        last_text = assistant_text;

        for call in &tool_calls {
            let arguments: serde_json::Value = serde_json::from_str(&call.function.arguments).unwrap_or(serde_json::json!({}));
            tool_calls_total += 1;

            let result = match tools.exec(request_id, &call.function.name, &arguments).await {
                Ok(response) if response.success => response.result.unwrap_or(serde_json::Value::Null),
                Ok(response) => serde_json::json!({ "error": response.error.unwrap_or_default() }),
                Err(err) => {
                    debug!(tool = %call.function.name, %err, "tool execution failed");
                    serde_json::json!({ "error": err.to_string() })
                }
            };

            messages.push(ChatMessage::tool(
                call.function.name.clone(),
                call.id.clone(),
                serde_json::to_string(&result).unwrap_or_default(),
            ));
        }

        if iteration + 1 == max_iters {
            debug!(max_iters, "tool-call loop reached iteration bound");
        }
    }

    Ok(ToolLoopOutcome { final_text: last_text, messages, tool_calls_total })
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::clients::tools::ToolsClient;
    use crate::http_client::ServiceClient;

    #[tokio::test]
    async fn max_iters_zero_returns_first_response_without_executing_tool_calls() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "resp-1",
                "model": "local/default",
                "choices": [{
                    "index": 0,
                    "message": {
                        "role": "assistant",
                        "content": "first response",
                        "tool_calls": [{
                            "id": "call-1",
                            "type": "function",
                            "function": {"name": "do_thing", "arguments": "{}"}
                        }]
                    },
                    "finish_reason": "tool_calls"
                }]
            })))
            // Exactly one call: if max_iters == 0 looped or executed the
            // tool call, a second request (a tool result round-trip) would
            // be attempted and this expectation would fail.
            .expect(1)
            .mount(&server)
            .await;

        let provider = ProviderClient::new(ServiceClient::new("model-provider-local", server.uri(), Duration::from_secs(5)), None);
        // Tool Hub is never dialed when max_iters == 0; point it at an
        // address nothing is listening on to prove that.
        let tools = ToolsClient::new(ServiceClient::new("tool-hub", "http://127.0.0.1:1", Duration::from_secs(5)));

        let outcome = run(
            &provider,
            &tools,
            "req-1",
            "local/default",
            vec![ChatMessage::user("hi")],
            Vec::new(),
            0,
            128,
        )
        .await
        .unwrap();

        assert_eq!(outcome.final_text, "first response");
        assert_eq!(outcome.tool_calls_total, 0);
    }
}
