//! Mid stage (spec §4.1): builds the final message sequence, fetches the
//! tool schema, picks a provider/model via the Routing Policy, and runs the
//! Tool-Call Loop with per-model retry + cross-model fallback (§4.3).

use std::time::Duration;

use tracing::warn;

use gateway_core::clients::provider::ProviderClient;
use gateway_core::clients::tools::ToolSpec;
use gateway_core::error::{ErrorKind, ServiceError, ToolLoopError};
use gateway_core::message::ChatMessage;
use gateway_core::openai_sse::{ChatCompletionChunk, ChatCompletionRequest};
use gateway_core::routing::{self, Provider, RetryPolicy, RouteDecision, RoutingInput};
use gateway_core::tool_loop;
use tokio_stream::wrappers::ReceiverStream;

use crate::state::AppState;

const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Per-model retry budget before advancing to the next model in the
/// priority list (spec §4.3 "Remote call retry").
const RETRY_POLICY: RetryPolicy = RetryPolicy { max_retries: 2, backoff_base: Duration::from_millis(250) };

pub struct MidOutcome {
    pub final_text: String,
    pub model_used: String,
    pub tool_calls_total: u32,
}

fn to_tool_schema(tools: &[ToolSpec]) -> Vec<serde_json::Value> {
    tools
        .iter()
        .map(|t| {
            serde_json::json!({
                "type": "function",
                "function": { "name": t.name, "description": t.description, "parameters": t.parameters },
            })
        })
        .collect()
}

fn provider_for<'a>(state: &'a AppState, provider: Provider) -> &'a ProviderClient {
    match provider {
        Provider::Local => &state.provider_local,
        Provider::Remote => &state.provider_remote,
    }
}

/// Calls the critique service on the final draft and swaps it in iff the
/// cleaned text is non-empty (spec §4.1 Mid stage, last sentence). Failures
/// are non-fatal: the original draft passes through unchanged.
async fn critique_draft(state: &AppState, request_id: &str, outcome: MidOutcome) -> MidOutcome {
    let max_tokens = state.settings.tuning.critique_max_tokens as usize;
    match state.feeling.critique(request_id, &outcome.final_text, max_tokens).await {
        Ok(resp) if !resp.cleaned_text.trim().is_empty() => MidOutcome { final_text: resp.cleaned_text, ..outcome },
        Ok(_) => outcome,
        Err(err) => {
            warn!(%err, "critique call failed, keeping draft as-is");
            outcome
        }
    }
}

async fn fetch_tool_schema(state: &AppState, request_id: &str) -> Vec<serde_json::Value> {
    match state.tools.list(request_id).await {
        Ok(resp) => to_tool_schema(&resp.tools),
        Err(err) => {
            warn!(%err, "tool hub schema fetch failed, proceeding with no tools");
            Vec::new()
        }
    }
}

/// Runs the Tool-Call Loop against one `(provider, model)`, retrying the
/// same model up to `RETRY_POLICY.max_retries` times on a retryable error.
async fn run_loop_with_retry(
    provider: &ProviderClient,
    state: &AppState,
    request_id: &str,
    model: &str,
    messages: &[ChatMessage],
    tool_schema: &[serde_json::Value],
    max_iters: u32,
) -> Result<tool_loop::ToolLoopOutcome, ServiceError> {
    let mut attempt = 0;
    loop {
        let result = tool_loop::run(
            provider,
            &state.tools,
            request_id,
            model,
            messages.to_vec(),
            tool_schema.to_vec(),
            max_iters,
            DEFAULT_MAX_TOKENS,
        )
        .await;

        match result {
            Ok(outcome) => return Ok(outcome),
            Err(ToolLoopError::Provider(err)) => {
                if err.is_retryable() && attempt < RETRY_POLICY.max_retries {
                    tokio::time::sleep(RETRY_POLICY.backoff_for(attempt)).await;
                    attempt += 1;
                    continue;
                }
                return Err(err);
            }
        }
    }
}

/// Runs the full Mid stage: tool schema, routing decision, Tool-Call Loop,
/// cross-model retry, and a final local-provider fallback (spec §4.3).
pub async fn run(
    state: &AppState,
    request_id: &str,
    messages: &[ChatMessage],
    force_model: Option<&str>,
    suggested_model_priority: &[String],
    max_iters: u32,
) -> Result<MidOutcome, ErrorKind> {
    let tool_schema = fetch_tool_schema(state, request_id).await;

    let routing_input = RoutingInput {
        messages,
        has_tools: !tool_schema.is_empty(),
        force_model,
        remote_available: true,
        local_available: true,
    };
    let decision = routing::decide(&routing_input, &state.models).map_err(|_| ErrorKind::NoProviderAvailable)?;

    let model_priority: Vec<String> =
        if suggested_model_priority.is_empty() { vec![decision.model.clone()] } else { suggested_model_priority.to_vec() };

    let provider_client = provider_for(state, decision.provider);
    let mut last_err: Option<ServiceError> = None;

    for model in &model_priority {
        match run_loop_with_retry(provider_client, state, request_id, model, messages, &tool_schema, max_iters).await {
            Ok(outcome) => {
                state.metrics.add_tool_calls(outcome.tool_calls_total);
                let outcome = MidOutcome { final_text: outcome.final_text, model_used: model.clone(), tool_calls_total: outcome.tool_calls_total };
                return Ok(critique_draft(state, request_id, outcome).await);
            }
            Err(err) => {
                warn!(%err, model, "model attempt failed, advancing priority list");
                last_err = Some(err);
            }
        }
    }

    if let Some(RouteDecision { model: fallback_model, .. }) = routing::fallback(&decision, true, &state.models.default_local) {
        match run_loop_with_retry(&state.provider_local, state, request_id, &fallback_model, messages, &tool_schema, max_iters).await {
            Ok(outcome) => {
                state.metrics.add_tool_calls(outcome.tool_calls_total);
                let outcome = MidOutcome { final_text: outcome.final_text, model_used: fallback_model, tool_calls_total: outcome.tool_calls_total };
                return Ok(critique_draft(state, request_id, outcome).await);
            }
            Err(err) => last_err = Some(err),
        }
    }

    state.metrics.inc_provider_failures();
    Err(ErrorKind::UpstreamFailure(last_err.map(|e| e.to_string()).unwrap_or_else(|| "all providers exhausted".to_string())))
}

/// Streaming variant (spec §4.1 "Streaming variant"): Mid opens a raw
/// provider stream directly instead of running the Tool-Call Loop.
pub async fn run_stream(
    state: &AppState,
    request_id: &str,
    messages: &[ChatMessage],
    force_model: Option<&str>,
) -> Result<(ReceiverStream<ChatCompletionChunk>, String), ErrorKind> {
    let routing_input =
        RoutingInput { messages, has_tools: false, force_model, remote_available: true, local_available: true };
    let decision = routing::decide(&routing_input, &state.models).map_err(|_| ErrorKind::NoProviderAvailable)?;

    let provider_client = provider_for(state, decision.provider);
    let request = ChatCompletionRequest::new(&decision.model, messages, 0.7, DEFAULT_MAX_TOKENS).streaming();

    match provider_client.stream(request_id, &request).await {
        Ok(stream) => Ok((stream, decision.model)),
        Err(err) => {
            state.metrics.inc_provider_failures();
            Err(ErrorKind::UpstreamFailure(err.to_string()))
        }
    }
}
