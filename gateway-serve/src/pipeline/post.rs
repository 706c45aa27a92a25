//! Post stage (spec §4.1): always executes, even when Mid partially failed.
//! Memory candidate writes are fire-and-forget (spec §5: "Already-enqueued
//! memory writes are not cancelled"); `validate` runs synchronously because
//! its `repaired` text may still replace the response before it reaches the
//! caller.

use tracing::warn;

use gateway_core::message::ChatMessage;

use crate::state::AppState;

use super::PipelineContext;

const USER_CANDIDATE_CONFIDENCE: f64 = 0.7;
const ASSISTANT_CANDIDATE_CONFIDENCE: f64 = 0.6;

fn last_user_text(messages: &[ChatMessage]) -> String {
    messages
        .iter()
        .rev()
        .find(|m| m.role == gateway_core::message::Role::User)
        .map(|m| m.content.clone())
        .unwrap_or_default()
}

/// Runs the Post stage, returning the text to send to the caller (possibly
/// repaired by Policy Guardrails' `validate`).
pub async fn run(state: &std::sync::Arc<AppState>, request_id: &str, user_id: &str, ctx: &PipelineContext, messages: &[ChatMessage], draft: String) -> String {
    let user_text = last_user_text(messages);
    let tags: Vec<String> = ctx.intent.tags.iter().cloned().collect();

    // Step 1: enqueue memory candidates (fire-and-forget).
    {
        let state = state.clone();
        let request_id = request_id.to_string();
        let user_id = user_id.to_string();
        let tags = tags.clone();
        tokio::spawn(async move {
            if let Err(err) = state.memory.submit_candidate(&request_id, &user_id, &user_text, &tags, USER_CANDIDATE_CONFIDENCE).await {
                warn!(%err, "memory candidate submit failed for user turn");
            }
        });
    }
    {
        let state = state.clone();
        let request_id = request_id.to_string();
        let user_id = user_id.to_string();
        let assistant_text = draft.clone();
        tokio::spawn(async move {
            if let Err(err) = state
                .memory
                .submit_candidate(&request_id, &user_id, &assistant_text, &[], ASSISTANT_CANDIDATE_CONFIDENCE)
                .await
            {
                warn!(%err, "memory candidate submit failed for assistant turn");
            }
        });
    }

    // Step 2: policy validate, replacing the draft iff repairs are available.
    let final_text = match state.policy.validate(request_id, ctx.lane, &draft).await {
        Ok(resp) if !resp.ok => resp.repaired.unwrap_or(draft),
        Ok(_) => draft,
        Err(err) => {
            warn!(%err, "policy validate failed, returning unrepaired text");
            draft
        }
    };

    // Step 3: chat_turn telemetry event (best-effort, logged and swallowed on failure).
    {
        let state = state.clone();
        let request_id = request_id.to_string();
        let family = ctx.intent.family.to_string();
        let response_len = final_text.len();
        tokio::spawn(async move {
            let payload = serde_json::json!({ "intent": family, "response_length": response_len });
            if let Err(err) = state.telemetry.log(&request_id, "chat_turn", &payload).await {
                warn!(%err, "chat_turn telemetry emit failed");
            }
        });
    }

    final_text
}
