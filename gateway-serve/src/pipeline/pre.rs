//! Pre stage (spec §4.1): fault-tolerant enrichment. No branch failure here
//! ever aborts the request — every call is defaulted and logged on error.

use tracing::warn;

use gateway_core::clients::feeling::{AffectRecord, ToneResponse};
use gateway_core::clients::memory::MemoryRetrieveResponse;
use gateway_core::clients::policy::{AffectInput, ApplyRequest, DriveInput};
use gateway_core::drive::{derive_focus, DrivePolicy, DriveVector};
use gateway_core::intent::IntentRecord;
use gateway_core::message::ChatMessage;
use gateway_core::routing;

use crate::state::AppState;

use super::{lane_for_family, PipelineContext};

const MEMORY_RETRIEVE_K: u32 = 5;

fn last_user_text(messages: &[ChatMessage]) -> &str {
    messages
        .iter()
        .rev()
        .find(|m| m.role == gateway_core::message::Role::User)
        .map(|m| m.content.as_str())
        .unwrap_or("")
}

async fn memory_branch(state: &AppState, request_id: &str, user_id: &str, intent_family: &str) -> MemoryRetrieveResponse {
    match state.memory.retrieve(request_id, user_id, intent_family, MEMORY_RETRIEVE_K).await {
        Ok(resp) => resp,
        Err(err) => {
            warn!(%err, "memory retrieve failed, using empty snapshot");
            MemoryRetrieveResponse::default()
        }
    }
}

async fn summary_branch(state: &AppState, request_id: &str, user_id: &str) -> String {
    match state.memory.summary(request_id, user_id).await {
        Ok(resp) => resp.summary,
        Err(err) => {
            warn!(%err, "memory summary failed, using empty summary");
            String::new()
        }
    }
}

async fn affect_branch(state: &AppState, request_id: &str, text: &str) -> (AffectRecord, ToneResponse) {
    let affect = match state.feeling.analyze(request_id, text).await {
        Ok(affect) => affect,
        Err(err) => {
            warn!(%err, "affect analyze failed, defaulting");
            AffectRecord::default()
        }
    };
    let tone = match state.feeling.tone(request_id, &affect).await {
        Ok(tone) => tone,
        Err(err) => {
            warn!(%err, "affect tone failed, defaulting");
            ToneResponse::default()
        }
    };
    (affect, tone)
}

async fn drive_branch(state: &AppState, request_id: &str, user_id: &str) -> (DriveVector, Option<DrivePolicy>) {
    let vector = match state.drive.get(request_id, user_id).await {
        Ok(v) => v,
        Err(err) => {
            warn!(%err, "drive get failed, defaulting to baseline");
            DriveVector::baseline()
        }
    };
    let policy = match state.drive.policy(request_id, user_id).await {
        Ok(p) => Some(p),
        Err(err) => {
            warn!(%err, "drive policy failed, omitting drive hints");
            None
        }
    };
    (vector, policy)
}

async fn describe_attachments(state: &AppState, request_id: &str, messages: &[ChatMessage]) -> Option<String> {
    let has_image = messages.iter().any(ChatMessage::has_image);
    let has_audio = messages.iter().any(ChatMessage::has_audio);
    if !has_image && !has_audio {
        return None;
    }

    let request = gateway_core::openai_sse::ChatCompletionRequest::new(&state.models.vision, messages, 0.0, 512);
    match state.provider_local.complete(request_id, &request).await {
        Ok(resp) => resp.choices.into_iter().next().and_then(|c| c.message.content),
        Err(local_err) => {
            warn!(%local_err, "local VLM observation failed, falling back to remote");
            match state.provider_remote.complete(request_id, &request).await {
                Ok(resp) => resp.choices.into_iter().next().and_then(|c| c.message.content),
                Err(remote_err) => {
                    warn!(%remote_err, "remote multimodal observation failed");
                    None
                }
            }
        }
    }
}

/// Runs the full Pre stage for one request.
pub async fn run(state: &AppState, request_id: &str, user_id: &str, messages: &[ChatMessage]) -> PipelineContext {
    let text = last_user_text(messages);

    let mut intent = match state.intent.route(request_id, text, None).await {
        Ok(resp) => IntentRecord {
            needs_remote: resp.family.needs_remote(),
            family: resp.family,
            emotion_template_id: resp.emotion_template_id,
            provider_preference: resp.provider,
            suggested_model_priority: resp.openrouter_model_priority,
            tags: resp.tags.into_iter().collect(),
        },
        Err(err) => {
            warn!(%err, "intent router call failed, defaulting to OPEN_ENDED");
            IntentRecord::fallback_open_ended()
        }
    };

    if routing::should_escalate_to_remote(text) {
        intent.needs_remote = true;
    }

    let vision_obs = describe_attachments(state, request_id, messages).await;

    let (memory, summary, (affect, tone), (drive, drive_policy)) = tokio::join!(
        memory_branch(state, request_id, user_id, &intent.family.to_string()),
        summary_branch(state, request_id, user_id),
        affect_branch(state, request_id, text),
        drive_branch(state, request_id, user_id),
    );

    let lane = lane_for_family(intent.family);
    let focus = derive_focus(&drive);

    let (system_final, validators) = match state
        .policy
        .apply(
            request_id,
            &ApplyRequest {
                lane,
                system: "You are a helpful assistant.",
                user: text,
                affect: AffectInput { emotion: affect.emotions.first().map(String::as_str).unwrap_or("neutral"), intensity: affect.confidence },
                drive: DriveInput { energy: drive.energy, focus },
            },
        )
        .await
    {
        Ok(resp) => (Some(resp.system_final), resp.validators),
        Err(err) => {
            warn!(%err, "policy apply failed, proceeding with base system prompt");
            (None, Vec::new())
        }
    };

    let mut addenda = Vec::new();
    if let Some(system_final) = system_final {
        addenda.push(system_final);
    }
    addenda.push("You are a helpful assistant.".to_string());
    if !summary.is_empty() {
        addenda.push(format!("[MEMORY SUMMARY]\n{summary}"));
    }
    if !memory.episodes.is_empty() {
        let rendered = memory.episodes.iter().map(|e| e.summary.as_str()).collect::<Vec<_>>().join("\n");
        addenda.push(format!("[RELEVANT EPISODES]\n{rendered}"));
    }
    addenda.push(format!("[AFFECT] {}", serde_json::to_string(&affect).unwrap_or_default()));
    if !tone.tone_policies.is_empty() {
        addenda.push(format!("[TONE_POLICY] {}", tone.tone_policies.join(",")));
    }
    if let Some(policy) = &drive_policy {
        addenda.push(format!("[DRIVE_HINTS] {}", serde_json::to_string(&policy.style_hints).unwrap_or_default()));
    }
    if let Some(obs) = vision_obs {
        addenda.push(format!("[VISION_OBS]\n{obs}"));
    }

    PipelineContext {
        lane,
        intent,
        system_addenda: addenda,
        validators,
        drive,
        drive_policy,
        traits: memory.traits,
        episodes: memory.episodes,
    }
}
