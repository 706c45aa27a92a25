//! `POST /v1/chat/completions` and `POST /v1/chat/completions/stream`
//! (spec §6).

use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use tokio_stream::wrappers::ReceiverStream;

use gateway_core::message::ChatMessage;
use gateway_core::openai_sse::GatewayStreamWriter;
use gateway_core::tool_loop::DEFAULT_MAX_ITERS;
use gateway_core::ErrorKind;

use crate::pipeline::{mid, post, pre};
use crate::rate_limit::rate_limit_key;
use crate::state::SharedState;

use super::{error_response, request_id_from_headers, user_id_from_headers, ErrorBody};

#[derive(Deserialize)]
pub struct ChatRequestBody {
    pub messages: Vec<ChatMessage>,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub max_iters: Option<u32>,
}

#[derive(Serialize)]
pub struct ChatResponseMessage {
    pub role: &'static str,
    pub content: String,
}

#[derive(Serialize)]
pub struct ChatChoice {
    pub index: u32,
    pub message: ChatResponseMessage,
}

#[derive(Serialize)]
pub struct ChatResponseBody {
    pub id: String,
    pub object: &'static str,
    pub model: String,
    pub choices: Vec<ChatChoice>,
}

fn build_full_messages(addenda: &[String], original: &[ChatMessage]) -> Vec<ChatMessage> {
    let mut full: Vec<ChatMessage> = addenda.iter().map(|a| ChatMessage::system(a.clone())).collect();
    full.extend(original.iter().cloned());
    full
}

pub async fn chat_completions(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(req): Json<ChatRequestBody>,
) -> Result<Json<ChatResponseBody>, (StatusCode, Json<ErrorBody>)> {
    state.metrics.inc_requests();

    if req.messages.is_empty() {
        return Err(error_response(ErrorKind::InvalidRequest("messages must not be empty".to_string())));
    }

    let request_id = request_id_from_headers(&headers);
    let user_id = user_id_from_headers(&headers).unwrap_or_else(|| req.user.clone().unwrap_or_else(|| "global".to_string()));

    if !state.rate_limiter.try_acquire(&rate_limit_key(Some(&user_id))) {
        state.metrics.inc_rate_limited();
        return Err(error_response(ErrorKind::RateLimited));
    }

    let pipeline = async {
        let ctx = pre::run(&state, &request_id, &user_id, &req.messages).await;
        let full_messages = build_full_messages(&ctx.system_addenda, &req.messages);

        let outcome = mid::run(
            &state,
            &request_id,
            &full_messages,
            req.model.as_deref(),
            &ctx.intent.suggested_model_priority,
            req.max_iters.unwrap_or(DEFAULT_MAX_ITERS),
        )
        .await?;

        let final_text = post::run(&state, &request_id, &user_id, &ctx, &req.messages, outcome.final_text).await;
        Ok::<(String, String), ErrorKind>((final_text, outcome.model_used))
    };

    let result = if state.settings.tuning.pipeline_timeout.is_zero() {
        pipeline.await
    } else {
        match tokio::time::timeout(state.settings.tuning.pipeline_timeout, pipeline).await {
            Ok(r) => r,
            Err(_) => {
                state.metrics.inc_timeouts();
                Err(ErrorKind::Timeout)
            }
        }
    };

    match result {
        Ok((content, model)) => Ok(Json(ChatResponseBody {
            id: format!("chatcmpl-{request_id}"),
            object: "chat.completion",
            model,
            choices: vec![ChatChoice { index: 0, message: ChatResponseMessage { role: "assistant", content } }],
        })),
        Err(kind) => Err(error_response(kind)),
    }
}

pub async fn chat_completions_stream(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(req): Json<ChatRequestBody>,
) -> Result<Response, (StatusCode, Json<ErrorBody>)> {
    state.metrics.inc_requests();

    if req.messages.is_empty() {
        return Err(error_response(ErrorKind::InvalidRequest("messages must not be empty".to_string())));
    }

    let request_id = request_id_from_headers(&headers);
    let user_id = user_id_from_headers(&headers).unwrap_or_else(|| req.user.clone().unwrap_or_else(|| "global".to_string()));

    if !state.rate_limiter.try_acquire(&rate_limit_key(Some(&user_id))) {
        state.metrics.inc_rate_limited();
        return Err(error_response(ErrorKind::RateLimited));
    }

    let ctx = pre::run(&state, &request_id, &user_id, &req.messages).await;
    let full_messages = build_full_messages(&ctx.system_addenda, &req.messages);

    let (mut provider_stream, _model) = mid::run_stream(&state, &request_id, &full_messages, req.model.as_deref())
        .await
        .map_err(error_response)?;

    let (tx, rx) = tokio::sync::mpsc::channel::<Result<bytes::Bytes, std::convert::Infallible>>(64);
    let state_bg = state.clone();
    let request_id_bg = request_id.clone();
    let user_id_bg = user_id.clone();
    let original_messages = req.messages.clone();

    tokio::spawn(async move {
        let mut writer = GatewayStreamWriter::new();
        while let Some(chunk) = provider_stream.next().await {
            if let Some(line) = writer.feed(&chunk) {
                if tx.send(Ok(bytes::Bytes::from(line))).await.is_err() {
                    return;
                }
            }
        }
        if tx.send(Ok(bytes::Bytes::from(GatewayStreamWriter::done_line()))).await.is_err() {
            return;
        }
        let draft = writer.accumulated_text().to_string();
        let _ = post::run(&state_bg, &request_id_bg, &user_id_bg, &ctx, &original_messages, draft).await;
    });

    let body = Body::from_stream(ReceiverStream::new(rx));
    Ok(Response::builder()
        .status(StatusCode::OK)
        .header("content-type", "application/x-ndjson")
        .header("x-request-id", request_id)
        .body(body)
        .unwrap()
        .into_response())
}
