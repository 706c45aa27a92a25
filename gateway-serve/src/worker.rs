//! Background task-queue worker (spec §4.1 "Task queue", §5 "every payload
//! is eventually either handled successfully, or present in DLQ"). Polls
//! [`crate::task_queue::TaskQueue`] on an interval, runs the full Pre → Mid
//! → Post pipeline against each task's payload, and acks or nacks based on
//! the outcome. Disabled by default (`TASK_WORKER_ENABLED`); `main` only
//! spawns [`run`] when the setting is on.

use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use gateway_core::message::ChatMessage;

use crate::pipeline::{mid, post, pre};
use crate::state::AppState;
use gateway_core::tool_loop::DEFAULT_MAX_ITERS;

/// How often the worker polls the queue when it finds nothing to do.
const POLL_INTERVAL: Duration = Duration::from_secs(1);

fn task_messages(task: &gateway_core::Task) -> Option<Vec<ChatMessage>> {
    let messages = task.payload.get("messages")?;
    serde_json::from_value(messages.clone()).ok()
}

fn task_user_id(task: &gateway_core::Task) -> String {
    task.payload.get("user").and_then(|v| v.as_str()).unwrap_or("anon").to_string()
}

/// Runs one task through the pipeline, discarding its output (spec §4.1: the
/// worker's job is side effects — memory writes, telemetry — not a response
/// body). Returns `Err` on any stage failure so the caller can nack.
async fn handle_task(state: &Arc<AppState>, task: &gateway_core::Task) -> Result<(), ()> {
    let Some(messages) = task_messages(task) else {
        warn!(task_id = %task.id, "task payload missing a `messages` array, dropping");
        return Err(());
    };
    let user_id = task_user_id(task);
    let request_id = format!("task-{}", task.id);

    let ctx = pre::run(state, &request_id, &user_id, &messages).await;
    let full_messages: Vec<ChatMessage> =
        ctx.system_addenda.iter().map(|a| ChatMessage::system(a.clone())).chain(messages.iter().cloned()).collect();

    let outcome = mid::run(state, &request_id, &full_messages, None, &ctx.intent.suggested_model_priority, DEFAULT_MAX_ITERS)
        .await
        .map_err(|_| ())?;

    post::run(state, &request_id, &user_id, &ctx, &messages, outcome.final_text).await;
    Ok(())
}

/// Drains the task queue forever. Intended to be `tokio::spawn`ed once at
/// startup and left to run for the life of the process.
pub async fn run(state: Arc<AppState>) {
    loop {
        state.task_queue.reclaim_expired();

        let Some(task) = state.task_queue.dequeue() else {
            tokio::time::sleep(POLL_INTERVAL).await;
            continue;
        };

        let task_id = task.id.clone();
        match handle_task(&state, &task).await {
            Ok(()) => state.task_queue.ack(&task_id),
            Err(()) => {
                warn!(task_id, "task handler failed, nacking");
                state.task_queue.nack(&task_id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn task_messages_parses_payload_array() {
        let mut payload = HashMap::new();
        payload.insert("messages".to_string(), serde_json::json!([{"role": "user", "content": "hi"}]));
        let task = gateway_core::Task::new("t1", payload, 0);
        let messages = task_messages(&task).unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].content, "hi");
    }

    #[test]
    fn task_messages_none_when_missing() {
        let task = gateway_core::Task::new("t1", HashMap::new(), 0);
        assert!(task_messages(&task).is_none());
    }

    #[test]
    fn task_user_id_defaults_to_anon() {
        let task = gateway_core::Task::new("t1", HashMap::new(), 0);
        assert_eq!(task_user_id(&task), "anon");

        let mut payload = HashMap::new();
        payload.insert("user".to_string(), serde_json::json!("u42"));
        let task = gateway_core::Task::new("t2", payload, 0);
        assert_eq!(task_user_id(&task), "u42");
    }
}
