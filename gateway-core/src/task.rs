//! Task queue entry and dead-letter reason (spec §3 "Task", §4.1 "Task queue").

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Reason a task was moved to the dead-letter queue (spec §4.1).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeadLetterReason {
    RetriesExceeded,
    DepthExceeded,
}

impl DeadLetterReason {
    pub fn as_str(self) -> &'static str {
        match self {
            DeadLetterReason::RetriesExceeded => "retries_exceeded",
            DeadLetterReason::DepthExceeded => "depth_exceeded",
        }
    }
}

/// A queue entry (spec §3). Enqueued with `depth = 0`; on handler failure
/// it is requeued with `retries + 1` until `retries > max_retries`, at which
/// point it moves to the DLQ with `reason: "retries_exceeded"`. Enqueuing at
/// `depth > max_depth` sends the item directly to the DLQ with
/// `reason: "depth_exceeded"`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub payload: HashMap<String, serde_json::Value>,
    pub retries: u32,
    pub visible_at: i64,
    pub depth: u32,
}

impl Task {
    pub fn new(id: impl Into<String>, payload: HashMap<String, serde_json::Value>, visible_at: i64) -> Self {
        Self {
            id: id.into(),
            payload,
            retries: 0,
            visible_at,
            depth: 0,
        }
    }

    /// Returns the requeued task (depth unchanged — depth only grows when a
    /// handler spawns a child task, never on a bare retry) with
    /// `retries + 1`, or `None` if that would exceed `max_retries` (the
    /// caller should move the task to the DLQ in that case).
    pub fn requeue(mut self, max_retries: u32) -> Result<Task, (Task, DeadLetterReason)> {
        self.retries += 1;
        if self.retries > max_retries {
            Err((self, DeadLetterReason::RetriesExceeded))
        } else {
            Ok(self)
        }
    }
}

/// A dead-lettered task: the original task plus why it landed here.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DeadLetter {
    pub task: Task,
    pub reason: DeadLetterReason,
    pub failed_at: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requeue_increments_retries_and_dlqs_past_max() {
        let task = Task::new("t1", HashMap::new(), 0);
        let task = task.requeue(2).unwrap();
        assert_eq!(task.retries, 1);
        let task = task.requeue(2).unwrap();
        assert_eq!(task.retries, 2);
        let err = task.requeue(2).unwrap_err();
        assert_eq!(err.1, DeadLetterReason::RetriesExceeded);
        assert_eq!(err.0.retries, 3);
    }
}
