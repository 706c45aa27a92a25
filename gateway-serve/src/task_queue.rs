//! FIFO task queue with visibility-timeout re-delivery and a dead-letter
//! queue (spec §4.1 "Task queue", §5 "Task queue is FIFO at the storage
//! level"). Redis itself is out of scope (spec §6); this is an in-process
//! stand-in satisfying the same LPUSH/RPOP + DLQ contract.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use gateway_core::{DeadLetter, DeadLetterReason, Task};

fn now_unix() -> i64 {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_secs() as i64
}

struct Inner {
    queue: VecDeque<Task>,
    in_flight: Vec<Task>,
    dlq: Vec<DeadLetter>,
}

pub struct TaskQueue {
    inner: Mutex<Inner>,
    max_retries: u32,
    max_depth: u32,
    visibility_timeout: Duration,
}

impl TaskQueue {
    pub fn new(max_retries: u32, max_depth: u32, visibility_timeout: Duration) -> Self {
        Self {
            inner: Mutex::new(Inner { queue: VecDeque::new(), in_flight: Vec::new(), dlq: Vec::new() }),
            max_retries,
            max_depth,
            visibility_timeout,
        }
    }

    /// Enqueues a task. A task arriving at `depth > max_depth` is sent
    /// straight to the DLQ (spec §4.1) instead of being admitted.
    pub fn enqueue(&self, task: Task) {
        let mut inner = self.inner.lock().expect("task queue mutex poisoned");
        if task.depth > self.max_depth {
            inner.dlq.push(DeadLetter { task, reason: DeadLetterReason::DepthExceeded, failed_at: now_unix() });
            return;
        }
        inner.queue.push_back(task);
    }

    /// RPOP: dequeues the oldest task and marks it in-flight under the
    /// configured visibility timeout.
    pub fn dequeue(&self) -> Option<Task> {
        let mut inner = self.inner.lock().expect("task queue mutex poisoned");
        let task = inner.queue.pop_front()?;
        inner.in_flight.push(task.clone());
        Some(task)
    }

    /// Acknowledges successful handling: removes the task from in-flight.
    pub fn ack(&self, task_id: &str) {
        let mut inner = self.inner.lock().expect("task queue mutex poisoned");
        inner.in_flight.retain(|t| t.id != task_id);
    }

    /// Handler failure: increments retries and re-enqueues, or moves to the
    /// DLQ with `reason: "retries_exceeded"` once the retry budget is spent.
    pub fn nack(&self, task_id: &str) {
        let mut inner = self.inner.lock().expect("task queue mutex poisoned");
        let Some(pos) = inner.in_flight.iter().position(|t| t.id == task_id) else { return };
        let task = inner.in_flight.remove(pos);
        match task.requeue(self.max_retries) {
            Ok(task) => inner.queue.push_back(task),
            Err((task, reason)) => inner.dlq.push(DeadLetter { task, reason, failed_at: now_unix() }),
        }
    }

    /// Requeues any in-flight task whose visibility window has expired,
    /// protecting against lost acknowledgments (spec §5: "handlers must be
    /// idempotent or tolerate duplicate execution").
    pub fn reclaim_expired(&self) {
        let mut inner = self.inner.lock().expect("task queue mutex poisoned");
        let cutoff = now_unix() - self.visibility_timeout.as_secs() as i64;
        let expired: Vec<Task> = {
            let mut kept = Vec::new();
            let mut expired = Vec::new();
            for t in inner.in_flight.drain(..) {
                if t.visible_at <= cutoff {
                    expired.push(t);
                } else {
                    kept.push(t);
                }
            }
            inner.in_flight = kept;
            expired
        };
        for task in expired {
            inner.queue.push_back(task);
        }
    }

    pub fn dlq(&self, limit: usize) -> Vec<DeadLetter> {
        let inner = self.inner.lock().expect("task queue mutex poisoned");
        inner.dlq.iter().rev().take(limit).cloned().collect()
    }

    pub fn depth(&self) -> usize {
        self.inner.lock().expect("task queue mutex poisoned").queue.len()
    }
}
