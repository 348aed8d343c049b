//! Event Publisher Implementation
//!
//! 状态变更广播：每次状态机发生变化都推送新的展示意图

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::broadcast;

use crate::domain::classification::{DisplayIntent, Generation, Mode};

/// 状态变更事件
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionEvent {
    pub mode: Mode,
    pub generation: Generation,
    pub intent: DisplayIntent,
    pub at: DateTime<Utc>,
}

/// 事件发布器
pub struct EventPublisher {
    channel: broadcast::Sender<SubmissionEvent>,
}

impl EventPublisher {
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { channel: tx }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// 订阅状态变更事件
    pub fn subscribe(&self) -> broadcast::Receiver<SubmissionEvent> {
        self.channel.subscribe()
    }

    /// 发布状态变更
    pub fn publish_state_changed(&self, mode: Mode, generation: Generation, intent: DisplayIntent) {
        let event = SubmissionEvent {
            mode,
            generation,
            intent,
            at: Utc::now(),
        };
        if let Err(e) = self.channel.send(event) {
            tracing::debug!(
                generation = %generation,
                error = %e,
                "Failed to publish state change (no receivers)"
            );
        }
    }
}

impl Default for EventPublisher {
    fn default() -> Self {
        Self::new()
    }
}
