//! Events - 状态变更事件推送

mod publisher;

pub use publisher::{EventPublisher, SubmissionEvent};
