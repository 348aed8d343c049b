//! Infrastructure Layer - 基础设施层
//!
//! 提供所有端口的具体实现

pub mod adapters;
pub mod events;
pub mod worker;

pub use adapters::{FakeClassifierClient, HttpClassifierClient, HttpClassifierClientConfig};
pub use events::{EventPublisher, SubmissionEvent};
pub use worker::{OrchestratorConfig, OrchestratorHandle, SubmissionOrchestrator};
