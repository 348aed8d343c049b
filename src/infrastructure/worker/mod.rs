//! Worker Layer - 提交编排
//!
//! 实现 SubmissionOrchestrator，串行处理用户操作与服务完成事件

mod submission_orchestrator;

pub use submission_orchestrator::{OrchestratorConfig, OrchestratorHandle, SubmissionOrchestrator};
