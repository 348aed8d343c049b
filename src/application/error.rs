//! 应用层错误定义

use thiserror::Error;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 编排器已停止，无法再接收操作
    #[error("Submission orchestrator is not running")]
    OrchestratorStopped,
}

impl<T> From<tokio::sync::mpsc::error::SendError<T>> for ApplicationError {
    fn from(_: tokio::sync::mpsc::error::SendError<T>) -> Self {
        Self::OrchestratorStopped
    }
}

impl From<tokio::sync::oneshot::error::RecvError> for ApplicationError {
    fn from(_: tokio::sync::oneshot::error::RecvError) -> Self {
        Self::OrchestratorStopped
    }
}
