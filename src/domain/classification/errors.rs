//! Classification Context - Errors

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Mode;

pub const TEXT_FALLBACK_MESSAGE: &str = "Failed to classify text. Please try again.";
pub const IMAGE_FALLBACK_MESSAGE: &str = "Failed to classify image. Please try again.";

pub const EMPTY_TEXT_MESSAGE: &str = "Please enter some text to analyze.";
pub const NO_IMAGE_MESSAGE: &str = "Please select an image to analyze.";

/// 错误分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// 本地输入校验失败，不会发出网络请求
    Validation,
    /// 无法连接分类服务
    Transport,
    /// 服务返回非 2xx 或无法解析的响应
    Service,
}

/// 分类错误，message 直接展示给用户
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ClassificationError {
    pub kind: ErrorKind,
    pub message: String,
}

impl ClassificationError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Validation,
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Transport,
            message: message.into(),
        }
    }

    pub fn service(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Service,
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// 按请求类型返回通用错误提示
pub fn fallback_message(mode: Mode) -> &'static str {
    match mode {
        Mode::Text => TEXT_FALLBACK_MESSAGE,
        Mode::Image => IMAGE_FALLBACK_MESSAGE,
    }
}
