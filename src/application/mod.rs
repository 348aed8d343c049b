//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（ClassificationServicePort）
//! - commands: 用户操作
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;

pub use commands::UserAction;
pub use error::ApplicationError;
pub use ports::ClassificationServicePort;
