//! GovSense - 文本/图片内容分类客户端
//!
//! 架构设计: DDD + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Classification Context: 模式、请求、提交状态机、展示映射
//!
//! 应用层 (application/):
//! - Ports: ClassificationServicePort
//! - Commands: 用户操作
//!
//! 基础设施层 (infrastructure/):
//! - Adapters: HTTP 分类客户端、离线 Fake 客户端
//! - Worker: SubmissionOrchestrator 单消费者编排循环
//! - Events: 状态变更广播

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
