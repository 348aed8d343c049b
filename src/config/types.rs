//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 分类服务配置
    #[serde(default)]
    pub service: ServiceConfig,

    /// 编排器配置
    #[serde(default)]
    pub orchestrator: OrchestratorSettings,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 分类服务配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    /// 分类服务基础 URL
    #[serde(default = "default_service_url")]
    pub url: String,

    /// 请求超时时间（秒），未设置时使用 HTTP 客户端默认值
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_service_url() -> String {
    "http://localhost:8000".to_string()
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            url: default_service_url(),
            timeout_secs: None,
        }
    }
}

/// 编排器配置
#[derive(Debug, Clone, Deserialize)]
pub struct OrchestratorSettings {
    /// 消息队列容量
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
}

fn default_queue_capacity() -> usize {
    64
}

impl Default for OrchestratorSettings {
    fn default() -> Self {
        Self {
            queue_capacity: default_queue_capacity(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
