//! Classification Service Port - 分类服务抽象
//!
//! 定义调用外部分类服务的抽象接口，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;

use crate::domain::classification::{ClassificationError, ClassificationRequest, ClassificationResult};

/// Classification Service Port
///
/// 每次调用恰好发出一个请求：不重试、不缓存
#[async_trait]
pub trait ClassificationServicePort: Send + Sync {
    /// 提交分类请求
    async fn classify(
        &self,
        request: ClassificationRequest,
    ) -> Result<ClassificationResult, ClassificationError>;

    /// 检查分类服务是否可用
    async fn health_check(&self) -> bool {
        true // 默认实现
    }
}
