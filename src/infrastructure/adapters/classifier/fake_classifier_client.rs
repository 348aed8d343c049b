//! Fake Classifier Client - 用于测试和离线演示的分类客户端
//!
//! 按脚本依次返回预设结果，不实际调用分类服务

use async_trait::async_trait;
use serde_json::json;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::application::ports::ClassificationServicePort;
use crate::domain::classification::{ClassificationError, ClassificationRequest, ClassificationResult};

/// 单次调用的预设结果
#[derive(Debug, Clone)]
pub struct ScriptedOutcome {
    pub outcome: Result<ClassificationResult, ClassificationError>,
    /// 返回前的模拟延迟
    pub delay: Duration,
}

impl ScriptedOutcome {
    pub fn ok(result: impl Into<ClassificationResult>) -> Self {
        Self {
            outcome: Ok(result.into()),
            delay: Duration::ZERO,
        }
    }

    pub fn err(error: ClassificationError) -> Self {
        Self {
            outcome: Err(error),
            delay: Duration::ZERO,
        }
    }

    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// Fake Classifier Client
///
/// 脚本耗尽后返回一个固定的 neutral 判定
#[derive(Debug, Default)]
pub struct FakeClassifierClient {
    script: Mutex<VecDeque<ScriptedOutcome>>,
    calls: AtomicUsize,
    requests: Mutex<Vec<ClassificationRequest>>,
}

impl FakeClassifierClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_script(outcomes: impl IntoIterator<Item = ScriptedOutcome>) -> Self {
        Self {
            script: Mutex::new(outcomes.into_iter().collect()),
            ..Self::default()
        }
    }

    /// 已收到的调用次数
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// 已收到的请求（按调用顺序）
    pub fn requests(&self) -> Vec<ClassificationRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    fn next_outcome(&self) -> ScriptedOutcome {
        let scripted = self.script.lock().ok().and_then(|mut s| s.pop_front());
        scripted.unwrap_or_else(|| {
            ScriptedOutcome::ok(json!({
                "classification": "neutral",
                "confidence": 0.5,
                "explanation": "Offline classifier: no verdict available.",
                "raw_output": "",
                "timestamp": chrono::Utc::now().to_rfc3339(),
            }))
        })
    }
}

#[async_trait]
impl ClassificationServicePort for FakeClassifierClient {
    async fn classify(
        &self,
        request: ClassificationRequest,
    ) -> Result<ClassificationResult, ClassificationError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        let mode = request.mode();
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }

        let scripted = self.next_outcome();
        tracing::debug!(call, mode = %mode, delay_ms = scripted.delay.as_millis() as u64, "FakeClassifierClient: returning scripted outcome");

        if !scripted.delay.is_zero() {
            tokio::time::sleep(scripted.delay).await;
        }
        scripted.outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_script_order_and_call_count() {
        let client = FakeClassifierClient::with_script([
            ScriptedOutcome::ok(json!({"n": 1})),
            ScriptedOutcome::err(ClassificationError::service("second")),
        ]);

        let first = client
            .classify(ClassificationRequest::Text { text: "a".into() })
            .await;
        assert_eq!(first.unwrap().as_json()["n"], 1);

        let second = client
            .classify(ClassificationRequest::Text { text: "b".into() })
            .await;
        assert_eq!(second.unwrap_err().message, "second");

        let fallback = client
            .classify(ClassificationRequest::Text { text: "c".into() })
            .await
            .unwrap();
        assert!(fallback.verdict().is_some());

        assert_eq!(client.call_count(), 3);
        assert_eq!(client.requests()[1].text(), Some("b"));
    }
}
