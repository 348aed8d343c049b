//! HTTP Classifier Client - 调用外部分类 HTTP 服务
//!
//! 实现 ClassificationServicePort trait
//!
//! 外部分类 API:
//! POST {base_url}/classify_text   Request: {"text": "..."} (JSON)
//! POST {base_url}/classify_image  Request: multipart/form-data, field "file"
//! Response: 2xx JSON 分类结果；失败时可能带 {"detail": "..."}

use async_trait::async_trait;
use reqwest::{multipart, Client, Response};
use serde::Serialize;
use std::time::Duration;

use crate::application::ports::ClassificationServicePort;
use crate::domain::classification::{
    fallback_message, ClassificationError, ClassificationRequest, ClassificationResult, ImageFile,
    Mode,
};

/// 文本分类请求体 (JSON)
#[derive(Debug, Serialize)]
struct TextHttpRequest<'a> {
    text: &'a str,
}

/// HTTP 分类客户端配置
#[derive(Debug, Clone)]
pub struct HttpClassifierClientConfig {
    /// 分类服务基础 URL
    pub base_url: String,
    /// 请求超时时间（秒），None 使用 reqwest 默认行为
    pub timeout_secs: Option<u64>,
}

impl Default for HttpClassifierClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_secs: None,
        }
    }
}

impl HttpClassifierClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }
}

/// HTTP 分类客户端
pub struct HttpClassifierClient {
    client: Client,
    base_url: String,
}

impl HttpClassifierClient {
    /// 创建新的 HTTP 分类客户端
    pub fn new(config: HttpClassifierClientConfig) -> Result<Self, ClassificationError> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| ClassificationError::transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// 使用默认配置创建客户端
    pub fn with_default_config() -> Result<Self, ClassificationError> {
        Self::new(HttpClassifierClientConfig::default())
    }

    fn endpoint(&self, mode: Mode) -> String {
        match mode {
            Mode::Text => format!("{}/classify_text", self.base_url),
            Mode::Image => format!("{}/classify_image", self.base_url),
        }
    }

    /// 获取健康检查 URL
    fn health_url(&self) -> String {
        format!("{}/", self.base_url)
    }

    async fn send_text(&self, text: &str) -> Result<Response, reqwest::Error> {
        self.client
            .post(self.endpoint(Mode::Text))
            .json(&TextHttpRequest { text })
            .send()
            .await
    }

    async fn send_image(&self, file: ImageFile) -> Result<Response, reqwest::Error> {
        let part = multipart::Part::bytes(file.bytes().to_vec())
            .file_name(file.filename().to_string())
            .mime_str(file.content_type())?;
        let form = multipart::Form::new().part("file", part);

        self.client
            .post(self.endpoint(Mode::Image))
            .multipart(form)
            .send()
            .await
    }
}

/// 从失败响应体中提取 `detail` 字段
fn extract_detail(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    value
        .get("detail")
        .and_then(|d| d.as_str())
        .map(|s| s.to_string())
}

#[async_trait]
impl ClassificationServicePort for HttpClassifierClient {
    async fn classify(
        &self,
        request: ClassificationRequest,
    ) -> Result<ClassificationResult, ClassificationError> {
        let mode = request.mode();
        let fallback = fallback_message(mode);

        tracing::debug!(url = %self.endpoint(mode), mode = %mode, "Sending classification request");

        let sent = match request {
            ClassificationRequest::Text { text } => self.send_text(&text).await,
            ClassificationRequest::Image(file) => {
                tracing::debug!(
                    filename = %file.filename(),
                    content_type = %file.content_type(),
                    size = file.len(),
                    "Attaching image"
                );
                self.send_image(file).await
            }
        };

        let response = sent.map_err(|e| {
            tracing::warn!(mode = %mode, error = %e, "Classification service unreachable");
            ClassificationError::transport(fallback)
        })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| {
            tracing::warn!(mode = %mode, error = %e, "Failed to read classification response");
            ClassificationError::transport(fallback)
        })?;

        if !status.is_success() {
            let message = extract_detail(&body).unwrap_or_else(|| fallback.to_string());
            tracing::warn!(mode = %mode, status = %status, detail = %message, "Classification rejected");
            return Err(ClassificationError::service(message));
        }

        let value: serde_json::Value = serde_json::from_slice(&body).map_err(|e| {
            tracing::warn!(mode = %mode, error = %e, "Malformed classification response");
            ClassificationError::service(fallback)
        })?;

        tracing::info!(mode = %mode, status = %status, "Classification completed");

        Ok(ClassificationResult::new(value))
    }

    async fn health_check(&self) -> bool {
        match self
            .client
            .get(self.health_url())
            .timeout(Duration::from_secs(5))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = HttpClassifierClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.timeout_secs, None);
    }

    #[test]
    fn test_config_builder() {
        let config = HttpClassifierClientConfig::new("http://example.com:9000").with_timeout(60);
        assert_eq!(config.base_url, "http://example.com:9000");
        assert_eq!(config.timeout_secs, Some(60));
    }

    #[test]
    fn test_endpoints_trim_trailing_slash() {
        let client =
            HttpClassifierClient::new(HttpClassifierClientConfig::new("http://svc:8000/")).unwrap();
        assert_eq!(client.endpoint(Mode::Text), "http://svc:8000/classify_text");
        assert_eq!(client.endpoint(Mode::Image), "http://svc:8000/classify_image");
        assert_eq!(client.health_url(), "http://svc:8000/");
    }

    #[test]
    fn test_extract_detail() {
        assert_eq!(
            extract_detail(br#"{"detail": "Text too long"}"#),
            Some("Text too long".to_string())
        );
        assert_eq!(extract_detail(br#"{"detail": [{"msg": "x"}]}"#), None);
        assert_eq!(extract_detail(b"Internal Server Error"), None);
        assert_eq!(extract_detail(b""), None);
    }
}
