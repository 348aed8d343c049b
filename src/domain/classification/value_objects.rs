//! Classification Context - Value Objects

use serde::{Deserialize, Serialize};
use std::path::Path;

/// 输入模式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    #[default]
    Text,
    Image,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Text => "text",
            Mode::Image => "image",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 提交代次（单调递增，用于丢弃过期的响应）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Generation(u64);

impl Generation {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    pub(crate) fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl std::fmt::Display for Generation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 用户选择的图片文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    bytes: Vec<u8>,
    filename: String,
    content_type: String,
}

impl ImageFile {
    pub fn new(
        bytes: Vec<u8>,
        filename: impl Into<String>,
        content_type: impl Into<String>,
    ) -> Self {
        Self {
            bytes,
            filename: filename.into(),
            content_type: content_type.into(),
        }
    }

    /// 从文件名推断 MIME 类型
    pub fn from_bytes(bytes: Vec<u8>, filename: impl Into<String>) -> Self {
        let filename = filename.into();
        let content_type = content_type_for(&filename).to_string();
        Self {
            bytes,
            filename,
            content_type,
        }
    }

    /// 读取本地图片文件
    pub async fn load(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload")
            .to_string();
        Ok(Self::from_bytes(bytes, filename))
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

fn content_type_for(filename: &str) -> &'static str {
    let ext = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

/// 分类请求
///
/// 派发后不可变：状态机只保留一份克隆用于 Loading 状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassificationRequest {
    /// 文本（已去除首尾空白，非空）
    Text { text: String },
    /// 图片
    Image(ImageFile),
}

impl ClassificationRequest {
    pub fn mode(&self) -> Mode {
        match self {
            ClassificationRequest::Text { .. } => Mode::Text,
            ClassificationRequest::Image(_) => Mode::Image,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            ClassificationRequest::Text { text } => Some(text),
            ClassificationRequest::Image(_) => None,
        }
    }
}

/// 分类结果 - 服务返回的 JSON 文档，原样透传
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassificationResult(serde_json::Value);

impl ClassificationResult {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    pub fn as_json(&self) -> &serde_json::Value {
        &self.0
    }

    pub fn into_json(self) -> serde_json::Value {
        self.0
    }

    /// 尝试解析为结构化的判定结果
    ///
    /// 结果本身不被修改；解析失败时返回 None
    pub fn verdict(&self) -> Option<ClassificationVerdict> {
        serde_json::from_value(self.0.clone()).ok()
    }
}

impl From<serde_json::Value> for ClassificationResult {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}

/// 分类类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Constructive,
    Neutral,
    HateSpeech,
    Unrelated,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Constructive => "constructive",
            Category::Neutral => "neutral",
            Category::HateSpeech => "hate_speech",
            Category::Unrelated => "unrelated",
        }
    }

    pub fn is_harmful(&self) -> bool {
        matches!(self, Category::HateSpeech)
    }
}

/// 结构化判定结果（GovSense API 的响应模型）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationVerdict {
    pub classification: Category,
    /// 置信度 (0.0 - 1.0)
    pub confidence: f64,
    pub explanation: String,
    #[serde(default)]
    pub raw_output: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}
