//! Classifier Adapter - 分类服务客户端实现

mod fake_classifier_client;
mod http_classifier_client;

pub use fake_classifier_client::{FakeClassifierClient, ScriptedOutcome};
pub use http_classifier_client::*;
