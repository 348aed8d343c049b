//! Presentation Adapter - 状态到展示意图的纯映射

use serde::Serialize;

use super::{ClassificationResult, SubmissionSnapshot, SubmissionState};

/// 渲染层应展示的内容
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "show", content = "data", rename_all = "snake_case")]
pub enum DisplayIntent {
    InputForm,
    Loading,
    Result(ClassificationResult),
    Error(String),
}

impl DisplayIntent {
    pub fn is_error(&self) -> bool {
        matches!(self, DisplayIntent::Error(_))
    }
}

pub fn present(state: &SubmissionState) -> DisplayIntent {
    match state {
        SubmissionState::Idle => DisplayIntent::InputForm,
        SubmissionState::Loading(_) => DisplayIntent::Loading,
        SubmissionState::Resolved(result) => DisplayIntent::Result(result.clone()),
        SubmissionState::Failed(error) => DisplayIntent::Error(error.message.clone()),
    }
}

impl SubmissionSnapshot {
    pub fn intent(&self) -> DisplayIntent {
        present(&self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::classification::{ClassificationError, ClassificationRequest};
    use serde_json::json;

    #[test]
    fn test_present_each_state() {
        assert_eq!(present(&SubmissionState::Idle), DisplayIntent::InputForm);
        assert_eq!(
            present(&SubmissionState::Loading(ClassificationRequest::Text {
                text: "x".to_string()
            })),
            DisplayIntent::Loading
        );

        let result = ClassificationResult::new(json!({"label": "constructive"}));
        assert_eq!(
            present(&SubmissionState::Resolved(result.clone())),
            DisplayIntent::Result(result)
        );

        let intent = present(&SubmissionState::Failed(ClassificationError::service("Text too long")));
        assert_eq!(intent, DisplayIntent::Error("Text too long".to_string()));
        assert!(intent.is_error());
    }

    #[test]
    fn test_display_intent_json_shape() {
        let value = serde_json::to_value(DisplayIntent::Error("nope".to_string())).unwrap();
        assert_eq!(value, json!({"show": "error", "data": "nope"}));

        let value = serde_json::to_value(DisplayIntent::Loading).unwrap();
        assert_eq!(value, json!({"show": "loading"}));
    }
}
