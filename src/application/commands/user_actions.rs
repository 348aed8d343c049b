//! User Actions - 用户操作命令

use crate::domain::classification::{ImageFile, MachineEvent, Mode, SubmissionInput};

/// 用户在界面上触发的操作
#[derive(Debug, Clone)]
pub enum UserAction {
    /// 切换输入模式
    SelectMode(Mode),
    /// 提交文本（原始输入，未去除空白）
    SubmitText(String),
    /// 提交图片，None 表示未选择文件
    SubmitImage(Option<ImageFile>),
    /// 关闭错误提示
    DismissError,
    /// 开始新的分析
    NewAnalysis,
}

impl UserAction {
    pub fn name(&self) -> &'static str {
        match self {
            UserAction::SelectMode(_) => "select_mode",
            UserAction::SubmitText(_) => "submit_text",
            UserAction::SubmitImage(_) => "submit_image",
            UserAction::DismissError => "dismiss_error",
            UserAction::NewAnalysis => "new_analysis",
        }
    }
}

impl From<UserAction> for MachineEvent {
    fn from(action: UserAction) -> Self {
        match action {
            UserAction::SelectMode(mode) => MachineEvent::SelectMode(mode),
            UserAction::SubmitText(text) => MachineEvent::Submit(SubmissionInput::Text(text)),
            UserAction::SubmitImage(file) => MachineEvent::Submit(SubmissionInput::Image(file)),
            UserAction::DismissError => MachineEvent::DismissError,
            UserAction::NewAnalysis => MachineEvent::NewAnalysis,
        }
    }
}
