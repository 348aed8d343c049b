//! Classification Context - Submission State Machine
//!
//! 不变量:
//! - 任意时刻只有一个 SubmissionState
//! - 切换模式强制回到 Idle
//! - 只有与当前代次一致且仍处于 Loading 的完成事件才会生效

use serde::Serialize;

use super::errors::{EMPTY_TEXT_MESSAGE, NO_IMAGE_MESSAGE};
use super::{ClassificationError, ClassificationRequest, ClassificationResult, Generation, ImageFile, Mode};

/// 用户提交的原始输入（尚未校验）
#[derive(Debug, Clone)]
pub enum SubmissionInput {
    Text(String),
    /// None 表示尚未选择文件
    Image(Option<ImageFile>),
}

/// 提交生命周期状态
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Loading(ClassificationRequest),
    Resolved(ClassificationResult),
    Failed(ClassificationError),
}

impl SubmissionState {
    pub fn name(&self) -> &'static str {
        match self {
            SubmissionState::Idle => "idle",
            SubmissionState::Loading(_) => "loading",
            SubmissionState::Resolved(_) => "resolved",
            SubmissionState::Failed(_) => "failed",
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, SubmissionState::Loading(_))
    }
}

/// 状态机输入事件
#[derive(Debug, Clone)]
pub enum MachineEvent {
    SelectMode(Mode),
    Submit(SubmissionInput),
    Completed {
        generation: Generation,
        outcome: Result<ClassificationResult, ClassificationError>,
    },
    DismissError,
    NewAnalysis,
}

/// 需要派发给分类服务的请求
#[derive(Debug, Clone, PartialEq)]
pub struct Dispatch {
    pub generation: Generation,
    pub request: ClassificationRequest,
}

/// 状态机快照（不可变值）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubmissionSnapshot {
    pub mode: Mode,
    pub generation: Generation,
    pub state: SubmissionState,
}

/// 一次状态转换的结果
#[derive(Debug)]
pub struct Transition {
    pub next: SubmissionSnapshot,
    pub dispatch: Option<Dispatch>,
    pub changed: bool,
}

impl Transition {
    fn changed(next: SubmissionSnapshot) -> Self {
        Self {
            next,
            dispatch: None,
            changed: true,
        }
    }

    fn unchanged(next: SubmissionSnapshot) -> Self {
        Self {
            next,
            dispatch: None,
            changed: false,
        }
    }
}

/// `apply` 的返回值
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Applied {
    pub changed: bool,
    pub dispatched: Option<Generation>,
}

/// 纯状态转换函数
pub fn transition(current: SubmissionSnapshot, event: MachineEvent) -> Transition {
    match event {
        MachineEvent::SelectMode(mode) => {
            let changed = current.mode != mode || current.state != SubmissionState::Idle;
            Transition {
                next: SubmissionSnapshot {
                    mode,
                    generation: current.generation,
                    state: SubmissionState::Idle,
                },
                dispatch: None,
                changed,
            }
        }

        MachineEvent::Submit(input) => match validate(current.mode, input) {
            Ok(request) => {
                let generation = current.generation.next();
                Transition {
                    next: SubmissionSnapshot {
                        mode: current.mode,
                        generation,
                        state: SubmissionState::Loading(request.clone()),
                    },
                    dispatch: Some(Dispatch {
                        generation,
                        request,
                    }),
                    changed: true,
                }
            }
            Err(error) => Transition::changed(SubmissionSnapshot {
                state: SubmissionState::Failed(error),
                ..current
            }),
        },

        MachineEvent::Completed {
            generation,
            outcome,
        } => {
            if generation != current.generation || !current.state.is_loading() {
                return Transition::unchanged(current);
            }
            let state = match outcome {
                Ok(result) => SubmissionState::Resolved(result),
                Err(error) => SubmissionState::Failed(error),
            };
            Transition::changed(SubmissionSnapshot { state, ..current })
        }

        MachineEvent::DismissError => match current.state {
            SubmissionState::Failed(_) => Transition::changed(SubmissionSnapshot {
                state: SubmissionState::Idle,
                ..current
            }),
            _ => Transition::unchanged(current),
        },

        MachineEvent::NewAnalysis => match current.state {
            SubmissionState::Resolved(_) => Transition::changed(SubmissionSnapshot {
                state: SubmissionState::Idle,
                ..current
            }),
            _ => Transition::unchanged(current),
        },
    }
}

/// 校验输入并构建请求
fn validate(mode: Mode, input: SubmissionInput) -> Result<ClassificationRequest, ClassificationError> {
    match (mode, input) {
        (Mode::Text, SubmissionInput::Text(raw)) => {
            let text = raw.trim();
            if text.is_empty() {
                return Err(ClassificationError::validation(EMPTY_TEXT_MESSAGE));
            }
            Ok(ClassificationRequest::Text {
                text: text.to_string(),
            })
        }
        (Mode::Image, SubmissionInput::Image(Some(file))) => Ok(ClassificationRequest::Image(file)),
        (Mode::Image, SubmissionInput::Image(None)) => {
            Err(ClassificationError::validation(NO_IMAGE_MESSAGE))
        }
        (Mode::Text, SubmissionInput::Image(_)) => Err(ClassificationError::validation(
            "Switch to image mode to analyze an image.",
        )),
        (Mode::Image, SubmissionInput::Text(_)) => Err(ClassificationError::validation(
            "Switch to text mode to analyze text.",
        )),
    }
}

/// 提交状态机
///
/// 所有修改都经过 `apply`
#[derive(Debug, Default)]
pub struct SubmissionMachine {
    snapshot: SubmissionSnapshot,
}

impl SubmissionMachine {
    pub fn new() -> Self {
        Self::default()
    }

    /// 应用事件，返回需要派发的请求（如果有）
    pub fn apply(&mut self, event: MachineEvent) -> (Applied, Option<Dispatch>) {
        let current = std::mem::take(&mut self.snapshot);
        let Transition {
            next,
            dispatch,
            changed,
        } = transition(current, event);
        self.snapshot = next;

        let applied = Applied {
            changed,
            dispatched: dispatch.as_ref().map(|d| d.generation),
        };
        (applied, dispatch)
    }

    pub fn mode(&self) -> Mode {
        self.snapshot.mode
    }

    pub fn generation(&self) -> Generation {
        self.snapshot.generation
    }

    pub fn state(&self) -> &SubmissionState {
        &self.snapshot.state
    }

    pub fn snapshot(&self) -> &SubmissionSnapshot {
        &self.snapshot
    }
}
