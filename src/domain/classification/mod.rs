//! Classification Context - 分类提交限界上下文
//!
//! 职责:
//! - 输入模式与请求构建
//! - 提交生命周期状态机
//! - 展示意图映射

mod errors;
mod machine;
mod presentation;
mod value_objects;

pub use errors::{
    fallback_message, ClassificationError, ErrorKind, EMPTY_TEXT_MESSAGE,
    IMAGE_FALLBACK_MESSAGE, NO_IMAGE_MESSAGE, TEXT_FALLBACK_MESSAGE,
};
pub use machine::{
    transition, Applied, Dispatch, MachineEvent, SubmissionInput, SubmissionMachine,
    SubmissionSnapshot, SubmissionState, Transition,
};
pub use presentation::{present, DisplayIntent};
pub use value_objects::{
    Category, ClassificationRequest, ClassificationResult, ClassificationVerdict, Generation,
    ImageFile, Mode,
};
