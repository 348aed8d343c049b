//! Domain Layer - 领域层
//!
//! 包含一个限界上下文:
//! - Classification Context: 分类提交生命周期

pub mod classification;

pub use classification::{
    present, ClassificationError, ClassificationRequest, ClassificationResult, DisplayIntent,
    ErrorKind, Generation, ImageFile, Mode, SubmissionMachine, SubmissionState,
};
