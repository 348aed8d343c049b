//! 应用层 - 命令
//!
//! 用户操作在进入状态机前的表示

mod user_actions;

pub use user_actions::UserAction;
