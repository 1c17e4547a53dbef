//! 交互状态

use serde::{Deserialize, Serialize};

/// 交互模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionState {
    /// 正常朗读场景
    Normal,
    /// 指向读字
    Pointer,
    /// 点按展开上下文
    ContextExpanded,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self::Normal
    }
}

impl InteractionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Pointer => "pointer",
            Self::ContextExpanded => "context-expanded",
        }
    }
}
