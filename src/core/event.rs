//! 交互事件
//!
//! 状态机对外只输出事件：朗读语句和状态变化

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use super::state::InteractionState;
use crate::utils::time::now;

/// 指向时没有匹配的文字
pub const NOTHING_TO_READ: &str = "Nothing to read.";
/// 点按展开时没有匹配的文字
pub const NOTHING_TO_EXPAND: &str = "Nothing to expand into.";

/// 朗读类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NarrationKind {
    /// 场景描述
    Scene,
    /// 读出的文字
    Text,
    /// 没有找到
    Nothing,
}

/// 一条朗读
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Narration {
    pub kind: NarrationKind,
    pub text: String,
    /// 时间戳
    pub timestamp: f64,
}

impl Narration {
    pub fn scene(description: impl Into<String>) -> Self {
        Self::new(NarrationKind::Scene, description.into())
    }

    pub fn text(recognized: &str) -> Self {
        Self::new(NarrationKind::Text, format!("Text: {}", recognized))
    }

    pub fn nothing(message: &str) -> Self {
        Self::new(NarrationKind::Nothing, message.to_string())
    }

    fn new(kind: NarrationKind, text: String) -> Self {
        Self {
            kind,
            text,
            timestamp: now(),
        }
    }
}

/// 交互事件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InteractionEvent {
    /// 需要朗读
    Narrate(Narration),
    /// 状态变化
    StateChanged {
        from: InteractionState,
        to: InteractionState,
    },
}

impl InteractionEvent {
    pub fn narration(&self) -> Option<&Narration> {
        match self {
            Self::Narrate(n) => Some(n),
            Self::StateChanged { .. } => None,
        }
    }
}

pub type EventSender = mpsc::UnboundedSender<InteractionEvent>;
pub type EventReceiver = mpsc::UnboundedReceiver<InteractionEvent>;

/// 创建事件通道
pub fn event_channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_narration_text() {
        let n = Narration::text("EXIT");
        assert_eq!(n.kind, NarrationKind::Text);
        assert_eq!(n.text, "Text: EXIT");
        assert!(n.timestamp > 0.0);
    }

    #[test]
    fn test_event_channel() {
        let (tx, mut rx) = event_channel();
        tx.send(InteractionEvent::Narrate(Narration::nothing(NOTHING_TO_READ))).unwrap();
        tx.send(InteractionEvent::StateChanged {
            from: InteractionState::Normal,
            to: InteractionState::Pointer,
        })
        .unwrap();

        let first = rx.try_recv().unwrap();
        assert_eq!(first.narration().map(|n| n.text.as_str()), Some(NOTHING_TO_READ));
        assert!(rx.try_recv().unwrap().narration().is_none());
    }
}
