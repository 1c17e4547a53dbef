//! 辅助感知眼镜核心库
//!
//! 手部关键点流 + 周期性场景分析 → 朗读事件
//! - 手势分类 → 去抖 → 交互状态机
//! - 场景快照 → 计数、描述、上下文区域
//! - 指向/点按位置与文字区域的空间匹配

pub mod config;
pub mod core;
pub mod error;
pub mod hand;
pub mod scene;
pub mod utils;

// Re-exports - 核心
pub use crate::core::{
    InputEvent, InteractionController, InteractionEvent, InteractionState,
    InteractionStateMachine, Narration, NarrationKind, RemoteCommand,
};
pub use crate::core::event::event_channel;

// Re-exports - 输入
pub use hand::{GestureClassification, GestureDebouncer, HandGestureClassifier, JointName, Landmark, LandmarkSet};
pub use scene::{DetectedObject, SceneClient, SceneResponse, SceneResponseInterpreter, SceneSnapshot, TextRegion};

pub use config::GlassesConfig;
pub use error::{PerceptionError, Result};
pub use utils::geometry::{Point, Rect};
