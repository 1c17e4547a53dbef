//! 场景模块：快照类型、解释器、文字区域匹配、后端客户端

pub mod types;
pub mod interpreter;
pub mod text;
pub mod client;

pub use types::{DetectedObject, SceneResponse, SceneSnapshot, TextRegion};
pub use interpreter::SceneResponseInterpreter;
pub use client::SceneClient;
