//! 核心：交互状态机与控制器

pub mod state;
pub mod event;
pub mod machine;
pub mod remote;
pub mod controller;

pub use state::InteractionState;
pub use event::{InteractionEvent, Narration, NarrationKind};
pub use machine::{InteractionStateMachine, RevertToken, Transition};
pub use remote::RemoteCommand;
pub use controller::{InputEvent, InteractionController};
