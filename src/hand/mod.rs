//! 手部模块：关键点、单帧分类、去抖

pub mod landmark;
pub mod classifier;
pub mod debounce;

pub use landmark::{JointName, Landmark, LandmarkSet};
pub use classifier::{GestureClassification, HandGestureClassifier};
pub use debounce::GestureDebouncer;
