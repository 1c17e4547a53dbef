//! 工具模块

pub mod geometry;
pub mod time;
