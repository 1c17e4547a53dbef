//! 错误类型

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PerceptionError {
    /// 场景快照解码失败，缓存不会被修改
    #[error("Malformed scene snapshot: {0}")]
    MalformedSnapshot(#[from] serde_json::Error),
    #[error("Unknown remote command: {0}")]
    UnknownRemoteCommand(u8),
    #[error("Backend request failed: {0}")]
    Backend(String),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, PerceptionError>;
