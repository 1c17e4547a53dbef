//! 遥控命令
//!
//! 测试时通过外部通道注入的合成事件：一个命令字节 + 文本负载

use serde::{Deserialize, Serialize};

use crate::error::{PerceptionError, Result};

/// 遥控命令
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RemoteCommand {
    /// 关闭手势分类
    DisableClassification,
    /// 开启手势分类
    EnableClassification,
    /// 模拟指向读字
    SimulatePointRead(String),
    /// 模拟点按读字
    SimulateTapRead(String),
    /// 回到 Normal 并重新朗读场景
    ResetToNormal,
}

impl RemoteCommand {
    /// 从命令字节和负载解码
    pub fn from_raw(raw: u8, payload: impl Into<String>) -> Result<Self> {
        let command = match raw {
            0 => Self::DisableClassification,
            1 => Self::EnableClassification,
            2 => Self::SimulatePointRead(payload.into()),
            3 => Self::SimulateTapRead(payload.into()),
            4 => Self::ResetToNormal,
            other => return Err(PerceptionError::UnknownRemoteCommand(other)),
        };
        Ok(command)
    }

    pub fn raw(&self) -> u8 {
        match self {
            Self::DisableClassification => 0,
            Self::EnableClassification => 1,
            Self::SimulatePointRead(_) => 2,
            Self::SimulateTapRead(_) => 3,
            Self::ResetToNormal => 4,
        }
    }
}
