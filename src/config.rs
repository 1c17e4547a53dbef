//! 配置
//!
//! 所有阈值都有默认值，可以从 JSON 覆盖其中一部分

use std::path::Path;
use serde::{Deserialize, Serialize};

use crate::error::{PerceptionError, Result};

/// 手势分类器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// 食指-手腕距离 / 拇指末节长度，严格大于则为指向
    pub pointing_ratio: f64,
    /// 拇指尖-食指尖距离 / 拇指末节长度，严格小于则为点按
    pub tapping_ratio: f64,
    /// 平均置信度不高于该值时沿用上一次分类 (None 表示关闭)
    pub min_confidence: Option<f32>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            pointing_ratio: 5.0,
            tapping_ratio: 1.5,
            min_confidence: None,
        }
    }
}

/// 去抖配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebounceConfig {
    /// 滑动窗口帧数
    pub window: usize,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self { window: 5 }
    }
}

/// 场景解释配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// 最小有符号面积 (与坐标单位一致，归一化坐标下约 0.01)
    pub area_threshold: f64,
    /// 可以作为上下文区域的标签
    pub context_labels: Vec<String>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            area_threshold: 0.01,
            context_labels: vec![
                "laptop".to_string(),
                "tv".to_string(),
                "whiteboard".to_string(),
            ],
        }
    }
}

/// 交互状态机配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// 手势触发后回到 Normal 的延迟 (毫秒)
    pub revert_after_ms: u64,
    /// 指向时文本框中心的匹配半径 (归一化)
    pub point_match_radius: f64,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            revert_after_ms: 1000,
            point_match_radius: 0.3,
        }
    }
}

/// 场景分析后端配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub endpoint: String,
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:5000".to_string(),
            timeout_secs: 30,
        }
    }
}

/// 总配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GlassesConfig {
    pub classifier: ClassifierConfig,
    pub debounce: DebounceConfig,
    pub scene: SceneConfig,
    pub interaction: InteractionConfig,
    pub backend: BackendConfig,
}

impl GlassesConfig {
    /// 从 JSON 解析，缺省字段使用默认值
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| PerceptionError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// 从文件加载
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| PerceptionError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&json)
    }

    fn validate(&self) -> Result<()> {
        if self.debounce.window == 0 {
            return Err(PerceptionError::Config("debounce.window must be at least 1".into()));
        }
        if self.classifier.pointing_ratio <= 0.0 || self.classifier.tapping_ratio <= 0.0 {
            return Err(PerceptionError::Config("classifier ratios must be positive".into()));
        }
        Ok(())
    }
}
