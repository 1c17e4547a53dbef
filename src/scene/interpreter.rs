//! 场景解释器
//!
//! 检测结果 → 计数、描述语句、上下文区域。纯函数，无副作用

use tracing::debug;

use super::types::{SceneResponse, SceneSnapshot};
use crate::config::SceneConfig;
use crate::utils::geometry::Rect;

/// 有上下文区域时追加的提示
pub const CONTEXT_HINT: &str = "tap for insights";

/// 场景解释器
pub struct SceneResponseInterpreter {
    config: SceneConfig,
}

impl SceneResponseInterpreter {
    pub fn new(config: SceneConfig) -> Self {
        Self { config }
    }

    /// 解释一个快照
    pub fn interpret(&self, snapshot: &SceneSnapshot) -> SceneResponse {
        let mut description = String::new();
        // (区域, 概率)
        let mut context: Option<(Rect, f64)> = None;

        for (label, detections) in snapshot.iter() {
            let is_context_label = self.config.context_labels.iter().any(|l| l == label);
            let mut count = 0usize;

            for detection in detections {
                // 有符号面积，角点顺序错误的框也会被过滤
                if detection.bbox.area() < self.config.area_threshold {
                    continue;
                }

                if is_context_label {
                    let better = context.map_or(true, |(_, p)| detection.probability > p);
                    if better {
                        context = Some((detection.bbox, detection.probability));
                    }
                }

                count += 1;
            }

            // 计数为 0 的标签也保留
            description.push_str(&format!("{} {} ", count, label));
        }

        let context_region = context.map(|(rect, _)| rect);
        if context_region.is_some() {
            description.push_str(CONTEXT_HINT);
        }

        debug!("场景描述: {:?}", description);

        SceneResponse {
            scene_description: description,
            context_region,
        }
    }
}

impl Default for SceneResponseInterpreter {
    fn default() -> Self {
        Self::new(SceneConfig::default())
    }
}
