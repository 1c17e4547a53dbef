//! 场景相关类型定义
//!
//! 坐标统一为归一化 `[0,1]`、y 轴向上，在入口处完成转换

use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::utils::geometry::{rect_from_corners, Point, Rect};

/// 检测到的物体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedObject {
    /// 类别标签
    pub label: String,
    /// 检测概率
    pub probability: f64,
    /// 边界框
    pub bbox: Rect,
}

/// 后端返回的单条记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionRecord {
    pub probability: f64,
    pub coordinates: Coordinates,
}

/// 记录的角点
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coordinates {
    pub top_left: Point,
    pub bottom_right: Point,
}

/// 一次拍照分析的全部结果
///
/// 标签有序，下一个快照整体替换，不做合并
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneSnapshot {
    objects: BTreeMap<String, Vec<DetectedObject>>,
}

impl SceneSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// 解码后端响应体
    ///
    /// `{"<label>": [{"probability": .., "coordinates": {"top_left": {..}, "bottom_right": {..}}}]}`
    pub fn from_json(body: &str) -> Result<Self> {
        let records: BTreeMap<String, Vec<DetectionRecord>> = serde_json::from_str(body)?;
        Ok(Self::from_records(records))
    }

    pub fn from_records(records: BTreeMap<String, Vec<DetectionRecord>>) -> Self {
        let objects = records
            .into_iter()
            .map(|(label, records)| {
                let detections = records
                    .into_iter()
                    .map(|r| DetectedObject {
                        label: label.clone(),
                        probability: r.probability,
                        bbox: rect_from_corners(r.coordinates.top_left, r.coordinates.bottom_right),
                    })
                    .collect();
                (label, detections)
            })
            .collect();

        Self { objects }
    }

    /// 添加一个检测 (标签可以没有检测，计数为 0)
    pub fn with_label(mut self, label: impl Into<String>, detections: Vec<DetectedObject>) -> Self {
        self.objects.insert(label.into(), detections);
        self
    }

    /// 按标签字典序遍历
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[DetectedObject])> {
        self.objects.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

/// 场景解释结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneResponse {
    /// 朗读用的描述
    pub scene_description: String,
    /// 可以"点按展开"的区域
    pub context_region: Option<Rect>,
}

/// 文字识别区域
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRegion {
    pub bounding_box: Rect,
    pub recognized_text: String,
}

impl TextRegion {
    pub fn new(bounding_box: Rect, recognized_text: impl Into<String>) -> Self {
        Self {
            bounding_box,
            recognized_text: recognized_text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PerceptionError;

    #[test]
    fn test_decode_snapshot() {
        let body = r#"{
            "tv": [{"probability": 0.8, "coordinates": {"top_left": {"x": 0.1, "y": 0.9}, "bottom_right": {"x": 0.6, "y": 0.4}}}],
            "cup": []
        }"#;

        let snapshot = SceneSnapshot::from_json(body).unwrap();
        let labels: Vec<_> = snapshot.iter().map(|(l, _)| l).collect();
        assert_eq!(labels, vec!["cup", "tv"]);

        let (_, tvs) = snapshot.iter().nth(1).unwrap();
        assert_eq!(tvs[0].label, "tv");
        assert!((tvs[0].bbox.width - 0.5).abs() < 1e-9);
        assert!((tvs[0].bbox.height - 0.5).abs() < 1e-9);
        assert!((tvs[0].bbox.y - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_malformed_snapshot() {
        let result = SceneSnapshot::from_json(r#"{"tv": [{"probability": "high"}]}"#);
        assert!(matches!(result, Err(PerceptionError::MalformedSnapshot(_))));
    }
}
