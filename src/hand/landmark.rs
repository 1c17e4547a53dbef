//! 手部关键点
//!
//! 每帧由外部关键点检测器产生一次，之后只读

use std::collections::HashMap;
use serde::{Deserialize, Serialize};

use crate::utils::geometry::Point;

/// 关节名称
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum JointName {
    Wrist,
    ThumbCmc,
    ThumbMp,
    ThumbIp,
    ThumbTip,
    IndexMcp,
    IndexPip,
    IndexDip,
    IndexTip,
    MiddleMcp,
    MiddlePip,
    MiddleDip,
    MiddleTip,
    RingMcp,
    RingPip,
    RingDip,
    RingTip,
    LittleMcp,
    LittlePip,
    LittleDip,
    LittleTip,
}

/// 单个关键点
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    /// 归一化位置
    pub location: Point,
    /// 置信度 (0-1)
    pub confidence: f32,
}

impl Landmark {
    pub fn new(x: f64, y: f64, confidence: f32) -> Self {
        Self {
            location: Point::new(x, y),
            confidence,
        }
    }
}

/// 一帧的关键点集合
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LandmarkSet {
    points: HashMap<JointName, Landmark>,
}

impl LandmarkSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 链式添加关键点
    pub fn with(mut self, joint: JointName, landmark: Landmark) -> Self {
        self.points.insert(joint, landmark);
        self
    }

    pub fn get(&self, joint: JointName) -> Option<&Landmark> {
        self.points.get(&joint)
    }

    /// 所有已识别关键点的平均置信度
    pub fn mean_confidence(&self) -> Option<f32> {
        if self.points.is_empty() {
            return None;
        }
        let sum: f32 = self.points.values().map(|l| l.confidence).sum();
        Some(sum / self.points.len() as f32)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl FromIterator<(JointName, Landmark)> for LandmarkSet {
    fn from_iter<I: IntoIterator<Item = (JointName, Landmark)>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landmark_set_lookup() {
        let set = LandmarkSet::new()
            .with(JointName::Wrist, Landmark::new(0.5, 0.1, 0.9))
            .with(JointName::IndexTip, Landmark::new(0.5, 0.8, 0.8));

        assert_eq!(set.len(), 2);
        assert_eq!(set.get(JointName::Wrist).map(|l| l.location.y), Some(0.1));
        assert!(set.get(JointName::ThumbTip).is_none());
    }

    #[test]
    fn test_joint_names_decode_camel_case() {
        let json = r#"{"points":{"thumbTip":{"location":{"x":0.1,"y":0.2},"confidence":0.7}}}"#;
        let set: LandmarkSet = serde_json::from_str(json).unwrap();
        assert!(set.get(JointName::ThumbTip).is_some());
    }
}
