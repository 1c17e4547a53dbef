//! 手势分类器
//!
//! 单帧分类：用拇指末节长度做尺度归一化，
//! 比例与手的大小、离镜头的远近无关

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::landmark::{JointName, LandmarkSet};
use crate::config::ClassifierConfig;
use crate::utils::geometry::{distance, Point};

/// 单帧手势分类结果
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GestureClassification {
    /// 指向，携带食指指尖位置
    Pointing(Point),
    /// 拇指与食指捏合
    Tapping,
    /// 无可执行手势
    Neither,
}

impl Default for GestureClassification {
    fn default() -> Self {
        Self::Neither
    }
}

impl GestureClassification {
    pub fn is_pointing(&self) -> bool {
        matches!(self, Self::Pointing(_))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pointing(_) => "pointing",
            Self::Tapping => "tapping",
            Self::Neither => "neither",
        }
    }
}

/// 手势分类器
pub struct HandGestureClassifier {
    config: ClassifierConfig,
    /// 上一次分类结果 (低置信度时回退)
    previous: GestureClassification,
}

impl HandGestureClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self {
            config,
            previous: GestureClassification::Neither,
        }
    }

    /// 对一帧关键点分类
    pub fn classify(&mut self, landmarks: &LandmarkSet) -> GestureClassification {
        let (Some(wrist), Some(thumb_tip), Some(thumb_ip), Some(index_tip)) = (
            landmarks.get(JointName::Wrist),
            landmarks.get(JointName::ThumbTip),
            landmarks.get(JointName::ThumbIp),
            landmarks.get(JointName::IndexTip),
        ) else {
            // 缺少关键关节，视为没有手
            return GestureClassification::Neither;
        };

        if let Some(min_confidence) = self.config.min_confidence {
            // 对整帧所有关键点取平均，不只是四个关键关节
            let mean = landmarks.mean_confidence().unwrap_or(0.0);
            if mean <= min_confidence {
                debug!("置信度过低 ({:.2})，沿用上一次分类", mean);
                return self.previous;
            }
        }

        let classification = Self::classify_points(
            &self.config,
            wrist.location,
            thumb_tip.location,
            thumb_ip.location,
            index_tip.location,
        );

        self.previous = classification;
        classification
    }

    fn classify_points(
        config: &ClassifierConfig,
        wrist: Point,
        thumb_tip: Point,
        thumb_ip: Point,
        index_tip: Point,
    ) -> GestureClassification {
        let reference = distance(thumb_tip, thumb_ip);
        if !reference.is_finite() || reference <= f64::EPSILON {
            // 拇指末节退化，比例没有意义
            return GestureClassification::Neither;
        }

        // 食指远离手腕：指向
        if distance(index_tip, wrist) / reference > config.pointing_ratio {
            return GestureClassification::Pointing(index_tip);
        }

        // 拇指与食指贴近：点按
        if distance(thumb_tip, index_tip) / reference < config.tapping_ratio {
            return GestureClassification::Tapping;
        }

        GestureClassification::Neither
    }

    pub fn previous(&self) -> GestureClassification {
        self.previous
    }
}

impl Default for HandGestureClassifier {
    fn default() -> Self {
        Self::new(ClassifierConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hand::landmark::Landmark;

    const REQUIRED_JOINTS: [JointName; 4] = [
        JointName::Wrist,
        JointName::ThumbTip,
        JointName::ThumbIp,
        JointName::IndexTip,
    ];

    /// 拇指末节长度 0.1，其余点可调
    fn hand(index_tip: (f64, f64), confidence: f32) -> LandmarkSet {
        LandmarkSet::new()
            .with(JointName::Wrist, Landmark::new(0.0, 0.0, confidence))
            .with(JointName::ThumbIp, Landmark::new(0.5, 0.0, confidence))
            .with(JointName::ThumbTip, Landmark::new(0.5, 0.1, confidence))
            .with(JointName::IndexTip, Landmark::new(index_tip.0, index_tip.1, confidence))
    }

    #[test]
    fn test_missing_joint_is_neither() {
        let mut classifier = HandGestureClassifier::default();

        for missing in REQUIRED_JOINTS {
            let set: LandmarkSet = [
                (JointName::Wrist, Landmark::new(0.0, 0.0, 1.0)),
                (JointName::ThumbIp, Landmark::new(0.5, 0.0, 1.0)),
                (JointName::ThumbTip, Landmark::new(0.5, 0.1, 1.0)),
                (JointName::IndexTip, Landmark::new(0.0, 0.9, 1.0)),
            ]
            .into_iter()
            .filter(|(j, _)| *j != missing)
            .collect();

            assert_eq!(classifier.classify(&set), GestureClassification::Neither);
        }
    }

    #[test]
    fn test_pointing() {
        let mut classifier = HandGestureClassifier::default();
        let result = classifier.classify(&hand((0.0, 0.9), 1.0));
        assert_eq!(result, GestureClassification::Pointing(Point::new(0.0, 0.9)));
    }

    #[test]
    fn test_tapping() {
        let mut classifier = HandGestureClassifier::default();
        // 指尖距拇指尖 0.1 (比例 1.0)
        let result = classifier.classify(&hand((0.4, 0.1), 1.0));
        assert_eq!(result, GestureClassification::Tapping);
    }

    #[test]
    fn test_ratio_boundaries_are_strict() {
        // 2 的幂让比例精确
        let wrist = Point::new(0.0, 0.0);
        let thumb_ip = Point::new(1.0, 0.0);
        let thumb_tip = Point::new(1.0, 0.25);
        let config = ClassifierConfig::default();

        // 食指到手腕 = 1.25 = 5 × 0.25
        let index_tip = Point::new(0.0, 1.25);
        assert_ne!(
            HandGestureClassifier::classify_points(&config, wrist, thumb_tip, thumb_ip, index_tip),
            GestureClassification::Pointing(index_tip)
        );

        // 拇指尖到食指 = 0.375 = 1.5 × 0.25
        let index_tip = Point::new(0.625, 0.25);
        assert_eq!(
            HandGestureClassifier::classify_points(&config, wrist, thumb_tip, thumb_ip, index_tip),
            GestureClassification::Neither
        );
    }

    #[test]
    fn test_low_confidence_falls_back() {
        let mut classifier = HandGestureClassifier::new(ClassifierConfig {
            min_confidence: Some(0.7),
            ..Default::default()
        });

        assert_eq!(classifier.classify(&hand((0.4, 0.1), 0.9)), GestureClassification::Tapping);

        // 低置信度指向帧沿用上一次的点按
        assert_eq!(classifier.classify(&hand((0.0, 0.9), 0.5)), GestureClassification::Tapping);
        assert_eq!(classifier.previous(), GestureClassification::Tapping);
    }

    #[test]
    fn test_confidence_averages_every_joint() {
        let mut classifier = HandGestureClassifier::new(ClassifierConfig {
            min_confidence: Some(0.7),
            ..Default::default()
        });

        // 四个关键关节置信度 0.9，其余手指拉低整体平均
        let weak = hand((0.0, 0.9), 0.9)
            .with(JointName::MiddleTip, Landmark::new(0.2, 0.6, 0.1))
            .with(JointName::RingTip, Landmark::new(0.3, 0.6, 0.1))
            .with(JointName::LittleTip, Landmark::new(0.4, 0.6, 0.1));
        assert_eq!(classifier.classify(&weak), GestureClassification::Neither);

        let strong = hand((0.0, 0.9), 0.9).with(JointName::MiddleTip, Landmark::new(0.2, 0.6, 0.9));
        assert!(classifier.classify(&strong).is_pointing());
    }

    #[test]
    fn test_degenerate_thumb_is_neither() {
        let mut classifier = HandGestureClassifier::default();
        let set = LandmarkSet::new()
            .with(JointName::Wrist, Landmark::new(0.0, 0.0, 1.0))
            .with(JointName::ThumbIp, Landmark::new(0.5, 0.1, 1.0))
            .with(JointName::ThumbTip, Landmark::new(0.5, 0.1, 1.0))
            .with(JointName::IndexTip, Landmark::new(0.0, 0.3, 1.0));

        assert_eq!(classifier.classify(&set), GestureClassification::Neither);
    }
}
