//! 手势去抖
//!
//! 最近 N 帧分类结果的滑动窗口。窗口满且一致、并且与上次稳定手势不同，
//! 才发出一次稳定事件 (边沿触发)

use std::collections::VecDeque;
use tracing::debug;

use super::classifier::GestureClassification;
use crate::config::DebounceConfig;

/// 手势去抖器
pub struct GestureDebouncer {
    /// 最近的分类结果 (FIFO)
    window: VecDeque<GestureClassification>,
    /// 窗口容量
    capacity: usize,
    /// 上次发出的稳定手势
    last_stable: GestureClassification,
}

impl GestureDebouncer {
    pub fn new(config: DebounceConfig) -> Self {
        let capacity = config.window.max(1);
        Self {
            window: VecDeque::with_capacity(capacity),
            capacity,
            last_stable: GestureClassification::Neither,
        }
    }

    /// 输入一帧分类结果，返回稳定事件
    ///
    /// 没有新手势时返回 `Neither`
    pub fn push(&mut self, classification: GestureClassification) -> GestureClassification {
        if self.window.len() >= self.capacity {
            self.window.pop_front();
        }
        self.window.push_back(classification);

        let full = self.window.len() == self.capacity;
        let all_pointing = full && self.window.iter().all(|c| c.is_pointing());
        let all_tapping = full && self.window.iter().all(|c| *c == GestureClassification::Tapping);

        if all_pointing {
            if !self.last_stable.is_pointing() {
                // 使用当前帧的位置，不取平均
                debug!("稳定手势: {}", classification.as_str());
                self.last_stable = classification;
                return classification;
            }
            return GestureClassification::Neither;
        }

        if all_tapping {
            if self.last_stable != GestureClassification::Tapping {
                debug!("稳定手势: {}", GestureClassification::Tapping.as_str());
                self.last_stable = GestureClassification::Tapping;
                return GestureClassification::Tapping;
            }
            return GestureClassification::Neither;
        }

        self.last_stable = GestureClassification::Neither;
        GestureClassification::Neither
    }

    /// 清除上次稳定手势，允许同一手势再次触发
    pub fn reset_last_stable(&mut self) {
        self.last_stable = GestureClassification::Neither;
    }

    pub fn last_stable(&self) -> GestureClassification {
        self.last_stable
    }

    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }
}

impl Default for GestureDebouncer {
    fn default() -> Self {
        Self::new(DebounceConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::geometry::Point;

    fn pointing(i: usize) -> GestureClassification {
        GestureClassification::Pointing(Point::new(i as f64 * 0.1, 0.5))
    }

    #[test]
    fn test_pointing_fires_once() {
        let mut debouncer = GestureDebouncer::default();

        for i in 1..=4 {
            assert_eq!(debouncer.push(pointing(i)), GestureClassification::Neither);
        }

        // 第 5 帧窗口一致，使用当前帧位置
        assert_eq!(debouncer.push(pointing(5)), pointing(5));

        // 之后持续一致但不变
        for i in 6..=12 {
            assert_eq!(debouncer.push(pointing(i)), GestureClassification::Neither);
            assert_eq!(debouncer.len(), 5);
        }
        assert!(debouncer.last_stable().is_pointing());
    }

    #[test]
    fn test_reset_allows_refire() {
        let mut debouncer = GestureDebouncer::default();
        for i in 1..=5 {
            debouncer.push(pointing(i));
        }

        debouncer.reset_last_stable();
        assert_eq!(debouncer.push(pointing(6)), pointing(6));
    }

    #[test]
    fn test_tapping_fires_once() {
        let mut debouncer = GestureDebouncer::default();
        let events: Vec<_> = (0..8).map(|_| debouncer.push(GestureClassification::Tapping)).collect();

        let taps = events.iter().filter(|e| **e == GestureClassification::Tapping).count();
        assert_eq!(taps, 1);
        assert_eq!(events[4], GestureClassification::Tapping);
    }

    #[test]
    fn test_mixed_window_clears_last_stable() {
        let mut debouncer = GestureDebouncer::default();
        for _ in 0..5 {
            debouncer.push(GestureClassification::Tapping);
        }
        assert_eq!(debouncer.last_stable(), GestureClassification::Tapping);

        // 一帧中断
        assert_eq!(debouncer.push(GestureClassification::Neither), GestureClassification::Neither);
        assert_eq!(debouncer.last_stable(), GestureClassification::Neither);

        // 重新积累 5 帧后再次触发
        for _ in 0..4 {
            assert_eq!(debouncer.push(GestureClassification::Tapping), GestureClassification::Neither);
        }
        assert_eq!(debouncer.push(GestureClassification::Tapping), GestureClassification::Tapping);
    }

    #[test]
    fn test_pointing_to_tapping_switch() {
        let mut debouncer = GestureDebouncer::default();
        for i in 1..=5 {
            debouncer.push(pointing(i));
        }

        let events: Vec<_> = (0..5).map(|_| debouncer.push(GestureClassification::Tapping)).collect();
        assert_eq!(events.last(), Some(&GestureClassification::Tapping));
    }
}
