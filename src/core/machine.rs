//! 交互状态机
//!
//! 状态转换：
//! - Normal → Pointer → Normal (指向读字)
//! - Normal → ContextExpanded → Normal (点按展开)
//!
//! 每次手势转换都会生成一个带代数的回退令牌。
//! 令牌过期 (之后又发生了新的转换) 时，回退被忽略。

use tracing::{debug, info};

use super::event::{InteractionEvent, Narration, NOTHING_TO_EXPAND, NOTHING_TO_READ};
use super::state::InteractionState;
use crate::config::InteractionConfig;
use crate::hand::GestureClassification;
use crate::scene::text::{regions_at_point, regions_in_rect};
use crate::scene::{SceneResponse, TextRegion};
use crate::utils::geometry::Point;

/// 延迟回退令牌
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevertToken {
    generation: u64,
}

impl RevertToken {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// 一次输入的处理结果
#[derive(Debug, Default)]
pub struct Transition {
    /// 按顺序发出的事件
    pub events: Vec<InteractionEvent>,
    /// 需要延迟执行的回退
    pub revert: Option<RevertToken>,
}

impl Transition {
    fn ignored() -> Self {
        Self::default()
    }

    /// 只取朗读文本
    pub fn narrations(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| e.narration())
            .map(|n| n.text.as_str())
            .collect()
    }
}

/// 交互状态机
pub struct InteractionStateMachine {
    config: InteractionConfig,
    state: InteractionState,
    /// 每次转换递增
    generation: u64,
    /// 等待中的回退所属代数
    pending_revert: Option<u64>,
    /// 最新的场景解释结果
    scene_response: Option<SceneResponse>,
    /// 最新的文字区域
    text_regions: Vec<TextRegion>,
}

impl InteractionStateMachine {
    pub fn new(config: InteractionConfig) -> Self {
        Self {
            config,
            state: InteractionState::Normal,
            generation: 0,
            pending_revert: None,
            scene_response: None,
            text_regions: Vec::new(),
        }
    }

    /// 处理稳定手势
    pub fn on_gesture(&mut self, gesture: GestureClassification) -> Transition {
        match gesture {
            GestureClassification::Pointing(point) => self.on_pointing(point),
            GestureClassification::Tapping => self.on_tapping(),
            GestureClassification::Neither => Transition::ignored(),
        }
    }

    fn on_pointing(&mut self, point: Point) -> Transition {
        if !self.accepts_pointing() {
            debug!("忽略指向: 当前状态 {}", self.state.as_str());
            return Transition::ignored();
        }

        let texts: Vec<String> = regions_at_point(&self.text_regions, point, self.config.point_match_radius)
            .into_iter()
            .map(|r| r.recognized_text.clone())
            .collect();

        info!("指向 ({:.2}, {:.2})，匹配 {} 个文字区域", point.x, point.y, texts.len());
        self.enter(InteractionState::Pointer, &texts, NOTHING_TO_READ)
    }

    fn on_tapping(&mut self) -> Transition {
        if self.state != InteractionState::Normal {
            debug!("忽略点按: 当前状态 {}", self.state.as_str());
            return Transition::ignored();
        }

        let Some(region) = self.scene_response.as_ref().and_then(|r| r.context_region) else {
            debug!("忽略点按: 没有上下文区域");
            return Transition::ignored();
        };

        let texts: Vec<String> = regions_in_rect(&self.text_regions, &region)
            .into_iter()
            .map(|r| r.recognized_text.clone())
            .collect();

        info!("点按展开，匹配 {} 个文字区域", texts.len());
        self.enter(InteractionState::ContextExpanded, &texts, NOTHING_TO_EXPAND)
    }

    /// 模拟指向读字 (遥控入口)
    pub fn simulate_point_read(&mut self, text: &str) -> Transition {
        if !self.accepts_pointing() {
            return Transition::ignored();
        }
        self.enter(InteractionState::Pointer, &[text.to_string()], NOTHING_TO_READ)
    }

    /// 模拟点按读字 (遥控入口)
    pub fn simulate_tap_read(&mut self, text: &str) -> Transition {
        if self.state != InteractionState::Normal {
            return Transition::ignored();
        }
        self.enter(InteractionState::ContextExpanded, &[text.to_string()], NOTHING_TO_EXPAND)
    }

    /// 新的场景结果总是替换缓存，只在 Normal 时朗读
    pub fn on_scene_response(&mut self, response: SceneResponse) -> Vec<InteractionEvent> {
        let mut events = Vec::new();

        if self.state == InteractionState::Normal {
            events.push(InteractionEvent::Narrate(Narration::scene(
                response.scene_description.clone(),
            )));
        } else {
            debug!("状态 {}，不朗读场景", self.state.as_str());
        }

        self.scene_response = Some(response);
        events
    }

    /// 替换文字区域
    pub fn set_text_regions(&mut self, regions: Vec<TextRegion>) {
        self.text_regions = regions;
    }

    /// 立即回到 Normal 并重新朗读缓存的场景
    ///
    /// 等待中的回退同时失效
    pub fn reset_to_normal(&mut self) -> Vec<InteractionEvent> {
        let mut events = Vec::new();

        self.generation += 1;
        self.pending_revert = None;
        self.set_state(InteractionState::Normal, &mut events);

        if let Some(response) = &self.scene_response {
            events.push(InteractionEvent::Narrate(Narration::scene(
                response.scene_description.clone(),
            )));
        }

        events
    }

    /// 执行延迟回退
    ///
    /// 令牌过期时返回 `None`，状态不变
    pub fn apply_revert(&mut self, token: RevertToken) -> Option<InteractionEvent> {
        if self.pending_revert != Some(token.generation) {
            debug!("回退令牌 {} 已过期", token.generation);
            return None;
        }

        // 有等待中的回退时，状态一定不是 Normal
        self.pending_revert = None;
        let from = self.state;
        self.state = InteractionState::Normal;
        info!("{} 回退到 normal", from.as_str());

        Some(InteractionEvent::StateChanged {
            from,
            to: InteractionState::Normal,
        })
    }

    fn accepts_pointing(&self) -> bool {
        // Pointer 可以重入；ContextExpanded 不能直接切到 Pointer
        matches!(self.state, InteractionState::Normal | InteractionState::Pointer)
    }

    fn enter(&mut self, state: InteractionState, texts: &[String], nothing: &str) -> Transition {
        let mut events = Vec::new();
        self.set_state(state, &mut events);

        if texts.is_empty() {
            events.push(InteractionEvent::Narrate(Narration::nothing(nothing)));
        } else {
            // 每段文字单独朗读
            events.extend(texts.iter().map(|t| InteractionEvent::Narrate(Narration::text(t))));
        }

        self.generation += 1;
        self.pending_revert = Some(self.generation);

        Transition {
            events,
            revert: Some(RevertToken {
                generation: self.generation,
            }),
        }
    }

    fn set_state(&mut self, state: InteractionState, events: &mut Vec<InteractionEvent>) {
        if self.state != state {
            events.push(InteractionEvent::StateChanged {
                from: self.state,
                to: state,
            });
            self.state = state;
        }
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn scene_response(&self) -> Option<&SceneResponse> {
        self.scene_response.as_ref()
    }

    pub fn text_regions(&self) -> &[TextRegion] {
        &self.text_regions
    }

    pub fn has_pending_revert(&self) -> bool {
        self.pending_revert.is_some()
    }
}

impl Default for InteractionStateMachine {
    fn default() -> Self {
        Self::new(InteractionConfig::default())
    }
}
