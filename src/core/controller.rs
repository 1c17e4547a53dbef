//! 交互控制器
//!
//! 关键点流 (15-30Hz) 和场景快照流 (1-3s) 是两个独立的生产者。
//! 分类器、去抖器、状态机和缓存都放在同一把锁里，
//! 所有修改都经过这里串行执行。

use std::sync::Arc;
use std::time::Duration;
use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, info};

use super::event::{EventSender, InteractionEvent};
use super::machine::{InteractionStateMachine, RevertToken, Transition};
use super::remote::RemoteCommand;
use super::state::InteractionState;
use crate::config::GlassesConfig;
use crate::error::Result;
use crate::hand::{GestureClassification, GestureDebouncer, HandGestureClassifier, LandmarkSet};
use crate::scene::{SceneResponse, SceneResponseInterpreter, SceneSnapshot, TextRegion};

/// 外部输入
#[derive(Debug, Clone)]
pub enum InputEvent {
    /// 一帧手部关键点
    Landmarks(LandmarkSet),
    /// 新的场景快照
    Snapshot(SceneSnapshot),
    /// 新的文字区域
    TextRegions(Vec<TextRegion>),
    /// 遥控命令
    Remote(RemoteCommand),
}

struct Inner {
    classifier: HandGestureClassifier,
    debouncer: GestureDebouncer,
    interpreter: SceneResponseInterpreter,
    machine: InteractionStateMachine,
    classification_enabled: bool,
    /// 等待中的回退及其到期时间
    revert_deadline: Option<(RevertToken, Instant)>,
}

/// 交互控制器
///
/// 克隆开销很小，所有克隆共享同一份状态
#[derive(Clone)]
pub struct InteractionController {
    inner: Arc<Mutex<Inner>>,
    event_tx: Option<EventSender>,
    revert_after: Duration,
}

impl InteractionController {
    pub fn new(config: GlassesConfig) -> Self {
        let revert_after = Duration::from_millis(config.interaction.revert_after_ms);
        let inner = Inner {
            classifier: HandGestureClassifier::new(config.classifier),
            debouncer: GestureDebouncer::new(config.debounce),
            interpreter: SceneResponseInterpreter::new(config.scene),
            machine: InteractionStateMachine::new(config.interaction),
            classification_enabled: true,
            revert_deadline: None,
        };

        Self {
            inner: Arc::new(Mutex::new(inner)),
            event_tx: None,
            revert_after,
        }
    }

    /// 设置事件通道
    pub fn with_event_channel(mut self, tx: EventSender) -> Self {
        self.event_tx = Some(tx);
        self
    }

    /// 处理一帧关键点，返回去抖后的稳定手势
    pub fn on_landmarks(&self, landmarks: &LandmarkSet) -> GestureClassification {
        let mut inner = self.inner.lock();
        self.revert_if_due(&mut inner);
        if !inner.classification_enabled {
            return GestureClassification::Neither;
        }

        let raw = inner.classifier.classify(landmarks);
        let stable = inner.debouncer.push(raw);
        let transition = inner.machine.on_gesture(stable);
        self.dispatch(&mut inner, transition);

        stable
    }

    /// 解释并缓存新的场景快照
    pub fn on_scene_snapshot(&self, snapshot: &SceneSnapshot) -> SceneResponse {
        let mut inner = self.inner.lock();
        self.revert_if_due(&mut inner);
        let response = inner.interpreter.interpret(snapshot);
        info!("场景更新: {:?}", response.scene_description);

        let events = inner.machine.on_scene_response(response.clone());
        self.emit_all(events);
        response
    }

    /// 从后端响应体更新场景
    ///
    /// 解码失败时返回错误，缓存保持不变
    pub fn ingest_scene_json(&self, body: &str) -> Result<SceneResponse> {
        let snapshot = SceneSnapshot::from_json(body)?;
        Ok(self.on_scene_snapshot(&snapshot))
    }

    /// 替换文字区域
    pub fn on_text_regions(&self, regions: Vec<TextRegion>) {
        debug!("文字区域更新: {} 个", regions.len());
        self.inner.lock().machine.set_text_regions(regions);
    }

    /// 处理遥控命令
    pub fn on_remote_command(&self, command: RemoteCommand) {
        info!("遥控命令: {:?}", command);
        let mut inner = self.inner.lock();
        self.revert_if_due(&mut inner);

        match command {
            RemoteCommand::DisableClassification => inner.classification_enabled = false,
            RemoteCommand::EnableClassification => inner.classification_enabled = true,
            RemoteCommand::SimulatePointRead(text) => {
                let transition = inner.machine.simulate_point_read(&text);
                self.dispatch(&mut inner, transition);
            }
            RemoteCommand::SimulateTapRead(text) => {
                let transition = inner.machine.simulate_tap_read(&text);
                self.dispatch(&mut inner, transition);
            }
            RemoteCommand::ResetToNormal => {
                let events = inner.machine.reset_to_normal();
                inner.debouncer.reset_last_stable();
                inner.revert_deadline = None;
                self.emit_all(events);
            }
        }
    }

    /// 处理一个输入事件
    pub fn handle(&self, input: InputEvent) {
        match input {
            InputEvent::Landmarks(landmarks) => {
                self.on_landmarks(&landmarks);
            }
            InputEvent::Snapshot(snapshot) => {
                self.on_scene_snapshot(&snapshot);
            }
            InputEvent::TextRegions(regions) => self.on_text_regions(regions),
            InputEvent::Remote(command) => self.on_remote_command(command),
        }
    }

    /// 消费输入通道直到所有发送端关闭
    pub async fn run(self, mut rx: mpsc::UnboundedReceiver<InputEvent>) {
        info!("交互控制器启动");
        while let Some(input) = rx.recv().await {
            self.handle(input);
        }
        info!("输入通道关闭，控制器退出");
    }

    /// 当前状态
    pub fn state(&self) -> InteractionState {
        let mut inner = self.inner.lock();
        self.revert_if_due(&mut inner);
        inner.machine.state()
    }

    /// 缓存的场景结果
    pub fn scene_response(&self) -> Option<SceneResponse> {
        self.inner.lock().machine.scene_response().cloned()
    }

    pub fn is_classification_enabled(&self) -> bool {
        self.inner.lock().classification_enabled
    }

    /// 去抖器的上次稳定手势
    pub fn last_stable_gesture(&self) -> GestureClassification {
        let mut inner = self.inner.lock();
        self.revert_if_due(&mut inner);
        inner.debouncer.last_stable()
    }

    /// 调用方持有锁：事件顺序与状态转换顺序一致
    fn dispatch(&self, inner: &mut Inner, transition: Transition) {
        self.emit_all(transition.events);
        if let Some(token) = transition.revert {
            inner.revert_deadline = Some((token, Instant::now() + self.revert_after));
            self.schedule_revert(token);
        }
    }

    /// 有运行时就定时回退；否则由下一次调用补上到期的回退
    fn schedule_revert(&self, token: RevertToken) {
        let Ok(handle) = Handle::try_current() else {
            debug!("没有 tokio 运行时，回退 {} 在下次调用时检查", token.generation());
            return;
        };

        let controller = self.clone();
        handle.spawn(async move {
            tokio::time::sleep(controller.revert_after).await;
            let mut inner = controller.inner.lock();
            controller.apply_revert(&mut inner, token);
        });
    }

    fn revert_if_due(&self, inner: &mut Inner) {
        if let Some((token, deadline)) = inner.revert_deadline {
            if Instant::now() >= deadline {
                self.apply_revert(inner, token);
            }
        }
    }

    fn apply_revert(&self, inner: &mut Inner, token: RevertToken) {
        if inner.revert_deadline.map(|(pending, _)| pending) == Some(token) {
            inner.revert_deadline = None;
        }

        if let Some(event) = inner.machine.apply_revert(token) {
            // 允许持续的同一手势再次触发
            inner.debouncer.reset_last_stable();
            self.emit(event);
        }
    }

    fn emit_all(&self, events: Vec<InteractionEvent>) {
        for event in events {
            self.emit(event);
        }
    }

    fn emit(&self, event: InteractionEvent) {
        if let Some(tx) = &self.event_tx {
            let _ = tx.send(event);
        }
    }
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new(GlassesConfig::default())
    }
}
