//! 端到端：关键点帧 + 快照 JSON → 朗读事件

use std::time::Duration;

use assistive_glasses::{
    event_channel, GlassesConfig, InputEvent, InteractionController, InteractionEvent,
    InteractionState, JointName, Landmark, LandmarkSet, Rect, RemoteCommand, TextRegion,
};

const SCENE_WITH_TV: &str = r#"{
    "tv": [{"probability": 0.9, "coordinates": {"top_left": {"x": 0.5, "y": 1.0}, "bottom_right": {"x": 1.0, "y": 0.5}}}],
    "cup": [{"probability": 0.4, "coordinates": {"top_left": {"x": 0.0, "y": 0.05}, "bottom_right": {"x": 0.05, "y": 0.0}}}]
}"#;

fn tapping_hand() -> LandmarkSet {
    LandmarkSet::new()
        .with(JointName::Wrist, Landmark::new(0.5, 0.0, 0.9))
        .with(JointName::ThumbIp, Landmark::new(0.55, 0.1, 0.9))
        .with(JointName::ThumbTip, Landmark::new(0.55, 0.2, 0.9))
        .with(JointName::IndexTip, Landmark::new(0.57, 0.21, 0.9))
}

fn drain(rx: &mut tokio::sync::mpsc::UnboundedReceiver<InteractionEvent>) -> Vec<InteractionEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

fn texts(events: &[InteractionEvent]) -> Vec<String> {
    events
        .iter()
        .filter_map(|e| e.narration())
        .map(|n| n.text.clone())
        .collect()
}

#[tokio::test(start_paused = true)]
async fn tap_expands_context_then_reverts() {
    let (tx, mut rx) = event_channel();
    let controller = InteractionController::new(GlassesConfig::default()).with_event_channel(tx);

    let response = controller.ingest_scene_json(SCENE_WITH_TV).unwrap();
    assert_eq!(response.scene_description, "0 cup 1 tv tap for insights");
    assert_eq!(texts(&drain(&mut rx)), vec!["0 cup 1 tv tap for insights"]);

    controller.on_text_regions(vec![
        TextRegion::new(Rect::new(0.6, 0.7, 0.3, 0.1), "Q3 revenue"),
        TextRegion::new(Rect::new(0.0, 0.0, 0.2, 0.1), "Exit"),
    ]);

    for _ in 0..5 {
        controller.on_landmarks(&tapping_hand());
    }
    assert_eq!(controller.state(), InteractionState::ContextExpanded);

    let events = drain(&mut rx);
    assert_eq!(
        events[0],
        InteractionEvent::StateChanged {
            from: InteractionState::Normal,
            to: InteractionState::ContextExpanded
        }
    );
    assert_eq!(texts(&events), vec!["Text: Q3 revenue"]);

    // 展开期间的新场景不朗读
    controller.ingest_scene_json(r#"{"tv": []}"#).unwrap();
    assert!(texts(&drain(&mut rx)).is_empty());
    assert!(controller.scene_response().unwrap().context_region.is_none());

    tokio::time::sleep(Duration::from_millis(1001)).await;
    assert_eq!(controller.state(), InteractionState::Normal);

    // 缓存已没有上下文区域，再次点按被忽略
    for _ in 0..5 {
        controller.on_landmarks(&tapping_hand());
    }
    assert_eq!(controller.state(), InteractionState::Normal);
}

#[tokio::test]
async fn tap_without_scene_is_silent() {
    let (tx, mut rx) = event_channel();
    let controller = InteractionController::default().with_event_channel(tx);

    for _ in 0..8 {
        controller.on_landmarks(&tapping_hand());
    }

    assert_eq!(controller.state(), InteractionState::Normal);
    assert!(drain(&mut rx).is_empty());
}

#[tokio::test(start_paused = true)]
async fn input_channel_drives_controller() {
    let (tx, mut rx) = event_channel();
    let controller = InteractionController::default().with_event_channel(tx);
    let (input_tx, input_rx) = tokio::sync::mpsc::unbounded_channel();
    let runner = tokio::spawn(controller.clone().run(input_rx));

    input_tx.send(InputEvent::Remote(RemoteCommand::from_raw(2, "Gate 12").unwrap())).unwrap();
    input_tx.send(InputEvent::Remote(RemoteCommand::ResetToNormal)).unwrap();
    drop(input_tx);
    runner.await.unwrap();

    assert_eq!(controller.state(), InteractionState::Normal);
    let events = drain(&mut rx);
    assert_eq!(texts(&events), vec!["Text: Gate 12"]);
    assert_eq!(
        events.last(),
        Some(&InteractionEvent::StateChanged {
            from: InteractionState::Pointer,
            to: InteractionState::Normal
        })
    );

    // 被取消的回退到期后不会再发出事件
    tokio::time::sleep(Duration::from_millis(1500)).await;
    assert!(drain(&mut rx).is_empty());
}
