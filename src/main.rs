//! 辅助感知眼镜 - 交互循环演示
//!
//! 两个生产者 (关键点流、场景快照流) 并发输入，
//! 控制器串行处理，朗读事件打印到日志

use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use assistive_glasses::utils::time::{format_mmss_ms, now};
use assistive_glasses::{
    event_channel, GlassesConfig, InputEvent, InteractionController, InteractionEvent, JointName,
    Landmark, LandmarkSet, Rect, RemoteCommand, SceneClient, SceneSnapshot, TextRegion,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日志
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut config = match std::env::var("GLASSES_CONFIG") {
        Ok(path) => GlassesConfig::load(&path)?,
        Err(_) => GlassesConfig::default(),
    };
    if let Ok(url) = std::env::var("GLASSES_BACKEND_URL") {
        config.backend.endpoint = url;
    }

    check_backend(&config).await;

    let (event_tx, event_rx) = event_channel();
    let (input_tx, input_rx) = mpsc::unbounded_channel();
    let controller = InteractionController::new(config).with_event_channel(event_tx);

    let speaker = tokio::spawn(speak(event_rx));
    let runner = tokio::spawn(controller.clone().run(input_rx));

    input_tx.send(InputEvent::TextRegions(demo_text_regions()))?;

    let scene_tx = input_tx.clone();
    let scenes = tokio::spawn(async move {
        for body in demo_snapshots() {
            match SceneSnapshot::from_json(body) {
                Ok(snapshot) => {
                    let _ = scene_tx.send(InputEvent::Snapshot(snapshot));
                }
                Err(e) => warn!("快照解码失败: {}", e),
            }
            tokio::time::sleep(Duration::from_millis(1500)).await;
        }
    });

    let hand_tx = input_tx.clone();
    let hands = tokio::spawn(async move {
        // 约 30Hz：先指向 1 秒，放下，再点按
        for frame in 0..120u32 {
            let landmarks = match frame {
                0..=29 => pointing_hand(0.2, 0.5),
                30..=59 => LandmarkSet::new(),
                _ => tapping_hand(),
            };
            let _ = hand_tx.send(InputEvent::Landmarks(landmarks));
            tokio::time::sleep(Duration::from_millis(33)).await;
        }
    });

    let _ = tokio::join!(scenes, hands);

    info!("\n=== 遥控: 重置并重新朗读 ===");
    input_tx.send(InputEvent::Remote(RemoteCommand::from_raw(4, "")?))?;
    tokio::time::sleep(Duration::from_millis(100)).await;

    info!("最终状态: {}", controller.state().as_str());

    drop(input_tx);
    runner.await?;
    drop(controller);
    speaker.await?;

    Ok(())
}

async fn check_backend(config: &GlassesConfig) {
    let client = match SceneClient::new(&config.backend) {
        Ok(c) => c,
        Err(e) => {
            warn!("无法创建后端客户端: {}", e);
            return;
        }
    };

    match client.health().await {
        Ok(true) => info!("后端可用: {}", client.endpoint()),
        _ => info!("后端不可用，使用模拟快照"),
    }
}

/// 朗读消费者 (代替语音合成)
async fn speak(mut rx: mpsc::UnboundedReceiver<InteractionEvent>) {
    let start = now();
    while let Some(event) = rx.recv().await {
        match event {
            InteractionEvent::Narrate(n) => {
                info!("[{}] 🔊 {}", format_mmss_ms(n.timestamp - start), n.text);
            }
            InteractionEvent::StateChanged { from, to } => {
                info!("状态: {} → {}", from.as_str(), to.as_str());
            }
        }
    }
}

// ============================================================
// 模拟数据生成
// ============================================================

fn pointing_hand(x: f64, y: f64) -> LandmarkSet {
    LandmarkSet::new()
        .with(JointName::Wrist, Landmark::new(x, 0.0, 0.9))
        .with(JointName::ThumbIp, Landmark::new(x + 0.1, 0.05, 0.9))
        .with(JointName::ThumbTip, Landmark::new(x + 0.1, 0.1, 0.9))
        .with(JointName::IndexTip, Landmark::new(x, y, 0.9))
}

fn tapping_hand() -> LandmarkSet {
    LandmarkSet::new()
        .with(JointName::Wrist, Landmark::new(0.5, 0.0, 0.9))
        .with(JointName::ThumbIp, Landmark::new(0.55, 0.1, 0.9))
        .with(JointName::ThumbTip, Landmark::new(0.55, 0.2, 0.9))
        .with(JointName::IndexTip, Landmark::new(0.57, 0.21, 0.9))
}

fn demo_text_regions() -> Vec<TextRegion> {
    vec![
        TextRegion::new(Rect::new(0.1, 0.45, 0.2, 0.1), "Platform 3"),
        TextRegion::new(Rect::new(0.6, 0.6, 0.3, 0.2), "Next train 14:05"),
    ]
}

fn demo_snapshots() -> Vec<&'static str> {
    vec![
        r#"{"person": [{"probability": 0.91, "coordinates": {"top_left": {"x": 0.05, "y": 0.9}, "bottom_right": {"x": 0.3, "y": 0.1}}}],
            "tv": [{"probability": 0.84, "coordinates": {"top_left": {"x": 0.55, "y": 0.85}, "bottom_right": {"x": 0.95, "y": 0.55}}}]}"#,
        r#"{"person": [], "cup": [{"probability": 0.6, "coordinates": {"top_left": {"x": 0.4, "y": 0.2}, "bottom_right": {"x": 0.45, "y": 0.15}}}],
            "laptop": [{"probability": 0.77, "coordinates": {"top_left": {"x": 0.5, "y": 0.9}, "bottom_right": {"x": 0.95, "y": 0.5}}}]}"#,
        r#"{"tv": [{"probability": 0.88, "coordinates": {"top_left": {"x": 0.55, "y": 0.85}, "bottom_right": {"x": 0.95, "y": 0.55}}}]}"#,
    ]
}
