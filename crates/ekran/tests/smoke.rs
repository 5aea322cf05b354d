//! End-to-end smoke test through the facade surface only.

use std::sync::Arc;
use std::time::Duration;

use ekran::media::MediaEvent;
use ekran::media::mock::{TestEngineProvider, TestHostEnv, TestMediaElement};
use ekran::prelude::*;

async fn wait_for(mut condition: impl FnMut() -> bool) {
    tokio::time::timeout(Duration::from_secs(2), async {
        while !condition() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("condition not reached within 2s");
}

#[tokio::test]
async fn facade_drives_a_full_session() {
    let element = TestMediaElement::new();
    let provider = TestEngineProvider::supported();
    let controller = PlaybackController::new(
        Arc::new(element.clone()),
        Arc::new(provider.clone()),
        Arc::new(TestHostEnv::desktop()),
        PlayerConfig::default(),
    );
    let mut events = controller.subscribe();

    controller
        .open(
            "https://cdn.example/live/master.m3u8",
            "Channel One",
            vec![Source::parse("https://backup.example/live.mp4", "Source 2").unwrap()],
        )
        .unwrap();
    assert_eq!(controller.phase(), PlaybackPhase::Loading);
    assert_eq!(controller.source_count(), 2);

    provider.engines()[0].emit(MediaEvent::CanPlay);
    let probe = controller.clone();
    wait_for(move || probe.phase() == PlaybackPhase::Ready).await;
    assert!(controller.is_playing());

    controller.toggle_fullscreen();
    assert_eq!(controller.fullscreen_mode(), FullscreenMode::Native);

    controller.close();
    assert!(!controller.is_open());
    assert_eq!(controller.snapshot().phase, PlaybackPhase::Idle);

    let mut saw_opened = false;
    let mut saw_closed = false;
    while let Ok(event) = events.try_recv() {
        match event {
            PlayerEvent::Opened { ref title } if title == "Channel One" => saw_opened = true,
            PlayerEvent::Closed => saw_closed = true,
            _ => {}
        }
    }
    assert!(saw_opened);
    assert!(saw_closed);
}
