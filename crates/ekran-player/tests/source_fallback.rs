//! Ordered fallback across the candidate list, including the
//! adaptive-vs-direct attachment decision per candidate.


use ekran_player::PlayerEvent;
use fixture::*;

#[tokio::test]
async fn failed_primary_falls_back_to_alternate() {
    let mut fx = PlayerFixture::new();
    fx.open_with_alternates("https://cdn.example/a.mp4", &["https://cdn.example/b.mp4"]);

    assert_eq!(fx.element.attach_count(), 1);
    fx.fail_current(MediaError::network("edge unreachable")).await;

    // Second candidate attached, first never retried.
    assert_eq!(fx.element.attach_count(), 2);
    let current = fx.controller.current_source().unwrap();
    assert_eq!(current.address().as_str(), "https://cdn.example/b.mp4");
    assert_eq!(current.label(), "Source 2");
    assert_eq!(fx.controller.phase(), PlaybackPhase::Loading);
    assert!(!fx.controller.is_exhausted());

    fx.make_ready().await;
    assert_eq!(fx.controller.phase(), PlaybackPhase::Ready);
    assert!(fx.controller.is_playing());
    assert_eq!(fx.element.play_count(), 1);

    let events = fx.drain_events();
    let fallback = events
        .iter()
        .find_map(|event| match event {
            PlayerEvent::SourceFallback {
                from_index,
                to_index,
                address,
                ..
            } => Some((*from_index, *to_index, address.clone())),
            _ => None,
        })
        .expect("fallback event");
    assert_eq!(fallback.0, 0);
    assert_eq!(fallback.1, 1);
    assert_eq!(fallback.2.as_str(), "https://cdn.example/b.mp4");
}

#[tokio::test]
async fn single_failing_source_exhausts() {
    let mut fx = PlayerFixture::new();
    fx.open("https://cdn.example/only.mp4");

    fx.fail_current(MediaError::decode("bad container")).await;

    assert_eq!(fx.controller.phase(), PlaybackPhase::Exhausted);
    assert!(fx.controller.is_exhausted());
    assert!(!fx.controller.is_loading());
    assert!(!fx.controller.is_playing());
    // No retry of the failed candidate.
    assert_eq!(fx.element.attach_count(), 1);

    let events = fx.drain_events();
    assert!(events
        .iter()
        .any(|event| matches!(event, PlayerEvent::Exhausted)));
    assert!(!events
        .iter()
        .any(|event| matches!(event, PlayerEvent::SourceFallback { .. })));
}

#[tokio::test]
async fn exhaustion_walks_the_whole_list_once() {
    let mut fx = PlayerFixture::new();
    fx.open_with_alternates(
        "https://cdn.example/a.mp4",
        &["https://cdn.example/b.mp4", "https://cdn.example/c.mp4"],
    );

    fx.fail_current(MediaError::network("a down")).await;
    fx.fail_current(MediaError::network("b down")).await;
    fx.fail_current(MediaError::network("c down")).await;

    assert_eq!(fx.controller.phase(), PlaybackPhase::Exhausted);
    assert_eq!(fx.element.attach_count(), 3);

    let events = fx.drain_events();
    let fallbacks = events
        .iter()
        .filter(|event| matches!(event, PlayerEvent::SourceFallback { .. }))
        .count();
    assert_eq!(fallbacks, 2);
}

#[tokio::test]
async fn manifest_source_attaches_through_engine() {
    let fx = PlayerFixture::new();
    fx.open("https://cdn.example/live/master.m3u8");

    // The engine owns the attachment; the element never gets a direct
    // source assignment.
    assert_eq!(fx.provider.created_count(), 1);
    assert_eq!(fx.element.attach_count(), 0);
    let engine = &fx.provider.engines()[0];
    assert_eq!(
        engine.attached_address().unwrap().as_str(),
        "https://cdn.example/live/master.m3u8"
    );
}

#[tokio::test]
async fn manifest_plays_directly_when_engines_unsupported() {
    let fx = PlayerFixture::with_provider(TestEngineProvider::unsupported());
    fx.open("https://cdn.example/live/master.m3u8");

    assert_eq!(fx.provider.created_count(), 0);
    assert_eq!(fx.element.attach_count(), 1);
    assert_eq!(
        fx.element.source().unwrap().as_str(),
        "https://cdn.example/live/master.m3u8"
    );
}

#[tokio::test]
async fn engine_create_failure_falls_back_during_open() {
    let mut fx = PlayerFixture::new();
    fx.provider.fail_create(MediaError::engine("wasm init failed"));
    fx.open_with_alternates(
        "https://cdn.example/live/master.m3u8",
        &["https://cdn.example/live/fallback.mp4"],
    );

    // The failure was synchronous, so open() already moved on.
    assert_eq!(fx.provider.created_count(), 0);
    assert_eq!(fx.element.attach_count(), 1);
    assert_eq!(
        fx.element.source().unwrap().as_str(),
        "https://cdn.example/live/fallback.mp4"
    );
    assert_eq!(fx.controller.phase(), PlaybackPhase::Loading);

    let events = fx.drain_events();
    assert!(events
        .iter()
        .any(|event| matches!(event, PlayerEvent::SourceFallback { .. })));
}

#[tokio::test]
async fn engine_attach_failure_falls_back_during_open() {
    let fx = PlayerFixture::new();
    fx.provider.fail_attach(MediaError::engine("no media source"));
    fx.open_with_alternates(
        "https://cdn.example/live/master.m3u8",
        &["https://cdn.example/live/fallback.mp4"],
    );

    // One engine was created and then discarded with its attachment.
    assert_eq!(fx.provider.created_count(), 1);
    assert!(fx.provider.engines()[0].is_destroyed());
    assert_eq!(
        fx.element.source().unwrap().as_str(),
        "https://cdn.example/live/fallback.mp4"
    );
}

#[tokio::test]
async fn all_sync_failures_exhaust_before_open_returns() {
    let mut fx = PlayerFixture::new();
    fx.provider.fail_create(MediaError::engine("unavailable"));
    fx.open_with_alternates(
        "https://cdn.example/a.m3u8",
        &["https://cdn.example/b.m3u8"],
    );

    assert_eq!(fx.controller.phase(), PlaybackPhase::Exhausted);
    assert!(fx.controller.is_exhausted());
    let events = fx.drain_events();
    assert!(events
        .iter()
        .any(|event| matches!(event, PlayerEvent::Exhausted)));
}

#[tokio::test]
async fn engine_failure_releases_engine_before_next_attach() {
    let fx = PlayerFixture::new();
    fx.open_with_alternates(
        "https://cdn.example/live/a.m3u8",
        &["https://cdn.example/live/b.m3u8"],
    );

    let engines = fx.provider.engines();
    assert_eq!(engines.len(), 1);
    engines[0].emit(MediaEvent::Error(MediaError::network("segment timeout")));

    let provider = fx.provider.clone();
    wait_until(move || provider.created_count() == 2).await;

    let engines = fx.provider.engines();
    assert!(engines[0].is_destroyed());
    assert!(!engines[1].is_destroyed());
    assert_eq!(
        engines[1].attached_address().unwrap().as_str(),
        "https://cdn.example/live/b.m3u8"
    );
}

#[tokio::test]
async fn stale_engine_events_are_ignored_after_fallback() {
    let fx = PlayerFixture::new();
    fx.open_with_alternates(
        "https://cdn.example/live/a.m3u8",
        &["https://cdn.example/live/b.m3u8"],
    );

    let first = fx.provider.engines()[0].clone();
    first.emit(MediaEvent::Error(MediaError::network("gone")));
    let provider = fx.provider.clone();
    wait_until(move || provider.created_count() == 2).await;

    // A late signal from the replaced attachment must not transition.
    first.emit(MediaEvent::CanPlay);
    tokio::time::sleep(std::time::Duration::from_millis(30)).await;
    assert_eq!(fx.controller.phase(), PlaybackPhase::Loading);
    assert!(!fx.controller.is_playing());
    assert_eq!(fx.element.play_count(), 0);

    // The live attachment still works.
    fx.provider.engines()[1].emit(MediaEvent::CanPlay);
    let controller = fx.controller.clone();
    wait_until(move || controller.phase() == PlaybackPhase::Ready).await;
}

#[tokio::test]
async fn stale_events_cannot_leave_the_exhausted_state() {
    let fx = PlayerFixture::new();
    fx.open("https://cdn.example/live/only.m3u8");

    let engine = fx.provider.engines()[0].clone();
    engine.emit(MediaEvent::Error(MediaError::network("down")));
    let controller = fx.controller.clone();
    wait_until(move || controller.phase() == PlaybackPhase::Exhausted).await;

    engine.emit(MediaEvent::CanPlay);
    tokio::time::sleep(std::time::Duration::from_millis(30)).await;
    assert_eq!(fx.controller.phase(), PlaybackPhase::Exhausted);
    assert_eq!(fx.element.play_count(), 0);
    // No second attach attempt either.
    assert_eq!(fx.provider.created_count(), 1);
}

#[tokio::test]
async fn recovery_after_exhaustion_requires_reopen() {
    let fx = PlayerFixture::new();
    fx.open("https://cdn.example/only.mp4");
    fx.fail_current(MediaError::network("down")).await;
    assert!(fx.controller.is_exhausted());

    // A fresh open starts a fresh list.
    fx.open("https://cdn.example/only.mp4");
    assert!(!fx.controller.is_exhausted());
    assert_eq!(fx.controller.phase(), PlaybackPhase::Loading);
    assert_eq!(fx.element.attach_count(), 2);
}
