//! Fullscreen strategy selection: element-native on capable desktops,
//! host-emulated everywhere else, never an error to the caller.


use ekran_player::PlayerEvent;
use fixture::*;

#[tokio::test]
async fn desktop_uses_native_fullscreen() {
    let mut fx = PlayerFixture::new();
    fx.open("https://cdn.example/a.mp4");

    fx.controller.toggle_fullscreen();

    assert_eq!(fx.controller.fullscreen_mode(), FullscreenMode::Native);
    assert!(fx.controller.is_fullscreen());
    assert!(fx
        .element
        .commands()
        .contains(&ElementCommand::RequestFullscreen));

    let events = fx.drain_events();
    assert!(events.iter().any(|event| matches!(
        event,
        PlayerEvent::FullscreenChanged {
            mode: FullscreenMode::Native
        }
    )));
}

#[tokio::test]
async fn rejected_native_request_falls_back_to_emulated() {
    let fx = PlayerFixture::new();
    fx.element
        .reject_fullscreen(MediaError::fullscreen("permission denied"));
    fx.open("https://cdn.example/a.mp4");

    fx.controller.toggle_fullscreen();

    assert_eq!(fx.controller.fullscreen_mode(), FullscreenMode::Emulated);
    assert!(fx.controller.is_fullscreen());
}

#[tokio::test]
async fn embedded_host_never_asks_for_native() {
    let fx = PlayerFixture::with_env(TestHostEnv::embedded());
    fx.open("https://cdn.example/a.mp4");

    fx.controller.toggle_fullscreen();

    assert_eq!(fx.controller.fullscreen_mode(), FullscreenMode::Emulated);
    assert!(!fx
        .element
        .commands()
        .contains(&ElementCommand::RequestFullscreen));
}

#[tokio::test]
async fn touch_host_never_asks_for_native() {
    let fx = PlayerFixture::with_env(TestHostEnv::touch());
    fx.open("https://cdn.example/a.mp4");

    fx.controller.toggle_fullscreen();

    assert_eq!(fx.controller.fullscreen_mode(), FullscreenMode::Emulated);
    assert!(!fx
        .element
        .commands()
        .contains(&ElementCommand::RequestFullscreen));
}

#[tokio::test]
async fn exit_from_native_tells_the_host() {
    let fx = PlayerFixture::new();
    fx.open("https://cdn.example/a.mp4");

    fx.controller.toggle_fullscreen();
    fx.controller.toggle_fullscreen();

    assert_eq!(fx.controller.fullscreen_mode(), FullscreenMode::None);
    assert_eq!(fx.env.native_exit_count(), 1);
}

#[tokio::test]
async fn exit_from_emulated_skips_the_host_api() {
    let fx = PlayerFixture::with_env(TestHostEnv::embedded());
    fx.open("https://cdn.example/a.mp4");

    fx.controller.toggle_fullscreen();
    fx.controller.toggle_fullscreen();

    assert_eq!(fx.controller.fullscreen_mode(), FullscreenMode::None);
    assert_eq!(fx.env.native_exit_count(), 0);
}

#[tokio::test]
async fn fullscreen_toggles_emit_both_transitions() {
    let mut fx = PlayerFixture::new();
    fx.open("https://cdn.example/a.mp4");
    fx.drain_events();

    fx.controller.toggle_fullscreen();
    fx.controller.toggle_fullscreen();

    let modes: Vec<FullscreenMode> = fx
        .drain_events()
        .iter()
        .filter_map(|event| match event {
            PlayerEvent::FullscreenChanged { mode } => Some(*mode),
            _ => None,
        })
        .collect();
    assert_eq!(modes, vec![FullscreenMode::Native, FullscreenMode::None]);
}
