#![forbid(unsafe_code)]

//! # Ekran
//!
//! Facade crate providing a unified API for stream playback control.
//!
//! ## Quick start
//!
//! ```ignore
//! use ekran::prelude::*;
//!
//! // element, engines and host come from the embedding platform.
//! let controller = PlaybackController::new(element, engines, host, PlayerConfig::default());
//!
//! controller.open(
//!     "https://cdn.example/live/master.m3u8",
//!     "Channel One",
//!     vec![Source::parse("https://backup.example/live.mp4", "Source 2")?],
//! )?;
//!
//! let mut events = controller.subscribe();
//! while let Ok(event) = events.recv().await {
//!     println!("{event:?}");
//! }
//! ```

// ── Re-export sub-crates ────────────────────────────────────────────────

pub mod media {
    pub use ekran_media::*;
}

pub mod platform {
    pub use ekran_platform::*;
}

pub mod player {
    pub use ekran_player::*;
}

// ── Top-level surface ───────────────────────────────────────────────────

pub use ekran_player::{
    PlaybackController, PlayerConfig, PlayerError, PlayerEvent, PlayerState,
};

// ── Prelude ─────────────────────────────────────────────────────────────

pub mod prelude {
    pub use ekran_media::{
        AdaptiveEngine, EngineProvider, EventSink, HostEnv, MediaElement, MediaError, MediaEvent,
    };
    pub use ekran_player::{FullscreenMode, PlaybackPhase, Source};

    pub use crate::{PlaybackController, PlayerConfig, PlayerError, PlayerEvent, PlayerState};
}
