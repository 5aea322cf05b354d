use ekran_media::{MediaEventTx, SourceBinding};
use tokio_util::sync::CancellationToken;
use web_time::Instant;

use crate::{
    source::SourceList,
    state::{FullscreenMode, PlaybackPhase},
    timer::ControlsTimer,
};

/// Presentation state; created with the session, dies with the session.
pub(crate) struct PresentationState {
    pub(crate) fullscreen: FullscreenMode,
    pub(crate) controls_visible: bool,
    pub(crate) last_activity: Instant,
}

impl PresentationState {
    fn new() -> Self {
        Self {
            fullscreen: FullscreenMode::None,
            controls_visible: true,
            last_activity: Instant::now(),
        }
    }
}

/// Everything owned by one `open()`..`close()` span.
pub(crate) struct Session {
    pub(crate) title: String,
    pub(crate) sources: SourceList,
    /// Binding of the currently attached source. `None` between a release
    /// and the next attach, and after exhaustion.
    pub(crate) binding: Option<Box<dyn SourceBinding>>,
    pub(crate) phase: PlaybackPhase,
    /// Generation of the current attachment; sink events carrying any
    /// other generation are stale and dropped.
    pub(crate) generation: u64,
    pub(crate) presentation: PresentationState,
    pub(crate) timer: ControlsTimer,
    /// Cancelled on teardown; stops the event pump and any armed delay.
    pub(crate) cancel: CancellationToken,
    pub(crate) media_tx: MediaEventTx,
}

impl Session {
    pub(crate) fn new(
        title: String,
        sources: SourceList,
        cancel: CancellationToken,
        media_tx: MediaEventTx,
    ) -> Self {
        Self {
            title,
            sources,
            binding: None,
            phase: PlaybackPhase::Idle,
            generation: 0,
            presentation: PresentationState::new(),
            timer: ControlsTimer::new(),
            cancel,
            media_tx,
        }
    }
}
