use crate::source::Source;

/// Lifecycle phase of the current session's attachment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum PlaybackPhase {
    /// No session open.
    #[default]
    Idle,
    /// A source is attached and buffering.
    Loading,
    /// The current source reported it can play.
    Ready,
    /// Every source failed; terminal until the next open.
    Exhausted,
}

/// Which fullscreen strategy is currently active.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum FullscreenMode {
    /// Not in fullscreen.
    #[default]
    None,
    /// Element-native fullscreen granted by the host.
    Native,
    /// Host-emulated fullscreen: embedded frames, touch hosts, and
    /// rejected native requests.
    Emulated,
}

impl FullscreenMode {
    /// `true` in either fullscreen strategy.
    #[must_use]
    pub fn is_active(self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Point-in-time view of the controller's observable state.
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub struct PlayerState {
    pub phase: PlaybackPhase,
    pub loading: bool,
    pub playing: bool,
    pub muted: bool,
    pub volume: f32,
    pub fullscreen: FullscreenMode,
    pub controls_visible: bool,
    /// Title of the open session, if any.
    pub title: Option<String>,
    /// Candidate currently attached (or being attached), if any.
    pub current_source: Option<Source>,
    /// Number of candidates in the open session's list; 0 when closed.
    pub source_count: usize,
}
