use ekran_media::MediaError;
use url::Url;

use crate::state::FullscreenMode;

/// Observable controller events, broadcast to every subscriber.
///
/// The channel is lossy under lag; the controller's state accessors are
/// the source of truth and events are edge notifications on top.
#[derive(Clone, Debug)]
#[non_exhaustive]
pub enum PlayerEvent {
    /// A session opened and the first source is being attached.
    Opened {
        title: String,
    },
    LoadingChanged {
        loading: bool,
    },
    PlayingChanged {
        playing: bool,
    },
    MuteChanged {
        muted: bool,
    },
    VolumeChanged {
        volume: f32,
    },
    /// The current source failed; the controller moved on to the next
    /// candidate at `to_index`.
    SourceFallback {
        from_index: usize,
        to_index: usize,
        address: Url,
        error: MediaError,
    },
    /// Every candidate failed; terminal for this session.
    Exhausted,
    FullscreenChanged {
        mode: FullscreenMode,
    },
    ControlsChanged {
        visible: bool,
    },
    /// The session was torn down; observable state is back to defaults.
    Closed,
}
