use ekran_platform::{MaybeSend, MaybeSync};
use tokio::sync::mpsc;
use url::Url;

use crate::error::MediaError;

// -- Events -----------------------------------------------------------------------

/// Signal one attachment reports back to the controller.
#[derive(Clone, Debug)]
#[non_exhaustive]
pub enum MediaEvent {
    /// The element started fetching the assigned source.
    LoadStart,
    /// Enough media is buffered for playback to begin.
    CanPlay,
    /// The attachment failed; the controller decides what happens next.
    Error(MediaError),
}

/// Channel payload: attach generation plus the event itself.
pub type TaggedMediaEvent = (u64, MediaEvent);

/// Sender half behind [`EventSink`].
pub type MediaEventTx = mpsc::UnboundedSender<TaggedMediaEvent>;

/// Receiver half drained by the controller's event pump.
pub type MediaEventRx = mpsc::UnboundedReceiver<TaggedMediaEvent>;

// -- EventSink --------------------------------------------------------------------

/// Handle through which one attachment reports [`MediaEvent`]s.
///
/// Each sink carries the attach generation it was created for. Elements
/// and engines may keep emitting after they have been replaced; the
/// receiving side drops anything whose generation is no longer current.
#[derive(Clone, Debug)]
pub struct EventSink {
    generation: u64,
    tx: MediaEventTx,
}

impl EventSink {
    #[must_use]
    pub fn new(generation: u64, tx: MediaEventTx) -> Self {
        Self { generation, tx }
    }

    /// Report an event. Best-effort: once the receiving session is gone
    /// the event has nowhere to go and is silently discarded.
    pub fn emit(&self, event: MediaEvent) {
        let _ = self.tx.send((self.generation, event));
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

// -- MediaElement -----------------------------------------------------------------

/// The host's single output element (a `<video>` surface or equivalent).
///
/// Commands are fire-and-forget; results come back asynchronously through
/// the [`EventSink`] handed over in [`set_source`](MediaElement::set_source).
/// The element is owned by the host and outlives playback sessions.
#[cfg_attr(any(test, feature = "test-utils"), unimock::unimock(api = MediaElementMock))]
pub trait MediaElement: MaybeSend + MaybeSync + 'static {
    /// Assign `address` as the element's current source.
    ///
    /// Replaces any previous assignment. Signals for this assignment are
    /// reported through `sink`.
    fn set_source(&self, address: &Url, sink: EventSink);

    /// Drop the current assignment and stop fetch/decode activity.
    fn clear_source(&self);

    fn play(&self);

    fn pause(&self);

    fn set_muted(&self, muted: bool);

    /// Output volume in `0.0..=1.0`. Callers clamp before handing over.
    fn set_volume(&self, volume: f32);

    /// Ask the host for element-native fullscreen.
    fn request_fullscreen(&self) -> Result<(), MediaError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sink_tags_events_with_its_generation() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let sink = EventSink::new(7, tx);

        sink.emit(MediaEvent::LoadStart);
        sink.emit(MediaEvent::CanPlay);

        let (generation, event) = rx.try_recv().unwrap();
        assert_eq!(generation, 7);
        assert!(matches!(event, MediaEvent::LoadStart));
        let (generation, event) = rx.try_recv().unwrap();
        assert_eq!(generation, 7);
        assert!(matches!(event, MediaEvent::CanPlay));
    }

    #[test]
    fn sink_emit_survives_dropped_receiver() {
        let (tx, rx) = mpsc::unbounded_channel();
        let sink = EventSink::new(1, tx);
        drop(rx);

        // Nothing to assert beyond "does not panic".
        sink.emit(MediaEvent::Error(MediaError::network("gone")));
    }
}
