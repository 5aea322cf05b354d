//! Stream playback controller: source fallback, engine attachment, and
//! presentation state for one output element.
//!
//! [`PlaybackController`] drives the host's single media element. `open()`
//! builds the candidate source list and attaches the first source;
//! element and engine failures advance down the list until a source plays
//! or the list is exhausted. Controls visibility, fullscreen strategy,
//! and the inactivity delay live here too.

use std::sync::{
    Arc,
    atomic::{AtomicBool, AtomicU64, Ordering},
};

use ekran_media::{
    EngineProvider, EventSink, HostEnv, MediaElement, MediaError, MediaEvent, MediaEventRx,
    resolve_binding,
};
use ekran_platform::Mutex;
use portable_atomic::AtomicF32;
use tokio::sync::{broadcast, mpsc};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};
use url::Url;
use web_time::Instant;

use crate::{
    config::PlayerConfig,
    error::{PlayerError, PlayerResult},
    events::PlayerEvent,
    session::Session,
    source::{Source, SourceList},
    state::{FullscreenMode, PlaybackPhase, PlayerState},
};

// -- PlaybackController -----------------------------------------------------------

/// Stream playback controller for a single output element.
///
/// Cheap to clone; clones share one session. Every transition serializes
/// on an internal session lock, so the state machine is logically
/// single-threaded no matter which task calls in: user actions, the
/// media event pump, and the controls delay all take the same lock.
#[derive(Clone)]
pub struct PlaybackController {
    inner: Arc<Inner>,
}

struct Inner {
    config: PlayerConfig,
    element: Arc<dyn MediaElement>,
    provider: Arc<dyn EngineProvider>,
    env: Arc<dyn HostEnv>,

    session: Mutex<Option<Session>>,
    /// Monotonic across sessions; a generation is never reused, so a
    /// stale sink can never collide with a fresh attachment.
    attach_generation: AtomicU64,

    // Observable mirrors, lock-free for the host's render path.
    controls_visible: AtomicBool,
    exhausted: AtomicBool,
    loading: AtomicBool,
    playing: AtomicBool,

    // Sticky output state; survives close().
    muted: AtomicBool,
    volume: AtomicF32,

    events_tx: broadcast::Sender<PlayerEvent>,
}

impl PlaybackController {
    /// Create a controller for `element` with the given collaborators.
    ///
    /// The element is the host's single output surface; `provider`
    /// answers whether (and how) adaptive manifests can be played;
    /// `env` describes the embedding context for fullscreen decisions.
    #[must_use]
    pub fn new(
        element: Arc<dyn MediaElement>,
        provider: Arc<dyn EngineProvider>,
        env: Arc<dyn HostEnv>,
        config: PlayerConfig,
    ) -> Self {
        let (events_tx, _) = broadcast::channel(config.events_channel_capacity);
        let volume = config.initial_volume.clamp(0.0, 1.0);
        Self {
            inner: Arc::new(Inner {
                element,
                provider,
                env,
                session: Mutex::new(None),
                attach_generation: AtomicU64::new(0),
                controls_visible: AtomicBool::new(true),
                exhausted: AtomicBool::new(false),
                loading: AtomicBool::new(false),
                playing: AtomicBool::new(false),
                muted: AtomicBool::new(false),
                volume: AtomicF32::new(volume),
                events_tx,
                config,
            }),
        }
    }

    // -- Session lifecycle --------------------------------------------------------

    /// Open a playback session.
    ///
    /// Tears down any session already open (the element has exactly one
    /// owner at a time), builds the candidate list with the primary
    /// address at index 0, and starts attaching. Returns without waiting
    /// for media signals; progress is observable through
    /// [`subscribe`](Self::subscribe) and the state accessors.
    pub fn open(
        &self,
        primary_address: &str,
        title: &str,
        alternates: Vec<Source>,
    ) -> PlayerResult<()> {
        let primary = Url::parse(primary_address).map_err(|source| PlayerError::InvalidAddress {
            address: primary_address.to_owned(),
            source,
        })?;

        let mut guard = self.inner.session.lock();
        if let Some(previous) = guard.take() {
            debug!("open over an active session, closing it first");
            self.inner.teardown(previous);
        }

        let sources = SourceList::new(primary, alternates);
        let cancel = CancellationToken::new();
        let (media_tx, media_rx) = mpsc::unbounded_channel();
        let mut session = Session::new(title.to_owned(), sources, cancel.clone(), media_tx);

        debug!(title, source_count = session.sources.len(), "session opened");
        self.inner.exhausted.store(false, Ordering::Relaxed);
        self.inner.controls_visible.store(true, Ordering::Relaxed);
        let _ = self.inner.events_tx.send(PlayerEvent::Opened {
            title: title.to_owned(),
        });

        // Mute and volume are controller state; a reopened session
        // inherits them, so re-apply before the first attach.
        self.inner
            .element
            .set_muted(self.inner.muted.load(Ordering::Relaxed));
        self.inner
            .element
            .set_volume(self.inner.volume.load(Ordering::Relaxed));

        self.inner.attach_current(&mut session);
        *guard = Some(session);
        drop(guard);

        self.inner.spawn_event_pump(media_rx, cancel);
        Ok(())
    }

    /// Tear down the current session.
    ///
    /// Safe in any state and idempotent: a second call observes the same
    /// end state and emits nothing. Mute and volume survive.
    pub fn close(&self) {
        let mut guard = self.inner.session.lock();
        match guard.take() {
            Some(session) => self.inner.teardown(session),
            None => trace!("close without an open session"),
        }
    }

    /// `true` while a session is open.
    pub fn is_open(&self) -> bool {
        self.inner.session.lock().is_some()
    }

    // -- Playback controls --------------------------------------------------------

    /// Toggle between playing and paused.
    ///
    /// Allowed while still loading: the element starts once it can.
    /// No-op without an open session.
    pub fn toggle_play(&self) {
        let guard = self.inner.session.lock();
        if guard.is_none() {
            trace!("toggle_play without an open session");
            return;
        }
        if self.inner.playing.load(Ordering::Relaxed) {
            self.inner.element.pause();
            self.inner.set_playing(false);
            debug!("paused");
        } else {
            self.inner.element.play();
            self.inner.set_playing(true);
            debug!("playing");
        }
    }

    /// Flip the muted flag and apply it to the element.
    ///
    /// Independent of playback state and of session lifetime: the flag
    /// is controller output state and is kept across close/reopen.
    pub fn toggle_mute(&self) {
        let muted = !self.inner.muted.load(Ordering::Relaxed);
        self.inner.muted.store(muted, Ordering::Relaxed);
        self.inner.element.set_muted(muted);
        let _ = self.inner.events_tx.send(PlayerEvent::MuteChanged { muted });
        debug!(muted, "mute toggled");
    }

    /// Set output volume, clamped to `0.0..=1.0`. Sticky like mute.
    pub fn set_volume(&self, volume: f32) {
        let clamped = volume.clamp(0.0, 1.0);
        self.inner.volume.store(clamped, Ordering::Relaxed);
        self.inner.element.set_volume(clamped);
        let _ = self
            .inner
            .events_tx
            .send(PlayerEvent::VolumeChanged { volume: clamped });
    }

    // -- Presentation controls ----------------------------------------------------

    /// Toggle fullscreen.
    ///
    /// Embedded and touch hosts always use host-emulated fullscreen;
    /// everyone else tries the element-native API first and falls back
    /// to emulated when the host rejects it (never surfaced as an
    /// error). Entering arms the controls-hide delay as if activity had
    /// occurred; exiting brings the controls back. No-op without an open
    /// session.
    pub fn toggle_fullscreen(&self) {
        let mut guard = self.inner.session.lock();
        let Some(session) = guard.as_mut() else {
            trace!("toggle_fullscreen without an open session");
            return;
        };

        if session.presentation.fullscreen.is_active() {
            if session.presentation.fullscreen == FullscreenMode::Native {
                self.inner.env.exit_native_fullscreen();
            }
            session.presentation.fullscreen = FullscreenMode::None;
            session.timer.disarm();
            debug!("fullscreen exited");
            let _ = self.inner.events_tx.send(PlayerEvent::FullscreenChanged {
                mode: FullscreenMode::None,
            });
            self.inner.show_controls(session);
        } else {
            let mode = if self.inner.env.is_embedded() || self.inner.env.is_touch() {
                FullscreenMode::Emulated
            } else {
                match self.inner.element.request_fullscreen() {
                    Ok(()) => FullscreenMode::Native,
                    Err(error) => {
                        debug!(error = %error, "native fullscreen rejected, emulating");
                        FullscreenMode::Emulated
                    }
                }
            };
            session.presentation.fullscreen = mode;
            debug!(?mode, "fullscreen entered");
            let _ = self
                .inner
                .events_tx
                .send(PlayerEvent::FullscreenChanged { mode });
            self.inner.register_activity(session);
        }
    }

    /// Signal user activity (pointer move, key press, tap).
    ///
    /// Shows the controls and re-arms the single hide delay. The delay
    /// is armed in any mode; its expiry only hides controls while in
    /// fullscreen. No-op without an open session.
    pub fn activity(&self) {
        let mut guard = self.inner.session.lock();
        let Some(session) = guard.as_mut() else {
            return;
        };
        self.inner.register_activity(session);
    }

    /// Signal that the pointer left the playback surface.
    ///
    /// In fullscreen this hides the controls immediately, without
    /// waiting for the delay; otherwise it is a no-op.
    pub fn pointer_left(&self) {
        let mut guard = self.inner.session.lock();
        let Some(session) = guard.as_mut() else {
            return;
        };
        if session.presentation.fullscreen.is_active() {
            session.timer.disarm();
            self.inner.hide_controls(session);
        }
    }

    // -- Observable state ---------------------------------------------------------

    /// `true` while a source is attached and buffering.
    pub fn is_loading(&self) -> bool {
        self.inner.loading.load(Ordering::Relaxed)
    }

    pub fn is_playing(&self) -> bool {
        self.inner.playing.load(Ordering::Relaxed)
    }

    pub fn is_muted(&self) -> bool {
        self.inner.muted.load(Ordering::Relaxed)
    }

    /// `true` once every candidate of the open session has failed.
    pub fn is_exhausted(&self) -> bool {
        self.inner.exhausted.load(Ordering::Relaxed)
    }

    pub fn controls_visible(&self) -> bool {
        self.inner.controls_visible.load(Ordering::Relaxed)
    }

    /// Output volume in `0.0..=1.0`.
    pub fn volume(&self) -> f32 {
        self.inner.volume.load(Ordering::Relaxed)
    }

    /// Current phase; `Idle` when no session is open.
    pub fn phase(&self) -> PlaybackPhase {
        self.inner
            .session
            .lock()
            .as_ref()
            .map_or(PlaybackPhase::Idle, |session| session.phase)
    }

    pub fn fullscreen_mode(&self) -> FullscreenMode {
        self.inner
            .session
            .lock()
            .as_ref()
            .map_or(FullscreenMode::None, |session| {
                session.presentation.fullscreen
            })
    }

    /// `true` in either fullscreen strategy.
    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen_mode().is_active()
    }

    /// Candidate currently attached (or being attached), if any.
    pub fn current_source(&self) -> Option<Source> {
        self.inner
            .session
            .lock()
            .as_ref()
            .map(|session| session.sources.current().clone())
    }

    /// Number of candidates in the open session's list; 0 when closed.
    pub fn source_count(&self) -> usize {
        self.inner
            .session
            .lock()
            .as_ref()
            .map_or(0, |session| session.sources.len())
    }

    pub fn title(&self) -> Option<String> {
        self.inner
            .session
            .lock()
            .as_ref()
            .map(|session| session.title.clone())
    }

    /// Point-in-time snapshot of all observable state.
    pub fn snapshot(&self) -> PlayerState {
        let guard = self.inner.session.lock();
        let session = guard.as_ref();
        PlayerState {
            phase: session.map_or(PlaybackPhase::Idle, |s| s.phase),
            loading: self.inner.loading.load(Ordering::Relaxed),
            playing: self.inner.playing.load(Ordering::Relaxed),
            muted: self.inner.muted.load(Ordering::Relaxed),
            volume: self.inner.volume.load(Ordering::Relaxed),
            fullscreen: session.map_or(FullscreenMode::None, |s| s.presentation.fullscreen),
            controls_visible: self.inner.controls_visible.load(Ordering::Relaxed),
            title: session.map(|s| s.title.clone()),
            current_source: session.map(|s| s.sources.current().clone()),
            source_count: session.map_or(0, |s| s.sources.len()),
        }
    }

    /// Subscribe to controller events.
    ///
    /// The channel is lossy under lag; the accessors above are the
    /// source of truth.
    pub fn subscribe(&self) -> broadcast::Receiver<PlayerEvent> {
        self.inner.events_tx.subscribe()
    }

    /// Controller configuration.
    pub fn config(&self) -> &PlayerConfig {
        &self.inner.config
    }
}

// -- Inner ------------------------------------------------------------------------

impl Inner {
    /// Attach the source at the current index, advancing past
    /// synchronous failures until an attachment sticks or the list is
    /// exhausted. Runs under the session lock.
    fn attach_current(&self, session: &mut Session) {
        loop {
            let address = session.sources.current().address().clone();
            let generation = self.next_generation();
            session.generation = generation;
            let sink = EventSink::new(generation, session.media_tx.clone());

            debug!(
                index = session.sources.index(),
                address = %address,
                generation,
                "attaching source"
            );
            session.phase = PlaybackPhase::Loading;
            self.set_loading(true);

            let attached =
                resolve_binding(&address, self.provider.as_ref()).and_then(|mut binding| {
                    match binding.attach(&self.element, &address, sink) {
                        Ok(()) => Ok(binding),
                        Err(error) => {
                            // A failed attach may still hold an engine.
                            binding.release(&self.element);
                            Err(error)
                        }
                    }
                });

            match attached {
                Ok(binding) => {
                    session.binding = Some(binding);
                    return;
                }
                Err(error) => {
                    warn!(
                        index = session.sources.index(),
                        address = %address,
                        error = %error,
                        "attach failed"
                    );
                    if !self.step_to_next(session, &error) {
                        return;
                    }
                }
            }
        }
    }

    /// Apply one element/engine signal. Events from closed sessions and
    /// from superseded attachments are dropped here.
    fn on_media_event(&self, generation: u64, event: MediaEvent) {
        let mut guard = self.session.lock();
        let Some(session) = guard.as_mut() else {
            trace!(generation, "media event after close, dropped");
            return;
        };
        if session.generation != generation {
            trace!(
                generation,
                current = session.generation,
                "stale media event dropped"
            );
            return;
        }

        match event {
            MediaEvent::LoadStart => {
                trace!(index = session.sources.index(), "load started");
                self.set_loading(true);
            }
            MediaEvent::CanPlay => {
                debug!(
                    index = session.sources.index(),
                    "source ready, starting playback"
                );
                session.phase = PlaybackPhase::Ready;
                self.set_loading(false);
                self.element.play();
                self.set_playing(true);
            }
            MediaEvent::Error(error) => {
                warn!(
                    index = session.sources.index(),
                    address = %session.sources.current().address(),
                    error = %error,
                    "source failed"
                );
                if self.step_to_next(session, &error) {
                    self.attach_current(session);
                }
            }
            // `MediaEvent` is `#[non_exhaustive]`; variants added later
            // are dropped like any other unrecognized signal.
            _ => trace!("unrecognized media event dropped"),
        }
    }

    /// Release the current binding and move the index forward, or flip
    /// the session into the terminal exhausted state when no candidate
    /// remains. Returns `false` in the terminal case.
    fn step_to_next(&self, session: &mut Session, error: &MediaError) -> bool {
        if let Some(mut binding) = session.binding.take() {
            binding.release(&self.element);
        }
        let from_index = session.sources.index();
        if session.sources.advance() {
            let to_index = session.sources.index();
            let address = session.sources.current().address().clone();
            debug!(from_index, to_index, "falling back to next source");
            let _ = self.events_tx.send(PlayerEvent::SourceFallback {
                from_index,
                to_index,
                address,
                error: error.clone(),
            });
            true
        } else {
            // Invalidate the generation so queued events from the
            // released attachment cannot re-enter and advance twice.
            session.generation = self.next_generation();
            session.phase = PlaybackPhase::Exhausted;
            self.set_loading(false);
            self.set_playing(false);
            self.exhausted.store(true, Ordering::Relaxed);
            debug!(tried = session.sources.len(), "all sources failed");
            let _ = self.events_tx.send(PlayerEvent::Exhausted);
            false
        }
    }

    /// Release everything a session owns. Never fails, never panics.
    ///
    /// Emits only `Closed`; subscribers treat it as the reset of all
    /// observable state. Mirrors are reset silently first.
    fn teardown(&self, mut session: Session) {
        debug!(title = %session.title, "session closing");

        // Stop callback sources first so nothing re-enters while the
        // resources go away.
        session.cancel.cancel();
        session.timer.disarm();

        self.element.pause();
        if let Some(mut binding) = session.binding.take() {
            binding.release(&self.element);
        }
        self.element.clear_source();

        if session.presentation.fullscreen == FullscreenMode::Native {
            self.env.exit_native_fullscreen();
        }

        self.loading.store(false, Ordering::Relaxed);
        self.playing.store(false, Ordering::Relaxed);
        self.exhausted.store(false, Ordering::Relaxed);
        self.controls_visible.store(true, Ordering::Relaxed);

        let _ = self.events_tx.send(PlayerEvent::Closed);
    }

    /// Drain media events into the state machine until the session is
    /// cancelled or the controller is dropped.
    fn spawn_event_pump(self: &Arc<Self>, mut media_rx: MediaEventRx, cancel: CancellationToken) {
        let weak = Arc::downgrade(self);
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    () = cancel.cancelled() => break,
                    received = media_rx.recv() => {
                        let Some((generation, event)) = received else {
                            break;
                        };
                        let Some(inner) = weak.upgrade() else {
                            break;
                        };
                        inner.on_media_event(generation, event);
                    }
                }
            }
            trace!("media event pump stopped");
        });
    }

    /// Show controls and (re)arm the single hide delay.
    ///
    /// The expiry callback checks the epoch under the lock, so a delay
    /// that lost a race against re-arm or teardown can never hide
    /// anything.
    fn register_activity(self: &Arc<Self>, session: &mut Session) {
        session.presentation.last_activity = Instant::now();
        self.show_controls(session);

        let (epoch, token) = session.timer.arm(&session.cancel);
        let delay = self.config.controls_hide_delay;
        let weak = Arc::downgrade(self);
        tokio::spawn(async move {
            tokio::select! {
                () = token.cancelled() => {}
                () = ekran_platform::time::sleep(delay) => {
                    if let Some(inner) = weak.upgrade() {
                        inner.on_controls_delay_elapsed(epoch);
                    }
                }
            }
        });
    }

    /// Delay expiry: hide controls, but only in fullscreen and only if
    /// the delay that fired is still the armed one.
    fn on_controls_delay_elapsed(&self, epoch: u64) {
        let mut guard = self.session.lock();
        let Some(session) = guard.as_mut() else {
            return;
        };
        if !session.timer.is_current(epoch) {
            trace!(epoch, "stale controls delay ignored");
            return;
        }
        session.timer.disarm();
        if session.presentation.fullscreen.is_active() {
            let idle_for = session.presentation.last_activity.elapsed();
            trace!(?idle_for, "controls hidden after inactivity");
            self.hide_controls(session);
        }
    }

    fn show_controls(&self, session: &mut Session) {
        if !session.presentation.controls_visible {
            session.presentation.controls_visible = true;
            self.controls_visible.store(true, Ordering::Relaxed);
            let _ = self
                .events_tx
                .send(PlayerEvent::ControlsChanged { visible: true });
        }
    }

    fn hide_controls(&self, session: &mut Session) {
        if session.presentation.controls_visible {
            session.presentation.controls_visible = false;
            self.controls_visible.store(false, Ordering::Relaxed);
            let _ = self
                .events_tx
                .send(PlayerEvent::ControlsChanged { visible: false });
        }
    }

    fn set_loading(&self, loading: bool) {
        if self.loading.swap(loading, Ordering::Relaxed) != loading {
            let _ = self.events_tx.send(PlayerEvent::LoadingChanged { loading });
        }
    }

    fn set_playing(&self, playing: bool) {
        if self.playing.swap(playing, Ordering::Relaxed) != playing {
            let _ = self.events_tx.send(PlayerEvent::PlayingChanged { playing });
        }
    }

    fn next_generation(&self) -> u64 {
        self.attach_generation.fetch_add(1, Ordering::Relaxed) + 1
    }
}
