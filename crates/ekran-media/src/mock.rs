//! Stateful test doubles for the media boundary.
//!
//! [`TestMediaElement`], [`TestEngineProvider`], and [`TestHostEnv`]
//! record every command and let tests drive the asynchronous signal path
//! by hand through the captured [`EventSink`]s. Interaction mocks for the
//! same traits are generated next to the traits themselves
//! ([`MediaElementMock`](crate::MediaElementMock),
//! [`EngineProviderMock`](crate::EngineProviderMock),
//! [`HostEnvMock`](crate::HostEnvMock),
//! [`MockAdaptiveEngine`](crate::MockAdaptiveEngine)).

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use ekran_platform::Mutex;
use url::Url;

use crate::{
    element::{EventSink, MediaElement, MediaEvent},
    engine::{AdaptiveEngine, EngineProvider},
    error::{MediaError, MediaResult},
    host::HostEnv,
};

// -- TestMediaElement -------------------------------------------------------------

/// One observable command received by a [`TestMediaElement`].
#[derive(Clone, Debug, PartialEq)]
pub enum ElementCommand {
    SetSource(Url),
    ClearSource,
    Play,
    Pause,
    SetMuted(bool),
    SetVolume(f32),
    RequestFullscreen,
}

#[derive(Default)]
struct ElementState {
    commands: Vec<ElementCommand>,
    source: Option<Url>,
    sink: Option<EventSink>,
    fullscreen_error: Option<MediaError>,
}

/// Recording fake for [`MediaElement`].
///
/// Clones share state, so a test keeps one handle while the controller
/// owns another.
#[derive(Clone, Default)]
pub struct TestMediaElement {
    state: Arc<Mutex<ElementState>>,
}

impl TestMediaElement {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent `request_fullscreen()` calls fail with `error`.
    pub fn reject_fullscreen(&self, error: MediaError) {
        self.state.lock().fullscreen_error = Some(error);
    }

    /// Emit `event` through the sink of the most recent `set_source`.
    ///
    /// Panics when nothing is attached; tests drive signals only after an
    /// attachment exists.
    pub fn emit(&self, event: MediaEvent) {
        let sink = self
            .state
            .lock()
            .sink
            .clone()
            .expect("no attachment to emit from");
        sink.emit(event);
    }

    /// Generation of the most recent attachment, if any.
    #[must_use]
    pub fn sink_generation(&self) -> Option<u64> {
        self.state.lock().sink.as_ref().map(EventSink::generation)
    }

    /// Currently assigned source address.
    #[must_use]
    pub fn source(&self) -> Option<Url> {
        self.state.lock().source.clone()
    }

    /// All commands received so far, in order.
    #[must_use]
    pub fn commands(&self) -> Vec<ElementCommand> {
        self.state.lock().commands.clone()
    }

    /// Number of `SetSource` commands received.
    #[must_use]
    pub fn attach_count(&self) -> usize {
        self.state
            .lock()
            .commands
            .iter()
            .filter(|command| matches!(command, ElementCommand::SetSource(_)))
            .count()
    }

    /// Number of `Play` commands received.
    #[must_use]
    pub fn play_count(&self) -> usize {
        self.state
            .lock()
            .commands
            .iter()
            .filter(|command| matches!(command, ElementCommand::Play))
            .count()
    }
}

impl MediaElement for TestMediaElement {
    fn set_source(&self, address: &Url, sink: EventSink) {
        let mut state = self.state.lock();
        state.commands.push(ElementCommand::SetSource(address.clone()));
        state.source = Some(address.clone());
        state.sink = Some(sink);
    }

    fn clear_source(&self) {
        let mut state = self.state.lock();
        state.commands.push(ElementCommand::ClearSource);
        state.source = None;
        state.sink = None;
    }

    fn play(&self) {
        self.state.lock().commands.push(ElementCommand::Play);
    }

    fn pause(&self) {
        self.state.lock().commands.push(ElementCommand::Pause);
    }

    fn set_muted(&self, muted: bool) {
        self.state.lock().commands.push(ElementCommand::SetMuted(muted));
    }

    fn set_volume(&self, volume: f32) {
        self.state
            .lock()
            .commands
            .push(ElementCommand::SetVolume(volume));
    }

    fn request_fullscreen(&self) -> Result<(), MediaError> {
        let mut state = self.state.lock();
        state.commands.push(ElementCommand::RequestFullscreen);
        match &state.fullscreen_error {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

// -- TestEngineProvider -----------------------------------------------------------

#[derive(Default)]
struct EngineState {
    attached: Option<Url>,
    sink: Option<EventSink>,
    destroyed: bool,
    attach_error: Option<MediaError>,
    destroy_error: Option<MediaError>,
}

/// Inspection handle for one engine created by [`TestEngineProvider`].
///
/// Stays usable after the controller has dropped the engine itself.
#[derive(Clone)]
pub struct TestEngineHandle {
    state: Arc<Mutex<EngineState>>,
}

impl TestEngineHandle {
    /// Address the engine was attached to, if any.
    #[must_use]
    pub fn attached_address(&self) -> Option<Url> {
        self.state.lock().attached.clone()
    }

    /// Whether `destroy()` has run on this engine.
    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.state.lock().destroyed
    }

    /// Generation of this engine's attachment sink, if attached.
    #[must_use]
    pub fn sink_generation(&self) -> Option<u64> {
        self.state.lock().sink.as_ref().map(EventSink::generation)
    }

    /// Emit `event` through this engine's attachment sink.
    ///
    /// Panics when the engine was never attached.
    pub fn emit(&self, event: MediaEvent) {
        let sink = self
            .state
            .lock()
            .sink
            .clone()
            .expect("engine was never attached");
        sink.emit(event);
    }
}

struct TestEngine {
    state: Arc<Mutex<EngineState>>,
}

impl AdaptiveEngine for TestEngine {
    fn attach(
        &mut self,
        _element: &Arc<dyn MediaElement>,
        address: &Url,
        sink: EventSink,
    ) -> MediaResult<()> {
        let mut state = self.state.lock();
        if let Some(error) = state.attach_error.clone() {
            return Err(error);
        }
        state.attached = Some(address.clone());
        state.sink = Some(sink);
        Ok(())
    }

    fn destroy(&mut self) -> MediaResult<()> {
        let mut state = self.state.lock();
        state.destroyed = true;
        match state.destroy_error.clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

/// Configurable fake for [`EngineProvider`] that keeps a handle to every
/// engine it creates.
#[derive(Clone)]
pub struct TestEngineProvider {
    supported: bool,
    create_error: Arc<Mutex<Option<MediaError>>>,
    attach_error: Arc<Mutex<Option<MediaError>>>,
    destroy_error: Arc<Mutex<Option<MediaError>>>,
    engines: Arc<Mutex<Vec<TestEngineHandle>>>,
}

impl TestEngineProvider {
    /// Provider on a host with adaptive-engine support.
    #[must_use]
    pub fn supported() -> Self {
        Self {
            supported: true,
            create_error: Arc::default(),
            attach_error: Arc::default(),
            destroy_error: Arc::default(),
            engines: Arc::default(),
        }
    }

    /// Provider on a host without adaptive-engine support.
    #[must_use]
    pub fn unsupported() -> Self {
        Self {
            supported: false,
            ..Self::supported()
        }
    }

    /// Fail `create()` calls from now on with `error`.
    pub fn fail_create(&self, error: MediaError) {
        *self.create_error.lock() = Some(error);
    }

    /// Make engines created from now on fail their `attach()`.
    pub fn fail_attach(&self, error: MediaError) {
        *self.attach_error.lock() = Some(error);
    }

    /// Make engines created from now on fail their `destroy()`.
    pub fn fail_destroy(&self, error: MediaError) {
        *self.destroy_error.lock() = Some(error);
    }

    /// Handles to every engine created so far, in creation order.
    #[must_use]
    pub fn engines(&self) -> Vec<TestEngineHandle> {
        self.engines.lock().clone()
    }

    /// Number of engines created so far.
    #[must_use]
    pub fn created_count(&self) -> usize {
        self.engines.lock().len()
    }
}

impl EngineProvider for TestEngineProvider {
    fn is_supported(&self) -> bool {
        self.supported
    }

    fn create(&self) -> MediaResult<Box<dyn AdaptiveEngine>> {
        if let Some(error) = self.create_error.lock().clone() {
            return Err(error);
        }
        let state = Arc::new(Mutex::new(EngineState {
            attach_error: self.attach_error.lock().clone(),
            destroy_error: self.destroy_error.lock().clone(),
            ..EngineState::default()
        }));
        self.engines.lock().push(TestEngineHandle {
            state: Arc::clone(&state),
        });
        Ok(Box::new(TestEngine { state }))
    }
}

// -- TestHostEnv ------------------------------------------------------------------

/// Configurable fake for [`HostEnv`].
#[derive(Clone, Default)]
pub struct TestHostEnv {
    embedded: bool,
    touch: bool,
    native_exits: Arc<AtomicUsize>,
}

impl TestHostEnv {
    /// Desktop browser: not embedded, mouse pointer.
    #[must_use]
    pub fn desktop() -> Self {
        Self::default()
    }

    /// Embedded-frame host.
    #[must_use]
    pub fn embedded() -> Self {
        Self {
            embedded: true,
            ..Self::default()
        }
    }

    /// Touch-first host.
    #[must_use]
    pub fn touch() -> Self {
        Self {
            touch: true,
            ..Self::default()
        }
    }

    /// Number of `exit_native_fullscreen()` calls observed.
    #[must_use]
    pub fn native_exit_count(&self) -> usize {
        self.native_exits.load(Ordering::Relaxed)
    }
}

impl HostEnv for TestHostEnv {
    fn is_embedded(&self) -> bool {
        self.embedded
    }

    fn is_touch(&self) -> bool {
        self.touch
    }

    fn exit_native_fullscreen(&self) {
        self.native_exits.fetch_add(1, Ordering::Relaxed);
    }
}
