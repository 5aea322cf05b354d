#![forbid(unsafe_code)]
#![allow(clippy::missing_errors_doc)]

//! Media boundary abstractions: the host's output element, the optional
//! adaptive-streaming engine, and the binding strategies that route a
//! source address into the element.
//!
//! The playback controller in `ekran-player` depends only on the traits
//! here; hosts wire in real element/engine handles, tests wire in the
//! doubles from [`mock`].

mod binding;
mod element;
mod engine;
mod error;
mod host;
mod manifest;

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;

pub use binding::{AdaptiveBinding, DirectBinding, SourceBinding, resolve_binding};
pub use element::{
    EventSink, MediaElement, MediaEvent, MediaEventRx, MediaEventTx, TaggedMediaEvent,
};
pub use engine::{AdaptiveEngine, EngineProvider};
pub use error::{MediaError, MediaResult};
pub use host::HostEnv;
pub use manifest::{MANIFEST_SUFFIXES, is_manifest_address};

// Generated interaction mocks live next to their traits.
#[cfg(any(test, feature = "test-utils"))]
pub use element::MediaElementMock;
#[cfg(any(test, feature = "test-utils"))]
pub use engine::{EngineProviderMock, MockAdaptiveEngine};
#[cfg(any(test, feature = "test-utils"))]
pub use host::HostEnvMock;
