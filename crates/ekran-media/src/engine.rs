use std::sync::Arc;

use ekran_platform::{MaybeSend, MaybeSync};
#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;
use url::Url;

use crate::{
    element::{EventSink, MediaElement},
    error::MediaResult,
};

/// Adaptive-streaming engine driving one manifest attachment.
///
/// One instance per attachment: created when a manifest source is
/// attached, destroyed when that attachment ends. Instances are never
/// reused across sources or sessions.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait AdaptiveEngine: MaybeSend + 'static {
    /// Parse the manifest at `address` and start feeding `element`.
    ///
    /// Failures after this call returns come through `sink`.
    fn attach(
        &mut self,
        element: &Arc<dyn MediaElement>,
        address: &Url,
        sink: EventSink,
    ) -> MediaResult<()>;

    /// Stop the engine and free its decoder/network resources.
    ///
    /// Called at most once, after which the instance is dropped.
    fn destroy(&mut self) -> MediaResult<()>;
}

/// Capability probe plus factory for [`AdaptiveEngine`] instances.
#[cfg_attr(any(test, feature = "test-utils"), unimock::unimock(api = EngineProviderMock))]
pub trait EngineProvider: MaybeSend + MaybeSync + 'static {
    /// Whether the host can run an adaptive engine at all.
    fn is_supported(&self) -> bool;

    /// Create a fresh engine instance for one attachment.
    fn create(&self) -> MediaResult<Box<dyn AdaptiveEngine>>;
}
