use std::sync::Arc;

use ekran_platform::MaybeSend;
use tracing::{debug, warn};
use url::Url;

use crate::{
    element::{EventSink, MediaElement},
    engine::{AdaptiveEngine, EngineProvider},
    error::{MediaError, MediaResult},
    manifest::is_manifest_address,
};

/// Strategy that routes one source address into the output element.
///
/// Exactly two implementations exist: [`DirectBinding`] hands the address
/// straight to the element, [`AdaptiveBinding`] interposes an
/// [`AdaptiveEngine`]. The fallback machine upstream depends only on this
/// interface.
pub trait SourceBinding: MaybeSend + 'static {
    /// Route `address` into `element`.
    ///
    /// A synchronous error here is equivalent to an asynchronous
    /// [`MediaEvent::Error`](crate::MediaEvent::Error) from the
    /// attachment: the caller treats both the same way.
    fn attach(
        &mut self,
        element: &Arc<dyn MediaElement>,
        address: &Url,
        sink: EventSink,
    ) -> MediaResult<()>;

    /// Undo the attachment.
    ///
    /// Infallible by contract: engine teardown failures are logged and
    /// swallowed so release paths never propagate errors. Safe to call
    /// more than once.
    fn release(&mut self, element: &Arc<dyn MediaElement>);
}

// -- DirectBinding ----------------------------------------------------------------

/// Assigns the address directly to the element.
///
/// Used for progressive files and for manifest addresses on hosts whose
/// element plays manifests natively.
#[derive(Debug, Default)]
pub struct DirectBinding;

impl DirectBinding {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl SourceBinding for DirectBinding {
    fn attach(
        &mut self,
        element: &Arc<dyn MediaElement>,
        address: &Url,
        sink: EventSink,
    ) -> MediaResult<()> {
        element.set_source(address, sink);
        Ok(())
    }

    fn release(&mut self, _element: &Arc<dyn MediaElement>) {
        // The assignment stays on the element; the next attach or the
        // session teardown replaces it.
    }
}

// -- AdaptiveBinding --------------------------------------------------------------

/// Routes the address through an adaptive-streaming engine.
pub struct AdaptiveBinding {
    engine: Option<Box<dyn AdaptiveEngine>>,
}

impl AdaptiveBinding {
    #[must_use]
    pub fn new(engine: Box<dyn AdaptiveEngine>) -> Self {
        Self {
            engine: Some(engine),
        }
    }
}

impl SourceBinding for AdaptiveBinding {
    fn attach(
        &mut self,
        element: &Arc<dyn MediaElement>,
        address: &Url,
        sink: EventSink,
    ) -> MediaResult<()> {
        match self.engine.as_mut() {
            Some(engine) => engine.attach(element, address, sink),
            // Attach after release; the engine is gone.
            None => Err(MediaError::EngineUnavailable),
        }
    }

    fn release(&mut self, _element: &Arc<dyn MediaElement>) {
        if let Some(mut engine) = self.engine.take() {
            if let Err(error) = engine.destroy() {
                warn!(error = %error, "adaptive engine destroy failed");
            }
        }
    }
}

// -- Resolution -------------------------------------------------------------------

/// Choose the binding for `address`.
///
/// Manifest address plus engine support means [`AdaptiveBinding`], with
/// the engine created here, at attach time; a creation failure is a
/// source-level failure for the caller's fallback machinery. Everything
/// else, including manifest addresses on hosts without engine support,
/// goes through [`DirectBinding`] and relies on the element's own
/// capabilities.
pub fn resolve_binding(
    address: &Url,
    provider: &dyn EngineProvider,
) -> MediaResult<Box<dyn SourceBinding>> {
    if is_manifest_address(address) && provider.is_supported() {
        let engine = provider.create()?;
        debug!(address = %address, "resolved adaptive binding");
        Ok(Box::new(AdaptiveBinding::new(engine)))
    } else {
        debug!(address = %address, "resolved direct binding");
        Ok(Box::new(DirectBinding::new()))
    }
}
