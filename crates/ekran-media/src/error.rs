use thiserror::Error;

/// Centralized error type for the media boundary.
///
/// `Clone` so attachment events can carry the failure to the controller
/// and onward to event subscribers.
#[derive(Debug, Error, Clone)]
#[non_exhaustive]
pub enum MediaError {
    /// Transfer-level failure reported by the element or engine.
    #[error("network failure: {0}")]
    Network(String),
    /// The element received media it could not decode.
    #[error("decode failure: {0}")]
    Decode(String),
    /// The element does not support this media type at all.
    #[error("unsupported media: {0}")]
    Unsupported(String),
    /// Adaptive playback was requested but no engine could be created.
    #[error("no adaptive engine available")]
    EngineUnavailable,
    /// The adaptive engine failed.
    #[error("engine failure: {0}")]
    Engine(String),
    /// The host rejected a native fullscreen request.
    #[error("fullscreen request rejected: {0}")]
    Fullscreen(String),
}

impl MediaError {
    /// Creates a network error from a message.
    pub fn network<S: Into<String>>(msg: S) -> Self {
        Self::Network(msg.into())
    }

    /// Creates a decode error from a message.
    pub fn decode<S: Into<String>>(msg: S) -> Self {
        Self::Decode(msg.into())
    }

    /// Creates an unsupported-media error from a message.
    pub fn unsupported<S: Into<String>>(msg: S) -> Self {
        Self::Unsupported(msg.into())
    }

    /// Creates an engine error from a message.
    pub fn engine<S: Into<String>>(msg: S) -> Self {
        Self::Engine(msg.into())
    }

    /// Creates a fullscreen rejection from a message.
    pub fn fullscreen<S: Into<String>>(msg: S) -> Self {
        Self::Fullscreen(msg.into())
    }
}

pub type MediaResult<T> = Result<T, MediaError>;
