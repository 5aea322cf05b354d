use thiserror::Error;

/// Errors surfaced at the controller's host boundary.
///
/// Playback failures never appear here; they feed the fallback machine
/// and at worst end in an `Exhausted` signal.
#[derive(Debug, Error, Clone)]
#[non_exhaustive]
pub enum PlayerError {
    /// The primary address handed to `open()` did not parse.
    #[error("invalid media address {address:?}: {source}")]
    InvalidAddress {
        address: String,
        #[source]
        source: url::ParseError,
    },
}

pub type PlayerResult<T> = Result<T, PlayerError>;
