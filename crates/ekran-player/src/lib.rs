#![forbid(unsafe_code)]
#![allow(clippy::missing_errors_doc)]

mod config;
mod controller;
mod error;
mod events;
mod session;
mod source;
mod state;
mod timer;

pub use config::PlayerConfig;
pub use controller::PlaybackController;
pub use error::{PlayerError, PlayerResult};
pub use events::PlayerEvent;
pub use source::{PRIMARY_SOURCE_LABEL, Source, SourceList};
pub use state::{FullscreenMode, PlaybackPhase, PlayerState};
