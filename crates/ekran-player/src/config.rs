use std::time::Duration;

use derivative::Derivative;
use derive_setters::Setters;

/// Configuration for the playback controller.
#[derive(Clone, Debug, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
pub struct PlayerConfig {
    /// Inactivity delay before on-screen controls hide while in
    /// fullscreen. Default: 2 s.
    #[derivative(Default(value = "Duration::from_secs(2)"))]
    pub controls_hide_delay: Duration,
    /// Capacity of the player event broadcast channel. Default: 64.
    #[derivative(Default(value = "64"))]
    pub events_channel_capacity: usize,
    /// Initial output volume, clamped to `0.0..=1.0`. Default: 1.0.
    #[derivative(Default(value = "1.0"))]
    pub initial_volume: f32,
}
