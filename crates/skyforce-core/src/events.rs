//! Events emitted by the simulation for audio feedback.

use serde::{Deserialize, Serialize};

use crate::enums::SoundEffect;
use crate::types::Vec2;

/// A sound the external audio player should start this tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SoundEvent {
    pub effect: SoundEffect,
    /// World position of the emitter, for spatial panning.
    pub position: Vec2,
}
