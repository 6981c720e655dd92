//! Sound emitter node.
//!
//! Lives in the tree under the sound-effect category so that gameplay code
//! can request sounds with an ordinary command. Playback is external: the
//! node only records what was requested.

use skyforce_core::enums::SoundEffect;
use skyforce_core::events::SoundEvent;
use skyforce_core::types::Vec2;

use crate::scene::{NodeKind, SceneComponent};

#[derive(Debug, Clone, Default)]
pub struct SoundNode {
    pub(crate) pending: Vec<SoundEvent>,
}

impl SoundNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn play_sound(&mut self, effect: SoundEffect, position: Vec2) {
        self.pending.push(SoundEvent { effect, position });
    }
}

impl SceneComponent for SoundNode {
    const KIND: NodeKind = NodeKind::Sound;
}
