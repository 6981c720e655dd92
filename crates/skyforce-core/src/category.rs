//! Node categories used to route commands through the scene graph.
//!
//! Every node carries a category mask, and every command carries one too.
//! A command reaches a node when the two masks intersect.

use serde::{Deserialize, Serialize};

bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Category: u32 {
        /// Scene layers; spawned projectiles and pickups attach here.
        const SCENE             = 1 << 0;
        const PLAYER_AIRCRAFT   = 1 << 1;
        const ALLIED_AIRCRAFT   = 1 << 2;
        const ENEMY_AIRCRAFT    = 1 << 3;
        const PICKUP            = 1 << 4;
        const ALLIED_PROJECTILE = 1 << 5;
        const ENEMY_PROJECTILE  = 1 << 6;
        const SOUND_EFFECT      = 1 << 7;

        const AIRCRAFT   = Self::PLAYER_AIRCRAFT.bits()
            | Self::ALLIED_AIRCRAFT.bits()
            | Self::ENEMY_AIRCRAFT.bits();
        const PROJECTILE = Self::ALLIED_PROJECTILE.bits() | Self::ENEMY_PROJECTILE.bits();
    }
}

impl Category {
    /// Whether a command tagged with `self` should be delivered to a node tagged `node`.
    pub fn matches(self, node: Category) -> bool {
        self.intersects(node)
    }
}
