//! Collectable upgrades dropped by destroyed enemies.

use std::sync::Arc;

use skyforce_core::enums::PickupType;
use skyforce_core::tables::PickupEffect;
use skyforce_core::DataTables;

use crate::entity::{Entity, Simulated};
use crate::nodes::aircraft::Aircraft;
use crate::nodes::sprite::Sprite;
use crate::scene::{NodeKind, SceneComponent};

#[derive(Debug, Clone)]
pub struct Pickup {
    kind: PickupType,
    entity: Entity,
    sprite: Sprite,
    tables: Arc<DataTables>,
}

impl Pickup {
    pub fn new(kind: PickupType, tables: Arc<DataTables>) -> Self {
        let data = tables.pickup(kind);
        let sprite = Sprite::new(data.texture, data.texture_rect);
        Self {
            kind,
            entity: Entity::new(1),
            sprite,
            tables,
        }
    }

    pub fn kind(&self) -> PickupType {
        self.kind
    }

    pub fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    /// Apply this pickup's effect to the collecting aircraft.
    pub fn apply(&self, aircraft: &mut Aircraft) {
        match self.tables.pickup(self.kind).effect {
            PickupEffect::Repair { points } => aircraft.entity_mut().repair(points),
            PickupEffect::Missiles { count } => aircraft.collect_missiles(count),
            PickupEffect::FireSpread => aircraft.increase_spread(),
            PickupEffect::FireRate => aircraft.increase_fire_rate(),
        }
    }
}

impl Simulated for Pickup {
    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }
}

impl SceneComponent for Pickup {
    const KIND: NodeKind = NodeKind::Pickup;
}
