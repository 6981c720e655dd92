//! Bullets and guided missiles.

use std::sync::Arc;

use glam::Vec2;

use skyforce_core::constants::MISSILE_APPROACH_RATE;
use skyforce_core::enums::ProjectileType;
use skyforce_core::{Category, DataTables};

use crate::entity::{Entity, Simulated};
use crate::nodes::sprite::Sprite;
use crate::scene::{NodeId, NodeKind, SceneComponent, SceneGraph, Transform};

#[derive(Debug, Clone)]
pub struct Projectile {
    kind: ProjectileType,
    entity: Entity,
    sprite: Sprite,
    /// Unit vector toward the current guidance target, zero when unguided.
    target_direction: Vec2,
    tables: Arc<DataTables>,
}

impl Projectile {
    pub fn new(kind: ProjectileType, tables: Arc<DataTables>) -> Self {
        let data = tables.projectile(kind);
        let sprite = Sprite::new(data.texture, data.texture_rect);
        Self {
            kind,
            entity: Entity::new(1),
            sprite,
            target_direction: Vec2::ZERO,
            tables,
        }
    }

    pub fn kind(&self) -> ProjectileType {
        self.kind
    }

    pub fn category(&self) -> Category {
        if self.kind.is_allied() {
            Category::ALLIED_PROJECTILE
        } else {
            Category::ENEMY_PROJECTILE
        }
    }

    pub fn is_guided(&self) -> bool {
        self.kind.is_guided()
    }

    pub fn max_speed(&self) -> f32 {
        self.tables.projectile(self.kind).speed
    }

    pub fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    pub fn target_direction(&self) -> Vec2 {
        self.target_direction
    }

    /// Steer toward `target` from `own_position` (both world space). Guided only.
    pub fn guide_towards(&mut self, own_position: Vec2, target: Vec2) {
        debug_assert!(self.is_guided());
        self.target_direction = (target - own_position).normalize_or_zero();
    }
}

impl Simulated for Projectile {
    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }
}

impl SceneComponent for Projectile {
    const KIND: NodeKind = NodeKind::Projectile;
}

/// Per-tick update: bend guided missiles toward their target, then move.
pub(crate) fn update(scene: &mut SceneGraph, id: NodeId, dt: f32) {
    let Ok((projectile, transform)) = scene
        .world
        .query_one_mut::<(&mut Projectile, &mut Transform)>(id)
    else {
        return;
    };

    if projectile.is_guided() {
        let steered = MISSILE_APPROACH_RATE * dt * projectile.target_direction
            + projectile.entity.velocity();
        let velocity = steered.normalize_or_zero() * projectile.max_speed();
        if velocity != Vec2::ZERO {
            transform.rotation = velocity.y.atan2(velocity.x).to_degrees() + 90.0;
        }
        projectile.entity.set_velocity(velocity);
    }

    projectile.entity.update(dt, transform);
}
