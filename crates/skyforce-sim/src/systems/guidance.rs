//! Guidance: point every guided allied missile at the nearest live enemy.

use glam::Vec2;

use skyforce_core::Category;

use crate::nodes::aircraft::Aircraft;
use crate::nodes::projectile::Projectile;
use crate::scene::{NodeId, SceneGraph};

pub fn run(scene: &mut SceneGraph) {
    let mut enemies: Vec<Vec2> = Vec::new();
    let mut missiles: Vec<NodeId> = Vec::new();

    for id in scene.subtree(scene.root()) {
        let category = scene.category(id);
        if category.contains(Category::ENEMY_AIRCRAFT) {
            let alive = scene
                .component::<Aircraft>(id)
                .is_some_and(|a| !a.is_destroyed());
            if alive {
                enemies.push(scene.world_position(id));
            }
        } else if category.contains(Category::ALLIED_PROJECTILE) {
            let guided = scene
                .component::<Projectile>(id)
                .is_some_and(|p| p.is_guided());
            if guided {
                missiles.push(id);
            }
        }
    }

    if enemies.is_empty() {
        return;
    }

    for id in missiles {
        let own = scene.world_position(id);
        let nearest = enemies
            .iter()
            .copied()
            .min_by(|a, b| a.distance_squared(own).total_cmp(&b.distance_squared(own)));
        let Some(target) = nearest else {
            continue;
        };
        if let Some(mut missile) = scene.component_mut::<Projectile>(id) {
            missile.guide_towards(own, target);
        }
    }
}
