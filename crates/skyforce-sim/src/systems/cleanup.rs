//! Cleanup: take out-of-battlefield nodes out of play and account for kills.

use skyforce_core::types::FloatRect;
use skyforce_core::Category;
use tracing::debug;

use crate::nodes::aircraft::Aircraft;
use crate::scene::{NodeId, SceneGraph};

/// Running score for one mission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct ScoreState {
    pub points: u32,
    pub enemies_destroyed: u32,
}

/// Call `remove()` on every enemy aircraft and projectile whose bounds left
/// the battlefield, and on every pickup that drifted below it. Those nodes
/// skip their explosion and never score.
pub fn remove_outside(scene: &mut SceneGraph, battlefield: FloatRect) -> usize {
    let bottom = battlefield.top + battlefield.height;
    let outside: Vec<NodeId> = scene
        .subtree(scene.root())
        .into_iter()
        .filter(|id| {
            let category = scene.category(*id);
            let Some(bounds) = scene.bounding_rect(*id) else {
                return false;
            };
            if category.intersects(Category::ENEMY_AIRCRAFT | Category::PROJECTILE) {
                !battlefield.intersects(&bounds)
            } else if category.contains(Category::PICKUP) {
                bounds.top >= bottom
            } else {
                false
            }
        })
        .collect();

    for id in &outside {
        scene.remove(*id);
    }
    if !outside.is_empty() {
        debug!(count = outside.len(), "nodes left the battlefield");
    }
    outside.len()
}

/// Add the score of every enemy destroyed in combat. Each enemy counts once.
pub fn collect_score(scene: &mut SceneGraph, score: &mut ScoreState) {
    let enemies: Vec<NodeId> = scene
        .subtree(scene.root())
        .into_iter()
        .filter(|id| scene.category(*id).contains(Category::ENEMY_AIRCRAFT))
        .collect();

    for id in enemies {
        let Some(mut aircraft) = scene.component_mut::<Aircraft>(id) else {
            continue;
        };
        if !aircraft.is_destroyed() || !aircraft.shows_explosion() {
            continue;
        }
        if let Some(points) = aircraft.take_score() {
            score.points += points;
            score.enemies_destroyed += 1;
            debug!(?id, points, total = score.points, "kill scored");
        }
    }
}
