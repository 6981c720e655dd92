//! State shared by every simulated object: velocity and hit points.

use glam::Vec2;

use crate::scene::Transform;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Entity {
    velocity: Vec2,
    hitpoints: i32,
}

impl Entity {
    pub fn new(hitpoints: i32) -> Self {
        Self {
            velocity: Vec2::ZERO,
            hitpoints,
        }
    }

    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    pub fn accelerate(&mut self, velocity: Vec2) {
        self.velocity += velocity;
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn hitpoints(&self) -> i32 {
        self.hitpoints
    }

    /// Restore hit points. `points` must be positive.
    pub fn repair(&mut self, points: i32) {
        debug_assert!(points > 0, "repair amount must be positive, got {points}");
        self.hitpoints += points;
    }

    /// Subtract hit points. `points` must be positive.
    pub fn damage(&mut self, points: i32) {
        debug_assert!(points > 0, "damage amount must be positive, got {points}");
        self.hitpoints -= points;
    }

    pub fn destroy(&mut self) {
        self.hitpoints = 0;
    }

    /// Take the entity out of play. Concrete nodes extend this.
    pub fn remove(&mut self) {
        self.destroy();
    }

    pub fn is_destroyed(&self) -> bool {
        self.hitpoints <= 0
    }

    /// Integrate position over `dt` seconds.
    pub fn update(&self, dt: f32, transform: &mut Transform) {
        transform.position += self.velocity * dt;
    }
}

/// Nodes built on `Entity`.
pub trait Simulated {
    fn entity(&self) -> &Entity;

    fn entity_mut(&mut self) -> &mut Entity;

    fn is_marked_for_removal(&self) -> bool {
        self.entity().is_destroyed()
    }

    fn remove(&mut self) {
        self.entity_mut().remove();
    }
}
