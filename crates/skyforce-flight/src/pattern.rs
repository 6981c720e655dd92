//! Open-loop waypoint path following.
//!
//! An aircraft flies each leg of its pattern for the leg's distance, then
//! turns to the next leg, wrapping back to the first after the last one.

use glam::Vec2;

use skyforce_core::constants::HEADING_OFFSET_DEG;
use skyforce_core::tables::Direction;

/// Progress along a waypoint pattern.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PatternState {
    /// Index of the leg currently being flown.
    pub leg_index: usize,
    /// Distance flown on the current leg.
    pub travelled: f32,
}

impl PatternState {
    /// Advance one tick along `legs` and return the velocity to fly.
    ///
    /// The turn check happens before this tick's distance is added, so a leg
    /// is left on the first tick that starts with its distance exceeded.
    /// Returns `None` for an empty pattern (player-controlled aircraft).
    pub fn advance(&mut self, legs: &[Direction], speed: f32, dt: f32) -> Option<Vec2> {
        if legs.is_empty() {
            return None;
        }

        if self.travelled > legs[self.leg_index].distance {
            self.leg_index = (self.leg_index + 1) % legs.len();
            self.travelled = 0.0;
        }

        let velocity = heading_velocity(legs[self.leg_index].angle, speed);
        self.travelled += speed * dt;
        Some(velocity)
    }
}

/// Velocity for a heading in degrees, where 0° points down the screen.
pub fn heading_velocity(angle_deg: f32, speed: f32) -> Vec2 {
    let radians = (angle_deg + HEADING_OFFSET_DEG).to_radians();
    Vec2::new(speed * radians.cos(), speed * radians.sin())
}
