//! Flight behavior for SKYFORCE aircraft.
//!
//! Implements the waypoint movement pattern, the fire-control state machine,
//! projectile spread geometry, and roll-frame selection. No scene graph
//! dependency; everything operates on plain data.

pub mod fire_control;
pub mod pattern;
pub mod roll;

pub use skyforce_core as core;

#[cfg(test)]
mod tests;
