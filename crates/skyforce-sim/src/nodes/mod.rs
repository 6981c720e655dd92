//! Concrete scene node kinds.

pub mod aircraft;
pub mod pickup;
pub mod projectile;
pub mod sound;
pub mod sprite;
pub mod text;
