//! World-level passes that run on the scene graph each tick.
//!
//! Systems are plain functions over `&mut SceneGraph`. State that outlives a
//! tick (spawn schedule, score) is owned by the engine and passed in.

pub mod cleanup;
pub mod guidance;
pub mod spawner;
