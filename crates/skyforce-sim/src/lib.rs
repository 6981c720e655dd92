//! Scene graph, deferred commands, and the headless mission engine.
//!
//! Nodes live in a hecs world and form a tree. Per-tick node updates only
//! queue commands; the queue is drained once per tick against the whole
//! tree, which is the only place the tree changes shape mid-tick.

pub mod animation;
pub mod command;
pub mod engine;
pub mod entity;
pub mod nodes;
pub mod player;
pub mod scene;
pub mod systems;
pub mod world_setup;

pub use skyforce_core as core;
pub use engine::{SimConfig, SimulationEngine, TickReport};
pub use scene::{NodeId, SceneGraph};
