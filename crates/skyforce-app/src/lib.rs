//! SKYFORCE headless runner.
//!
//! Wires the simulation engine to a game loop thread, environment-driven
//! configuration, and a scripted pilot for unattended runs.

pub mod config;
pub mod game_loop;
pub mod state;

pub use skyforce_core as core;
