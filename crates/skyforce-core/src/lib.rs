//! Core types and definitions for the SKYFORCE simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! node categories, type enumerations, geometry, per-type data tables,
//! sound events, and constants. It has no dependency on the scene graph
//! or any runtime framework.

pub mod category;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod tables;
pub mod types;

pub use category::Category;
pub use error::TableError;
pub use tables::DataTables;
