//! Data-driven content for the simulation.
//!
//! This crate turns files on disk into core types:
//! - Map layouts (RON) into a [`umbra_core::WorldGrid`] plus spawn list
//! - Game configuration (TOML) into [`umbra_core::GameConfig`]
//! - Save files (RON) through [`loaders::RonGridStore`], the grid persistence
//!   collaborator used by save points

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, MapData, MapLoader, RonGridStore};
