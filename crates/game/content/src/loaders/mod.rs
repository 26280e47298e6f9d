//! Loaders turning RON maps, TOML config and RON saves into core types.

pub mod config;
pub mod factory;
pub mod map;
pub mod store;

pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use map::{MapData, MapLoader};
pub use store::RonGridStore;

use std::path::Path;

pub type LoadResult<T> = anyhow::Result<T>;

/// Reads a whole data file, naming the path on failure.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))
}
