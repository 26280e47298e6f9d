//! Game configuration loader.

use std::path::Path;

use tracing::warn;
use umbra_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
///
/// Missing keys keep their [`GameConfig`] defaults.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse config data from TOML text.
    ///
    /// Sight range and draw margin are clamped to the largest grid extent.
    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        let bounded = config.clone().bounded();
        if bounded != config {
            warn!(
                target: "content::config",
                sight_range = config.sight_range,
                draw_margin = config.draw_margin,
                max = GameConfig::MAX_SIGHT_RANGE,
                "sight settings clamped"
            );
        }
        Ok(bounded)
    }
}
