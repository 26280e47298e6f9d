//! Client configuration from the environment.
use std::env;
use std::path::PathBuf;

/// Map loaded when `UMBRA_MAP` is unset.
const DEFAULT_MAP: &str = "data/maps/crypt.ron";

/// Launch settings for the terminal client.
///
/// Environment variables (a `.env` file is honoured):
/// - `UMBRA_MAP` - map RON file (default: `data/maps/crypt.ron`)
/// - `UMBRA_CONFIG` - game config TOML; defaults apply when unset
/// - `UMBRA_SAVE` - save file written by save points
///   (default: `<data dir>/saves/<map name>.ron`)
/// - `UMBRA_SESSION_ID` - log subdirectory name (default: `session_<unix time>`)
/// - `UMBRA_LOG_DIR` - log root (default: platform cache dir)
/// - `UMBRA_SEED` - seed for wandering NPCs (default: entropy)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub map: PathBuf,
    pub config: Option<PathBuf>,
    pub save: PathBuf,
    pub session_id: Option<String>,
    pub log_dir: Option<PathBuf>,
    pub seed: Option<u64>,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let map = read("UMBRA_MAP").map_or_else(|| PathBuf::from(DEFAULT_MAP), PathBuf::from);
        let save = read("UMBRA_SAVE").map_or_else(|| default_save_path(&map), PathBuf::from);

        Self {
            config: read("UMBRA_CONFIG").map(PathBuf::from),
            save,
            session_id: read("UMBRA_SESSION_ID"),
            log_dir: read("UMBRA_LOG_DIR").map(PathBuf::from),
            seed: read("UMBRA_SEED").and_then(|seed| seed.parse().ok()),
            map,
        }
    }
}

fn default_save_path(map: &std::path::Path) -> PathBuf {
    let name = map
        .file_stem()
        .map_or_else(|| "world".to_string(), |stem| stem.to_string_lossy().into_owned());
    data_dir().join("saves").join(format!("{}.ron", name))
}

/// Platform data directory, e.g. `~/.local/share/umbra` on Linux.
pub fn data_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "umbra")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./save_data"))
}

/// Platform log directory, e.g. `~/.cache/umbra/logs` on Linux.
pub fn log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "umbra")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp/umbra"))
        .join("logs")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = ClientConfig::from_lookup(lookup(&[]));

        assert_eq!(config.map, PathBuf::from(DEFAULT_MAP));
        assert_eq!(config.config, None);
        assert!(config.save.ends_with("saves/crypt.ron"));
        assert_eq!(config.seed, None);
    }

    #[test]
    fn explicit_values_win() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("UMBRA_MAP", "maps/tower.ron"),
            ("UMBRA_CONFIG", "umbra.toml"),
            ("UMBRA_SAVE", "/tmp/slot.ron"),
            ("UMBRA_SESSION_ID", "run1"),
            ("UMBRA_SEED", "42"),
        ]));

        assert_eq!(config.map, PathBuf::from("maps/tower.ron"));
        assert_eq!(config.config, Some(PathBuf::from("umbra.toml")));
        assert_eq!(config.save, PathBuf::from("/tmp/slot.ron"));
        assert_eq!(config.session_id.as_deref(), Some("run1"));
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn blank_values_are_unset() {
        let config = ClientConfig::from_lookup(lookup(&[("UMBRA_CONFIG", "  "), ("UMBRA_SEED", "x")]));
        assert_eq!(config.config, None);
        assert_eq!(config.seed, None);
    }
}
