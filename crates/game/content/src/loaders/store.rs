//! RON save files for the grid.

use std::path::{Path, PathBuf};

use tracing::debug;
use umbra_core::{GridStore, StoreError, WorldGrid};

/// [`GridStore`] backed by a single pretty-printed RON file.
///
/// Saves go to a sibling temporary file first and are renamed into place, so
/// a crash mid-save leaves the previous save intact. Occupancy and
/// visibility are not part of the file; a loaded grid has neither.
#[derive(Debug, Clone)]
pub struct RonGridStore {
    path: PathBuf,
}

impl RonGridStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    fn staging_path(&self) -> PathBuf {
        let mut staging = self.path.clone().into_os_string();
        staging.push(".tmp");
        PathBuf::from(staging)
    }
}

impl GridStore for RonGridStore {
    fn load_grid(&mut self) -> Result<WorldGrid, StoreError> {
        let content = std::fs::read_to_string(&self.path)?;
        let grid: WorldGrid =
            ron::from_str(&content).map_err(|e| StoreError::Decode(e.to_string()))?;
        grid.validate()?;

        debug!(target: "content::store", path = %self.path.display(), "grid loaded");
        Ok(grid)
    }

    fn save_grid(&mut self, grid: &WorldGrid) -> Result<(), StoreError> {
        let encoded = ron::ser::to_string_pretty(grid, ron::ser::PrettyConfig::default())
            .map_err(|e| StoreError::Encode(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let staging = self.staging_path();
        std::fs::write(&staging, encoded)?;
        std::fs::rename(&staging, &self.path)?;

        debug!(target: "content::store", path = %self.path.display(), "grid saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use umbra_core::{
        BaseType, Coordinate, EntityId, Item, ItemId, StaticObject, Terrain, TerrainFlags,
        TerrainHandle,
    };

    fn sample_grid() -> WorldGrid {
        let terrains = vec![
            Terrain::new("floor", '.', TerrainFlags::PASSABLE | TerrainFlags::TRANSPARENT),
            Terrain::new("wall", '#', TerrainFlags::empty()),
        ];
        let mut grid = WorldGrid::new(3, 6, 4, terrains, TerrainHandle(0)).unwrap();
        let at = Coordinate::planar(2, 2).unwrap();
        grid.set_terrain(Coordinate::planar(0, 0).unwrap(), TerrainHandle(1))
            .unwrap();
        grid.place_object(at, StaticObject::named("savepoint", '&'))
            .unwrap();
        grid.drop_item(at, Item::new(ItemId(4), "Ruby", BaseType::Gem))
            .unwrap();
        grid
    }

    #[test]
    fn test_save_then_load_keeps_terrain_objects_and_items() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = RonGridStore::new(temp_dir.path().join("save.ron"));
        let grid = sample_grid();

        store.save_grid(&grid).unwrap();
        let loaded = store.load_grid().unwrap();

        assert_eq!(loaded, grid);
        assert!(!store.staging_path().exists());
    }

    #[test]
    fn test_occupancy_is_not_persisted() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = RonGridStore::new(temp_dir.path().join("save.ron"));
        let mut grid = sample_grid();
        let at = Coordinate::planar(1, 1).unwrap();
        grid.register_unit(EntityId(7), at).unwrap();

        store.save_grid(&grid).unwrap();
        let loaded = store.load_grid().unwrap();

        assert_eq!(grid.occupant(at), Some(EntityId(7)));
        assert_eq!(loaded.occupant(at), None);
    }

    #[test]
    fn test_creates_missing_directories() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = RonGridStore::new(temp_dir.path().join("saves/slot1.ron"));

        store.save_grid(&sample_grid()).unwrap();
        assert!(store.exists());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = RonGridStore::new(temp_dir.path().join("missing.ron"));

        assert!(matches!(store.load_grid(), Err(StoreError::Io(_))));
    }

    #[test]
    fn test_garbage_is_decode_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("save.ron");
        std::fs::write(&path, "not a grid").unwrap();

        let mut store = RonGridStore::new(path);
        assert!(matches!(store.load_grid(), Err(StoreError::Decode(_))));
    }
}
