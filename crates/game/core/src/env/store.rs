use crate::state::WorldGrid;

use super::StoreError;

/// Persistence collaborator. The core never encodes storage formats itself.
pub trait GridStore {
    fn load_grid(&mut self) -> Result<WorldGrid, StoreError>;

    fn save_grid(&mut self, grid: &WorldGrid) -> Result<(), StoreError>;
}

/// In-memory store keeping the last saved grid.
#[derive(Clone, Debug, Default)]
pub struct MemoryGridStore {
    saved: Option<WorldGrid>,
    saves: usize,
}

impl MemoryGridStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_grid(grid: WorldGrid) -> Self {
        Self {
            saved: Some(grid),
            saves: 0,
        }
    }

    pub fn saved(&self) -> Option<&WorldGrid> {
        self.saved.as_ref()
    }

    /// Number of successful `save_grid` calls.
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl GridStore for MemoryGridStore {
    fn load_grid(&mut self) -> Result<WorldGrid, StoreError> {
        self.saved.clone().ok_or_else(|| {
            StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "no grid has been saved",
            ))
        })
    }

    fn save_grid(&mut self, grid: &WorldGrid) -> Result<(), StoreError> {
        self.saved = Some(grid.clone());
        self.saves += 1;
        Ok(())
    }
}
