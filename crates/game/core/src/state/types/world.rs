use bitflags::bitflags;

use crate::config::GameConfig;
use crate::error::{ErrorSeverity, GameError};

use super::{Coordinate, EntityId, Item};

bitflags! {
    /// Physical properties of a terrain descriptor.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct TerrainFlags: u8 {
        /// Light passes through (used by visibility oracles).
        const TRANSPARENT = 1 << 0;
        /// Actors may stand on it.
        const PASSABLE = 1 << 1;
    }
}

/// Shared terrain descriptor. Cells refer to one through a [`TerrainHandle`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Terrain {
    pub name: String,
    pub glyph: char,
    pub flags: TerrainFlags,
}

impl Terrain {
    pub fn new(name: impl Into<String>, glyph: char, flags: TerrainFlags) -> Self {
        Self {
            name: name.into(),
            glyph,
            flags,
        }
    }

    pub fn is_passable(&self) -> bool {
        self.flags.contains(TerrainFlags::PASSABLE)
    }

    pub fn is_transparent(&self) -> bool {
        self.flags.contains(TerrainFlags::TRANSPARENT)
    }
}

/// Index into a grid's terrain palette.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TerrainHandle(pub u16);

/// Behaviour fired when an actor steps onto a cell holding the object.
///
/// Authored content names the effect by string; the name is resolved once
/// when the object is built and unknown names carry no effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StepEffect {
    /// Persists the grid when the player steps on it.
    #[strum(serialize = "savepoint", serialize = "save_point")]
    SavePoint,
}

impl StepEffect {
    pub fn resolve(name: &str) -> Option<Self> {
        name.parse().ok()
    }
}

/// Fixed furniture of a cell (altars, save points, signs).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StaticObject {
    pub name: String,
    pub glyph: char,
    pub effect: Option<StepEffect>,
}

impl StaticObject {
    /// Builds an object whose step effect is looked up from its name.
    pub fn named(name: impl Into<String>, glyph: char) -> Self {
        let name = name.into();
        let effect = StepEffect::resolve(&name);
        Self {
            name,
            glyph,
            effect,
        }
    }

    pub fn with_effect(mut self, effect: Option<StepEffect>) -> Self {
        self.effect = effect;
        self
    }
}

/// Ground truth for one grid position.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    terrain: TerrainHandle,
    // Occupancy is rebuilt from the roster; it is never persisted.
    #[cfg_attr(feature = "serde", serde(skip))]
    unit: Option<EntityId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub object: Option<StaticObject>,
    /// Insertion order; the last item is the topmost.
    #[cfg_attr(feature = "serde", serde(default))]
    pub items: Vec<Item>,
    // Cache of the last visibility query. Rendering only.
    #[cfg_attr(feature = "serde", serde(skip))]
    is_visible: bool,
}

impl Cell {
    pub fn new(terrain: TerrainHandle) -> Self {
        Self {
            terrain,
            ..Self::default()
        }
    }

    pub fn terrain(&self) -> TerrainHandle {
        self.terrain
    }

    pub fn unit(&self) -> Option<EntityId> {
        self.unit
    }

    pub fn top_item(&self) -> Option<&Item> {
        self.items.last()
    }

    pub fn is_visible(&self) -> bool {
        self.is_visible
    }

    pub(crate) fn set_visible(&mut self, visible: bool) {
        self.is_visible = visible;
    }
}

/// Errors raised while building or mutating a [`WorldGrid`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("grid dimensions {width}x{height} exceed {max_width}x{max_height} or are empty")]
    InvalidDimensions {
        width: i32,
        height: i32,
        max_width: i32,
        max_height: i32,
    },

    #[error("terrain palette is empty")]
    EmptyPalette,

    #[error("grid holds {actual} cells, expected {expected}")]
    CellCountMismatch { expected: usize, actual: usize },

    #[error("terrain handle {handle} is not in the palette of {palette} entries")]
    UnknownTerrain { handle: u16, palette: usize },

    #[error("{coord} lies outside the grid")]
    OutsideGrid { coord: Coordinate },

    #[error("{coord} is already occupied by {occupant}")]
    Occupied {
        coord: Coordinate,
        occupant: EntityId,
    },
}

impl GameError for GridError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Occupied { .. } => ErrorSeverity::Recoverable,
            Self::OutsideGrid { .. } => ErrorSeverity::Validation,
            Self::InvalidDimensions { .. }
            | Self::EmptyPalette
            | Self::CellCountMismatch { .. }
            | Self::UnknownTerrain { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidDimensions { .. } => "GRID_INVALID_DIMENSIONS",
            Self::EmptyPalette => "GRID_EMPTY_PALETTE",
            Self::CellCountMismatch { .. } => "GRID_CELL_COUNT",
            Self::UnknownTerrain { .. } => "GRID_UNKNOWN_TERRAIN",
            Self::OutsideGrid { .. } => "GRID_OUTSIDE",
            Self::Occupied { .. } => "GRID_OCCUPIED",
        }
    }
}

/// Fixed-size, row-major array of cells for one map layer.
///
/// Cells are addressed by planar `(x, y)` with `0 ≤ x < width` and
/// `0 ≤ y < height`; the layer of a [`Coordinate`] is not consulted.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldGrid {
    layer: i32,
    width: i32,
    height: i32,
    terrains: Vec<Terrain>,
    cells: Vec<Cell>,
}

impl WorldGrid {
    /// Grid filled with the `fill` terrain.
    pub fn new(
        layer: i32,
        width: i32,
        height: i32,
        terrains: Vec<Terrain>,
        fill: TerrainHandle,
    ) -> Result<Self, GridError> {
        let count = Self::checked_area(width, height)?;
        Self::from_cells(layer, width, height, terrains, vec![Cell::new(fill); count])
    }

    pub fn from_cells(
        layer: i32,
        width: i32,
        height: i32,
        terrains: Vec<Terrain>,
        cells: Vec<Cell>,
    ) -> Result<Self, GridError> {
        let grid = Self {
            layer,
            width,
            height,
            terrains,
            cells,
        };
        grid.validate()?;
        Ok(grid)
    }

    fn checked_area(width: i32, height: i32) -> Result<usize, GridError> {
        if width <= 0
            || height <= 0
            || width > GameConfig::GRID_WIDTH
            || height > GameConfig::GRID_HEIGHT
        {
            return Err(GridError::InvalidDimensions {
                width,
                height,
                max_width: GameConfig::GRID_WIDTH,
                max_height: GameConfig::GRID_HEIGHT,
            });
        }
        Ok(width as usize * height as usize)
    }

    /// Checks the structural invariants. Deserialized grids must pass this
    /// before use.
    pub fn validate(&self) -> Result<(), GridError> {
        let expected = Self::checked_area(self.width, self.height)?;
        if self.terrains.is_empty() {
            return Err(GridError::EmptyPalette);
        }
        if self.cells.len() != expected {
            return Err(GridError::CellCountMismatch {
                expected,
                actual: self.cells.len(),
            });
        }
        if let Some(cell) = self
            .cells
            .iter()
            .find(|cell| cell.terrain.0 as usize >= self.terrains.len())
        {
            return Err(GridError::UnknownTerrain {
                handle: cell.terrain.0,
                palette: self.terrains.len(),
            });
        }
        Ok(())
    }

    pub fn layer(&self) -> i32 {
        self.layer
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn terrains(&self) -> &[Terrain] {
        &self.terrains
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    pub fn contains(&self, coord: Coordinate) -> bool {
        self.in_bounds(coord.x(), coord.y())
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        self.in_bounds(x, y)
            .then(|| y as usize * self.width as usize + x as usize)
    }

    pub fn cell_at(&self, x: i32, y: i32) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    pub(crate) fn cell_at_mut(&mut self, x: i32, y: i32) -> Option<&mut Cell> {
        self.index(x, y).map(move |i| &mut self.cells[i])
    }

    pub fn cell(&self, coord: Coordinate) -> Option<&Cell> {
        self.cell_at(coord.x(), coord.y())
    }

    fn cell_mut(&mut self, coord: Coordinate) -> Result<&mut Cell, GridError> {
        self.cell_at_mut(coord.x(), coord.y())
            .ok_or(GridError::OutsideGrid { coord })
    }

    pub fn terrain(&self, handle: TerrainHandle) -> Option<&Terrain> {
        self.terrains.get(handle.0 as usize)
    }

    /// Terrain descriptor of the cell at `(x, y)`.
    pub fn terrain_at(&self, x: i32, y: i32) -> Option<&Terrain> {
        self.cell_at(x, y).and_then(|cell| self.terrain(cell.terrain))
    }

    pub fn set_terrain(&mut self, coord: Coordinate, handle: TerrainHandle) -> Result<(), GridError> {
        if self.terrain(handle).is_none() {
            return Err(GridError::UnknownTerrain {
                handle: handle.0,
                palette: self.terrains.len(),
            });
        }
        self.cell_mut(coord)?.terrain = handle;
        Ok(())
    }

    pub fn is_passable(&self, coord: Coordinate) -> bool {
        self.terrain_at(coord.x(), coord.y())
            .is_some_and(Terrain::is_passable)
    }

    /// Cells outside the grid block sight.
    pub fn is_transparent(&self, x: i32, y: i32) -> bool {
        self.terrain_at(x, y).is_some_and(Terrain::is_transparent)
    }

    pub fn occupant(&self, coord: Coordinate) -> Option<EntityId> {
        self.cell(coord).and_then(Cell::unit)
    }

    /// Registers `id` as the occupant of `coord`.
    pub fn register_unit(&mut self, id: EntityId, coord: Coordinate) -> Result<(), GridError> {
        let cell = self.cell_mut(coord)?;
        match cell.unit {
            Some(occupant) if occupant != id => Err(GridError::Occupied { coord, occupant }),
            _ => {
                cell.unit = Some(id);
                Ok(())
            }
        }
    }

    /// Removes `id` from `coord`. Returns false if `id` was not registered there.
    pub fn vacate(&mut self, coord: Coordinate, id: EntityId) -> bool {
        match self.cell_at_mut(coord.x(), coord.y()) {
            Some(cell) if cell.unit == Some(id) => {
                cell.unit = None;
                true
            }
            _ => false,
        }
    }

    pub fn place_object(&mut self, coord: Coordinate, object: StaticObject) -> Result<(), GridError> {
        self.cell_mut(coord)?.object = Some(object);
        Ok(())
    }

    /// Puts `item` on top of the cell's pile.
    pub fn drop_item(&mut self, coord: Coordinate, item: Item) -> Result<(), GridError> {
        self.cell_mut(coord)?.items.push(item);
        Ok(())
    }

    /// Removes and returns every item lying on `coord`, bottom first.
    pub fn take_items(&mut self, coord: Coordinate) -> Vec<Item> {
        self.cell_at_mut(coord.x(), coord.y())
            .map(|cell| std::mem::take(&mut cell.items))
            .unwrap_or_default()
    }

    pub fn items_at(&self, coord: Coordinate) -> &[Item] {
        self.cell(coord).map(|cell| cell.items.as_slice()).unwrap_or(&[])
    }
}
