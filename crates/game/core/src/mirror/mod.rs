//! Player-facing view of the world.
//!
//! [`ObservedMirror`] keeps what the player last saw of every cell and a glyph
//! frame for the painter. Cells outside the current sight keep their last
//! observation untouched, which is what produces fog of war.
mod glyphs;

pub use glyphs::ItemGlyphs;

use tracing::{debug, trace, warn};

use crate::config::GameConfig;
use crate::env::{OracleError, RangeShape, VisibilityOracle, VisibleSet};
use crate::state::{Actor, Cell, Coordinate, EntityId, Silhouette, Terrain, Window, WorldGrid};

/// Resolves the actor registered in a cell.
pub trait ActorLookup {
    fn actor(&self, id: EntityId) -> Option<&Actor>;
}

impl ActorLookup for [Actor] {
    fn actor(&self, id: EntityId) -> Option<&Actor> {
        self.iter().find(|actor| actor.id == id)
    }
}

impl ActorLookup for Vec<Actor> {
    fn actor(&self, id: EntityId) -> Option<&Actor> {
        self.as_slice().actor(id)
    }
}

/// Last observation of one cell.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ObservedCell {
    /// Copy of the terrain seen here, kept after the cell leaves sight.
    pub terrain: Option<Terrain>,
    /// Actor last seen standing here.
    pub last_seen: Option<Silhouette>,
    is_visible: bool,
}

impl ObservedCell {
    pub fn is_visible(&self) -> bool {
        self.is_visible
    }
}

#[derive(Clone, Debug)]
pub struct ObservedMirror {
    width: i32,
    height: i32,
    cells: Vec<ObservedCell>,
    frame: Vec<char>,
    dirty: Vec<(i32, i32)>,
    window: Option<Window>,
    glyphs: ItemGlyphs,
    draw_margin: u32,
    focal: Option<EntityId>,
    queries: u64,
}

impl ObservedMirror {
    pub const BLANK: char = ' ';

    pub fn new(width: i32, height: i32, draw_margin: u32) -> Self {
        let len = width.max(0) as usize * height.max(0) as usize;
        Self {
            width,
            height,
            cells: vec![ObservedCell::default(); len],
            frame: vec![Self::BLANK; len],
            dirty: Vec::new(),
            window: None,
            glyphs: ItemGlyphs::standard(),
            draw_margin,
            focal: None,
            queries: 0,
        }
    }

    pub fn for_grid(grid: &WorldGrid, config: &GameConfig) -> Self {
        Self::new(grid.width(), grid.height(), config.draw_margin)
    }

    pub fn with_glyphs(mut self, glyphs: ItemGlyphs) -> Self {
        self.glyphs = glyphs;
        self
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Actor whose own cell always forces a fresh visibility query.
    pub fn focal(&self) -> Option<EntityId> {
        self.focal
    }

    pub fn set_focal(&mut self, focal: Option<EntityId>) {
        self.focal = focal;
    }

    /// Window drawn by the last refresh, if any.
    pub fn window(&self) -> Option<Window> {
        self.window
    }

    /// Number of oracle queries issued so far.
    pub fn query_count(&self) -> u64 {
        self.queries
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        (x >= 0 && y >= 0 && x < self.width && y < self.height)
            .then(|| y as usize * self.width as usize + x as usize)
    }

    pub fn observed(&self, x: i32, y: i32) -> Option<&ObservedCell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    pub fn glyph_at(&self, x: i32, y: i32) -> Option<char> {
        self.index(x, y).map(|i| self.frame[i])
    }

    /// Frame rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[char]> {
        self.frame.chunks(self.width.max(1) as usize)
    }

    /// Cells whose glyph changed since the last call.
    pub fn take_dirty(&mut self) -> Vec<(i32, i32)> {
        std::mem::take(&mut self.dirty)
    }

    fn put(&mut self, x: i32, y: i32, glyph: char) {
        if let Some(i) = self.index(x, y) {
            if self.frame[i] != glyph {
                self.frame[i] = glyph;
                self.dirty.push((x, y));
            }
        }
    }

    fn query(
        &mut self,
        grid: &WorldGrid,
        oracle: &dyn VisibilityOracle,
        origin: Coordinate,
        range: u32,
        shape: RangeShape,
    ) -> Result<VisibleSet, OracleError> {
        self.queries += 1;
        let visible = oracle.compute_visible(grid, origin, range, true, shape)?;
        trace!(
            target: "core::mirror",
            origin = %origin,
            lit = visible.len(),
            "visibility query"
        );
        Ok(visible)
    }

    /// Recomputes sight from `origin` and redraws the surrounding window.
    ///
    /// Lit cells take their terrain, object, topmost item and occupant from
    /// the grid. Unlit cells are drawn blank and keep their last observation.
    /// When the focal actor is met inside the window, the oracle is queried
    /// again from the focal actor's cell before it is drawn.
    pub fn refresh(
        &mut self,
        grid: &mut WorldGrid,
        actors: &dyn ActorLookup,
        oracle: &dyn VisibilityOracle,
        origin: Coordinate,
        range: u32,
        shape: RangeShape,
    ) -> Result<(), OracleError> {
        let mut visible = self.query(grid, oracle, origin, range, shape)?;
        let window = Window::around(
            origin.x(),
            origin.y(),
            range.saturating_add(self.draw_margin),
            grid.width(),
            grid.height(),
        );
        self.window = Some(window);

        for (x, y) in window.cells() {
            let lit = visible.contains(x, y);
            self.mark(grid, x, y, lit);
            if !lit {
                self.put(x, y, Self::BLANK);
                continue;
            }

            let unit = grid.cell_at(x, y).and_then(Cell::unit);
            if unit.is_some() && unit == self.focal {
                if let Some(focal) = unit.and_then(|id| actors.actor(id)) {
                    visible = self.query(grid, oracle, focal.position(), range, shape)?;
                }
            }
            self.draw_cell(grid, actors, x, y);
        }

        debug!(
            target: "core::mirror",
            origin = %origin,
            x_start = window.x_start(),
            y_start = window.y_start(),
            x_end = window.x_end(),
            y_end = window.y_end(),
            "mirror refreshed"
        );
        Ok(())
    }

    /// Redraws lit cells among `touched` that lie in the current window,
    /// without querying the oracle. Unlit cells are left as they are.
    pub fn redraw_touched(&mut self, grid: &WorldGrid, actors: &dyn ActorLookup, touched: &[Coordinate]) {
        let Some(window) = self.window else {
            return;
        };
        for coord in touched {
            let (x, y) = (coord.x(), coord.y());
            if !window.contains(x, y) {
                continue;
            }
            if grid.cell_at(x, y).is_some_and(Cell::is_visible) {
                self.draw_cell(grid, actors, x, y);
            }
        }
    }

    /// Erases `actor` from its current cell ahead of a position change.
    ///
    /// Inside the current window the terrain glyph is restored, otherwise the
    /// cell is drawn blank. The grid registration is removed either way, and a
    /// lit cell forgets the actor seen there.
    pub fn clear(&mut self, grid: &mut WorldGrid, actor: &Actor) {
        let pos = actor.position();
        let glyph = match self.window {
            Some(window) if window.contains(pos.x(), pos.y()) => grid
                .terrain_at(pos.x(), pos.y())
                .map_or(Self::BLANK, |terrain| terrain.glyph),
            _ => Self::BLANK,
        };
        if let Some(i) = self.index(pos.x(), pos.y()) {
            let observed = &mut self.cells[i];
            if observed.is_visible
                && observed.last_seen.as_ref().is_some_and(|seen| seen.id == actor.id)
            {
                observed.last_seen = None;
            }
        }
        self.put(pos.x(), pos.y(), glyph);
        grid.vacate(pos, actor.id);
    }

    fn mark(&mut self, grid: &mut WorldGrid, x: i32, y: i32, lit: bool) {
        if let Some(cell) = grid.cell_at_mut(x, y) {
            cell.set_visible(lit);
        }
        if let Some(i) = self.index(x, y) {
            self.cells[i].is_visible = lit;
        }
    }

    fn draw_cell(&mut self, grid: &WorldGrid, actors: &dyn ActorLookup, x: i32, y: i32) {
        let (Some(cell), Some(i)) = (grid.cell_at(x, y), self.index(x, y)) else {
            return;
        };
        let Some(terrain) = grid.terrain(cell.terrain()) else {
            return;
        };

        let mut glyph = terrain.glyph;
        if let Some(object) = &cell.object {
            glyph = object.glyph;
        }
        if let Some(item) = cell.top_item() {
            glyph = self.glyphs.glyph(item.base_type);
        }

        let mut last_seen = None;
        if let Some(id) = cell.unit() {
            match actors.actor(id) {
                Some(actor) => {
                    glyph = actor.glyph;
                    if Some(id) != self.focal {
                        last_seen = Some(actor.silhouette());
                    }
                }
                None => warn!(
                    target: "core::mirror",
                    actor = %id,
                    x,
                    y,
                    "cell names an actor that is not tracked"
                ),
            }
        }

        let observed = &mut self.cells[i];
        observed.terrain = Some(terrain.clone());
        observed.last_seen = last_seen;
        self.put(x, y, glyph);
    }
}
