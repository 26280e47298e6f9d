use crate::env::RangeShape;

/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Ticks between two invocations of the player's regeneration hook.
    pub regen_interval: u64,
    /// Radius handed to the visibility oracle when refreshing the mirror.
    pub sight_range: u32,
    /// Range-limit shape handed to the visibility oracle.
    pub sight_shape: RangeShape,
    /// Extra cells redrawn around the sight range so partial redraws stay smooth.
    pub draw_margin: u32,
    /// Energy charged for a player move.
    pub move_cost: i32,
    /// Energy charged for item and inventory interactions.
    pub item_cost: i32,
}

impl GameConfig {
    // ===== compile-time constants =====
    /// Largest valid x coordinate (inclusive).
    pub const GRID_WIDTH: i32 = 80;
    /// Largest valid y coordinate (inclusive).
    pub const GRID_HEIGHT: i32 = 50;
    /// Energy an actor needs before it is granted a turn.
    pub const ACTIVATION_THRESHOLD: i32 = 100;
    /// Sight and margin never need to reach past the grid's longer side.
    pub const MAX_SIGHT_RANGE: u32 = if Self::GRID_WIDTH > Self::GRID_HEIGHT {
        Self::GRID_WIDTH as u32
    } else {
        Self::GRID_HEIGHT as u32
    };

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_REGEN_INTERVAL: u64 = 50;
    pub const DEFAULT_SIGHT_RANGE: u32 = 12;
    pub const DEFAULT_DRAW_MARGIN: u32 = 2;
    pub const DEFAULT_MOVE_COST: i32 = 0;
    pub const DEFAULT_ITEM_COST: i32 = 100;

    pub fn new() -> Self {
        Self {
            regen_interval: Self::DEFAULT_REGEN_INTERVAL,
            sight_range: Self::DEFAULT_SIGHT_RANGE,
            sight_shape: RangeShape::Octagon,
            draw_margin: Self::DEFAULT_DRAW_MARGIN,
            move_cost: Self::DEFAULT_MOVE_COST,
            item_cost: Self::DEFAULT_ITEM_COST,
        }
    }

    pub fn with_regen_interval(mut self, regen_interval: u64) -> Self {
        self.regen_interval = regen_interval;
        self
    }

    pub fn with_sight(mut self, range: u32, shape: RangeShape) -> Self {
        self.sight_range = range;
        self.sight_shape = shape;
        self
    }

    /// Clamps sight range and draw margin to [`Self::MAX_SIGHT_RANGE`].
    pub fn bounded(mut self) -> Self {
        self.sight_range = self.sight_range.min(Self::MAX_SIGHT_RANGE);
        self.draw_margin = self.draw_margin.min(Self::MAX_SIGHT_RANGE);
        self
    }

    /// Half-width of the redraw window around a sight origin.
    pub fn draw_radius(&self) -> u32 {
        self.sight_range.saturating_add(self.draw_margin)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
