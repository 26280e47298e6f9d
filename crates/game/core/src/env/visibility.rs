use std::collections::HashSet;

use crate::state::{Coordinate, WorldGrid};

use super::OracleError;

/// Range-limit shape applied by a visibility oracle.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RangeShape {
    Circle,
    #[default]
    Octagon,
    Square,
    Diamond,
}

impl RangeShape {
    /// Whether the planar offset `(dx, dy)` lies within `range` under this shape.
    pub fn within(self, dx: i32, dy: i32, range: u32) -> bool {
        let (dx, dy, r) = (
            i64::from(dx).abs(),
            i64::from(dy).abs(),
            i64::from(range),
        );
        match self {
            Self::Square => dx <= r && dy <= r,
            Self::Diamond => dx + dy <= r,
            Self::Circle => {
                dx.saturating_mul(dx).saturating_add(dy.saturating_mul(dy))
                    <= r.saturating_mul(r).saturating_add(r)
            }
            Self::Octagon => dx <= r && dy <= r && 2 * (dx + dy) <= r.saturating_mul(3),
        }
    }
}

/// Set of lit planar cells returned by a [`VisibilityOracle`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VisibleSet {
    cells: HashSet<(i32, i32)>,
}

impl VisibleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, x: i32, y: i32) {
        self.cells.insert((x, y));
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.cells.contains(&(x, y))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl FromIterator<(i32, i32)> for VisibleSet {
    fn from_iter<T: IntoIterator<Item = (i32, i32)>>(iter: T) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

/// Computes which cells are lit from an origin.
///
/// Implementations must be deterministic for fixed inputs and must not mutate
/// anything observable; the mirror may query more than once per refresh.
pub trait VisibilityOracle {
    fn compute_visible(
        &self,
        grid: &WorldGrid,
        origin: Coordinate,
        range: u32,
        symmetric: bool,
        shape: RangeShape,
    ) -> Result<VisibleSet, OracleError>;
}
