use std::fmt;

use crate::config::GameConfig;
use crate::error::{ErrorSeverity, GameError};

/// Planar axis named by a [`RangeError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    X,
    Y,
}

/// A planar component fell outside the valid grid range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{axis} = {value} is outside the valid range {min}..={max}")]
pub struct RangeError {
    pub axis: Axis,
    pub value: i32,
    pub min: i32,
    pub max: i32,
}

impl RangeError {
    fn check(axis: Axis, value: i32, min: i32, max: i32) -> Result<i32, Self> {
        if value < min || value > max {
            Err(Self {
                axis,
                value,
                min,
                max,
            })
        } else {
            Ok(value)
        }
    }
}

impl GameError for RangeError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self.axis {
            Axis::X => "RANGE_X",
            Axis::Y => "RANGE_Y",
        }
    }
}

fn check_x(x: i32) -> Result<i32, RangeError> {
    RangeError::check(Axis::X, x, 0, GameConfig::GRID_WIDTH)
}

fn check_y(y: i32) -> Result<i32, RangeError> {
    RangeError::check(Axis::Y, y, 0, GameConfig::GRID_HEIGHT)
}

/// Grid location: planar `(x, y)` plus an opaque map-layer identifier.
///
/// `x` and `y` are validated against [`GameConfig::GRID_WIDTH`] and
/// [`GameConfig::GRID_HEIGHT`] (both inclusive) on construction and mutation.
/// The layer is never validated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawCoordinate", into = "RawCoordinate")
)]
pub struct Coordinate {
    x: i32,
    y: i32,
    layer: i32,
}

impl Coordinate {
    pub fn new(x: i32, y: i32, layer: i32) -> Result<Self, RangeError> {
        Ok(Self {
            x: check_x(x)?,
            y: check_y(y)?,
            layer,
        })
    }

    /// Coordinate on layer 0.
    pub fn planar(x: i32, y: i32) -> Result<Self, RangeError> {
        Self::new(x, y, 0)
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn layer(&self) -> i32 {
        self.layer
    }

    pub fn set_x(&mut self, x: i32) -> Result<(), RangeError> {
        self.x = check_x(x)?;
        Ok(())
    }

    pub fn set_y(&mut self, y: i32) -> Result<(), RangeError> {
        self.y = check_y(y)?;
        Ok(())
    }

    pub fn set_layer(&mut self, layer: i32) {
        self.layer = layer;
    }

    /// Returns the coordinate shifted by `(dx, dy)` on the same layer.
    pub fn offset(&self, dx: i32, dy: i32) -> Result<Self, RangeError> {
        Self::new(self.x + dx, self.y + dy, self.layer)
    }

    /// Chebyshev distance on the plane, ignoring layers.
    pub fn chebyshev(&self, other: &Coordinate) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{};{};{}]", self.x, self.y, self.layer)
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct RawCoordinate {
    x: i32,
    y: i32,
    #[serde(default)]
    layer: i32,
}

#[cfg(feature = "serde")]
impl TryFrom<RawCoordinate> for Coordinate {
    type Error = RangeError;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        Coordinate::new(raw.x, raw.y, raw.layer)
    }
}

#[cfg(feature = "serde")]
impl From<Coordinate> for RawCoordinate {
    fn from(coord: Coordinate) -> Self {
        Self {
            x: coord.x,
            y: coord.y,
            layer: coord.layer,
        }
    }
}

/// Rectangular region of the plane, half-open on iteration.
///
/// Every edge lies within the coordinate bounds. [`Window::contains`] is
/// inclusive of the end edges, which matters for the clamped border.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Window {
    x_start: i32,
    y_start: i32,
    x_end: i32,
    y_end: i32,
}

impl Window {
    pub fn new(x_start: i32, y_start: i32, x_end: i32, y_end: i32) -> Result<Self, RangeError> {
        let x_start = check_x(x_start)?;
        let y_start = check_y(y_start)?;
        let x_end = RangeError::check(Axis::X, x_end, x_start, GameConfig::GRID_WIDTH)?;
        let y_end = RangeError::check(Axis::Y, y_end, y_start, GameConfig::GRID_HEIGHT)?;
        Ok(Self {
            x_start,
            y_start,
            x_end,
            y_end,
        })
    }

    /// Window of `radius` cells around `(cx, cy)`, clamped to `[0, width] × [0, height]`.
    pub fn around(cx: i32, cy: i32, radius: u32, width: i32, height: i32) -> Self {
        let r = i32::try_from(radius).unwrap_or(i32::MAX);
        let x_start = cx.saturating_sub(r).max(0);
        let y_start = cy.saturating_sub(r).max(0);
        Self {
            x_start,
            y_start,
            x_end: cx.saturating_add(r).min(width).max(x_start),
            y_end: cy.saturating_add(r).min(height).max(y_start),
        }
    }

    pub fn x_start(&self) -> i32 {
        self.x_start
    }

    pub fn y_start(&self) -> i32 {
        self.y_start
    }

    pub fn x_end(&self) -> i32 {
        self.x_end
    }

    pub fn y_end(&self) -> i32 {
        self.y_end
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x_start && x <= self.x_end && y >= self.y_start && y <= self.y_end
    }

    /// Cells covered by the window in row-major order, end edges excluded.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + use<> {
        let (xs, xe) = (self.x_start, self.x_end);
        (self.y_start..self.y_end).flat_map(move |y| (xs..xe).map(move |x| (x, y)))
    }
}
