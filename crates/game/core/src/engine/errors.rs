//! Error types for the tick loop and its turn primitives.

use crate::env::{DecisionError, InputError, OracleError};
use crate::error::{ErrorSeverity, GameError};
use crate::state::{Coordinate, EntityId, GridError, RangeError};

/// Rejected movement. Never fatal: the turn proceeds and the cost is charged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("actor {0} cannot move")]
    Immobile(EntityId),

    #[error("destination is off the map: {0}")]
    OutOfBounds(#[from] RangeError),

    #[error("destination {destination} lies outside the grid")]
    OutsideGrid { destination: Coordinate },

    #[error("destination {destination} is blocked")]
    Blocked { destination: Coordinate },

    #[error("destination {destination} is occupied by {occupant}")]
    Occupied {
        destination: Coordinate,
        occupant: EntityId,
    },
}

impl GameError for MoveError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Immobile(_) | Self::OutOfBounds(_) | Self::OutsideGrid { .. } => {
                ErrorSeverity::Validation
            }
            Self::Blocked { .. } | Self::Occupied { .. } => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Immobile(_) => "MOVE_IMMOBILE",
            Self::OutOfBounds(_) => "MOVE_OUT_OF_BOUNDS",
            Self::OutsideGrid { .. } => "MOVE_OUTSIDE_GRID",
            Self::Blocked { .. } => "MOVE_BLOCKED",
            Self::Occupied { .. } => "MOVE_OCCUPIED",
        }
    }
}

/// Failure to place a new actor on the grid.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SpawnError {
    #[error("actor {0} is already tracked")]
    Duplicate(EntityId),

    #[error(transparent)]
    Grid(#[from] GridError),
}

impl GameError for SpawnError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Duplicate(_) => ErrorSeverity::Validation,
            Self::Grid(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Duplicate(_) => "SPAWN_DUPLICATE",
            Self::Grid(err) => err.error_code(),
        }
    }
}

/// Faults that stop the tick loop.
#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    #[error("visibility oracle fault: {0}")]
    Oracle(#[from] OracleError),

    #[error("decision function fault: {0}")]
    Decision(#[from] DecisionError),

    #[error("player input fault: {0}")]
    Input(#[from] InputError),
}

impl GameError for SimulationError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Oracle(err) => err.error_code(),
            Self::Decision(err) => err.error_code(),
            Self::Input(err) => err.error_code(),
        }
    }
}
