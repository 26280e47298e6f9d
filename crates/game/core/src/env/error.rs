//! Collaborator errors.
//!
//! Every trait in [`crate::env`] reports failure through one of these types.
//! None of them has a retry policy inside the scheduler: they are carried out
//! of the tick loop as they are.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{Coordinate, EntityId, GridError};

/// Visibility oracle failures.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum OracleError {
    /// Origin is not a cell of the queried grid.
    #[error("visibility origin {0} is outside the grid")]
    OriginOutsideGrid(Coordinate),

    /// Any other failure inside the oracle implementation.
    #[error("visibility oracle failed: {0}")]
    Backend(String),
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::OriginOutsideGrid(_) => "ORACLE_ORIGIN_OUTSIDE_GRID",
            Self::Backend(_) => "ORACLE_BACKEND",
        }
    }
}

/// Autonomous decision function failures.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DecisionError {
    /// Reported energy cost was negative.
    #[error("decision for {actor} reported negative cost {cost}")]
    NegativeCost { actor: EntityId, cost: i32 },

    #[error("decision function failed for {actor}: {reason}")]
    Failed { actor: EntityId, reason: String },
}

impl GameError for DecisionError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NegativeCost { .. } => "DECISION_NEGATIVE_COST",
            Self::Failed { .. } => "DECISION_FAILED",
        }
    }
}

/// Player input failures.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    /// The event stream ended; no further commands will arrive.
    #[error("input stream closed")]
    Closed,

    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

impl GameError for InputError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Closed => "INPUT_CLOSED",
            Self::Io(_) => "INPUT_IO",
        }
    }
}

/// Persistence collaborator failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("grid storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("grid encoding failed: {0}")]
    Encode(String),

    #[error("grid decoding failed: {0}")]
    Decode(String),

    /// Stored grid decoded but breaks a structural invariant.
    #[error("stored grid is invalid: {0}")]
    Invalid(#[from] GridError),
}

impl GameError for StoreError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Io(_) => ErrorSeverity::Recoverable,
            Self::Encode(_) => ErrorSeverity::Internal,
            Self::Decode(_) | Self::Invalid(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Io(_) => "STORE_IO",
            Self::Encode(_) => "STORE_ENCODE",
            Self::Decode(_) => "STORE_DECODE",
            Self::Invalid(_) => "STORE_INVALID",
        }
    }
}
