//! Collaborators the simulation consumes but does not implement.
//!
//! Visibility computation, autonomous decisions, player input and dialogs, and
//! grid persistence are reached only through the traits in this module, so the
//! core stays free of terminal, file and randomness dependencies.
mod decision;
mod error;
mod interface;
mod store;
mod visibility;

pub use decision::{DecisionFunction, Idle};
pub use error::{DecisionError, InputError, OracleError, StoreError};
pub use interface::{MenuChoice, PlayerInterface};
pub use store::{GridStore, MemoryGridStore};
pub use visibility::{RangeShape, VisibilityOracle, VisibleSet};
