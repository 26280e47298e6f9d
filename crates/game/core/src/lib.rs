//! Turn scheduling, deferred roster mutation and fog-of-war mirroring.
//!
//! `umbra-core` holds the rules of the simulation and nothing that touches a
//! terminal, a file or a random source. Those arrive through the collaborator
//! traits in [`env`]. All mutation during play flows through
//! [`engine::Simulation`], and supporting crates depend on the types
//! re-exported here.
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod mirror;
pub mod state;

pub use config::GameConfig;
pub use engine::{
    ActionResolver, Direction, DrainReport, MoveError, PendingQueues, PlayerCommand,
    SchedulerPhase, Simulation, SimulationError, SpawnError, TickReport, TurnContext,
    TurnOutcome, TurnResolver, TurnScheduler, TurnWorld,
};
pub use env::{
    DecisionError, DecisionFunction, GridStore, Idle, InputError, MemoryGridStore, MenuChoice,
    OracleError, PlayerInterface, RangeShape, StoreError, VisibilityOracle, VisibleSet,
};
pub use error::{ErrorSeverity, GameError};
pub use mirror::{ActorLookup, ItemGlyphs, ObservedCell, ObservedMirror};
pub use state::{
    Actor, Axis, BaseType, Capabilities, Cell, Coordinate, EntityId, GridError, Item, ItemId,
    RangeError, ResourceMeter, Silhouette, StaticObject, StepEffect, Terrain, TerrainFlags,
    TerrainHandle, Tick, Window, WorldGrid,
};
