//! Plain data types shared by the grid, the scheduler and the mirror.
mod actor;
mod common;
mod coordinate;
mod item;
mod world;

pub use actor::{Actor, Capabilities, Silhouette};
pub use common::{EntityId, ResourceMeter, Tick};
pub use coordinate::{Axis, Coordinate, RangeError, Window};
pub use item::{BaseType, Item, ItemId};
pub use world::{
    Cell, GridError, StaticObject, StepEffect, Terrain, TerrainFlags, TerrainHandle, WorldGrid,
};
