//! Ground-truth world state.
//!
//! The grid is authoritative for terrain, occupancy, objects and items. The
//! visibility flag it carries per cell is only a rendering cache maintained by
//! [`crate::mirror::ObservedMirror`].
pub mod types;

pub use types::{
    Actor, Axis, BaseType, Capabilities, Cell, Coordinate, EntityId, GridError, Item, ItemId,
    RangeError, ResourceMeter, Silhouette, StaticObject, StepEffect, Terrain, TerrainFlags,
    TerrainHandle, Tick, Window, WorldGrid,
};
