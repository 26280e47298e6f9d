//! Map data loader.
//!
//! A map file draws the terrain as rows of legend characters and lists what
//! stands on top of it: static objects, items, the player spawn and NPC
//! spawns. Actors are returned alongside the grid rather than registered on
//! it; spawning them is the simulation's job.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use umbra_core::{
    Actor, BaseType, Capabilities, Cell, Coordinate, EntityId, Item, ItemId, ResourceMeter,
    StaticObject, StepEffect, Terrain, TerrainFlags, TerrainHandle, WorldGrid,
};

use crate::loaders::{LoadResult, read_file};

/// Speed given to spawns that do not declare one.
const DEFAULT_SPEED: i32 = 100;

/// Legend entry: one terrain type keyed by the character used in `rows`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TerrainSpec {
    name: String,
    glyph: char,
    #[serde(default = "yes")]
    passable: bool,
    #[serde(default = "yes")]
    transparent: bool,
}

fn yes() -> bool {
    true
}

fn default_speed() -> i32 {
    DEFAULT_SPEED
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ObjectSpec {
    x: i32,
    y: i32,
    name: String,
    glyph: char,
    /// Effect name; falls back to the object name when absent.
    #[serde(default)]
    effect: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ItemSpec {
    x: i32,
    y: i32,
    name: String,
    #[serde(default = "unclassified")]
    base_type: BaseType,
    #[serde(default)]
    id: Option<u32>,
}

fn unclassified() -> BaseType {
    BaseType::Unclassified
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PlayerSpec {
    x: i32,
    y: i32,
    name: String,
    #[serde(default = "default_speed")]
    speed: i32,
    #[serde(default)]
    health: u32,
    #[serde(default)]
    mana: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct NpcSpec {
    #[serde(default)]
    id: Option<u32>,
    x: i32,
    y: i32,
    name: String,
    glyph: char,
    #[serde(default = "default_speed")]
    speed: i32,
    #[serde(default)]
    health: u32,
    /// Stationary NPCs never move.
    #[serde(default)]
    stationary: bool,
}

/// Map data structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct MapDataRon {
    #[serde(default)]
    layer: i32,
    terrain: BTreeMap<char, TerrainSpec>,
    rows: Vec<String>,
    #[serde(default)]
    objects: Vec<ObjectSpec>,
    #[serde(default)]
    items: Vec<ItemSpec>,
    #[serde(default)]
    player: Option<PlayerSpec>,
    #[serde(default)]
    npcs: Vec<NpcSpec>,
}

/// A loaded map: the ground truth grid plus the actors waiting to be spawned.
#[derive(Debug, Clone)]
pub struct MapData {
    pub grid: WorldGrid,
    pub player: Option<Actor>,
    pub npcs: Vec<Actor>,
}

impl MapData {
    /// Player first, then NPCs in file order.
    pub fn spawns(self) -> impl Iterator<Item = Actor> {
        self.player.into_iter().chain(self.npcs)
    }
}

/// Loader for map data from RON files.
pub struct MapLoader;

impl MapLoader {
    /// Load map data from a RON file.
    pub fn load(path: &Path) -> LoadResult<MapData> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse map data from RON text.
    pub fn parse(content: &str) -> LoadResult<MapData> {
        let data: MapDataRon = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse map RON: {}", e))?;

        let mut grid = build_grid(&data)?;

        for object in data.objects {
            let at = coordinate(object.x, object.y, data.layer)?;
            let effect = match object.effect.as_deref() {
                Some(name) => {
                    let effect = StepEffect::resolve(name);
                    if effect.is_none() {
                        warn!(target: "content::map", object = %object.name, effect = name, "unknown step effect");
                    }
                    effect
                }
                None => StepEffect::resolve(&object.name),
            };
            let placed = StaticObject::named(object.name, object.glyph).with_effect(effect);
            grid.place_object(at, placed)
                .map_err(|e| anyhow::anyhow!("Failed to place object: {}", e))?;
        }

        let mut next_item = 0;
        for item in data.items {
            let at = coordinate(item.x, item.y, data.layer)?;
            let id = item.id.unwrap_or(next_item);
            next_item = next_item.max(id) + 1;
            grid.drop_item(at, Item::new(ItemId(id), item.name, item.base_type))
                .map_err(|e| anyhow::anyhow!("Failed to place item: {}", e))?;
        }

        let player = match data.player {
            Some(spec) => {
                let position = coordinate(spec.x, spec.y, data.layer)?;
                Some(
                    Actor::new(
                        EntityId::PLAYER,
                        spec.name,
                        '@',
                        position,
                        spec.speed,
                        Capabilities::MOVABLE
                            | Capabilities::COLLIDABLE
                            | Capabilities::PLAYER_CONTROLLED,
                    )
                    .with_resources(
                        ResourceMeter::full(spec.health),
                        ResourceMeter::full(spec.mana),
                    ),
                )
            }
            None => None,
        };

        let mut npcs = Vec::with_capacity(data.npcs.len());
        let mut next_id = EntityId::PLAYER.0 + 1;
        for spec in data.npcs {
            let id = spec.id.unwrap_or(next_id);
            if EntityId(id).is_player() {
                anyhow::bail!("NPC {} uses the reserved player id", spec.name);
            }
            next_id = next_id.max(id) + 1;

            let mut capabilities = Capabilities::COLLIDABLE;
            if !spec.stationary {
                capabilities |= Capabilities::MOVABLE;
            }
            let position = coordinate(spec.x, spec.y, data.layer)?;
            npcs.push(
                Actor::new(EntityId(id), spec.name, spec.glyph, position, spec.speed, capabilities)
                    .with_resources(ResourceMeter::full(spec.health), ResourceMeter::default()),
            );
        }

        debug!(
            target: "content::map",
            width = grid.width(),
            height = grid.height(),
            npcs = npcs.len(),
            "map loaded"
        );

        Ok(MapData { grid, player, npcs })
    }
}

fn build_grid(data: &MapDataRon) -> LoadResult<WorldGrid> {
    let mut terrains = Vec::with_capacity(data.terrain.len());
    let mut handles = BTreeMap::new();
    for (index, (symbol, spec)) in data.terrain.iter().enumerate() {
        let mut flags = TerrainFlags::empty();
        flags.set(TerrainFlags::PASSABLE, spec.passable);
        flags.set(TerrainFlags::TRANSPARENT, spec.transparent);
        terrains.push(Terrain::new(spec.name.clone(), spec.glyph, flags));
        handles.insert(*symbol, TerrainHandle(index as u16));
    }

    let height = data.rows.len();
    let width = data.rows.first().map_or(0, |row| row.chars().count());
    let mut cells = Vec::with_capacity(width * height);
    for (y, row) in data.rows.iter().enumerate() {
        if row.chars().count() != width {
            anyhow::bail!(
                "Map row {} has {} columns, expected {}",
                y,
                row.chars().count(),
                width
            );
        }
        for (x, symbol) in row.chars().enumerate() {
            let handle = handles.get(&symbol).copied().ok_or_else(|| {
                anyhow::anyhow!("Unknown terrain symbol '{}' at ({}, {})", symbol, x, y)
            })?;
            cells.push(Cell::new(handle));
        }
    }

    WorldGrid::from_cells(data.layer, width as i32, height as i32, terrains, cells)
        .map_err(|e| anyhow::anyhow!("Invalid map grid: {}", e))
}

fn coordinate(x: i32, y: i32, layer: i32) -> LoadResult<Coordinate> {
    Coordinate::new(x, y, layer).map_err(|e| anyhow::anyhow!("Invalid map position: {}", e))
}
