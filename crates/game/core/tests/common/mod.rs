#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};

use umbra_core::{
    Actor, Capabilities, Coordinate, DecisionError, DecisionFunction, Direction, EntityId,
    InputError, MenuChoice, ObservedMirror, OracleError, PlayerCommand, PlayerInterface,
    RangeShape, SimulationError, Terrain, TerrainFlags, TerrainHandle, Tick, TurnResolver,
    TurnWorld, VisibilityOracle, VisibleSet, WorldGrid,
};

pub const FLOOR: TerrainHandle = TerrainHandle(0);
pub const WALL: TerrainHandle = TerrainHandle(1);

pub fn at(x: i32, y: i32) -> Coordinate {
    Coordinate::planar(x, y).unwrap()
}

pub fn open_grid(width: i32, height: i32) -> WorldGrid {
    let palette = vec![
        Terrain::new(
            "floor",
            '.',
            TerrainFlags::PASSABLE | TerrainFlags::TRANSPARENT,
        ),
        Terrain::new("wall", '#', TerrainFlags::empty()),
    ];
    WorldGrid::new(0, width, height, palette, FLOOR).unwrap()
}

pub fn npc(id: u32, x: i32, y: i32, speed: i32) -> Actor {
    Actor::new(
        EntityId(id),
        format!("npc{id}"),
        'o',
        at(x, y),
        speed,
        Capabilities::MOVABLE | Capabilities::COLLIDABLE,
    )
}

pub fn player(x: i32, y: i32, speed: i32) -> Actor {
    Actor::new(
        EntityId::PLAYER,
        "hero",
        '@',
        at(x, y),
        speed,
        Capabilities::MOVABLE | Capabilities::COLLIDABLE | Capabilities::PLAYER_CONTROLLED,
    )
}

/// Lights every in-grid cell within the shape, ignoring walls.
pub struct OpenSky;

impl VisibilityOracle for OpenSky {
    fn compute_visible(
        &self,
        grid: &WorldGrid,
        origin: Coordinate,
        range: u32,
        _symmetric: bool,
        shape: RangeShape,
    ) -> Result<VisibleSet, OracleError> {
        let r = range as i32;
        let mut lit = VisibleSet::new();
        for y in origin.y() - r..=origin.y() + r {
            for x in origin.x() - r..=origin.x() + r {
                if grid.in_bounds(x, y) && shape.within(x - origin.x(), y - origin.y(), range) {
                    lit.insert(x, y);
                }
            }
        }
        Ok(lit)
    }
}

/// Oracle that always fails.
pub struct BrokenOracle;

impl VisibilityOracle for BrokenOracle {
    fn compute_visible(
        &self,
        _grid: &WorldGrid,
        _origin: Coordinate,
        _range: u32,
        _symmetric: bool,
        _shape: RangeShape,
    ) -> Result<VisibleSet, OracleError> {
        Err(OracleError::Backend("lens cracked".into()))
    }
}

pub type TurnHook = Box<dyn FnMut(&mut Actor, &mut TurnWorld<'_>)>;

/// Resolver charging a fixed cost per actor and recording every turn.
pub struct RecordingResolver {
    pub default_cost: i32,
    pub costs: HashMap<EntityId, i32>,
    /// `(tick, actor, energy before debit)` per resolved turn.
    pub turns: Vec<(Tick, EntityId, i32)>,
    pub hook: Option<TurnHook>,
}

impl RecordingResolver {
    pub fn new(default_cost: i32) -> Self {
        Self {
            default_cost,
            costs: HashMap::new(),
            turns: Vec::new(),
            hook: None,
        }
    }

    pub fn with_cost(mut self, id: EntityId, cost: i32) -> Self {
        self.costs.insert(id, cost);
        self
    }

    pub fn with_hook(mut self, hook: impl FnMut(&mut Actor, &mut TurnWorld<'_>) + 'static) -> Self {
        self.hook = Some(Box::new(hook));
        self
    }

    pub fn turns_on(&self, tick: u64) -> Vec<EntityId> {
        self.turns
            .iter()
            .filter(|(t, _, _)| *t == Tick(tick))
            .map(|(_, id, _)| *id)
            .collect()
    }
}

impl TurnResolver for RecordingResolver {
    fn resolve(&mut self, actor: &mut Actor, world: &mut TurnWorld<'_>) -> Result<i32, SimulationError> {
        self.turns.push((world.clock(), actor.id, actor.energy));
        if let Some(hook) = self.hook.as_mut() {
            hook(actor, world);
        }
        Ok(self.costs.get(&actor.id).copied().unwrap_or(self.default_cost))
    }
}

/// Player interface replaying a fixed list of decoded inputs.
#[derive(Default)]
pub struct ScriptedInterface {
    pub inputs: VecDeque<Option<PlayerCommand>>,
    pub messages: Vec<String>,
    pub menu: MenuChoice,
    pub inventory_opened: usize,
}

impl ScriptedInterface {
    pub fn new(inputs: impl IntoIterator<Item = Option<PlayerCommand>>) -> Self {
        Self {
            inputs: inputs.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn commands(commands: impl IntoIterator<Item = PlayerCommand>) -> Self {
        Self::new(commands.into_iter().map(Some))
    }
}

impl PlayerInterface for ScriptedInterface {
    fn next_command(&mut self, _view: &ObservedMirror) -> Result<Option<PlayerCommand>, InputError> {
        self.inputs.pop_front().ok_or(InputError::Closed)
    }

    fn message(&mut self, text: &str) {
        self.messages.push(text.to_string());
    }

    fn open_inventory(&mut self, _actor: &mut Actor, _ground: &mut Vec<umbra_core::Item>) {
        self.inventory_opened += 1;
    }

    fn open_menu(&mut self) -> MenuChoice {
        self.menu
    }
}

/// Decision function stepping in one direction and charging a fixed cost.
pub struct Walk {
    pub direction: Direction,
    pub cost: i32,
}

impl DecisionFunction for Walk {
    fn decide(&mut self, actor: &mut Actor, world: &mut TurnWorld<'_>) -> Result<i32, DecisionError> {
        let _ = world.try_move(actor, self.direction);
        Ok(self.cost)
    }
}
