//! One turn for one actor.
//!
//! The scheduler lends the acting actor and a [`TurnWorld`] to a
//! [`TurnResolver`], which returns the energy cost to debit. [`TurnWorld`]
//! only exposes the pending roster buffers, never the roster itself, so an
//! actor can spawn or dismiss others mid-tick without disturbing iteration.

use tracing::{debug, error, info, trace};

use crate::config::GameConfig;
use crate::env::{DecisionError, DecisionFunction, GridStore, MenuChoice, PlayerInterface};
use crate::error::GameError;
use crate::mirror::ObservedMirror;
use crate::state::{Actor, Capabilities, Coordinate, EntityId, Item, StepEffect, Tick, WorldGrid};

use super::turns::PendingQueues;
use super::{Direction, MoveError, PlayerCommand, SimulationError, SpawnError};

/// Experience granted by the debug command.
const DEBUG_EXPERIENCE: u32 = 15;

/// What happened during a turn besides the cost.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TurnOutcome {
    /// Cells whose content changed and must be redrawn.
    pub touched: Vec<Coordinate>,
    pub halt: bool,
}

/// Mutable view of the simulation handed to a resolving turn.
pub struct TurnWorld<'a> {
    grid: &'a mut WorldGrid,
    mirror: &'a mut ObservedMirror,
    queues: &'a mut PendingQueues,
    /// Roster membership as of the start of the resolution pass.
    resident: &'a [EntityId],
    store: &'a mut dyn GridStore,
    config: &'a GameConfig,
    clock: Tick,
    outcome: TurnOutcome,
}

impl<'a> TurnWorld<'a> {
    pub(crate) fn new(
        grid: &'a mut WorldGrid,
        mirror: &'a mut ObservedMirror,
        queues: &'a mut PendingQueues,
        resident: &'a [EntityId],
        store: &'a mut dyn GridStore,
        config: &'a GameConfig,
        clock: Tick,
    ) -> Self {
        Self {
            grid,
            mirror,
            queues,
            resident,
            store,
            config,
            clock,
            outcome: TurnOutcome::default(),
        }
    }

    pub(crate) fn finish(self) -> TurnOutcome {
        self.outcome
    }

    pub fn clock(&self) -> Tick {
        self.clock
    }

    pub fn config(&self) -> &GameConfig {
        self.config
    }

    pub fn grid(&self) -> &WorldGrid {
        self.grid
    }

    pub fn mirror(&self) -> &ObservedMirror {
        self.mirror
    }

    /// Marks a cell for redraw once the turn ends.
    pub fn touch(&mut self, coord: Coordinate) {
        if !self.outcome.touched.contains(&coord) {
            self.outcome.touched.push(coord);
        }
    }

    /// Stops the tick loop once the current tick has finished.
    pub fn request_halt(&mut self) {
        self.outcome.halt = true;
    }

    pub fn halt_requested(&self) -> bool {
        self.outcome.halt
    }

    /// Moves `actor` one step.
    ///
    /// The actor is erased from the mirror and the grid before its position
    /// changes, then registered at the destination, whose step effect fires.
    pub fn try_move(&mut self, actor: &mut Actor, direction: Direction) -> Result<Coordinate, MoveError> {
        if !actor.capabilities.contains(Capabilities::MOVABLE) {
            return Err(MoveError::Immobile(actor.id));
        }

        let origin = actor.position();
        let (dx, dy) = direction.delta();
        let destination = origin.offset(dx, dy)?;
        if !self.grid.contains(destination) {
            return Err(MoveError::OutsideGrid { destination });
        }
        if !self.grid.is_passable(destination) {
            return Err(MoveError::Blocked { destination });
        }
        if let Some(occupant) = self.grid.occupant(destination) {
            return Err(MoveError::Occupied {
                destination,
                occupant,
            });
        }

        self.mirror.clear(self.grid, actor);
        actor.set_position(destination);
        // Occupancy was checked above.
        if let Err(err) = self.grid.register_unit(actor.id, destination) {
            error!(target: "core::turn", actor = %actor.id, %err, "grid registration failed");
        }
        self.touch(origin);
        self.touch(destination);

        trace!(
            target: "core::turn",
            actor = %actor.id,
            from = %origin,
            to = %destination,
            "moved"
        );

        self.trigger_step_effect(actor, destination);
        Ok(destination)
    }

    fn trigger_step_effect(&mut self, actor: &Actor, at: Coordinate) {
        let effect = self
            .grid
            .cell(at)
            .and_then(|cell| cell.object.as_ref())
            .and_then(|object| object.effect);

        match effect {
            Some(StepEffect::SavePoint) if actor.is_player_controlled() => {
                match self.store.save_grid(self.grid) {
                    Ok(()) => info!(target: "core::turn", actor = %actor.id, at = %at, "game saved"),
                    Err(err) => error!(
                        target: "core::turn",
                        actor = %actor.id,
                        error_code = err.error_code(),
                        %err,
                        "save point failed to persist the grid"
                    ),
                }
            }
            Some(StepEffect::SavePoint) | None => {}
        }
    }

    /// Places a new actor on the grid and queues it for the roster.
    ///
    /// It joins scheduling at the start of the next tick. Ids already in the
    /// roster or already queued are rejected.
    pub fn spawn(&mut self, actor: Actor) -> Result<(), SpawnError> {
        if self.resident.contains(&actor.id) || self.queues.is_pending_add(actor.id) {
            return Err(SpawnError::Duplicate(actor.id));
        }
        self.grid.register_unit(actor.id, actor.position())?;
        self.touch(actor.position());
        self.queues.push_add(actor);
        Ok(())
    }

    /// Queues `id` for removal at the start of the next tick.
    pub fn depart(&mut self, id: EntityId) {
        self.queues.push_removal(id);
    }

    /// Items lying under `coord`, bottom first.
    pub fn items_at(&self, coord: Coordinate) -> &[Item] {
        self.grid.items_at(coord)
    }

    /// Lifts the whole pile off `coord`.
    pub fn take_items(&mut self, coord: Coordinate) -> Vec<Item> {
        self.touch(coord);
        self.grid.take_items(coord)
    }

    /// Puts `items` back on `coord`, keeping their order.
    pub fn put_items(&mut self, coord: Coordinate, items: Vec<Item>) {
        for item in items {
            if let Err(err) = self.grid.drop_item(coord, item) {
                error!(target: "core::turn", %err, "item could not be placed");
                return;
            }
        }
        self.touch(coord);
    }
}

/// Obtains exactly one action for an actor and reports its energy cost.
pub trait TurnResolver {
    fn resolve(&mut self, actor: &mut Actor, world: &mut TurnWorld<'_>) -> Result<i32, SimulationError>;
}

/// Default resolver: player-controlled actors are driven by the player
/// interface, everything else by the decision function.
pub struct ActionResolver<'a> {
    interface: &'a mut dyn PlayerInterface,
    decider: &'a mut dyn DecisionFunction,
}

impl<'a> ActionResolver<'a> {
    pub fn new(interface: &'a mut dyn PlayerInterface, decider: &'a mut dyn DecisionFunction) -> Self {
        Self { interface, decider }
    }

    fn player_turn(&mut self, actor: &mut Actor, world: &mut TurnWorld<'_>) -> Result<i32, SimulationError> {
        let command = loop {
            match self.interface.next_command(world.mirror())? {
                Some(command) => break command,
                None => trace!(target: "core::turn", actor = %actor.id, "input ignored"),
            }
        };
        debug!(target: "core::turn", actor = %actor.id, ?command, "player command");

        let config = world.config();
        let (move_cost, item_cost) = (config.move_cost, config.item_cost);
        let cost = match command {
            PlayerCommand::Move(direction) => {
                if let Err(err) = world.try_move(actor, direction) {
                    debug!(target: "core::turn", actor = %actor.id, %err, "move rejected");
                }
                move_cost
            }
            PlayerCommand::PickUp => {
                self.pick_up(actor, world);
                item_cost
            }
            PlayerCommand::OpenInventory => {
                let here = actor.position();
                let mut ground = world.take_items(here);
                self.interface.open_inventory(actor, &mut ground);
                world.put_items(here, ground);
                item_cost
            }
            PlayerCommand::Cancel => {
                if self.interface.open_menu() == MenuChoice::Quit {
                    world.request_halt();
                }
                0
            }
            PlayerCommand::Info => {
                let here = actor.position();
                self.interface
                    .message(&format!("[{}, {}]", here.x(), here.y()));
                0
            }
            PlayerCommand::GainExperience => {
                actor.gain_experience(DEBUG_EXPERIENCE);
                0
            }
        };

        self.describe_ground(actor, world);
        Ok(cost)
    }

    fn pick_up(&mut self, actor: &mut Actor, world: &mut TurnWorld<'_>) {
        let here = actor.position();
        let mut ground = world.take_items(here);
        if let [single] = ground.as_slice() {
            self.interface.message(&format!("Picked up {}.", single.name));
            actor.inventory.append(&mut ground);
        } else if !ground.is_empty() {
            self.interface.pick_up(actor, &mut ground);
        }
        world.put_items(here, ground);
    }

    fn describe_ground(&mut self, actor: &Actor, world: &TurnWorld<'_>) {
        match world.items_at(actor.position()) {
            [] => {}
            [item] => self.interface.message(&format!("You see a {} here.", item.name)),
            items => {
                let names: Vec<&str> = items.iter().map(|item| item.name.as_str()).collect();
                self.interface.message(&format!(
                    "You see {} items here: {}.",
                    items.len(),
                    names.join(", ")
                ));
            }
        }
    }

    fn autonomous_turn(&mut self, actor: &mut Actor, world: &mut TurnWorld<'_>) -> Result<i32, SimulationError> {
        let cost = self.decider.decide(actor, world)?;
        if cost < 0 {
            return Err(DecisionError::NegativeCost {
                actor: actor.id,
                cost,
            }
            .into());
        }
        Ok(cost)
    }
}

impl TurnResolver for ActionResolver<'_> {
    fn resolve(&mut self, actor: &mut Actor, world: &mut TurnWorld<'_>) -> Result<i32, SimulationError> {
        if actor.is_player_controlled() {
            self.player_turn(actor, world)
        } else {
            self.autonomous_turn(actor, world)
        }
    }
}
