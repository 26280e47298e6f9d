//! Tick loop and turn resolution.
//!
//! [`Simulation`] owns the grid, the observed mirror and the scheduler; every
//! collaborator is passed in per call. One [`Simulation::step`] is one tick:
//! drain the roster queues, advance the clock, then accrue energy and resolve
//! turns in roster order.

mod command;
mod errors;
mod resolver;
mod turns;

pub use command::{Direction, PlayerCommand};
pub use errors::{MoveError, SimulationError, SpawnError};
pub use resolver::{ActionResolver, TurnOutcome, TurnResolver, TurnWorld};
pub use turns::{
    DrainReport, PendingQueues, SchedulerPhase, TickReport, TurnContext, TurnScheduler,
};

use tracing::{debug, info};

use crate::config::GameConfig;
use crate::env::{GridStore, VisibilityOracle};
use crate::mirror::{ItemGlyphs, ObservedMirror};
use crate::state::{Actor, EntityId, Tick, WorldGrid};

/// Explicitly owned simulation context.
pub struct Simulation {
    config: GameConfig,
    grid: WorldGrid,
    mirror: ObservedMirror,
    scheduler: TurnScheduler,
    halted: bool,
}

impl Simulation {
    pub fn new(config: GameConfig, grid: WorldGrid) -> Self {
        let mirror = ObservedMirror::for_grid(&grid, &config);
        Self {
            config,
            grid,
            mirror,
            scheduler: TurnScheduler::new(),
            halted: false,
        }
    }

    pub fn with_glyphs(mut self, glyphs: ItemGlyphs) -> Self {
        self.mirror = self.mirror.with_glyphs(glyphs);
        self
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &WorldGrid {
        &self.grid
    }

    pub fn mirror(&self) -> &ObservedMirror {
        &self.mirror
    }

    pub fn mirror_mut(&mut self) -> &mut ObservedMirror {
        &mut self.mirror
    }

    pub fn scheduler(&self) -> &TurnScheduler {
        &self.scheduler
    }

    pub fn clock(&self) -> Tick {
        self.scheduler.clock()
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn actor(&self, id: EntityId) -> Option<&Actor> {
        self.scheduler.actor(id)
    }

    /// Registers `actor` on the grid and queues it for the roster.
    ///
    /// The first player-controlled actor spawned becomes the regeneration
    /// target and the mirror's focal actor.
    pub fn spawn(&mut self, actor: Actor) -> Result<(), SpawnError> {
        if self.scheduler.actor(actor.id).is_some() {
            return Err(SpawnError::Duplicate(actor.id));
        }
        self.grid.register_unit(actor.id, actor.position())?;

        if actor.is_player_controlled() && self.scheduler.player().is_none() {
            info!(target: "core::simulation", actor = %actor.id, "player designated");
            self.scheduler.designate_player(Some(actor.id));
            self.mirror.set_focal(Some(actor.id));
        }
        self.scheduler.enqueue_add(actor);
        Ok(())
    }

    /// Deferred departure; the actor keeps its turns until the next tick starts.
    pub fn depart(&mut self, id: EntityId) {
        self.scheduler.enqueue_remove(id);
    }

    /// Immediate death plus deferred departure. Returns false for unknown ids.
    pub fn kill(&mut self, id: EntityId) -> bool {
        let Some(actor) = self.scheduler.actor_mut(id) else {
            return false;
        };
        actor.kill();
        self.scheduler.enqueue_remove(id);
        true
    }

    /// Draws the initial view around the focal actor.
    pub fn focus(&mut self, oracle: &dyn VisibilityOracle) -> Result<(), SimulationError> {
        let Some(origin) = self
            .mirror
            .focal()
            .and_then(|id| self.scheduler.actor(id))
            .map(Actor::position)
        else {
            return Ok(());
        };
        self.mirror.refresh(
            &mut self.grid,
            &self.scheduler,
            oracle,
            origin,
            self.config.sight_range,
            self.config.sight_shape,
        )?;
        Ok(())
    }

    /// Runs one tick.
    pub fn step(
        &mut self,
        resolver: &mut dyn TurnResolver,
        oracle: &dyn VisibilityOracle,
        store: &mut dyn GridStore,
    ) -> Result<TickReport, SimulationError> {
        let drained = self.scheduler.drain_queues();
        for departed in &drained.removed {
            self.mirror.clear(&mut self.grid, departed);
            if self.scheduler.player() == Some(departed.id) {
                self.scheduler.designate_player(None);
                self.mirror.set_focal(None);
            }
        }

        let tick = self.scheduler.tick(&self.config);
        let (resolved, halted) = self.scheduler.accrue_and_resolve(
            TurnContext {
                grid: &mut self.grid,
                mirror: &mut self.mirror,
                oracle,
                store,
                config: &self.config,
            },
            resolver,
        )?;
        self.halted = halted;

        debug!(
            target: "core::simulation",
            tick = %tick,
            turns = resolved.len(),
            halted,
            "tick complete"
        );

        Ok(TickReport {
            tick,
            added: drained.added,
            removed: drained.removed.iter().map(|actor| actor.id).collect(),
            resolved,
            halted,
        })
    }

    /// Steps until a turn requests a halt. Returns the final clock.
    pub fn run(
        &mut self,
        resolver: &mut dyn TurnResolver,
        oracle: &dyn VisibilityOracle,
        store: &mut dyn GridStore,
    ) -> Result<Tick, SimulationError> {
        self.halted = false;
        while !self.halted {
            self.step(resolver, oracle, store)?;
        }
        info!(target: "core::simulation", tick = %self.clock(), "simulation halted");
        Ok(self.clock())
    }
}
