//! Energy-based initiative with deferred roster mutation.
//!
//! Every tick each live actor gains `speed` energy; an actor holding at least
//! [`GameConfig::ACTIVATION_THRESHOLD`] takes one turn and pays its cost.
//! Actors are visited in roster order, a fixed round-robin, and energy is
//! never clamped. Roster membership only changes in [`TurnScheduler::drain_queues`].

use tracing::{debug, trace};

use crate::config::GameConfig;
use crate::env::{GridStore, VisibilityOracle};
use crate::mirror::{ActorLookup, ObservedMirror};
use crate::state::{Actor, EntityId, Tick, WorldGrid};

use super::{SimulationError, TurnResolver, TurnWorld};

/// Ordered staging buffers for roster mutation.
#[derive(Clone, Debug, Default)]
pub struct PendingQueues {
    adds: Vec<Actor>,
    removals: Vec<EntityId>,
}

impl PendingQueues {
    pub(crate) fn push_add(&mut self, actor: Actor) {
        self.adds.push(actor);
    }

    pub(crate) fn push_removal(&mut self, id: EntityId) {
        self.removals.push(id);
    }

    pub(crate) fn is_pending_add(&self, id: EntityId) -> bool {
        self.adds.iter().any(|actor| actor.id == id)
    }

    pub fn pending_adds(&self) -> &[Actor] {
        &self.adds
    }

    pub fn pending_removals(&self) -> &[EntityId] {
        &self.removals
    }

    pub fn is_empty(&self) -> bool {
        self.adds.is_empty() && self.removals.is_empty()
    }
}

/// Where the scheduler currently is within a tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum SchedulerPhase {
    #[default]
    Idle,
    DrainingQueues,
    Ticking,
    Resolving(EntityId),
}

/// Roster changes applied by one drain.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DrainReport {
    pub added: Vec<EntityId>,
    /// Actors that actually left the roster. Unknown ids are not listed.
    pub removed: Vec<Actor>,
}

/// Summary of one full tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub tick: Tick,
    pub added: Vec<EntityId>,
    pub removed: Vec<EntityId>,
    /// `(actor, cost)` for every turn taken, in resolution order.
    pub resolved: Vec<(EntityId, i32)>,
    pub halted: bool,
}

/// Borrowed collaborators for the resolution pass.
pub struct TurnContext<'a> {
    pub grid: &'a mut WorldGrid,
    pub mirror: &'a mut ObservedMirror,
    pub oracle: &'a dyn VisibilityOracle,
    pub store: &'a mut dyn GridStore,
    pub config: &'a GameConfig,
}

#[derive(Clone, Debug, Default)]
pub struct TurnScheduler {
    clock: Tick,
    roster: Vec<Actor>,
    queues: PendingQueues,
    phase: SchedulerPhase,
    player: Option<EntityId>,
}

impl TurnScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current timeline clock value.
    pub fn clock(&self) -> Tick {
        self.clock
    }

    pub fn phase(&self) -> SchedulerPhase {
        self.phase
    }

    pub fn roster(&self) -> &[Actor] {
        &self.roster
    }

    pub fn queues(&self) -> &PendingQueues {
        &self.queues
    }

    /// Actor receiving the periodic regeneration hook.
    pub fn player(&self) -> Option<EntityId> {
        self.player
    }

    pub fn designate_player(&mut self, id: Option<EntityId>) {
        self.player = id;
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.roster.iter().any(|actor| actor.id == id)
    }

    /// Looks an actor up in the roster, then among pending additions.
    pub fn actor(&self, id: EntityId) -> Option<&Actor> {
        self.roster
            .iter()
            .chain(self.queues.adds.iter())
            .find(|actor| actor.id == id)
    }

    pub fn actor_mut(&mut self, id: EntityId) -> Option<&mut Actor> {
        self.roster
            .iter_mut()
            .chain(self.queues.adds.iter_mut())
            .find(|actor| actor.id == id)
    }

    /// Stages `actor` for insertion at the next drain.
    pub fn enqueue_add(&mut self, actor: Actor) {
        trace!(target: "core::scheduler", actor = %actor.id, "add queued");
        self.queues.push_add(actor);
    }

    /// Stages removal of `id` at the next drain. Unknown ids are ignored then.
    pub fn enqueue_remove(&mut self, id: EntityId) {
        trace!(target: "core::scheduler", actor = %id, "removal queued");
        self.queues.push_removal(id);
    }

    /// Applies staged additions (in order) and then staged removals.
    pub fn drain_queues(&mut self) -> DrainReport {
        self.phase = SchedulerPhase::DrainingQueues;
        let mut report = DrainReport::default();

        for actor in self.queues.adds.drain(..) {
            report.added.push(actor.id);
            self.roster.push(actor);
        }

        for id in self.queues.removals.drain(..) {
            if let Some(index) = self.roster.iter().position(|actor| actor.id == id) {
                report.removed.push(self.roster.remove(index));
            }
        }

        if !report.added.is_empty() || !report.removed.is_empty() {
            debug!(
                target: "core::scheduler",
                added = report.added.len(),
                removed = report.removed.len(),
                roster = self.roster.len(),
                "queues drained"
            );
        }
        report
    }

    /// Advances the clock and fires the periodic regeneration hook.
    pub fn tick(&mut self, config: &GameConfig) -> Tick {
        self.phase = SchedulerPhase::Ticking;
        self.clock = self.clock.next();

        if self.clock.is_every(config.regen_interval) {
            if let Some(id) = self.player {
                if let Some(player) = self.roster.iter_mut().find(|actor| actor.id == id) {
                    player.regenerate();
                    trace!(target: "core::scheduler", actor = %id, tick = %self.clock, "regenerated");
                }
            }
        }
        self.clock
    }

    /// Accrues energy for every live actor and resolves the ready ones.
    ///
    /// Stops after the current actor when a turn asks to halt. Redraws the
    /// mirror after each turn: around the focal actor when it acted, or just
    /// the touched cells otherwise.
    pub fn accrue_and_resolve(
        &mut self,
        ctx: TurnContext<'_>,
        resolver: &mut dyn TurnResolver,
    ) -> Result<(Vec<(EntityId, i32)>, bool), SimulationError> {
        let TurnContext {
            grid,
            mirror,
            oracle,
            store,
            config,
        } = ctx;
        let mut resolved = Vec::new();
        let resident: Vec<EntityId> = self.roster.iter().map(|actor| actor.id).collect();

        for index in 0..self.roster.len() {
            let actor = &mut self.roster[index];
            if !actor.is_alive() {
                continue;
            }

            actor.energy += actor.speed;
            trace!(
                target: "core::scheduler",
                actor = %actor.id,
                energy = actor.energy,
                "energy accrued"
            );
            if actor.energy < GameConfig::ACTIVATION_THRESHOLD {
                continue;
            }

            let id = actor.id;
            self.phase = SchedulerPhase::Resolving(id);
            let mut world = TurnWorld::new(
                &mut *grid,
                &mut *mirror,
                &mut self.queues,
                &resident,
                &mut *store,
                config,
                self.clock,
            );
            let cost = resolver.resolve(actor, &mut world)?;
            let outcome = world.finish();

            actor.energy -= cost;
            debug!(
                target: "core::scheduler",
                actor = %id,
                cost,
                energy = actor.energy,
                tick = %self.clock,
                "turn resolved"
            );
            resolved.push((id, cost));

            let origin = actor.position();
            if mirror.focal() == Some(id) && !outcome.touched.is_empty() {
                mirror.refresh(
                    grid,
                    &*self,
                    oracle,
                    origin,
                    config.sight_range,
                    config.sight_shape,
                )?;
            } else {
                mirror.redraw_touched(grid, &*self, &outcome.touched);
            }

            if outcome.halt {
                debug!(target: "core::scheduler", actor = %id, "halt requested");
                self.phase = SchedulerPhase::Idle;
                return Ok((resolved, true));
            }
        }

        self.phase = SchedulerPhase::Idle;
        Ok((resolved, false))
    }
}

impl ActorLookup for TurnScheduler {
    fn actor(&self, id: EntityId) -> Option<&Actor> {
        TurnScheduler::actor(self, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Capabilities, Coordinate, ResourceMeter};

    fn actor(id: u32, speed: i32) -> Actor {
        Actor::new(
            EntityId(id),
            format!("a{id}"),
            'a',
            Coordinate::planar(id as i32, 0).unwrap(),
            speed,
            Capabilities::MOVABLE,
        )
    }

    #[test]
    fn drain_preserves_enqueue_order() {
        let mut scheduler = TurnScheduler::new();
        scheduler.enqueue_add(actor(3, 10));
        scheduler.enqueue_add(actor(1, 10));
        scheduler.enqueue_add(actor(2, 10));

        let report = scheduler.drain_queues();

        let order: Vec<u32> = scheduler.roster().iter().map(|a| a.id.0).collect();
        assert_eq!(order, vec![3, 1, 2]);
        assert_eq!(report.added, vec![EntityId(3), EntityId(1), EntityId(2)]);
        assert!(scheduler.queues().is_empty());
    }

    #[test]
    fn removing_unknown_actor_is_a_no_op() {
        let mut scheduler = TurnScheduler::new();
        scheduler.enqueue_add(actor(1, 10));
        scheduler.drain_queues();

        scheduler.enqueue_remove(EntityId(42));
        scheduler.enqueue_remove(EntityId(1));
        scheduler.enqueue_remove(EntityId(1));
        let report = scheduler.drain_queues();

        assert_eq!(report.removed.len(), 1);
        assert!(scheduler.roster().is_empty());
    }

    #[test]
    fn actor_lookup_sees_pending_additions() {
        let mut scheduler = TurnScheduler::new();
        scheduler.enqueue_add(actor(5, 10));
        assert!(scheduler.actor(EntityId(5)).is_some());
        assert!(!scheduler.contains(EntityId(5)));
    }

    #[test]
    fn regeneration_fires_on_interval_for_player_only() {
        let config = GameConfig::new().with_regen_interval(3);
        let mut scheduler = TurnScheduler::new();
        let hurt = ResourceMeter::new(1, 10);
        scheduler.enqueue_add(actor(0, 0).with_resources(hurt, hurt));
        scheduler.enqueue_add(actor(1, 0).with_resources(hurt, hurt));
        scheduler.drain_queues();
        scheduler.designate_player(Some(EntityId(0)));

        for _ in 0..6 {
            scheduler.tick(&config);
        }

        assert_eq!(scheduler.clock(), Tick(6));
        assert_eq!(scheduler.roster()[0].health.current, 3);
        assert_eq!(scheduler.roster()[1].health.current, 1);
    }
}
