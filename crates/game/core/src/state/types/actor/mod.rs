use bitflags::bitflags;

use super::{Coordinate, EntityId, Item, ResourceMeter};

bitflags! {
    /// What an actor is able to do or how it interacts with the grid.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Capabilities: u8 {
        const MOVABLE = 1 << 0;
        const COLLIDABLE = 1 << 1;
        const PLAYER_CONTROLLED = 1 << 2;
        const HAS_STEP_EFFECT = 1 << 3;
    }
}

/// A unit in the roster.
///
/// `position` always equals the cell the grid has the actor registered in;
/// only the grid-aware code in this crate moves it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Actor {
    pub id: EntityId,
    pub name: String,
    pub glyph: char,
    position: Coordinate,
    /// Signed initiative counter. Never clamped.
    pub energy: i32,
    /// Energy added every tick.
    pub speed: i32,
    pub capabilities: Capabilities,
    alive: bool,
    pub health: ResourceMeter,
    pub mana: ResourceMeter,
    pub inventory: Vec<Item>,
    pub experience: u32,
}

impl Actor {
    pub fn new(
        id: EntityId,
        name: impl Into<String>,
        glyph: char,
        position: Coordinate,
        speed: i32,
        capabilities: Capabilities,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            glyph,
            position,
            energy: 0,
            speed,
            capabilities,
            alive: true,
            health: ResourceMeter::default(),
            mana: ResourceMeter::default(),
            inventory: Vec::new(),
            experience: 0,
        }
    }

    pub fn with_resources(mut self, health: ResourceMeter, mana: ResourceMeter) -> Self {
        self.health = health;
        self.mana = mana;
        self
    }

    pub fn with_energy(mut self, energy: i32) -> Self {
        self.energy = energy;
        self
    }

    pub fn position(&self) -> Coordinate {
        self.position
    }

    pub(crate) fn set_position(&mut self, position: Coordinate) {
        self.position = position;
    }

    pub fn is_player_controlled(&self) -> bool {
        self.capabilities.contains(Capabilities::PLAYER_CONTROLLED)
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Immediate death. The actor stays in the roster until its removal is
    /// drained but no longer accrues energy or acts.
    pub fn kill(&mut self) {
        self.alive = false;
    }

    /// Periodic regeneration hook: one point of health and mana.
    pub fn regenerate(&mut self) {
        self.health.restore(1);
        self.mana.restore(1);
    }

    pub fn gain_experience(&mut self, amount: u32) {
        self.experience = self.experience.saturating_add(amount);
    }

    /// Detached copy of what an observer sees of this actor.
    pub fn silhouette(&self) -> Silhouette {
        Silhouette {
            id: self.id,
            name: self.name.clone(),
            glyph: self.glyph,
            capabilities: self.capabilities,
            position: self.position,
            health: self.health,
        }
    }
}

/// Last-seen image of an actor, stored by the observed mirror.
///
/// Owns all of its data; later changes to the live actor never show up here.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Silhouette {
    pub id: EntityId,
    pub name: String,
    pub glyph: char,
    pub capabilities: Capabilities,
    pub position: Coordinate,
    pub health: ResourceMeter,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goblin() -> Actor {
        Actor::new(
            EntityId(4),
            "goblin",
            'g',
            Coordinate::planar(3, 3).unwrap(),
            12,
            Capabilities::MOVABLE | Capabilities::COLLIDABLE,
        )
        .with_resources(ResourceMeter::new(5, 10), ResourceMeter::new(10, 10))
    }

    #[test]
    fn regenerate_restores_one_point_clamped() {
        let mut actor = goblin();
        actor.regenerate();
        assert_eq!(actor.health.current, 6);
        assert_eq!(actor.mana.current, 10);
    }

    #[test]
    fn silhouette_is_detached_from_live_actor() {
        let mut actor = goblin();
        let seen = actor.silhouette();

        actor.name.push_str(" chieftain");
        actor.health.current = 1;
        actor.set_position(Coordinate::planar(9, 9).unwrap());

        assert_eq!(seen.name, "goblin");
        assert_eq!(seen.health.current, 5);
        assert_eq!(seen.position, Coordinate::planar(3, 3).unwrap());
    }

    #[test]
    fn kill_is_immediate() {
        let mut actor = goblin();
        assert!(actor.is_alive());
        actor.kill();
        assert!(!actor.is_alive());
    }
}
