//! Decision function for NPCs: stumble around at random.

use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::trace;
use umbra_core::{Actor, Capabilities, DecisionError, DecisionFunction, Direction, TurnWorld};

/// Moves to a random open neighbour, or waits when boxed in.
///
/// Every turn costs `cost` energy whether or not a step was taken.
pub struct DrunkardWalk {
    rng: StdRng,
    cost: i32,
    /// Chance to stay put even when a step is possible.
    idle_chance: f64,
}

impl DrunkardWalk {
    pub const DEFAULT_COST: i32 = 100;

    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng,
            cost: Self::DEFAULT_COST,
            idle_chance: 0.25,
        }
    }
}

impl DecisionFunction for DrunkardWalk {
    fn decide(&mut self, actor: &mut Actor, world: &mut TurnWorld<'_>) -> Result<i32, DecisionError> {
        if !actor.capabilities.contains(Capabilities::MOVABLE) || self.rng.gen_bool(self.idle_chance) {
            return Ok(self.cost);
        }

        let mut directions = Direction::ALL;
        directions.shuffle(&mut self.rng);
        for direction in directions {
            if let Ok(to) = world.try_move(actor, direction) {
                trace!(target: "client::npc", actor = %actor.id, to = %to, "wandered");
                break;
            }
        }
        Ok(self.cost)
    }
}
