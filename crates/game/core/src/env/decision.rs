use crate::engine::TurnWorld;
use crate::state::Actor;

use super::DecisionError;

/// External "choose an action" function for autonomous actors.
///
/// Runs synchronously inside the actor's turn and must not block. The actor is
/// lent mutably and `world` offers the same primitives the player path uses
/// (moving, spawning, departing). The returned value is the energy cost
/// charged to the actor and must not be negative.
pub trait DecisionFunction {
    fn decide(&mut self, actor: &mut Actor, world: &mut TurnWorld<'_>) -> Result<i32, DecisionError>;
}

/// Decision function that never does anything and charges a fixed cost.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Idle {
    pub cost: i32,
}

impl Default for Idle {
    fn default() -> Self {
        Self { cost: 100 }
    }
}

impl DecisionFunction for Idle {
    fn decide(&mut self, _actor: &mut Actor, _world: &mut TurnWorld<'_>) -> Result<i32, DecisionError> {
        Ok(self.cost)
    }
}
