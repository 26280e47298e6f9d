use crate::engine::PlayerCommand;
use crate::mirror::ObservedMirror;
use crate::state::{Actor, Item};

use super::InputError;

/// Outcome of the escape menu.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum MenuChoice {
    /// Close the menu and keep playing.
    #[default]
    Resume,
    /// Stop the tick loop after the current turn.
    Quit,
}

/// Everything the resolver needs from the human side of the game.
///
/// `next_command` is the only blocking call in the simulation. The remaining
/// hooks present dialogs; their defaults keep headless drivers short.
pub trait PlayerInterface {
    /// Waits for one input event and decodes it.
    ///
    /// `Ok(None)` means the event was not a recognized command; the resolver
    /// asks again without charging energy.
    fn next_command(&mut self, view: &ObservedMirror) -> Result<Option<PlayerCommand>, InputError>;

    /// One line for the message log.
    fn message(&mut self, _text: &str) {}

    /// Inventory screen. `ground` is the pile under the actor; items pushed
    /// onto it are dropped, items removed from it are picked up.
    fn open_inventory(&mut self, _actor: &mut Actor, _ground: &mut Vec<Item>) {}

    /// Pick-up dialog over the pile under the actor. Whatever remains in
    /// `ground` afterwards stays on the cell. Takes everything by default.
    fn pick_up(&mut self, actor: &mut Actor, ground: &mut Vec<Item>) {
        actor.inventory.append(ground);
    }

    fn open_menu(&mut self) -> MenuChoice {
        MenuChoice::Resume
    }
}
