//! [`PlayerInterface`] over a ratatui terminal.

use std::collections::VecDeque;
use std::io;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::Backend};
use tracing::{debug, warn};
use umbra_core::{Actor, InputError, Item, MenuChoice, ObservedMirror, PlayerCommand, PlayerInterface};

use crate::input::{command_for, slot_index, slot_label};
use crate::presentation::ui::{Dialog, MessageLog, render_frame};

/// Messages kept for the log panel.
const MESSAGE_CAPACITY: usize = 64;

/// Where terminal events come from.
pub trait EventSource {
    /// Blocks until the next event.
    fn next_event(&mut self) -> io::Result<Event>;
}

/// Reads events from the real terminal.
#[derive(Clone, Copy, Debug, Default)]
pub struct CrosstermEvents;

impl EventSource for CrosstermEvents {
    fn next_event(&mut self) -> io::Result<Event> {
        crossterm::event::read()
    }
}

/// Scripted events. Running dry reads as end of input.
impl EventSource for VecDeque<Event> {
    fn next_event(&mut self) -> io::Result<Event> {
        self.pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no more events"))
    }
}

/// Draws the observed mirror and turns key presses into commands.
///
/// Dialogs are drawn over the last map frame shown by
/// [`PlayerInterface::next_command`].
pub struct TerminalInterface<B: Backend, E: EventSource> {
    terminal: Terminal<B>,
    events: E,
    messages: MessageLog,
    rows: Vec<String>,
}

impl<B: Backend, E: EventSource> TerminalInterface<B, E> {
    pub fn new(terminal: Terminal<B>, events: E) -> Self {
        Self {
            terminal,
            events,
            messages: MessageLog::new(MESSAGE_CAPACITY),
            rows: Vec::new(),
        }
    }

    #[cfg(test)]
    fn messages(&self) -> &MessageLog {
        &self.messages
    }

    fn draw(&mut self, dialog: Option<&Dialog>) -> io::Result<()> {
        let Self {
            terminal,
            messages,
            rows,
            ..
        } = self;
        terminal.draw(|frame| render_frame(frame, rows.as_slice(), messages, dialog))?;
        Ok(())
    }

    /// Shows `dialog` and waits for a key press.
    ///
    /// Errors are logged and read as an Escape so a dialog can always be left.
    fn prompt(&mut self, dialog: &Dialog) -> KeyEvent {
        let escape = KeyEvent::from(KeyCode::Esc);
        if let Err(err) = self.draw(Some(dialog)) {
            warn!(target: "client::ui", %err, "dialog draw failed");
            return escape;
        }
        loop {
            match self.events.next_event() {
                Ok(Event::Key(key)) if key.kind != KeyEventKind::Release => return key,
                Ok(Event::Resize(..)) => {
                    if let Err(err) = self.draw(Some(dialog)) {
                        warn!(target: "client::ui", %err, "dialog redraw failed");
                    }
                }
                Ok(_) => {}
                Err(err) => {
                    warn!(target: "client::ui", %err, "dialog input failed");
                    return escape;
                }
            }
        }
    }
}

fn item_lines(items: &[Item]) -> Vec<String> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| format!("{}) {} [{}]", slot_label(index), item.name, item.base_type))
        .collect()
}

impl<B: Backend, E: EventSource> PlayerInterface for TerminalInterface<B, E> {
    fn next_command(&mut self, view: &ObservedMirror) -> Result<Option<PlayerCommand>, InputError> {
        self.rows = view.rows().map(|row| row.iter().collect()).collect();
        self.draw(None)?;

        let command = match self.events.next_event() {
            Ok(Event::Key(key)) => command_for(key),
            Ok(_) => None,
            Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => return Err(InputError::Closed),
            Err(err) => return Err(err.into()),
        };
        if command.is_none() {
            debug!(target: "client::input", "unmapped event");
        }
        Ok(command)
    }

    fn message(&mut self, text: &str) {
        self.messages.push(text);
    }

    /// Letters drop the matching carried item onto the ground.
    fn open_inventory(&mut self, actor: &mut Actor, ground: &mut Vec<Item>) {
        loop {
            let mut lines = item_lines(&actor.inventory);
            if lines.is_empty() {
                lines.push("(empty)".to_string());
            }
            lines.push(format!("{} on the ground", ground.len()));
            let dialog = Dialog::new(format!("Inventory of {}", actor.name), lines);

            let key = self.prompt(&dialog);
            match slot_index(key) {
                Some(index) if index < actor.inventory.len() => {
                    let item = actor.inventory.remove(index);
                    self.messages.push(format!("Dropped {}.", item.name));
                    ground.push(item);
                }
                Some(_) => {}
                None => return,
            }
        }
    }

    /// Letters take one item, `,` or `g` takes the whole pile.
    fn pick_up(&mut self, actor: &mut Actor, ground: &mut Vec<Item>) {
        while !ground.is_empty() {
            let dialog = Dialog::new("Pick up", item_lines(ground));
            let key = self.prompt(&dialog);
            match key.code {
                KeyCode::Char(',') | KeyCode::Char('g') => {
                    self.messages.push(format!("Picked up {} items.", ground.len()));
                    actor.inventory.append(ground);
                }
                _ => match slot_index(key) {
                    Some(index) if index < ground.len() => {
                        let item = ground.remove(index);
                        self.messages.push(format!("Picked up {}.", item.name));
                        actor.inventory.push(item);
                    }
                    Some(_) => {}
                    None => return,
                },
            }
        }
    }

    fn open_menu(&mut self) -> MenuChoice {
        let dialog = Dialog::new(
            "Menu",
            vec!["Esc) resume".to_string(), "q) quit".to_string()],
        );
        match self.prompt(&dialog).code {
            KeyCode::Char('q') | KeyCode::Char('Q') => MenuChoice::Quit,
            _ => MenuChoice::Resume,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use ratatui::backend::TestBackend;
    use umbra_core::{BaseType, Capabilities, Coordinate, EntityId, ItemId};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn interface(events: Vec<Event>) -> TerminalInterface<TestBackend, VecDeque<Event>> {
        let terminal = Terminal::new(TestBackend::new(60, 24)).unwrap();
        TerminalInterface::new(terminal, events.into())
    }

    fn hero() -> Actor {
        Actor::new(
            EntityId::PLAYER,
            "Hero",
            '@',
            Coordinate::planar(1, 1).unwrap(),
            100,
            Capabilities::PLAYER_CONTROLLED,
        )
    }

    fn pile() -> Vec<Item> {
        vec![
            Item::new(ItemId(1), "Ruby", BaseType::Gem),
            Item::new(ItemId(2), "Dagger", BaseType::Weapon),
        ]
    }

    #[test]
    fn keys_become_commands() {
        let mut ui = interface(vec![key(KeyCode::Char('z')), key(KeyCode::Char('g'))]);
        let view = ObservedMirror::new(4, 3, 0);

        assert_eq!(ui.next_command(&view).unwrap(), None);
        assert_eq!(ui.next_command(&view).unwrap(), Some(PlayerCommand::PickUp));
        assert!(matches!(ui.next_command(&view), Err(InputError::Closed)));
    }

    #[test]
    fn pick_up_single_item_by_letter() {
        let mut ui = interface(vec![key(KeyCode::Char('b')), key(KeyCode::Esc)]);
        let mut actor = hero();
        let mut ground = pile();

        ui.pick_up(&mut actor, &mut ground);

        assert_eq!(actor.inventory.len(), 1);
        assert_eq!(actor.inventory[0].name, "Dagger");
        assert_eq!(ground.len(), 1);
        assert_eq!(ui.messages().recent(1).next(), Some("Picked up Dagger."));
    }

    #[test]
    fn pick_up_everything() {
        let mut ui = interface(vec![key(KeyCode::Char(','))]);
        let mut actor = hero();
        let mut ground = pile();

        ui.pick_up(&mut actor, &mut ground);

        assert!(ground.is_empty());
        assert_eq!(actor.inventory.len(), 2);
    }

    #[test]
    fn inventory_drops_onto_ground() {
        let mut ui = interface(vec![key(KeyCode::Char('a')), key(KeyCode::Esc)]);
        let mut actor = hero();
        actor.inventory = pile();
        let mut ground = Vec::new();

        ui.open_inventory(&mut actor, &mut ground);

        assert_eq!(ground.len(), 1);
        assert_eq!(ground[0].name, "Ruby");
        assert_eq!(actor.inventory.len(), 1);
    }

    #[test]
    fn menu_quits_only_on_q() {
        let mut ui = interface(vec![key(KeyCode::Enter), key(KeyCode::Char('q'))]);
        assert_eq!(ui.open_menu(), MenuChoice::Resume);
        assert_eq!(ui.open_menu(), MenuChoice::Quit);
        assert_eq!(ui.open_menu(), MenuChoice::Resume);
    }
}
