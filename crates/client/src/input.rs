//! Keyboard-to-command mapping.
//!
//! Arrows, the numeric keypad (digits and its navigation keys) and the vi keys
//! move. A move key held together with a modifier is not a command.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use umbra_core::{Direction, PlayerCommand};

/// Decodes a key press. `None` for releases, repeats of unmapped keys and
/// anything else the game does not understand.
pub fn command_for(key: KeyEvent) -> Option<PlayerCommand> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    if let Some(direction) = direction_for(key.code) {
        let held = KeyModifiers::SHIFT | KeyModifiers::CONTROL | KeyModifiers::ALT;
        if key.modifiers.intersects(held) {
            return None;
        }
        return Some(PlayerCommand::Move(direction));
    }

    match key.code {
        KeyCode::Char('g') | KeyCode::Char(',') => Some(PlayerCommand::PickUp),
        KeyCode::Char('i') => Some(PlayerCommand::OpenInventory),
        KeyCode::Esc => Some(PlayerCommand::Cancel),
        KeyCode::F(1) => Some(PlayerCommand::Info),
        KeyCode::Char('x') => Some(PlayerCommand::GainExperience),
        _ => None,
    }
}

fn direction_for(code: KeyCode) -> Option<Direction> {
    let direction = match code {
        KeyCode::Up | KeyCode::Char('8') | KeyCode::Char('k') => Direction::North,
        KeyCode::Down | KeyCode::Char('2') | KeyCode::Char('j') => Direction::South,
        KeyCode::Left | KeyCode::Char('4') | KeyCode::Char('h') => Direction::West,
        KeyCode::Right | KeyCode::Char('6') | KeyCode::Char('l') => Direction::East,
        KeyCode::Home | KeyCode::Char('7') | KeyCode::Char('y') => Direction::NorthWest,
        KeyCode::PageUp | KeyCode::Char('9') | KeyCode::Char('u') => Direction::NorthEast,
        KeyCode::End | KeyCode::Char('1') | KeyCode::Char('b') => Direction::SouthWest,
        KeyCode::PageDown | KeyCode::Char('3') | KeyCode::Char('n') => Direction::SouthEast,
        _ => return None,
    };
    Some(direction)
}

/// Letter label for the `index`th entry of a list dialog.
pub fn slot_label(index: usize) -> char {
    (b'a' + (index % 26) as u8) as char
}

/// Inverse of [`slot_label`].
pub fn slot_index(key: KeyEvent) -> Option<usize> {
    match key.code {
        KeyCode::Char(c) if c.is_ascii_lowercase() => Some((c as u8 - b'a') as usize),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn every_move_family_agrees() {
        for code in [KeyCode::Up, KeyCode::Char('8'), KeyCode::Char('k')] {
            assert_eq!(command_for(press(code)), Some(PlayerCommand::Move(Direction::North)));
        }
        for code in [KeyCode::PageDown, KeyCode::Char('3'), KeyCode::Char('n')] {
            assert_eq!(command_for(press(code)), Some(PlayerCommand::Move(Direction::SouthEast)));
        }
    }

    #[test]
    fn modifier_suppresses_moves_only() {
        let ctrl_up = KeyEvent::new(KeyCode::Up, KeyModifiers::CONTROL);
        assert_eq!(command_for(ctrl_up), None);

        let shift_left = KeyEvent::new(KeyCode::Left, KeyModifiers::SHIFT);
        assert_eq!(command_for(shift_left), None);

        let ctrl_g = KeyEvent::new(KeyCode::Char('g'), KeyModifiers::CONTROL);
        assert_eq!(command_for(ctrl_g), Some(PlayerCommand::PickUp));
    }

    #[test]
    fn action_keys() {
        assert_eq!(command_for(press(KeyCode::Char(','))), Some(PlayerCommand::PickUp));
        assert_eq!(command_for(press(KeyCode::Char('i'))), Some(PlayerCommand::OpenInventory));
        assert_eq!(command_for(press(KeyCode::Esc)), Some(PlayerCommand::Cancel));
        assert_eq!(command_for(press(KeyCode::F(1))), Some(PlayerCommand::Info));
        assert_eq!(command_for(press(KeyCode::Char('x'))), Some(PlayerCommand::GainExperience));
    }

    #[test]
    fn unknown_keys_and_releases_are_ignored() {
        assert_eq!(command_for(press(KeyCode::Char('z'))), None);
        assert_eq!(command_for(press(KeyCode::Tab)), None);

        let mut release = press(KeyCode::Up);
        release.kind = KeyEventKind::Release;
        assert_eq!(command_for(release), None);
    }

    #[test]
    fn slot_labels_round_trip() {
        assert_eq!(slot_label(0), 'a');
        assert_eq!(slot_label(2), 'c');
        assert_eq!(slot_index(press(KeyCode::Char('c'))), Some(2));
        assert_eq!(slot_index(press(KeyCode::Char('C'))), None);
    }
}
