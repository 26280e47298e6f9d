//! Ratatui presentation of the observed mirror.
pub mod interface;
pub mod terminal;
pub mod ui;

pub use interface::{CrosstermEvents, TerminalInterface};
