//! Frame layout: the observed map, the message log, a footer and an
//! optional dialog on top.
use std::collections::VecDeque;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, List, ListDirection, ListItem, Paragraph},
};

/// Height of message panel in lines, borders included.
pub const MESSAGE_PANEL_HEIGHT: u16 = 7;

const FOOTER: &str = "move: arrows/numpad/hjklyubn  g: pick up  i: inventory  F1: where  Esc: menu";

/// Bounded log of recent messages, oldest first.
#[derive(Clone, Debug)]
pub struct MessageLog {
    entries: VecDeque<String>,
    capacity: usize,
}

impl MessageLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&mut self, text: impl Into<String>) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(text.into());
    }

    /// Up to `count` entries, newest first.
    pub fn recent(&self, count: usize) -> impl Iterator<Item = &str> {
        self.entries.iter().rev().take(count).map(String::as_str)
    }
}

/// Modal list drawn over the map.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Dialog {
    pub title: String,
    pub lines: Vec<String>,
}

impl Dialog {
    pub fn new(title: impl Into<String>, lines: Vec<String>) -> Self {
        Self {
            title: title.into(),
            lines,
        }
    }
}

pub fn render_frame(frame: &mut Frame, rows: &[String], messages: &MessageLog, dialog: Option<&Dialog>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(MESSAGE_PANEL_HEIGHT),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_map(frame, chunks[0], rows);
    render_messages(frame, chunks[1], messages);
    frame.render_widget(
        Paragraph::new(FOOTER).style(Style::default().fg(Color::DarkGray)),
        chunks[2],
    );

    if let Some(dialog) = dialog {
        render_dialog(frame, chunks[0], dialog);
    }
}

fn render_map(frame: &mut Frame, area: Rect, rows: &[String]) {
    let lines: Vec<Line> = rows.iter().map(|row| Line::raw(row.as_str())).collect();
    let map = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Umbra"));
    frame.render_widget(map, area);
}

fn render_messages(frame: &mut Frame, area: Rect, messages: &MessageLog) {
    let visible = MESSAGE_PANEL_HEIGHT.saturating_sub(2) as usize;
    let mut items: Vec<ListItem> = messages.recent(visible).map(ListItem::new).collect();

    // Pad with empty lines to maintain consistent height
    while items.len() < visible {
        items.push(ListItem::new(""));
    }

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Messages"))
        .direction(ListDirection::BottomToTop);

    frame.render_widget(list, area);
}

fn render_dialog(frame: &mut Frame, area: Rect, dialog: &Dialog) {
    let width = dialog
        .lines
        .iter()
        .map(|line| line.chars().count())
        .chain(std::iter::once(dialog.title.chars().count()))
        .max()
        .unwrap_or(0) as u16
        + 4;
    let height = dialog.lines.len() as u16 + 2;
    let popup = centered(area, width, height);

    let lines: Vec<Line> = dialog.lines.iter().map(|line| Line::raw(line.as_str())).collect();
    let body = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(dialog.title.as_str())
            .title_style(Style::default().add_modifier(Modifier::BOLD)),
    );

    frame.render_widget(Clear, popup);
    frame.render_widget(body, popup);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
