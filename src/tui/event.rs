use crossterm::event::{
    self, Event, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};
use std::time::Duration;

use crate::nav::Direction;

/// TUI-specific input events
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TuiEvent {
    Quit,
    Move(Direction),
    /// Space or Enter on the focused card.
    Activate,
    LoadCards,
    NewGame,
    NextPalette,
    PrevPalette,
    /// Left click at (column, row).
    Click(u16, u16),
    Resize,
    /// Any other key press (dismisses alerts).
    OtherKey,
}

/// Poll for an event with timeout.
pub fn poll_event_timeout(timeout: Duration) -> std::io::Result<Option<TuiEvent>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }
    Ok(translate(event::read()?))
}

/// Poll for an event without blocking.
pub fn poll_event_immediate() -> std::io::Result<Option<TuiEvent>> {
    poll_event_timeout(Duration::ZERO)
}

fn translate(event: Event) -> Option<TuiEvent> {
    match event {
        Event::Key(key_event) => {
            // Repeats and releases would flip extra cards
            if key_event.kind != KeyEventKind::Press {
                return None;
            }
            log::debug!("Key event: {:?} with modifiers {:?}", key_event.code, key_event.modifiers);
            let mapped = match (key_event.modifiers, key_event.code) {
                (KeyModifiers::CONTROL, KeyCode::Char('c')) => TuiEvent::Quit,
                (_, KeyCode::Esc) | (_, KeyCode::Char('q')) => TuiEvent::Quit,
                (_, KeyCode::Up) => TuiEvent::Move(Direction::Up),
                (_, KeyCode::Down) => TuiEvent::Move(Direction::Down),
                (_, KeyCode::Left) => TuiEvent::Move(Direction::Left),
                (_, KeyCode::Right) => TuiEvent::Move(Direction::Right),
                (_, KeyCode::Char(' ')) | (_, KeyCode::Enter) => TuiEvent::Activate,
                (_, KeyCode::Char('l')) => TuiEvent::LoadCards,
                (_, KeyCode::Char('n')) => TuiEvent::NewGame,
                (_, KeyCode::Char('p')) => TuiEvent::NextPalette,
                (_, KeyCode::Char('P')) => TuiEvent::PrevPalette,
                _ => TuiEvent::OtherKey,
            };
            Some(mapped)
        }
        Event::Mouse(mouse_event) => match mouse_event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                Some(TuiEvent::Click(mouse_event.column, mouse_event.row))
            }
            _ => None,
        },
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        _ => None,
    }
}
