use crossterm::event::{Event, KeyEvent, KeyEventKind, MouseEvent};

/// Terminal input offered to [`Model::handle_event`](crate::Model::handle_event).
///
/// Key and mouse payloads are the raw crossterm types so codes, modifiers and
/// buttons can be matched directly. Events the runtime never enables (focus
/// changes, bracketed paste) are dropped before they reach the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalEvent {
    /// A key press or repeat. Releases are filtered out.
    Key(KeyEvent),
    /// A mouse event, delivered when mouse capture is on.
    Mouse(MouseEvent),
    /// Terminal resized to (columns, rows).
    Resize(u16, u16),
}

impl TerminalEvent {
    /// Convert a crossterm event, dropping the kinds the runtime ignores.
    pub fn from_crossterm(event: Event) -> Option<Self> {
        match event {
            Event::Key(k) if k.kind != KeyEventKind::Release => Some(TerminalEvent::Key(k)),
            Event::Mouse(m) => Some(TerminalEvent::Mouse(m)),
            Event::Resize(w, h) => Some(TerminalEvent::Resize(w, h)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers};

    #[test]
    fn key_releases_are_dropped() {
        let press = KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE);
        let release = KeyEvent {
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
            ..press
        };
        assert_eq!(
            TerminalEvent::from_crossterm(Event::Key(press)),
            Some(TerminalEvent::Key(press))
        );
        assert_eq!(TerminalEvent::from_crossterm(Event::Key(release)), None);
        assert_eq!(TerminalEvent::from_crossterm(Event::FocusLost), None);
        assert_eq!(
            TerminalEvent::from_crossterm(Event::Resize(80, 24)),
            Some(TerminalEvent::Resize(80, 24))
        );
    }
}
