//! A `HighlightedText` hosted in a `Model`, driven through `TestProgram`.

use glint::crossterm::event::{
    KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use glint::ratatui::Frame;
use glint::testing::TestProgram;
use glint::widgets::highlighted_text::{self, HighlightedText};
use glint::widgets::{Classification, Groups, Pair};
use glint::{Command, Component, Model, TerminalEvent};

struct Host {
    card: HighlightedText,
    clicks: Vec<Vec<String>>,
    hovered: Option<Vec<String>>,
}

enum Msg {
    Card(highlighted_text::Message),
    Quit,
}

impl Model for Host {
    type Message = Msg;
    type Flags = ();

    fn init(_: ()) -> (Self, Command<Msg>) {
        let groups = Groups::new()
            .with("name", vec![Pair::keyed([0, 4], [6, 11])])
            .with("city", vec![Pair::value_only([15, 20])]);
        let mut card = HighlightedText::new("Name: Alice in Paris", groups);
        card.focus();
        (
            Host {
                card,
                clicks: Vec::new(),
                hovered: None,
            },
            Command::none(),
        )
    }

    fn update(&mut self, msg: Msg) -> Command<Msg> {
        match msg {
            Msg::Card(highlighted_text::Message::Clicked(keys)) => {
                self.clicks.push(keys);
                Command::none()
            }
            Msg::Card(highlighted_text::Message::Hovered(keys)) => {
                self.hovered = keys;
                Command::none()
            }
            Msg::Card(m) => self.card.update(m).map(Msg::Card),
            Msg::Quit => Command::quit(),
        }
    }

    fn view(&self, frame: &mut Frame) {
        self.card.view(frame, frame.area());
    }

    fn handle_event(&self, event: TerminalEvent) -> Option<Msg> {
        match event {
            TerminalEvent::Key(k) if k.code == KeyCode::Char('q') => Some(Msg::Quit),
            TerminalEvent::Key(k) => Some(Msg::Card(highlighted_text::Message::KeyPress(k))),
            TerminalEvent::Mouse(m) => Some(Msg::Card(highlighted_text::Message::Mouse(m))),
            TerminalEvent::Resize(..) => None,
        }
    }
}

fn key(code: KeyCode) -> TerminalEvent {
    TerminalEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn mouse(kind: MouseEventKind, column: u16, row: u16) -> TerminalEvent {
    TerminalEvent::Mouse(MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

#[test]
fn click_reaches_the_host() {
    let mut prog = TestProgram::<Host>::new(());
    prog.render(30, 3);

    // "Alice" sits at columns 7..12 inside the border.
    assert!(prog.send_event(mouse(MouseEventKind::Down(MouseButton::Left), 9, 1)));
    prog.drain_messages();
    assert_eq!(prog.model().clicks, vec![vec!["name".to_string()]]);

    // Plain text between the ranges reports nothing.
    prog.send_event(mouse(MouseEventKind::Down(MouseButton::Left), 14, 1));
    prog.drain_messages();
    assert_eq!(prog.model().clicks.len(), 1);
}

#[test]
fn hover_and_keyboard_activation() {
    let mut prog = TestProgram::<Host>::new(());
    prog.render(30, 3);

    prog.send_event(mouse(MouseEventKind::Moved, 17, 1));
    prog.drain_messages();
    assert_eq!(prog.model().hovered, Some(vec!["city".to_string()]));

    prog.send_event(key(KeyCode::BackTab));
    prog.send_event(key(KeyCode::Enter));
    prog.drain_messages();
    assert_eq!(prog.model().clicks, vec![vec!["city".to_string()]]);
}

#[test]
fn emphasis_changes_classification() {
    let mut prog = TestProgram::<Host>::new(());
    prog.send(Msg::Card(highlighted_text::Message::SetEmphasis(vec!["city".into()])));
    let classes: Vec<_> = prog
        .model()
        .card
        .segments()
        .iter()
        .map(|s| s.classification)
        .collect();
    assert_eq!(
        classes,
        vec![
            Classification::HoverOnly,
            Classification::None,
            Classification::HoverOnly,
            Classification::None,
            Classification::ValueOnly,
        ]
    );
}

#[test]
fn renders_text_and_quits() {
    let mut prog = TestProgram::<Host>::new(());
    let screen = prog.render_string(30, 3);
    assert!(screen.contains("Name: Alice in Paris"));
    prog.send_event(key(KeyCode::Char('q')));
    assert!(prog.quit_requested());
}
