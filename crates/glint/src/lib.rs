//! **glint** -- interactive interval highlighting for [`ratatui`] terminals.
//!
//! This is the umbrella crate that re-exports everything you need to build a
//! glint application from a single dependency:
//!
//! ```toml
//! [dependencies]
//! glint = "0.1"
//! ```
//!
//! # Re-exports
//!
//! * All public items from [`glint_core`] are available at the crate root
//!   ([`Model`], [`Component`], [`Command`], [`Program`], [`run`],
//!   [`run_with`], etc.).
//! * The [`widgets`] module re-exports everything from [`glint_widgets`]
//!   (the highlight engine and the [`HighlightedText`](widgets::HighlightedText)
//!   card).
//! * [`ratatui`], [`crossterm`], and [`tokio`] are re-exported so downstream
//!   crates do not need to depend on them directly.
//!
//! # Quick start
//!
//! ```ignore
//! use glint::widgets::highlighted_text::{HighlightedText, Message as CardMsg};
//! use glint::widgets::{Groups, Pair};
//! use glint::{Command, Component, Model, TerminalEvent};
//! use ratatui::Frame;
//!
//! struct App {
//!     card: HighlightedText,
//! }
//!
//! impl Model for App {
//!     type Message = CardMsg;
//!     type Flags = ();
//!
//!     fn init(_: ()) -> (Self, Command<CardMsg>) {
//!         let groups = Groups::new().with("name", vec![Pair::keyed([0, 4], [6, 11])]);
//!         let mut card = HighlightedText::new("Name: Alice", groups);
//!         card.focus();
//!         (App { card }, Command::none())
//!     }
//!
//!     fn update(&mut self, msg: CardMsg) -> Command<CardMsg> {
//!         match msg {
//!             CardMsg::Clicked(_) | CardMsg::Hovered(_) => Command::none(),
//!             CardMsg::KeyPress(k) if k.code == glint::crossterm::event::KeyCode::Char('q') => {
//!                 Command::quit()
//!             }
//!             other => self.card.update(other),
//!         }
//!     }
//!
//!     fn view(&self, frame: &mut Frame) {
//!         self.card.view(frame, frame.area());
//!     }
//!
//!     fn handle_event(&self, event: TerminalEvent) -> Option<CardMsg> {
//!         match event {
//!             TerminalEvent::Key(k) => Some(CardMsg::KeyPress(k)),
//!             TerminalEvent::Mouse(m) => Some(CardMsg::Mouse(m)),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     glint::run::<App>(()).await.unwrap();
//! }
//! ```

pub use glint_core::*;
pub mod widgets {
    pub use glint_widgets::*;
}

// Re-export dependencies for use in demos and downstream crates
pub use crossterm;
pub use ratatui;
pub use tokio;
