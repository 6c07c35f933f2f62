use crate::command::Command;
use ratatui::{layout::Rect, Frame};

/// A reusable sub-model that renders into a given [`Rect`] area.
///
/// A `Component` owns its own message type and state, exactly like a
/// [`Model`](crate::Model), but its [`view`](Component::view) receives the
/// area chosen by its parent. Outbound events (for example "the user clicked
/// a segment covered by groups `a` and `b`") are reported by returning
/// [`Command::message`] from [`update`](Component::update); the parent lifts
/// the command with [`Command::map`] and intercepts the variant it cares about.
///
/// # Composition pattern
///
/// ```rust,ignore
/// use glint_core::{Command, Component, Model};
/// use glint_widgets::highlighted_text::{self, HighlightedText};
///
/// struct App { card: HighlightedText, last_click: Vec<String> }
///
/// enum Msg { Card(highlighted_text::Message) }
///
/// impl Model for App {
///     // ...
///     fn update(&mut self, msg: Msg) -> Command<Msg> {
///         match msg {
///             Msg::Card(highlighted_text::Message::Clicked(keys)) => {
///                 self.last_click = keys;
///                 Command::none()
///             }
///             Msg::Card(m) => self.card.update(m).map(Msg::Card),
///         }
///     }
/// }
/// ```
pub trait Component: Send + 'static {
    /// The component's internal message type.
    type Message: Send + 'static;

    /// Process a message, mutate state, and return a [`Command`] for side effects.
    fn update(&mut self, msg: Self::Message) -> Command<Self::Message>;

    /// Render into a specific `area` of the [`Frame`].
    ///
    /// Implementations should confine all rendering to the given rectangle.
    fn view(&self, frame: &mut Frame, area: Rect);

    /// Whether this component currently has focus.
    ///
    /// A parent can query `focused()` to decide which child should receive
    /// keyboard events. The default implementation returns `false`.
    fn focused(&self) -> bool {
        false
    }
}
