use crate::command::Command;
use crate::event::TerminalEvent;
use ratatui::Frame;

/// The top-level application trait, following the [Elm Architecture].
///
/// The [`Program`](crate::Program) runtime drives an **init -> update -> view**
/// cycle:
///
/// 1. [`init`](Model::init) creates the initial state.
/// 2. [`view`](Model::view) renders the current state to a [`ratatui::Frame`].
/// 3. Terminal events are offered to [`handle_event`](Model::handle_event),
///    which maps them into messages.
/// 4. [`update`](Model::update) processes each message and optionally returns
///    a [`Command`].
///
/// [Elm Architecture]: https://guide.elm-lang.org/architecture/
pub trait Model: Sized + Send + 'static {
    /// The application's message type.
    type Message: Send + 'static;

    /// Initialization data passed to [`Model::init`].
    type Flags: Send + 'static;

    /// Create the initial model state and an optional startup command.
    fn init(flags: Self::Flags) -> (Self, Command<Self::Message>);

    /// Process a message, mutate state, and return a command for side effects.
    fn update(&mut self, msg: Self::Message) -> Command<Self::Message>;

    /// Render the current state to a ratatui [`Frame`].
    ///
    /// Must be a pure function of `&self`; the runtime calls it after every
    /// batch of updates.
    fn view(&self, frame: &mut Frame);

    /// Map a raw terminal event to a message.
    ///
    /// Returning `None` drops the event. The default drops everything.
    fn handle_event(&self, event: TerminalEvent) -> Option<Self::Message> {
        let _ = event;
        None
    }
}
