use crate::command::{Command, CommandInner};
use crate::event::TerminalEvent;
use crate::model::Model;
use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture, EventStream},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
    },
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::collections::VecDeque;
use std::io::{self, stdout, Stdout};
use tracing::debug;

/// Errors that can occur while initializing or running a [`Program`].
#[derive(Debug, thiserror::Error)]
pub enum ProgramError {
    /// An I/O error from terminal setup, event reading, rendering, or teardown.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Configuration options for a [`Program`].
///
/// Use struct update syntax to override only what you need:
///
/// ```rust,ignore
/// let opts = ProgramOptions {
///     mouse: true,
///     title: Some("glint".into()),
///     ..ProgramOptions::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct ProgramOptions {
    /// Start in the alternate screen (default: true).
    pub alt_screen: bool,
    /// Capture mouse clicks, movement and wheel events (default: true).
    pub mouse: bool,
    /// Set the terminal title.
    pub title: Option<String>,
    /// Restore the terminal from a panic hook before the panic message prints (default: true).
    pub catch_panics: bool,
    /// Quit on Ctrl+C delivered as a signal (default: true).
    pub handle_signals: bool,
}

impl Default for ProgramOptions {
    fn default() -> Self {
        Self {
            alt_screen: true,
            mouse: true,
            title: None,
            catch_panics: true,
            handle_signals: true,
        }
    }
}

/// The program runtime. Manages terminal setup, the event loop, and the
/// [`Model`] lifecycle.
///
/// ```rust,ignore
/// #[tokio::main]
/// async fn main() -> Result<(), glint_core::ProgramError> {
///     let model = Program::<Viewer>::new(flags)?.run().await?;
///     Ok(())
/// }
/// ```
pub struct Program<M: Model> {
    model: M,
    terminal: Terminal<CrosstermBackend<Stdout>>,
    options: ProgramOptions,
    pending: VecDeque<M::Message>,
    needs_redraw: bool,
    should_quit: bool,
}

impl<M: Model> Program<M> {
    /// Create a new program with default options.
    pub fn new(flags: M::Flags) -> Result<Self, ProgramError> {
        Self::with_options(flags, ProgramOptions::default())
    }

    /// Create a new program with custom options.
    ///
    /// Returns an error if terminal initialization fails.
    pub fn with_options(flags: M::Flags, options: ProgramOptions) -> Result<Self, ProgramError> {
        let (model, init_cmd) = M::init(flags);
        let terminal = init_terminal(&options)?;

        let mut program = Self {
            model,
            terminal,
            options,
            pending: VecDeque::new(),
            needs_redraw: true,
            should_quit: false,
        };
        debug!("program initialized");

        program.execute_command(init_cmd);
        program.drain();
        Ok(program)
    }

    /// Run the program until the model returns [`Command::quit`], the event
    /// stream closes, or Ctrl+C arrives as a signal. Returns the final model.
    pub async fn run(mut self) -> Result<M, ProgramError> {
        let result = self.event_loop().await;

        debug!("shutting down");
        restore_terminal(&self.options)?;
        result.map(|()| self.model)
    }

    async fn event_loop(&mut self) -> Result<(), ProgramError> {
        let mut events = EventStream::new();
        let handle_signals = self.options.handle_signals;

        while !self.should_quit {
            if self.needs_redraw {
                self.render()?;
                self.needs_redraw = false;
            }

            tokio::select! {
                biased;

                _ = tokio::signal::ctrl_c(), if handle_signals => {
                    debug!("received ctrl+c signal");
                    return Ok(());
                }

                event = events.next() => match event {
                    Some(Ok(event)) => {
                        if let Some(event) = TerminalEvent::from_crossterm(event) {
                            self.process_event(event);
                        }
                    }
                    Some(Err(err)) => return Err(err.into()),
                    None => {
                        debug!("terminal event stream closed");
                        return Ok(());
                    }
                },
            }
        }
        Ok(())
    }

    fn process_event(&mut self, event: TerminalEvent) {
        if matches!(event, TerminalEvent::Resize(..)) {
            self.needs_redraw = true;
        }
        if let Some(msg) = self.model.handle_event(event) {
            self.pending.push_back(msg);
            self.drain();
        }
    }

    fn drain(&mut self) {
        while let Some(msg) = self.pending.pop_front() {
            let cmd = self.model.update(msg);
            self.execute_command(cmd);
            self.needs_redraw = true;
        }
    }

    fn execute_command(&mut self, cmd: Command<M::Message>) {
        match cmd.inner {
            CommandInner::None => {}
            CommandInner::Message(msg) => self.pending.push_back(msg),
            CommandInner::Quit => self.should_quit = true,
            CommandInner::Batch(cmds) => {
                for cmd in cmds {
                    self.execute_command(cmd);
                }
            }
        }
    }

    fn render(&mut self) -> Result<(), ProgramError> {
        self.terminal.draw(|frame| self.model.view(frame))?;
        Ok(())
    }
}

fn init_terminal(options: &ProgramOptions) -> Result<Terminal<CrosstermBackend<Stdout>>, ProgramError> {
    if options.catch_panics {
        use std::sync::Once;
        static HOOK_INSTALLED: Once = Once::new();
        let alt_screen = options.alt_screen;
        HOOK_INSTALLED.call_once(|| {
            let original_hook = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |info| {
                let _ = restore_terminal_minimal(alt_screen);
                original_hook(info);
            }));
        });
    }

    enable_raw_mode()?;
    let mut writer = stdout();

    if options.alt_screen {
        execute!(writer, EnterAlternateScreen)?;
    }
    if options.mouse {
        execute!(writer, EnableMouseCapture)?;
    }
    if let Some(ref title) = options.title {
        execute!(writer, SetTitle(title))?;
    }
    execute!(writer, cursor::Hide)?;

    Ok(Terminal::new(CrosstermBackend::new(writer))?)
}

fn restore_terminal(options: &ProgramOptions) -> Result<(), ProgramError> {
    restore_terminal_minimal(options.alt_screen)?;
    Ok(())
}

fn restore_terminal_minimal(alt_screen: bool) -> Result<(), io::Error> {
    // Best effort: keep restoring even if a step fails.
    let raw = disable_raw_mode();
    let mut writer = stdout();
    execute!(writer, DisableMouseCapture).ok();
    if alt_screen {
        execute!(writer, LeaveAlternateScreen).ok();
    }
    execute!(writer, cursor::Show).ok();
    raw
}
