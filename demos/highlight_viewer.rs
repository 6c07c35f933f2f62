//! # Highlight Viewer
//!
//! Shows a text with annotated groups in a [`HighlightedText`] card:
//! - Loading groups from the JSON host format (`{"group": [[[s, e] | null, [s, e]], ...]}`)
//! - Toggling emphasis per group with the number keys
//! - Reporting clicked and hovered groups in a status line
//! - Logging to a file with `tracing-subscriber` so the TUI stays clean
//!
//! Run with: `cargo run --example highlight_viewer -- --data groups.json --content text.txt`
//! or without arguments for a built-in sample.

use std::path::PathBuf;
use std::sync::Mutex;

use clap::Parser;
use glint::crossterm::event::{KeyCode, KeyModifiers};
use glint::ratatui::layout::{Constraint, Layout};
use glint::ratatui::style::{Color, Modifier, Style};
use glint::ratatui::text::{Line, Span};
use glint::ratatui::widgets::Paragraph;
use glint::ratatui::Frame;
use glint::widgets::highlighted_text::{self, HighlightedText};
use glint::widgets::key::help_line;
use glint::widgets::{Groups, HighlightOptions, OffsetUnit, Pair};
use glint::{Command, Component, Model, TerminalEvent};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const SAMPLE: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit. Ut non libero commodo, lobortis quam et, elementum risus. Nullam tempus viverra tortor, hendrerit sodales sem dapibus eu. Duis nec placerat purus. Etiam varius aliquet efficitur. Duis scelerisque mattis ullamcorper. Quisque mollis magna in varius dictum. Sed accumsan, tortor luctus molestie fermentum, sapien dolor condimentum turpis, eget volutpat nibh elit aliquet massa. Nullam tempor massa metus. Proin ultrices tortor orci. Nunc accumsan viverra risus. Suspendisse consequat magna ac vehicula vestibulum.

Ut luctus risus a neque vehicula varius. Morbi felis metus, molestie et sodales in, luctus nec metus. Quisque ut consectetur mi. Nulla cursus lectus dolor, eu posuere felis vehicula vel. Nunc ac venenatis libero. Curabitur lobortis mollis nibh sed porttitor. Aliquam erat volutpat. Aenean dapibus felis at ligula pulvinar posuere. Suspendisse purus eros, blandit id quam sed, vestibulum vulputate arcu.";

fn sample_groups() -> Groups {
    Groups::new()
        .with(
            "group1",
            vec![Pair::keyed([0, 11], [12, 26]), Pair::keyed([28, 39], [40, 55])],
        )
        .with("group2", vec![Pair::keyed([57, 72], [74, 115])])
        .with("group3", vec![Pair::value_only([230, 420])])
        .with("group4", vec![Pair::value_only([380, 600])])
}

#[derive(Parser, Debug)]
#[command(name = "highlight_viewer")]
#[command(about = "Interactive viewer for interval-highlighted text")]
#[command(version)]
struct Args {
    /// JSON file with the interval groups
    #[arg(long)]
    data: Option<PathBuf>,

    /// Text file to highlight
    #[arg(long)]
    content: Option<PathBuf>,

    /// Groups to emphasise, comma separated (default: all)
    #[arg(long, value_delimiter = ',')]
    emphasis: Vec<String>,

    /// Interpret offsets as UTF-8 byte offsets instead of characters
    #[arg(long)]
    bytes: bool,

    /// Where to write logs
    #[arg(long, default_value = "highlight_viewer.log")]
    log_file: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

struct Setup {
    content: String,
    groups: Groups,
    emphasis: Vec<String>,
    options: HighlightOptions,
}

struct Viewer {
    card: HighlightedText,
    group_keys: Vec<String>,
    last_click: Option<Vec<String>>,
    hovered: Option<Vec<String>>,
}

#[derive(Debug)]
enum Msg {
    Card(highlighted_text::Message),
    ToggleGroup(usize),
    Quit,
}

impl Model for Viewer {
    type Message = Msg;
    type Flags = Setup;

    fn init(setup: Setup) -> (Self, Command<Msg>) {
        let group_keys = setup.groups.keys().map(str::to_string).collect();
        let mut card = HighlightedText::new(setup.content, setup.groups)
            .with_options(setup.options)
            .with_emphasis(setup.emphasis)
            .with_title("Document");
        card.focus();
        (
            Viewer {
                card,
                group_keys,
                last_click: None,
                hovered: None,
            },
            Command::none(),
        )
    }

    fn update(&mut self, msg: Msg) -> Command<Msg> {
        match msg {
            Msg::Card(highlighted_text::Message::Clicked(keys)) => {
                info!(groups = ?keys, "clicked");
                self.last_click = Some(keys);
                Command::none()
            }
            Msg::Card(highlighted_text::Message::Hovered(keys)) => {
                self.hovered = keys;
                Command::none()
            }
            Msg::Card(msg) => self.card.update(msg).map(Msg::Card),
            Msg::ToggleGroup(index) => {
                if let Some(key) = self.group_keys.get(index) {
                    debug!(group = %key, "toggling emphasis");
                    self.card.toggle_emphasis(key);
                }
                Command::none()
            }
            Msg::Quit => Command::quit(),
        }
    }

    fn view(&self, frame: &mut Frame) {
        let [main, status, help] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        self.card.view(frame, main);

        let dim = Style::default().fg(Color::DarkGray);
        let bold = Style::default().add_modifier(Modifier::BOLD);

        let mut spans = Vec::new();
        for (i, key) in self.group_keys.iter().enumerate().take(9) {
            let on = self.card.emphasis().is_empty() || self.card.emphasis().contains(key);
            let style = if on { bold } else { dim };
            spans.push(Span::styled(format!("[{}] {key} ", i + 1), style));
        }
        let clicked = self
            .last_click
            .as_ref()
            .map_or_else(|| "-".to_string(), |keys| keys.join(", "));
        spans.push(Span::styled(" clicked: ", dim));
        spans.push(Span::raw(clicked));
        if let Some(ref keys) = self.hovered {
            spans.push(Span::styled("  hover: ", dim));
            spans.push(Span::raw(keys.join(", ")));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), status);

        let mut line = help_line(self.card.key_bindings(), bold, dim);
        line.spans.push(Span::styled("  1-9 ", bold));
        line.spans.push(Span::styled("toggle group  ", dim));
        line.spans.push(Span::styled("c ", bold));
        line.spans.push(Span::styled("all groups  ", dim));
        line.spans.push(Span::styled("q ", bold));
        line.spans.push(Span::styled("quit", dim));
        frame.render_widget(Paragraph::new(line), help);
    }

    fn handle_event(&self, event: TerminalEvent) -> Option<Msg> {
        match event {
            TerminalEvent::Key(key)
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                Some(Msg::Quit)
            }
            TerminalEvent::Key(key) => match key.code {
                KeyCode::Char('q') => Some(Msg::Quit),
                KeyCode::Char('c') => Some(Msg::Card(highlighted_text::Message::ClearEmphasis)),
                KeyCode::Char(c @ '1'..='9') => {
                    Some(Msg::ToggleGroup(c as usize - '1' as usize))
                }
                _ => Some(Msg::Card(highlighted_text::Message::KeyPress(key))),
            },
            TerminalEvent::Mouse(mouse) => Some(Msg::Card(highlighted_text::Message::Mouse(mouse))),
            _ => None,
        }
    }
}

fn init_logging(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&args.log_file)?;
    let level = args.log_level.to_lowercase();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "highlight_viewer={level},glint_widgets={level},glint_core={level}"
        ))
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(&args)?;

    let content = match args.content {
        Some(ref path) => std::fs::read_to_string(path)?,
        None => SAMPLE.to_string(),
    };
    let groups = match args.data {
        Some(ref path) => serde_json::from_str::<Groups>(&std::fs::read_to_string(path)?)?,
        None => sample_groups(),
    };
    let unit = if args.bytes {
        OffsetUnit::Bytes
    } else {
        OffsetUnit::Chars
    };
    info!(
        chars = content.chars().count(),
        groups = groups.len(),
        "highlight viewer starting"
    );

    let setup = Setup {
        content,
        groups,
        emphasis: args.emphasis,
        options: HighlightOptions::new().with_unit(unit),
    };
    let viewer = glint::run::<Viewer>(setup).await?;
    if let Some(keys) = viewer.last_click {
        println!("Last clicked: {}", keys.join(", "));
    }
    Ok(())
}
