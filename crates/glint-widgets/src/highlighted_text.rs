//! A text card that highlights annotated ranges and reports which groups the
//! user clicks or hovers.
//!
//! The card re-runs a [`Highlighter`] pass whenever its content, groups,
//! emphasis or options change, lays the resulting segments out into wrapped
//! rows, and styles each segment through [`HighlightStyle::resolve`].
//!
//! Interaction is reported upward as messages: [`Message::Clicked`] carries
//! the group keys under a clicked (or keyboard-activated) segment and
//! [`Message::Hovered`] fires whenever the segment under the pointer changes.
//! Both are no-ops when fed back into [`update`](Component::update), so a
//! parent intercepts them after mapping the returned command.

use std::cell::Cell;

use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use glint_core::command::Command;
use glint_core::component::Component;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState};
use ratatui::Frame;
use tracing::debug;

use crate::highlight::{
    Classification, Groups, Highlight, HighlightError, HighlightOptions, Highlighter, Segment,
};
use crate::key::{Binding, KeyCombination, KeyMap};
use crate::runeutil::{self, Row};

/// Messages for the highlighted-text component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// A key press forwarded to the component. Ignored unless focused.
    KeyPress(KeyEvent),
    /// A mouse event in absolute terminal coordinates.
    Mouse(MouseEvent),
    /// Scroll up by the given number of rows.
    ScrollUp(u16),
    /// Scroll down by the given number of rows.
    ScrollDown(u16),
    /// Replace the emphasis set. Empty emphasises every group.
    SetEmphasis(Vec<String>),
    /// Add a group to the emphasis set, or remove it if present.
    ToggleEmphasis(String),
    /// Empty the emphasis set.
    ClearEmphasis,
    /// Emitted: the group keys under the segment the user activated.
    Clicked(Vec<String>),
    /// Emitted: the group keys under the pointer or keyboard selection,
    /// `None` when it moved onto uncovered text.
    Hovered(Option<Vec<String>>),
}

/// Visual style for each [`Classification`] plus interaction overlays.
#[derive(Debug, Clone)]
pub struct HighlightStyle {
    pub none: Style,
    pub key: Style,
    pub value: Style,
    pub value_only: Style,
    pub overlap: Style,
    pub hover_only: Style,
    /// Patched over the segment under the mouse pointer.
    pub hovered: Style,
    /// Patched over the keyboard-selected segment.
    pub selected: Style,
    pub border: Style,
    pub focused_border: Style,
    pub title: Style,
    pub error: Style,
}

impl Default for HighlightStyle {
    fn default() -> Self {
        Self {
            none: Style::default(),
            key: Style::default().fg(Color::White).bg(Color::Rgb(0xE4, 0x3F, 0x6F)),
            value: Style::default().fg(Color::White).bg(Color::Rgb(0xF5, 0x64, 0x76)),
            value_only: Style::default().fg(Color::White).bg(Color::Rgb(0x5E, 0x43, 0x52)),
            overlap: Style::default()
                .fg(Color::White)
                .bg(Color::Rgb(0x8A, 0x1C, 0x4A))
                .add_modifier(Modifier::BOLD),
            hover_only: Style::default(),
            hovered: Style::default().add_modifier(Modifier::UNDERLINED),
            selected: Style::default().add_modifier(Modifier::REVERSED),
            border: Style::default().fg(Color::DarkGray),
            focused_border: Style::default().fg(Color::Cyan),
            title: Style::default().add_modifier(Modifier::BOLD),
            error: Style::default().fg(Color::Red),
        }
    }
}

impl HighlightStyle {
    /// The base style for a segment classification.
    pub fn resolve(&self, classification: Classification) -> Style {
        match classification {
            Classification::None => self.none,
            Classification::Key => self.key,
            Classification::Value => self.value,
            Classification::ValueOnly => self.value_only,
            Classification::Overlap => self.overlap,
            Classification::HoverOnly => self.hover_only,
        }
    }
}

/// Key bindings for the highlighted-text component.
#[derive(Debug, Clone)]
pub struct HighlightKeyBindings {
    /// Select the next covered segment. Default: Tab, Right, l
    pub next: Binding,
    /// Select the previous covered segment. Default: Shift+Tab, Left, h
    pub prev: Binding,
    /// Report the selected segment as clicked. Default: Enter, Space
    pub activate: Binding,
    /// Drop the selection. Default: Esc
    pub clear: Binding,
    /// Scroll up one row. Default: Up, k
    pub up: Binding,
    /// Scroll down one row. Default: Down, j
    pub down: Binding,
    pub page_up: Binding,
    pub page_down: Binding,
    /// Default: Home, g
    pub top: Binding,
    /// Default: End, G
    pub bottom: Binding,
}

impl Default for HighlightKeyBindings {
    fn default() -> Self {
        let keys = |codes: &[KeyCode]| -> Vec<KeyCombination> {
            codes.iter().map(|&c| KeyCombination::new(c)).collect()
        };
        Self {
            next: Binding::with_keys(
                keys(&[KeyCode::Tab, KeyCode::Right, KeyCode::Char('l')]),
                "next",
            ),
            prev: Binding::with_keys(
                keys(&[KeyCode::BackTab, KeyCode::Left, KeyCode::Char('h')]),
                "prev",
            ),
            activate: Binding::with_keys(keys(&[KeyCode::Enter, KeyCode::Char(' ')]), "select"),
            clear: Binding::new(KeyCombination::new(KeyCode::Esc), "clear"),
            up: Binding::with_keys(keys(&[KeyCode::Up, KeyCode::Char('k')]), "up"),
            down: Binding::with_keys(keys(&[KeyCode::Down, KeyCode::Char('j')]), "down"),
            page_up: Binding::new(KeyCombination::new(KeyCode::PageUp), "page up"),
            page_down: Binding::new(KeyCombination::new(KeyCode::PageDown), "page down"),
            top: Binding::with_keys(keys(&[KeyCode::Home, KeyCode::Char('g')]), "top"),
            bottom: Binding::with_keys(keys(&[KeyCode::End, KeyCode::Char('G')]), "bottom"),
        }
    }
}

impl KeyMap for HighlightKeyBindings {
    fn short_help(&self) -> Vec<&Binding> {
        vec![&self.next, &self.prev, &self.activate, &self.clear]
    }
}

/// Interactive highlighted text inside a bordered card.
///
/// # Example
///
/// ```ignore
/// let groups = Groups::new()
///     .with("person", vec![Pair::keyed([0, 4], [5, 10])])
///     .with("date", vec![Pair::value_only([14, 24])]);
/// let mut card = HighlightedText::new("Name Alice on 2024-01-01", groups)
///     .with_title("Extraction");
/// card.focus();
/// ```
pub struct HighlightedText {
    content: String,
    groups: Groups,
    emphasis: Vec<String>,
    highlighter: Highlighter,
    highlight: Highlight,
    error: Option<HighlightError>,
    title: Option<String>,
    style: HighlightStyle,
    key_bindings: HighlightKeyBindings,
    focus: bool,
    selected: Option<usize>,
    hovered: Option<usize>,
    offset: u16,
    mouse_wheel_delta: u16,
    /// Text area of the last render, for mapping mouse positions.
    text_area: Cell<Rect>,
    /// Scroll offset actually used by the last render (after clamping).
    rendered_offset: Cell<u16>,
}

impl HighlightedText {
    /// Create a card over `content` with every group emphasised.
    pub fn new(content: impl Into<String>, groups: Groups) -> Self {
        let mut card = Self {
            content: content.into(),
            groups,
            emphasis: Vec::new(),
            highlighter: Highlighter::default(),
            highlight: Highlight::default(),
            error: None,
            title: None,
            style: HighlightStyle::default(),
            key_bindings: HighlightKeyBindings::default(),
            focus: false,
            selected: None,
            hovered: None,
            offset: 0,
            mouse_wheel_delta: 3,
            text_area: Cell::new(Rect::default()),
            rendered_offset: Cell::new(0),
        };
        card.refresh();
        card
    }

    pub fn with_emphasis(mut self, emphasis: Vec<String>) -> Self {
        self.emphasis = emphasis;
        self.refresh();
        self
    }

    pub fn with_options(mut self, options: HighlightOptions) -> Self {
        self.highlighter = Highlighter::new(options);
        self.refresh();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_style(mut self, style: HighlightStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_key_bindings(mut self, bindings: HighlightKeyBindings) -> Self {
        self.key_bindings = bindings;
        self
    }

    /// Number of rows scrolled per mouse wheel tick.
    pub fn with_mouse_wheel_delta(mut self, delta: u16) -> Self {
        self.mouse_wheel_delta = delta;
        self
    }

    /// Replace the text. Resets selection, hover and scroll.
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.reset_interaction();
        self.refresh();
    }

    /// Replace the interval groups. Resets selection, hover and scroll.
    pub fn set_groups(&mut self, groups: Groups) {
        self.groups = groups;
        self.reset_interaction();
        self.refresh();
    }

    /// Replace the emphasis set. Segment boundaries do not depend on
    /// emphasis, so selection and hover survive.
    pub fn set_emphasis(&mut self, emphasis: Vec<String>) {
        self.emphasis = emphasis;
        self.refresh();
    }

    pub fn toggle_emphasis(&mut self, key: &str) {
        match self.emphasis.iter().position(|k| k == key) {
            Some(pos) => {
                self.emphasis.remove(pos);
            }
            None => self.emphasis.push(key.to_string()),
        }
        self.refresh();
    }

    pub fn focus(&mut self) {
        self.focus = true;
    }

    pub fn blur(&mut self) {
        self.focus = false;
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn groups(&self) -> &Groups {
        &self.groups
    }

    pub fn emphasis(&self) -> &[String] {
        &self.emphasis
    }

    /// The current highlight pass.
    pub fn highlight(&self) -> &Highlight {
        &self.highlight
    }

    pub fn segments(&self) -> &[Segment] {
        self.highlight.segments()
    }

    /// The error from the last pass under [`MalformedPolicy::Reject`](crate::highlight::MalformedPolicy::Reject).
    /// While set, the content is shown without highlighting.
    pub fn error(&self) -> Option<&HighlightError> {
        self.error.as_ref()
    }

    /// Index of the keyboard-selected segment.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Index of the segment under the mouse pointer.
    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn key_bindings(&self) -> &HighlightKeyBindings {
        &self.key_bindings
    }

    pub fn y_offset(&self) -> u16 {
        self.offset
    }

    /// Segment drawn at absolute terminal position `(column, row)` in the
    /// last render.
    pub fn segment_at_position(&self, column: u16, row: u16) -> Option<usize> {
        let area = self.text_area.get();
        if !area.contains(Position::new(column, row)) {
            return None;
        }
        let rows = self.rows(area.width);
        let index = usize::from(self.rendered_offset.get()) + usize::from(row - area.y);
        rows.get(index)?.segment_at(column - area.x)
    }

    fn refresh(&mut self) {
        match self
            .highlighter
            .highlight(&self.content, &self.groups, &self.emphasis)
        {
            Ok(highlight) => {
                self.highlight = highlight;
                self.error = None;
            }
            Err(err) => {
                debug!(error = %err, "highlight pass rejected, showing plain text");
                self.highlight = Highlighter::default()
                    .highlight(&self.content, &Groups::new(), &[] as &[&str])
                    .unwrap_or_default();
                self.error = Some(err);
            }
        }
        let count = self.highlight.segments().len();
        self.selected = self.selected.filter(|&i| i < count);
        self.hovered = self.hovered.filter(|&i| i < count);
    }

    fn reset_interaction(&mut self) {
        self.selected = None;
        self.hovered = None;
        self.offset = 0;
    }

    fn rows(&self, width: u16) -> Vec<Row> {
        runeutil::wrap_segments(self.highlight.segments(), width)
    }

    fn keys_for(&self, index: usize) -> Option<Vec<String>> {
        self.highlight.dispatch(index)
    }

    /// Move the selection to the next covered segment in `forward` direction,
    /// wrapping around.
    fn step_selection(&mut self, forward: bool) -> Command<Message> {
        let segments = self.highlight.segments();
        let count = segments.len();
        if count == 0 {
            return Command::none();
        }
        let start = match (self.selected, forward) {
            (Some(i), true) => i + 1,
            (Some(i), false) => i + count - 1,
            (None, true) => 0,
            (None, false) => count - 1,
        };
        let found = (0..count)
            .map(|step| {
                if forward {
                    (start + step) % count
                } else {
                    (start + count - step) % count
                }
            })
            // Segments with no drawn cells (a lone newline) cannot be shown as selected.
            .find(|&i| {
                segments[i].is_covered() && runeutil::display_width(&segments[i].text) > 0
            });
        match found {
            Some(index) => {
                self.selected = Some(index);
                self.scroll_to_segment(index);
                Command::message(Message::Hovered(self.keys_for(index)))
            }
            None => Command::none(),
        }
    }

    fn scroll_to_segment(&mut self, index: usize) {
        let area = self.text_area.get();
        if area.height == 0 {
            return;
        }
        let rows = self.rows(area.width);
        let Some(row) = runeutil::row_of_segment(&rows, index) else {
            return;
        };
        let row = u16::try_from(row).unwrap_or(u16::MAX);
        let offset = self.offset.min(self.max_offset(rows.len(), area.height));
        if row < offset {
            self.offset = row;
        } else if row >= offset.saturating_add(area.height) {
            self.offset = row - area.height + 1;
        } else {
            self.offset = offset;
        }
    }

    fn max_offset(&self, rows: usize, height: u16) -> u16 {
        u16::try_from(rows.saturating_sub(usize::from(height))).unwrap_or(u16::MAX)
    }

    /// Largest offset that still fills the text area of the last render.
    fn max_scroll(&self) -> u16 {
        let area = self.text_area.get();
        self.max_offset(self.rows(area.width).len(), area.height)
    }

    fn scroll_up(&mut self, rows: u16) {
        self.offset = self.offset.min(self.max_scroll()).saturating_sub(rows);
    }

    fn scroll_down(&mut self, rows: u16) {
        self.offset = self.offset.saturating_add(rows).min(self.max_scroll());
    }

    fn handle_key(&mut self, key: KeyEvent) -> Command<Message> {
        let page = self.text_area.get().height.max(1);
        let kb = &self.key_bindings;
        if kb.next.matches(&key) {
            self.step_selection(true)
        } else if kb.prev.matches(&key) {
            self.step_selection(false)
        } else if kb.activate.matches(&key) {
            match self.selected.and_then(|i| self.keys_for(i)) {
                Some(keys) => Command::message(Message::Clicked(keys)),
                None => Command::none(),
            }
        } else if kb.clear.matches(&key) {
            self.selected = None;
            Command::none()
        } else if kb.up.matches(&key) {
            self.scroll_up(1);
            Command::none()
        } else if kb.down.matches(&key) {
            self.scroll_down(1);
            Command::none()
        } else if kb.page_up.matches(&key) {
            self.scroll_up(page);
            Command::none()
        } else if kb.page_down.matches(&key) {
            self.scroll_down(page);
            Command::none()
        } else if kb.top.matches(&key) {
            self.offset = 0;
            Command::none()
        } else if kb.bottom.matches(&key) {
            self.offset = self.max_scroll();
            Command::none()
        } else {
            Command::none()
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> Command<Message> {
        let inside = self
            .text_area
            .get()
            .contains(Position::new(mouse.column, mouse.row));
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let Some(index) = self.segment_at_position(mouse.column, mouse.row) else {
                    return Command::none();
                };
                match self.keys_for(index) {
                    Some(keys) => {
                        self.selected = Some(index);
                        debug!(segment = index, groups = ?keys, "segment clicked");
                        Command::message(Message::Clicked(keys))
                    }
                    None => Command::none(),
                }
            }
            MouseEventKind::Moved => {
                let hovered = self
                    .segment_at_position(mouse.column, mouse.row)
                    .filter(|&i| self.highlight.segments()[i].is_covered());
                if hovered == self.hovered {
                    return Command::none();
                }
                self.hovered = hovered;
                Command::message(Message::Hovered(hovered.and_then(|i| self.keys_for(i))))
            }
            MouseEventKind::ScrollUp if inside => {
                self.scroll_up(self.mouse_wheel_delta);
                Command::none()
            }
            MouseEventKind::ScrollDown if inside => {
                self.scroll_down(self.mouse_wheel_delta);
                Command::none()
            }
            _ => Command::none(),
        }
    }

    fn segment_style(&self, index: usize) -> Style {
        let classification = self.highlight.segments()[index].classification;
        let mut style = self.style.resolve(classification);
        if self.hovered == Some(index) {
            style = style.patch(self.style.hovered);
        }
        if self.selected == Some(index) {
            style = style.patch(self.style.selected);
        }
        style
    }
}

impl Component for HighlightedText {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::KeyPress(key) if self.focus => self.handle_key(key),
            Message::KeyPress(_) => Command::none(),
            Message::Mouse(mouse) => self.handle_mouse(mouse),
            Message::ScrollUp(n) => {
                self.scroll_up(n);
                Command::none()
            }
            Message::ScrollDown(n) => {
                self.scroll_down(n);
                Command::none()
            }
            Message::SetEmphasis(keys) => {
                self.set_emphasis(keys);
                Command::none()
            }
            Message::ToggleEmphasis(key) => {
                self.toggle_emphasis(&key);
                Command::none()
            }
            Message::ClearEmphasis => {
                self.set_emphasis(Vec::new());
                Command::none()
            }
            Message::Clicked(_) | Message::Hovered(_) => Command::none(),
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        let border_style = if self.focus {
            self.style.focused_border
        } else {
            self.style.border
        };
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style);
        if let Some(ref title) = self.title {
            block = block.title(Span::styled(format!(" {title} "), self.style.title));
        }

        let mut text_area = block.inner(area);
        frame.render_widget(block, area);

        if let Some(ref err) = self.error {
            if text_area.height > 0 {
                let line = Rect { height: 1, ..text_area };
                frame.render_widget(
                    Paragraph::new(Line::styled(err.to_string(), self.style.error)),
                    line,
                );
                text_area.y += 1;
                text_area.height -= 1;
            }
        }

        let rows = self.rows(text_area.width);
        let max = self.max_offset(rows.len(), text_area.height);
        let offset = self.offset.min(max);
        self.text_area.set(text_area);
        self.rendered_offset.set(offset);

        let lines: Vec<Line> = rows
            .iter()
            .skip(usize::from(offset))
            .take(usize::from(text_area.height))
            .map(|row| {
                Line::from(
                    row.runs
                        .iter()
                        .map(|run| Span::styled(run.text.clone(), self.segment_style(run.segment)))
                        .collect::<Vec<_>>(),
                )
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), text_area);

        if max > 0 {
            let mut scrollbar_state =
                ScrollbarState::new(usize::from(max)).position(usize::from(offset));
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight),
                area,
                &mut scrollbar_state,
            );
        }
    }

    fn focused(&self) -> bool {
        self.focus
    }
}
