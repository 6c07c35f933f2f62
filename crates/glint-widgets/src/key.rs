//! Key bindings and a one-line help renderer for them.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::style::Style;
use ratatui::text::{Line, Span};

/// A key binding that maps one or more key combinations to a described action.
#[derive(Debug, Clone)]
pub struct Binding {
    /// The set of key combinations that trigger this binding.
    pub keys: Vec<KeyCombination>,
    /// A human-readable description of the action this binding performs.
    pub description: String,
    /// Whether this binding is currently active. Disabled bindings never match.
    pub enabled: bool,
}

/// A single key press with optional modifier keys (Ctrl, Alt, Shift).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCombination {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl Binding {
    /// Create a binding for a single key combination.
    pub fn new(key: KeyCombination, description: impl Into<String>) -> Self {
        Self::with_keys(vec![key], description)
    }

    /// Create a binding triggered by any of several key combinations.
    pub fn with_keys(keys: Vec<KeyCombination>, description: impl Into<String>) -> Self {
        Self {
            keys,
            description: description.into(),
            enabled: true,
        }
    }

    /// Whether the event matches any of this binding's combinations.
    /// Always `false` when the binding is disabled.
    pub fn matches(&self, event: &KeyEvent) -> bool {
        self.enabled
            && self
                .keys
                .iter()
                .any(|k| k.code == event.code && event.modifiers.contains(k.modifiers))
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Keys joined with `/`, e.g. `tab/→`.
    pub fn keys_label(&self) -> String {
        self.keys
            .iter()
            .map(KeyCombination::label)
            .collect::<Vec<_>>()
            .join("/")
    }
}

impl KeyCombination {
    pub fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }

    pub fn ctrl(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::CONTROL,
        }
    }

    /// Short display form used in help lines.
    pub fn label(&self) -> String {
        let key = match self.code {
            KeyCode::Char(' ') => "space".to_string(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Enter => "enter".to_string(),
            KeyCode::Esc => "esc".to_string(),
            KeyCode::Tab => "tab".to_string(),
            KeyCode::BackTab => "shift+tab".to_string(),
            KeyCode::Up => "↑".to_string(),
            KeyCode::Down => "↓".to_string(),
            KeyCode::Left => "←".to_string(),
            KeyCode::Right => "→".to_string(),
            KeyCode::Home => "home".to_string(),
            KeyCode::End => "end".to_string(),
            KeyCode::PageUp => "pgup".to_string(),
            KeyCode::PageDown => "pgdn".to_string(),
            other => format!("{other:?}").to_lowercase(),
        };
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            format!("ctrl+{key}")
        } else {
            key
        }
    }
}

/// Types that expose their key bindings for help display.
pub trait KeyMap {
    /// The most important bindings, for a single help line.
    fn short_help(&self) -> Vec<&Binding>;
}

/// Render a keymap's short help as `key desc  key desc`.
pub fn help_line(map: &impl KeyMap, key_style: Style, desc_style: Style) -> Line<'static> {
    let mut spans = Vec::new();
    for binding in map.short_help().into_iter().filter(|b| b.enabled) {
        if !spans.is_empty() {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(binding.keys_label(), key_style));
        spans.push(Span::styled(format!(" {}", binding.description), desc_style));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binding_matches_any_key() {
        let b = Binding::with_keys(
            vec![KeyCombination::new(KeyCode::Tab), KeyCombination::new(KeyCode::Right)],
            "Next",
        );
        assert!(b.matches(&KeyEvent::new(KeyCode::Right, KeyModifiers::NONE)));
        assert!(!b.matches(&KeyEvent::new(KeyCode::Left, KeyModifiers::NONE)));
        assert!(!b.enabled(false).matches(&KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE)));
    }

    #[test]
    fn labels() {
        assert_eq!(KeyCombination::new(KeyCode::Char(' ')).label(), "space");
        assert_eq!(KeyCombination::ctrl(KeyCode::Char('c')).label(), "ctrl+c");
        let b = Binding::with_keys(
            vec![KeyCombination::new(KeyCode::Tab), KeyCombination::new(KeyCode::Char('l'))],
            "Next",
        );
        assert_eq!(b.keys_label(), "tab/l");
    }

    struct Two(Binding, Binding);

    impl KeyMap for Two {
        fn short_help(&self) -> Vec<&Binding> {
            vec![&self.0, &self.1]
        }
    }

    #[test]
    fn help_line_skips_disabled() {
        let map = Two(
            Binding::new(KeyCombination::new(KeyCode::Enter), "open"),
            Binding::new(KeyCombination::new(KeyCode::Esc), "clear").enabled(false),
        );
        let line = help_line(&map, Style::default(), Style::default());
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "enter open");
    }
}
