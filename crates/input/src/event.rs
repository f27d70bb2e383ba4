//! Decoded input events.
//!
//! Terminal events are reduced to three shapes before any handler sees them:
//! nothing, a key with its printable text, or a mouse code at a world
//! position. Everything the game does not understand becomes [`InputEvent::Null`].

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

/// A key or button the keymap can bind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputCode {
    Char(char),
    /// A letter pressed with Control, stored lowercase.
    Ctrl(char),
    Up,
    Down,
    Left,
    Right,
    Backspace,
    Enter,
    Esc,
    MouseLeftPress,
    MouseLeftRelease,
    ScrollUp,
    ScrollDown,
}

impl InputCode {
    /// Parse a code from its keymap name.
    ///
    /// Single characters map to [`InputCode::Char`]; `ctrl-x` maps to
    /// [`InputCode::Ctrl`].
    ///
    /// ```
    /// use floatybox_input::InputCode;
    ///
    /// assert_eq!(InputCode::from_str("j"), Some(InputCode::Char('j')));
    /// assert_eq!(InputCode::from_str("space"), Some(InputCode::Char(' ')));
    /// assert_eq!(InputCode::from_str("scroll-up"), Some(InputCode::ScrollUp));
    /// assert_eq!(InputCode::from_str("nope"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.trim();
        let mut chars = s.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Some(InputCode::Char(c));
        }

        let lower = s.to_ascii_lowercase();
        if let Some(rest) = lower.strip_prefix("ctrl-") {
            let mut chars = rest.chars();
            return match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii_alphabetic() => Some(InputCode::Ctrl(c)),
                _ => None,
            };
        }

        match lower.as_str() {
            "space" => Some(InputCode::Char(' ')),
            "up" => Some(InputCode::Up),
            "down" => Some(InputCode::Down),
            "left" => Some(InputCode::Left),
            "right" => Some(InputCode::Right),
            "backspace" => Some(InputCode::Backspace),
            "enter" => Some(InputCode::Enter),
            "esc" | "escape" => Some(InputCode::Esc),
            "mouse-left" => Some(InputCode::MouseLeftPress),
            "mouse-left-release" => Some(InputCode::MouseLeftRelease),
            "scroll-up" => Some(InputCode::ScrollUp),
            "scroll-down" => Some(InputCode::ScrollDown),
            _ => None,
        }
    }

    /// Human-readable name for help output, e.g. `<space>` or `<ctrl-c>`.
    pub fn label(self) -> String {
        match self {
            InputCode::Char(' ') => "<space>".to_string(),
            InputCode::Char(c) => c.to_string(),
            InputCode::Ctrl(c) => format!("<ctrl-{c}>"),
            InputCode::Up => "<up>".to_string(),
            InputCode::Down => "<down>".to_string(),
            InputCode::Left => "<left>".to_string(),
            InputCode::Right => "<right>".to_string(),
            InputCode::Backspace => "<backspace>".to_string(),
            InputCode::Enter => "<enter>".to_string(),
            InputCode::Esc => "<esc>".to_string(),
            InputCode::MouseLeftPress => "<mouse-left>".to_string(),
            InputCode::MouseLeftRelease => "<mouse-left-release>".to_string(),
            InputCode::ScrollUp => "<scroll-up>".to_string(),
            InputCode::ScrollDown => "<scroll-down>".to_string(),
        }
    }

    pub fn is_mouse(self) -> bool {
        matches!(
            self,
            InputCode::MouseLeftPress
                | InputCode::MouseLeftRelease
                | InputCode::ScrollUp
                | InputCode::ScrollDown
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Null,
    Key {
        code: InputCode,
        /// Printable text the key produced; empty for non-printing keys.
        text: String,
    },
    /// Mouse code at a world position (y grows upward from the bottom row).
    Mouse { code: InputCode, x: i32, y: i32 },
}

impl InputEvent {
    pub fn key(code: InputCode) -> Self {
        let text = match code {
            InputCode::Char(c) => c.to_string(),
            _ => String::new(),
        };
        InputEvent::Key { code, text }
    }

    pub fn code(&self) -> Option<InputCode> {
        match self {
            InputEvent::Null => None,
            InputEvent::Key { code, .. } | InputEvent::Mouse { code, .. } => Some(*code),
        }
    }

    /// Decode a terminal event for a playfield `height` rows tall.
    pub fn from_crossterm(event: &Event, height: u32) -> Self {
        match event {
            Event::Key(key) => Self::from_key(key),
            Event::Mouse(mouse) => Self::from_mouse(mouse, height),
            _ => InputEvent::Null,
        }
    }

    fn from_key(key: &KeyEvent) -> Self {
        if key.kind == KeyEventKind::Release {
            return InputEvent::Null;
        }

        let code = match key.code {
            KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::CONTROL) => {
                InputCode::Ctrl(c.to_ascii_lowercase())
            }
            KeyCode::Char(c) => InputCode::Char(c),
            KeyCode::Up => InputCode::Up,
            KeyCode::Down => InputCode::Down,
            KeyCode::Left => InputCode::Left,
            KeyCode::Right => InputCode::Right,
            KeyCode::Backspace => InputCode::Backspace,
            KeyCode::Enter => InputCode::Enter,
            KeyCode::Esc => InputCode::Esc,
            _ => return InputEvent::Null,
        };
        InputEvent::key(code)
    }

    fn from_mouse(mouse: &MouseEvent, height: u32) -> Self {
        let code = match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => InputCode::MouseLeftPress,
            MouseEventKind::Up(MouseButton::Left) => InputCode::MouseLeftRelease,
            MouseEventKind::ScrollUp => InputCode::ScrollUp,
            MouseEventKind::ScrollDown => InputCode::ScrollDown,
            _ => return InputEvent::Null,
        };
        InputEvent::Mouse {
            code,
            x: mouse.column as i32,
            y: height as i32 - 1 - mouse.row as i32,
        }
    }
}
