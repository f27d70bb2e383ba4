//! Key mapping from input codes to game actions.
//!
//! Two tables: fixed control keys that always win, and a remappable keymap
//! consulted afterwards. Both map to plain [`Action`] tags; dispatch happens
//! in one place in the application.

use std::collections::HashMap;

use crate::event::InputCode;
use crate::types::Action;

/// Codes with a fixed control binding.
pub const CONTROL_CODES: [InputCode; 3] = [
    InputCode::Ctrl('c'),
    InputCode::Ctrl('z'),
    InputCode::Ctrl('l'),
];

/// Fixed control-key bindings, checked before the keymap.
pub fn control_action(code: InputCode) -> Option<Action> {
    match code {
        InputCode::Ctrl('c') => Some(Action::Quit),
        InputCode::Ctrl('z') => Some(Action::Suspend),
        InputCode::Ctrl('l') => Some(Action::Redraw),
        _ => None,
    }
}

/// Remappable table of input codes to actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keymap {
    bindings: HashMap<InputCode, Action>,
}

impl Default for Keymap {
    fn default() -> Self {
        let mut map = Self::empty();
        map.bind(InputCode::Char('q'), Action::Quit);
        map.bind(InputCode::Char('Q'), Action::Quit);
        map.bind(InputCode::Backspace, Action::Reset);

        for code in [
            InputCode::Char(' '),
            InputCode::Char('w'),
            InputCode::Char('k'),
            InputCode::Up,
            InputCode::ScrollUp,
        ] {
            map.bind(code, Action::Float);
        }
        map.bind(InputCode::MouseLeftPress, Action::HoldStart);
        map.bind(InputCode::MouseLeftRelease, Action::HoldEnd);

        map.bind(InputCode::Char('c'), Action::ToggleColor);
        map.bind(InputCode::Char('s'), Action::SuperSlowMotion);
        map.bind(InputCode::Char('d'), Action::SlowMotion);
        map.bind(InputCode::Char('?'), Action::Help);
        map.bind(InputCode::Char(':'), Action::Prompt);
        map
    }
}

impl Keymap {
    pub fn empty() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Bind `code` to `action`, replacing any previous binding.
    pub fn bind(&mut self, code: InputCode, action: Action) -> Option<Action> {
        self.bindings.insert(code, action)
    }

    pub fn unbind(&mut self, code: InputCode) -> Option<Action> {
        self.bindings.remove(&code)
    }

    pub fn lookup(&self, code: InputCode) -> Option<Action> {
        self.bindings.get(&code).copied()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// All codes bound to `action`.
    pub fn codes_for(&self, action: Action) -> Vec<InputCode> {
        let mut codes: Vec<InputCode> = self
            .bindings
            .iter()
            .filter(|(_, a)| **a == action)
            .map(|(c, _)| *c)
            .collect();
        codes.sort_by_key(|c| format!("{:?}", c));
        codes
    }

    /// Apply comma-separated `code=action` overrides, e.g. `j=float,x=quit`.
    ///
    /// An action of `none` removes the binding. Malformed entries are logged
    /// and skipped. Returns the number of entries applied.
    pub fn apply_overrides(&mut self, overrides: &str) -> usize {
        let mut applied = 0;
        for entry in overrides.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            // Split on the last '=' so '=' itself can be bound.
            let Some((code, action)) = entry.rsplit_once('=') else {
                log::warn!("ignoring keymap entry without '=': {entry:?}");
                continue;
            };
            let Some(code) = InputCode::from_str(code) else {
                log::warn!("ignoring keymap entry with unknown key: {entry:?}");
                continue;
            };
            if action.trim().eq_ignore_ascii_case("none") {
                self.unbind(code);
                applied += 1;
                continue;
            }
            let Some(action) = Action::from_str(action) else {
                log::warn!("ignoring keymap entry with unknown action: {entry:?}");
                continue;
            };
            log::debug!("keymap override: {code:?} -> {}", action.as_str());
            self.bind(code, action);
            applied += 1;
        }
        applied
    }
}
