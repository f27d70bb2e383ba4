//! Single-line text prompt.
//!
//! While active the prompt swallows every key event. Printable text is
//! inserted at the cursor; Left/Right move it, Backspace deletes behind it,
//! Esc cancels and Enter submits.

use crate::event::{InputCode, InputEvent};

/// What the prompt did with an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptOutcome {
    /// The prompt is inactive or the event is not a key.
    Ignored,
    Consumed,
    Submitted(String),
    Cancelled,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Prompt {
    active: bool,
    buffer: Vec<char>,
    cursor: usize,
}

impl Prompt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Begin typing with an empty line.
    pub fn start(&mut self) {
        self.active = true;
        self.clear();
    }

    pub fn cancel(&mut self) {
        self.active = false;
        self.clear();
    }

    pub fn text(&self) -> String {
        self.buffer.iter().collect()
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    pub fn handle(&mut self, event: &InputEvent) -> PromptOutcome {
        if !self.active {
            return PromptOutcome::Ignored;
        }
        let InputEvent::Key { code, text } = event else {
            return PromptOutcome::Ignored;
        };

        match code {
            InputCode::Esc => {
                self.cancel();
                return PromptOutcome::Cancelled;
            }
            InputCode::Enter => {
                let line = self.text();
                self.active = false;
                self.clear();
                return PromptOutcome::Submitted(line);
            }
            InputCode::Left => self.cursor = self.cursor.saturating_sub(1),
            InputCode::Right => self.cursor = (self.cursor + 1).min(self.buffer.len()),
            InputCode::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    self.buffer.remove(self.cursor);
                }
            }
            _ => {
                for c in text.chars().filter(|c| !c.is_control()) {
                    self.buffer.insert(self.cursor, c);
                    self.cursor += 1;
                }
            }
        }
        PromptOutcome::Consumed
    }
}
