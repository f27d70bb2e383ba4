//! Handler chain for decoded input events.
//!
//! Each event runs through, in order:
//!
//! 1. the prompt, which swallows every key while typing
//! 2. fixed control keys and the top-bar close zone
//! 3. the remappable keymap
//!
//! The first stage that claims the event stops the chain.

use arrayvec::ArrayVec;

use crate::event::{InputCode, InputEvent};
use crate::map::{control_action, Keymap};
use crate::prompt::{Prompt, PromptOutcome};
use crate::types::Action;

/// Width of the close button hot-zone at the right end of the top row.
pub const CLOSE_ZONE_WIDTH: u32 = 3;

/// Result of routing one event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Routed {
    pub actions: ArrayVec<Action, 4>,
    /// Line submitted from the prompt, if this event submitted one.
    pub submitted: Option<String>,
    pub consumed: bool,
}

impl Routed {
    fn consumed() -> Self {
        Self {
            consumed: true,
            ..Self::default()
        }
    }

    fn with(actions: &[Action]) -> Self {
        let mut routed = Self::consumed();
        routed.actions.extend(actions.iter().copied());
        routed
    }
}

#[derive(Debug, Clone, Default)]
pub struct InputRouter {
    keymap: Keymap,
    prompt: Prompt,
}

impl InputRouter {
    pub fn new(keymap: Keymap) -> Self {
        Self {
            keymap,
            prompt: Prompt::new(),
        }
    }

    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    pub fn keymap_mut(&mut self) -> &mut Keymap {
        &mut self.keymap
    }

    pub fn prompt(&self) -> &Prompt {
        &self.prompt
    }

    /// Route `event` on a `width` x `height` playfield.
    pub fn route(&mut self, event: &InputEvent, width: u32, height: u32) -> Routed {
        match self.prompt.handle(event) {
            PromptOutcome::Ignored => {}
            PromptOutcome::Consumed | PromptOutcome::Cancelled => return Routed::consumed(),
            PromptOutcome::Submitted(line) => {
                let mut routed = Routed::consumed();
                routed.submitted = Some(line);
                return routed;
            }
        }

        let Some(code) = event.code() else {
            return Routed::default();
        };

        if let Some(action) = control_action(code) {
            return Routed::with(&[action]);
        }

        if let InputEvent::Mouse {
            code: InputCode::MouseLeftRelease,
            x,
            y,
        } = *event
        {
            if in_close_zone(x, y, width, height) {
                return Routed::with(&[Action::HoldEnd, Action::Quit]);
            }
        }

        match self.keymap.lookup(code) {
            Some(Action::Prompt) => {
                self.prompt.start();
                Routed::with(&[Action::Prompt])
            }
            Some(action) => Routed::with(&[action]),
            None => Routed::default(),
        }
    }
}

/// Whether world position (`x`, `y`) is on the close button.
pub fn in_close_zone(x: i32, y: i32, width: u32, height: u32) -> bool {
    let top = height as i32 - 1;
    y == top && x >= width as i32 - CLOSE_ZONE_WIDTH as i32 && x < width as i32
}
