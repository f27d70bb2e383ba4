//! Terminal input module (engine-facing).
//!
//! Decodes `crossterm` events into [`InputEvent`]s and routes them through a
//! handler chain (prompt, control keys, keymap) that produces
//! [`crate::types::Action`] tags. Nothing here touches game state.

pub mod event;
pub mod map;
pub mod prompt;
pub mod router;

pub use floatybox_types as types;

pub use event::{InputCode, InputEvent};
pub use map::{control_action, Keymap, CONTROL_CODES};
pub use prompt::{Prompt, PromptOutcome};
pub use router::{InputRouter, Routed};
