//! Terminal "game renderer" module.
//!
//! This is a small, game-oriented rendering layer for terminal gameplay.
//! It renders into a simple framebuffer that can be flushed to a terminal
//! backend, diffing against the previous frame.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Draw continuous positions at 1/8-cell resolution
//! - Fade colors by compositing over the background before emitting

pub mod color;
pub mod fb;
pub mod game_view;
pub mod renderer;

pub use floatybox_core as core;
pub use floatybox_input as input;
pub use floatybox_types as types;

pub use color::{blend, Color, Palette, Rgb};
pub use fb::{Cell, CellStyle, FrameBuffer};
pub use game_view::{goal_alpha, trail_alpha, GameView, Hud};
pub use renderer::{encode_diff_into, encode_full_into, terminal_size, TerminalRenderer};
