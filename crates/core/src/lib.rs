//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the simulation: obstacle generation, movement,
//! collision and scoring. It has **zero dependencies** on terminals, input
//! decoding or wall-clock time, making it:
//!
//! - **Deterministic**: Same settings, seed and inputs produce identical runs
//! - **Testable**: Step functions can be driven with a fresh context in tests
//! - **Portable**: Can run headless
//!
//! # Module Structure
//!
//! - [`math`]: clamp, lerp, scale and easing helpers
//! - [`rng`]: per-call seeded ranged integers
//! - [`goals`]: goal geometry and the spawn/advance/retire window
//! - [`physics`]: distance, attract mode, trail and box integration
//! - [`collision`]: box versus nearest unresolved goal
//! - [`scoring`]: score and high score
//! - [`game_state`]: the context object tying it all together
//!
//! # Example
//!
//! ```
//! use floatybox_core::GameState;
//! use floatybox_types::{Action, Settings};
//!
//! let mut game = GameState::new(Settings::with_seed(7), 80, 40);
//! game.apply_action(Action::Float);
//! assert!(game.playing());
//!
//! for _ in 0..60 {
//!     game.update(0.016);
//! }
//! assert_eq!(game.frame(), 60);
//! ```
//!
//! # Timing
//!
//! [`GameState::update`](game_state::GameState::update) takes the fixed step
//! in seconds. The engine crate decides how many steps to run per tick.

pub mod collision;
pub mod game_state;
pub mod goals;
pub mod math;
pub mod physics;
pub mod rng;
pub mod scoring;

pub use floatybox_types as types;

// Re-export commonly used types for convenience
pub use collision::Collision;
pub use game_state::GameState;
pub use goals::{GoalField, GoalGeometry};
pub use rng::{random_range, SimpleRng};
pub use scoring::Score;
