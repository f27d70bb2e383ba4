//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (simulation, rendering, input mapping).
//!
//! # Coordinates
//!
//! World space is continuous (`f64`) with `x` growing to the right and `y`
//! growing upward: `y = 0` is the bottom terminal row and `y = height - 1`
//! the top row. Renderers flip `y` when writing into a row-major buffer.
//!
//! # Game Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TIMESTEP_MS` | 16 | Fixed simulation step |
//! | `DEFAULT_FPS` | 30.0 | Render cadence |
//! | `MIN_FPS`..`MAX_FPS` | 1.0..1000.0 | Accepted render cadence |
//! | `AI_IDLE_SECS` | 3.0 | Idle time before attract mode takes over |
//! | `MOUSE_REPEAT_FRAMES` | 8 | Held-button steps before auto-repeat floats |
//!
//! # Examples
//!
//! ```
//! use floatybox_types::{Action, Object, Size, Vec2};
//!
//! let a = Object::new(Size::new(2, 1), Vec2::new(10.0, 10.0));
//! let b = Object::new(Size::new(3, 3), Vec2::new(9.0, 9.0));
//! assert!(a.intersects(&b));
//!
//! assert_eq!(Action::from_str("float"), Some(Action::Float));
//! ```

use std::ops::{Add, Sub};

/// Fixed timestep interval in milliseconds (16ms ≈ 60 steps per second)
pub const TIMESTEP_MS: u32 = 16;

/// Default render cadence in frames per second
pub const DEFAULT_FPS: f64 = 30.0;

/// Slowest accepted render cadence
pub const MIN_FPS: f64 = 1.0;

/// Fastest accepted render cadence
pub const MAX_FPS: f64 = 1000.0;

/// Whether `fps` is an accepted render cadence.
pub fn valid_fps(fps: f64) -> bool {
    (MIN_FPS..=MAX_FPS).contains(&fps)
}

/// Simulated seconds without player input before the attract-mode AI acts
pub const AI_IDLE_SECS: f64 = 3.0;

/// Attract-mode clearance above the lower sprite of the next goal
pub const AI_CLEARANCE: f64 = 0.4;

/// Steps a held mouse button waits before floating on every step
pub const MOUSE_REPEAT_FRAMES: u32 = 8;

/// Maximum absolute vertical drift of a goal (cells per second)
pub const GOAL_DRIFT: i64 = 4;

/// Per-second fraction of distance a passed goal keeps while retreating
pub const PASS_RETREAT_DECAY: f64 = 0.1;

/// Off-screen point passed goals retreat toward
pub const PASS_RETREAT_TARGET: Vec2 = Vec2::new(-4.0, -4.0);

/// Time scale for slow motion
pub const SLOW_MOTION: f64 = 0.5;

/// Time scale for super slow motion
pub const SUPER_SLOW_MOTION: f64 = 0.2;

/// Width of the pass sensor in cells
pub const PASS_SENSOR_WIDTH: u32 = 2;

/// Continuous 2D vector used for positions.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Discrete, non-negative size in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    pub x: u32,
    pub y: u32,
}

impl Size {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    pub fn as_vec2(self) -> Vec2 {
        Vec2::new(self.x as f64, self.y as f64)
    }
}

/// Axis-aligned rectangle anchored at its lowest `x`/`y` corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Object {
    pub size: Size,
    pub position: Vec2,
}

impl Object {
    pub const fn new(size: Size, position: Vec2) -> Self {
        Self { size, position }
    }

    pub fn min(&self) -> Vec2 {
        self.position
    }

    pub fn max(&self) -> Vec2 {
        self.position + self.size.as_vec2()
    }

    /// Half-open overlap test: touching edges do not intersect.
    ///
    /// # Examples
    ///
    /// ```
    /// use floatybox_types::{Object, Size, Vec2};
    ///
    /// let collider = Object::new(Size::new(3, 3), Vec2::new(9.0, 9.0));
    /// let inside = Object::new(Size::new(2, 1), Vec2::new(10.0, 10.0));
    /// let beside = Object::new(Size::new(2, 1), Vec2::new(12.0, 10.0));
    /// assert!(inside.intersects(&collider));
    /// assert!(!beside.intersects(&collider));
    /// ```
    pub fn intersects(&self, other: &Object) -> bool {
        let (a_min, a_max) = (self.min(), self.max());
        let (b_min, b_max) = (other.min(), other.max());
        a_min.x < b_max.x && a_max.x > b_min.x && a_min.y < b_max.y && a_max.y > b_min.y
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.position.x += dx;
        self.position.y += dy;
    }
}

/// The player's floating box: a rectangle with vertical velocity.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Player {
    pub object: Object,
    pub velocity: f64,
}

/// Resolution of a goal against the player.
///
/// `Unresolved -> Passed` and `Unresolved -> Missed` are the only transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GoalState {
    #[default]
    Unresolved,
    Passed,
    Missed,
}

/// An obstacle pair forming a gap the player must float through.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Goal {
    /// Visual caps: `[top, bottom]`.
    pub sprites: [Object; 2],
    /// Full-height hit boxes above and below the gap: `[top, bottom]`.
    pub colliders: [Object; 2],
    /// Thin sensor past the gap; touching it scores the goal.
    pub pass: Object,
    /// Vertical drift in cells per second.
    pub velocity: f64,
    pub state: GoalState,
}

impl Goal {
    pub fn top_sprite(&self) -> &Object {
        &self.sprites[0]
    }

    pub fn bottom_sprite(&self) -> &Object {
        &self.sprites[1]
    }

    /// The collider used for spawn/retire bookkeeping.
    pub fn trailing_collider(&self) -> &Object {
        &self.colliders[1]
    }

    pub fn is_unresolved(&self) -> bool {
        self.state == GoalState::Unresolved
    }
}

/// Tunable round settings, reset at the start of every round.
///
/// `seed` is advanced by every randomized draw so a round is reproducible from
/// its initial seed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    pub seed: u32,
    /// World scroll speed in cells per second (negative scrolls left).
    pub speed: f64,
    pub gravity: f64,
    /// Velocity applied by a float; also the velocity bound.
    pub impulse: f64,
    /// Horizontal anchor of the box as a fraction of the screen width.
    pub box_offset: f64,
    pub box_size: Size,
}

impl Settings {
    pub fn with_seed(seed: u32) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 1,
            speed: -16.0,
            gravity: -80.0,
            impulse: 20.0,
            box_offset: 0.25,
            box_size: Size::new(2, 1),
        }
    }
}

/// Actions an input can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Stop the program
    Quit,
    /// Pause and hand the terminal back
    Suspend,
    /// Force a full repaint (and a resize-style reset)
    Redraw,
    /// Reset the round and settings to defaults
    Reset,
    /// Apply one upward impulse
    Float,
    /// Begin held floating (mouse button down)
    HoldStart,
    /// End held floating (mouse button up)
    HoldEnd,
    /// Toggle colour output
    ToggleColor,
    /// Toggle 0.5x time scale
    SlowMotion,
    /// Toggle 0.2x time scale
    SuperSlowMotion,
    /// Show the key bindings
    Help,
    /// Start typing at the prompt
    Prompt,
}

impl Action {
    pub const ALL: [Action; 12] = [
        Action::Quit,
        Action::Suspend,
        Action::Redraw,
        Action::Reset,
        Action::Float,
        Action::HoldStart,
        Action::HoldEnd,
        Action::ToggleColor,
        Action::SlowMotion,
        Action::SuperSlowMotion,
        Action::Help,
        Action::Prompt,
    ];

    /// Parse action from string (for keymap overrides)
    ///
    /// # Examples
    ///
    /// ```
    /// use floatybox_types::Action;
    ///
    /// assert_eq!(Action::from_str("Quit"), Some(Action::Quit));
    /// assert_eq!(Action::from_str("slow-motion"), Some(Action::SlowMotion));
    /// assert_eq!(Action::from_str("jump"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        Self::ALL.into_iter().find(|a| a.as_str() == s)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Quit => "quit",
            Action::Suspend => "suspend",
            Action::Redraw => "redraw",
            Action::Reset => "reset",
            Action::Float => "float",
            Action::HoldStart => "hold-start",
            Action::HoldEnd => "hold-end",
            Action::ToggleColor => "toggle-colour",
            Action::SlowMotion => "slow-motion",
            Action::SuperSlowMotion => "super-slow-motion",
            Action::Help => "help",
            Action::Prompt => "prompt",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Action::Quit => "quit the program",
            Action::Suspend => "suspend the program",
            Action::Redraw => "force screen redraw",
            Action::Reset => "reset game and settings to default state",
            Action::Float => "increase velocity",
            Action::HoldStart => "hold to keep floating",
            Action::HoldEnd => "stop holding",
            Action::ToggleColor => "toggle enable/disable colour",
            Action::SlowMotion => "slow-motion",
            Action::SuperSlowMotion => "super slow-motion",
            Action::Help => "show key bindings",
            Action::Prompt => "open the prompt",
        }
    }
}
