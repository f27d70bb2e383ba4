//! Timing engine.
//!
//! Turns wall-clock ticks into fixed simulation steps. Knows nothing about
//! terminals or game rules; the caller supplies the clock readings and the
//! step callback.

pub mod scheduler;

pub use floatybox_types as types;

pub use scheduler::FixedTimestep;
