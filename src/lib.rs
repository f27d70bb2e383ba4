//! Floatybox (workspace facade crate).
//!
//! Re-exports the workspace crates as `floatybox::{core,engine,input,term,types}`
//! and hosts the application layer: configuration, signal relay and the event
//! loop.

pub mod app;
pub mod config;
pub mod signals;

pub use floatybox_core as core;
pub use floatybox_engine as engine;
pub use floatybox_input as input;
pub use floatybox_term as term;
pub use floatybox_types as types;
