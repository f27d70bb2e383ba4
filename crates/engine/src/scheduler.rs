//! Fixed-timestep scheduler.
//!
//! Wall-clock ticks arrive with jitter; the simulation only ever sees
//! constant-size steps. Each tick measures the real time since the previous
//! tick, multiplies it by the time scale, adds it to an accumulator and drains
//! the accumulator one fixed step at a time.
//!
//! The scheduler takes `Instant`s from the caller instead of reading the clock
//! itself, so tests can drive it with synthetic time.

use std::time::{Duration, Instant};

use crate::types::{valid_fps, DEFAULT_FPS, TIMESTEP_MS};

#[derive(Debug, Clone)]
pub struct FixedTimestep {
    timestep: Duration,
    /// Minimum interval between ticks (render cadence).
    tick: Duration,
    time_scale: f64,
    accumulator: Duration,
    /// Total scaled time simulated since the last reset.
    elapsed: Duration,
    last_tick: Instant,
    fps: f64,
    paused: bool,
}

impl FixedTimestep {
    pub fn new(timestep: Duration, fps: f64, now: Instant) -> Self {
        // Rates outside MIN_FPS..=MAX_FPS fall back to the default.
        let fps = if valid_fps(fps) { fps } else { DEFAULT_FPS };
        Self {
            timestep,
            tick: Duration::from_secs_f64(1.0 / fps),
            time_scale: 1.0,
            accumulator: Duration::ZERO,
            elapsed: Duration::ZERO,
            last_tick: now,
            fps: 0.0,
            paused: false,
        }
    }

    /// Scheduler with the default 16ms step and the given render rate.
    pub fn with_fps(fps: f64, now: Instant) -> Self {
        Self::new(Duration::from_millis(TIMESTEP_MS as u64), fps, now)
    }

    /// The fixed step in seconds, as handed to the simulation.
    pub fn dt(&self) -> f64 {
        self.timestep.as_secs_f64()
    }

    pub fn timestep(&self) -> Duration {
        self.timestep
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    /// Set the multiplier applied to measured time from the next tick on.
    pub fn set_time_scale(&mut self, scale: f64) {
        self.time_scale = if scale.is_finite() { scale.max(0.0) } else { 1.0 };
    }

    /// Switch to `scale`, or back to real time if any scale is active.
    pub fn toggle_time_scale(&mut self, scale: f64) {
        if self.time_scale != 1.0 {
            self.set_time_scale(1.0);
        } else {
            self.set_time_scale(scale);
        }
    }

    pub fn accumulator(&self) -> Duration {
        self.accumulator
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Frames per second measured from the last scaled tick interval.
    pub fn fps(&self) -> f64 {
        self.fps
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Run one tick at `now`, calling `step` with the fixed `dt` once per
    /// drained step. Returns the number of steps run.
    ///
    /// A paused scheduler runs nothing.
    pub fn tick<F: FnMut(f64)>(&mut self, now: Instant, mut step: F) -> u32 {
        if self.paused {
            return 0;
        }

        let raw = now.saturating_duration_since(self.last_tick);
        let delta = if self.time_scale == 1.0 {
            raw
        } else {
            raw.mul_f64(self.time_scale)
        };
        self.last_tick = now;
        self.accumulator += delta;
        self.elapsed += delta;
        if !delta.is_zero() {
            self.fps = 1.0 / delta.as_secs_f64();
        }

        let dt = self.dt();
        let mut steps = 0;
        while !self.timestep.is_zero() && self.accumulator >= self.timestep {
            self.accumulator -= self.timestep;
            step(dt);
            steps += 1;
        }
        steps
    }

    /// When the next tick should fire, given when the current one started
    /// and finished.
    ///
    /// Waits at least one step and one render interval; a tick that ran long
    /// pushes the next one out by its own duration.
    pub fn next_deadline(&self, started: Instant, finished: Instant) -> Instant {
        let measured = finished.saturating_duration_since(started);
        finished + self.timestep.max(self.tick).max(measured)
    }

    /// Stop stepping; nothing accumulates until [`resume`](Self::resume).
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume from `now` without replaying the time spent paused.
    pub fn resume(&mut self, now: Instant) {
        self.paused = false;
        self.last_tick = now;
    }

    /// Start a new round: real-time scale, empty accumulator, clock at `now`.
    pub fn reset(&mut self, now: Instant) {
        self.time_scale = 1.0;
        self.accumulator = Duration::ZERO;
        self.elapsed = Duration::ZERO;
        self.last_tick = now;
        self.paused = false;
    }
}
