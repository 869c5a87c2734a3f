//! Frame driver abstraction.
//!
//! The engine never reads a wall clock for animation. The host hands it a
//! [`FrameClock`] once per frame; [`FrameTimer`] turns successive timestamps
//! into bounded physics deltas.

use bevy::time::Time;

use crate::config::MAX_FRAME_DT;

/// Monotonic time source sampled once per frame.
pub trait FrameClock {
    /// Seconds since an arbitrary fixed origin.
    fn now_secs(&self) -> f64;
}

impl FrameClock for Time {
    fn now_secs(&self) -> f64 {
        self.elapsed_secs_f64()
    }
}

/// Hand-driven clock for headless runs and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ManualClock {
    now: f64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward; negative or non-finite steps are ignored.
    pub fn advance(&mut self, dt: f64) {
        if dt.is_finite() && dt > 0.0 {
            self.now += dt;
        }
    }
}

impl FrameClock for ManualClock {
    fn now_secs(&self) -> f64 {
        self.now
    }
}

/// Converts timestamps into per-frame deltas.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameTimer {
    baseline: Option<f64>,
}

impl FrameTimer {
    /// Forget the previous timestamp; the next frame yields a zero delta.
    pub fn reset(&mut self) {
        self.baseline = None;
    }

    /// Delta since the previous call, clamped to `[0, MAX_FRAME_DT]`.
    pub fn delta(&mut self, now: f64) -> f32 {
        let dt = match self.baseline {
            Some(prev) if now.is_finite() => (now - prev) as f32,
            _ => 0.0,
        };
        if now.is_finite() {
            self.baseline = Some(now);
        }
        clamp_frame_dt(dt)
    }
}

/// Non-finite or negative deltas become 0; long stalls are capped.
pub fn clamp_frame_dt(dt: f32) -> f32 {
    if dt.is_finite() {
        dt.clamp(0.0, MAX_FRAME_DT)
    } else {
        0.0
    }
}
