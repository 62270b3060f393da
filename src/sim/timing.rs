//! Wall-clock timing and frame-rate accounting
//!
//! Real elapsed time enters the simulation in exactly two places: the enemy
//! spawn throttle and the rolling FPS window behind the score factor. Both
//! read milliseconds from the world's `Clock`, so tests swap in a manual
//! clock and advance it explicitly.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::consts::FRAMERATE;

/// Monotonic time source, in milliseconds since world creation
#[derive(Debug, Clone)]
pub enum Clock {
    /// Real time measured from a monotonic instant (the default)
    Wall { origin: Instant },
    /// Manually advanced time for tests and replays
    Manual { now_ms: f64 },
}

impl Default for Clock {
    fn default() -> Self {
        Clock::Wall {
            origin: Instant::now(),
        }
    }
}

impl Clock {
    /// A manual clock starting at zero
    pub fn manual() -> Self {
        Clock::Manual { now_ms: 0.0 }
    }

    /// Current time in milliseconds
    pub fn now_ms(&self) -> f64 {
        match self {
            Clock::Wall { origin } => origin.elapsed().as_secs_f64() * 1000.0,
            Clock::Manual { now_ms } => *now_ms,
        }
    }

    /// Advance a manual clock; no-op on a wall clock
    pub fn advance(&mut self, ms: f64) {
        if let Clock::Manual { now_ms } = self {
            *now_ms += ms;
        }
    }
}

/// Rolling one-second frame-rate window
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FpsCounter {
    /// Last completed measurement, capped at the target rate
    pub fps: u32,
    /// Lowest completed measurement (sentinel 1000 until the first window)
    pub fps_min: u32,
    /// Highest completed measurement
    pub fps_max: u32,
    /// Frames counted in the open window
    pub frames: u32,
    /// When the open window began (world milliseconds)
    pub window_start_ms: f64,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self {
            fps: 0,
            fps_min: 1000,
            fps_max: 0,
            frames: 0,
            window_start_ms: 0.0,
        }
    }
}

impl FpsCounter {
    /// Register one frame; closes the window once a second has passed
    pub fn frame(&mut self, now_ms: f64) {
        self.frames += 1;
        let elapsed = now_ms - self.window_start_ms;
        if elapsed > 1000.0 {
            let measured = (self.frames as f64 * 1000.0 / elapsed).round() as u32;
            self.fps = measured.min(FRAMERATE);
            self.fps_min = self.fps_min.min(self.fps);
            self.fps_max = self.fps_max.max(self.fps);
            self.frames = 0;
            self.window_start_ms = now_ms;
        }
    }
}

/// Score multiplier in (0, 1] derived from the last FPS measurement.
/// Squared so dropped frames cost score superlinearly.
pub fn score_factor(fps: u32) -> f32 {
    let quality = 0.01 + (fps.min(FRAMERATE) as f32 / FRAMERATE as f32) * 0.99;
    quality * quality
}
