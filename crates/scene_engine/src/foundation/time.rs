//! Time management utilities

use std::time::Instant;

/// High-precision timer for frame timing.
///
/// The total elapsed time is kept in `f64` seconds because the scene's
/// animations are wall-clock driven and must not lose precision over a
/// long session.
pub struct Timer {
    start: Instant,
    last_frame: Instant,
    delta_time: f32,
    frame_count: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Create a new timer
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_frame: now,
            delta_time: 0.0,
            frame_count: 0,
        }
    }

    /// Update the timer (should be called once per frame)
    pub fn update(&mut self) {
        let now = Instant::now();
        self.delta_time = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.frame_count += 1;
    }

    /// Get the time since the last frame in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Get the wall-clock seconds elapsed since timer creation
    pub fn total_time(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }

    /// Get the current frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}
