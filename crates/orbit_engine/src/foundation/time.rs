//! Frame timing
//!
//! The scene only cares about elapsed deltas, never the real frame rate. The
//! host feeds [`FrameTime`] values either from a [`FrameClock`] driven by the
//! wall clock or from a fixed simulated step.

use std::time::{Duration, Instant};

/// Elapsed times handed to the scene for one frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameTime {
    /// Seconds since the previous frame
    pub delta: f32,
    /// Seconds the clock has been running since it was first resumed
    pub since_first_resume: f32,
}

impl FrameTime {
    /// Create a frame time from raw seconds
    pub const fn new(delta: f32, since_first_resume: f32) -> Self {
        Self { delta, since_first_resume }
    }

    /// Advance by a fixed step, as a simulated clock would
    #[must_use]
    pub fn step(self, delta: f32) -> Self {
        Self {
            delta,
            since_first_resume: self.since_first_resume + delta,
        }
    }
}

/// Wall-clock frame timer that can be paused while the host is inactive
///
/// Time spent paused does not count toward `since_first_resume`, and the first
/// frame after resuming reports a zero delta.
pub struct FrameClock {
    last_frame: Option<Instant>,
    running_total: Duration,
    frame_count: u64,
    paused: bool,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    /// Create a clock that starts on the first call to [`FrameClock::tick`]
    pub const fn new() -> Self {
        Self {
            last_frame: None,
            running_total: Duration::ZERO,
            frame_count: 0,
            paused: false,
        }
    }

    /// Advance the clock and return the elapsed times for this frame
    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> FrameTime {
        if self.paused {
            return FrameTime::new(0.0, self.running_total.as_secs_f32());
        }

        let delta = self
            .last_frame
            .map_or(Duration::ZERO, |last| now.saturating_duration_since(last));
        self.last_frame = Some(now);
        self.running_total += delta;
        self.frame_count += 1;

        FrameTime::new(delta.as_secs_f32(), self.running_total.as_secs_f32())
    }

    /// Stop counting time (host resigned active)
    pub fn pause(&mut self) {
        if !self.paused {
            log::debug!("Frame clock paused after {} frames", self.frame_count);
            self.paused = true;
        }
    }

    /// Resume counting time; the next tick reports a zero delta
    pub fn resume(&mut self) {
        if self.paused {
            log::debug!("Frame clock resumed");
            self.paused = false;
            self.last_frame = None;
        }
    }

    /// Whether the clock is paused
    pub const fn is_paused(&self) -> bool {
        self.paused
    }

    /// Number of frames ticked while running
    pub const fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_first_tick_has_zero_delta() {
        let mut clock = FrameClock::new();
        let time = clock.tick_at(Instant::now());
        assert_eq!(time.delta, 0.0);
        assert_eq!(time.since_first_resume, 0.0);
    }

    #[test]
    fn test_ticks_accumulate() {
        let mut clock = FrameClock::new();
        let start = Instant::now();
        clock.tick_at(start);
        let time = clock.tick_at(start + Duration::from_millis(250));
        assert_abs_diff_eq!(time.delta, 0.25, epsilon = 1e-6);
        let time = clock.tick_at(start + Duration::from_millis(500));
        assert_abs_diff_eq!(time.since_first_resume, 0.5, epsilon = 1e-6);
        assert_eq!(clock.frame_count(), 3);
    }

    #[test]
    fn test_paused_time_is_not_counted() {
        let mut clock = FrameClock::new();
        let start = Instant::now();
        clock.tick_at(start);
        clock.tick_at(start + Duration::from_secs(1));

        clock.pause();
        let paused = clock.tick_at(start + Duration::from_secs(5));
        assert_eq!(paused.delta, 0.0);
        assert_abs_diff_eq!(paused.since_first_resume, 1.0, epsilon = 1e-6);

        clock.resume();
        let resumed = clock.tick_at(start + Duration::from_secs(10));
        assert_eq!(resumed.delta, 0.0);
        let next = clock.tick_at(start + Duration::from_millis(10_500));
        assert_abs_diff_eq!(next.since_first_resume, 1.5, epsilon = 1e-6);
    }

    #[test]
    fn test_fixed_step() {
        let time = FrameTime::default().step(0.5).step(0.5);
        assert_eq!(time.delta, 0.5);
        assert_eq!(time.since_first_resume, 1.0);
    }
}
