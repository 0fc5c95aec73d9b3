//! Frame clock.
//!
//! Produces one delta per frame, either fixed (deterministic headless runs)
//! or measured from the wall clock, and paces wall-clock runs to the target
//! frame rate.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Longest wall-clock delta handed to the simulation.
const MAX_DT: f32 = 0.25;

/// Samples kept for the frame-time average.
const MAX_SAMPLES: usize = 120;

/// Frame clock and pacing.
#[derive(Debug)]
pub struct FrameClock {
    /// Time budget per frame
    frame_budget: Duration,
    /// Time of last frame start
    last_frame: Instant,
    /// Delta returned in fixed mode
    fixed_dt: f32,
    /// Ignore the wall clock and return `fixed_dt`
    fixed: bool,
    /// Recent deltas for averaging
    frame_times: VecDeque<f32>,
}

impl FrameClock {
    /// Creates a clock targeting `target_fps`.
    #[must_use]
    pub fn new(target_fps: u32, fixed: bool) -> Self {
        let target_fps = target_fps.max(1);
        Self {
            frame_budget: Duration::from_secs_f64(1.0 / f64::from(target_fps)),
            last_frame: Instant::now(),
            fixed_dt: 1.0 / target_fps as f32,
            fixed,
            frame_times: VecDeque::with_capacity(MAX_SAMPLES),
        }
    }

    /// Delta for the frame that is about to run.
    pub fn delta_time(&mut self) -> f32 {
        let now = Instant::now();
        let dt = if self.fixed {
            self.fixed_dt
        } else {
            (now - self.last_frame).as_secs_f32().min(MAX_DT)
        };
        self.last_frame = now;

        self.frame_times.push_back(dt);
        if self.frame_times.len() > MAX_SAMPLES {
            self.frame_times.pop_front();
        }
        dt
    }

    /// Sleep for the remainder of the frame budget. Fixed clocks never sleep.
    pub fn sleep_remainder(&self) {
        if self.fixed {
            return;
        }
        let elapsed = self.last_frame.elapsed();
        if elapsed < self.frame_budget {
            std::thread::sleep(self.frame_budget - elapsed);
        }
    }

    /// Simulated frames per second, averaged over recent frames.
    #[must_use]
    pub fn current_fps(&self) -> f32 {
        let avg = self.average_frame_time();
        if avg > 0.0 {
            1.0 / avg
        } else {
            0.0
        }
    }

    /// Average frame delta in milliseconds.
    #[must_use]
    pub fn average_frame_time_ms(&self) -> f32 {
        self.average_frame_time() * 1000.0
    }

    fn average_frame_time(&self) -> f32 {
        if self.frame_times.is_empty() {
            return 0.0;
        }
        self.frame_times.iter().sum::<f32>() / self.frame_times.len() as f32
    }
}
