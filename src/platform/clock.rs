//! Frame pacing and FPS tracking

use std::time::{Duration, Instant};

use crate::consts::{MAX_FRAME_DT, SIM_DT};

/// Measures real frame deltas and paces the loop to a frame cap
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Option<Instant>,
    frame_start: Instant,
    budget: Duration,
    // FPS tracking over the last 60 frames
    frame_times: [Option<Instant>; 60],
    frame_index: usize,
    fps: f32,
}

impl FrameClock {
    /// `frame_cap` of 0 disables pacing
    pub fn new(frame_cap: u32) -> Self {
        let budget = if frame_cap == 0 {
            Duration::ZERO
        } else {
            Duration::from_nanos(1_000_000_000 / frame_cap as u64)
        };
        Self {
            last: None,
            frame_start: Instant::now(),
            budget,
            frame_times: [None; 60],
            frame_index: 0,
            fps: 0.0,
        }
    }

    /// Start a frame now; returns the delta to feed the simulation
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    /// Start a frame at `now`. The first frame gets one nominal step; long
    /// stalls (dragging the terminal, a debugger) are clamped.
    pub fn tick_at(&mut self, now: Instant) -> f32 {
        let dt = match self.last {
            Some(last) => now.saturating_duration_since(last).as_secs_f32(),
            None => SIM_DT,
        };
        self.last = Some(now);
        self.frame_start = now;

        // Oldest sample is the slot about to be overwritten
        let oldest = self.frame_times[self.frame_index];
        self.frame_times[self.frame_index] = Some(now);
        self.frame_index = (self.frame_index + 1) % self.frame_times.len();
        if let Some(oldest) = oldest {
            let elapsed = now.saturating_duration_since(oldest).as_secs_f32();
            if elapsed > 0.0 {
                self.fps = self.frame_times.len() as f32 / elapsed;
            }
        }

        dt.min(MAX_FRAME_DT)
    }

    /// Time left in this frame's budget, measured at `now`
    pub fn remaining_at(&self, now: Instant) -> Duration {
        self.budget
            .saturating_sub(now.saturating_duration_since(self.frame_start))
    }

    pub fn remaining(&self) -> Duration {
        self.remaining_at(Instant::now())
    }

    /// Frames per second averaged over the last 60 frames (0 until warmed up)
    pub fn fps(&self) -> f32 {
        self.fps
    }
}
