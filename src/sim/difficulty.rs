//! Difficulty ramp
//!
//! Scroll speed grows by a fixed factor each time a cadence counter (seconds,
//! recycles or score) crosses a multiple of the cadence, and never exceeds the
//! configured ceiling. Transient boosts are applied on top of this value by the
//! caller and never written back into it.

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyController {
    speed: f32,
    base_speed: f32,
    growth: f32,
    max_speed: f32,
    cadence: u32,
    /// Highest cadence boundary already applied (boundary 0 counts as applied)
    last_boundary: u64,
}

impl DifficultyController {
    pub fn new(base_speed: f32, growth: f32, max_speed: f32, cadence: u32) -> Self {
        Self {
            speed: base_speed.min(max_speed),
            base_speed,
            growth,
            max_speed,
            cadence,
            last_boundary: 0,
        }
    }

    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self::new(
            tuning.base_speed,
            tuning.speed_growth,
            tuning.max_speed,
            tuning.speed_cadence,
        )
    }

    /// Back to base speed for a new run
    pub fn reset(&mut self) {
        self.speed = self.base_speed.min(self.max_speed);
        self.last_boundary = 0;
    }

    /// Current scroll speed (distance per nominal tick)
    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Apply growth for every cadence boundary `trigger` has crossed since the
    /// last call. Calling again with the same (or a lower) trigger does nothing.
    ///
    /// Returns true if at least one new boundary was crossed.
    pub fn maybe_escalate(&mut self, trigger: u64) -> bool {
        if self.cadence == 0 {
            log::warn!("difficulty cadence is 0, ramp disabled");
            return false;
        }

        let boundary = trigger / self.cadence as u64;
        if boundary <= self.last_boundary {
            return false;
        }

        for _ in self.last_boundary..boundary {
            self.speed = (self.speed * self.growth).min(self.max_speed);
        }
        self.last_boundary = boundary;
        log::info!(
            "Difficulty boundary {} reached (trigger {}), speed now {:.2}",
            boundary,
            trigger,
            self.speed
        );
        true
    }
}
