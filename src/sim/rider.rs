//! The player's rider
//!
//! Lateral motion is clamped to the screen, lean is purely cosmetic, and the
//! sprite-sheet animation runs off an accumulator so the visual cadence does
//! not depend on the render rate.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Footprint;
use crate::consts::*;
use crate::per_tick_distance;
use crate::tuning::Tuning;

/// Absorbs float drift when the accumulator lands a hair under a frame boundary
const ANIM_EPSILON: f32 = 1e-4;

/// Held steering directions for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Steer {
    pub left: bool,
    pub right: bool,
}

/// The rider entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rider {
    pub pos: Vec2,
    /// Lean in degrees, negative = leaning left
    pub lean: f32,
    /// Current sprite-sheet frame (0..ANIM_FRAME_COUNT)
    pub frame: usize,
    anim_timer: f32,
    footprint: Footprint,
}

impl Rider {
    pub fn new(tuning: &Tuning) -> Self {
        let half = Self::half_width();
        let x = tuning
            .rider_start_x
            .clamp(half, (tuning.screen_width - half).max(half));
        let pos = Vec2::new(x, tuning.rider_y);
        Self {
            pos,
            lean: 0.0,
            frame: 0,
            anim_timer: 0.0,
            footprint: Footprint::from_center(
                pos,
                Vec2::new(RIDER_FOOTPRINT_WIDTH, RIDER_FOOTPRINT_HEIGHT),
            ),
        }
    }

    #[inline]
    pub fn footprint(&self) -> &Footprint {
        &self.footprint
    }

    #[inline]
    pub fn half_width() -> f32 {
        RIDER_SPRITE_WIDTH / 2.0
    }

    /// Apply held directions: move, clamp, and set or relax the lean.
    ///
    /// Left is applied before right, so holding both nets out deterministically.
    pub fn steer(&mut self, steer: Steer, lateral_speed: f32, dt: f32, tuning: &Tuning) {
        let step = per_tick_distance(lateral_speed, dt);
        let min_x = Self::half_width();
        let max_x = tuning.screen_width - Self::half_width();

        if steer.left {
            self.pos.x = (self.pos.x - step).max(min_x);
            self.lean = -tuning.rider_max_lean;
        }
        if steer.right {
            self.pos.x = (self.pos.x + step).min(max_x);
            self.lean = tuning.rider_max_lean;
        }

        if !steer.left && !steer.right {
            self.lean *= tuning.rider_lean_decay.powf(dt * FRAME_RATE_NORMALIZER);
            if self.lean.abs() < tuning.rider_lean_snap {
                self.lean = 0.0;
            }
        }

        self.footprint.recenter(self.pos);
    }

    /// Set the vertical position (boost bounce) and keep the footprint in sync
    pub fn set_y(&mut self, y: f32) {
        self.pos.y = y;
        self.footprint.recenter(self.pos);
    }

    /// Advance the sprite-sheet animation by `dt` seconds.
    ///
    /// Returns the number of frames advanced.
    pub fn animate(&mut self, dt: f32, frame_duration: f32) -> u32 {
        if frame_duration <= 0.0 {
            return 0;
        }

        self.anim_timer += dt;
        let mut advanced = 0;
        while self.anim_timer + ANIM_EPSILON >= frame_duration {
            self.anim_timer -= frame_duration;
            self.frame = (self.frame + 1) % ANIM_FRAME_COUNT;
            advanced += 1;
        }
        self.anim_timer = self.anim_timer.max(0.0);
        advanced
    }
}
