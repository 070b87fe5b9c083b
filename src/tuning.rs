//! Data-driven game balance
//!
//! Every gameplay constant the simulation reads goes through `Tuning`, so a
//! settings file can rebalance the game without touching code. Defaults come
//! from `crate::consts`.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Gameplay constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === View ===
    pub screen_width: f32,
    pub screen_height: f32,

    // === Rider ===
    pub rider_start_x: f32,
    pub rider_y: f32,
    /// Lateral distance per nominal tick
    pub rider_lateral_speed: f32,
    /// Degrees
    pub rider_max_lean: f32,
    pub rider_lean_decay: f32,
    pub rider_lean_snap: f32,
    pub anim_frame_duration: f32,

    // === Track ===
    pub initial_obstacles: usize,
    pub spawn_start_y: f32,
    pub spawn_spacing: f32,
    pub spawn_margin: f32,
    pub recycle_y: f32,

    // === Difficulty ===
    pub base_speed: f32,
    pub speed_growth: f32,
    pub speed_cadence: u32,
    pub max_speed: f32,

    // === Boost ===
    pub boost_factor: f32,
    pub boost_duration: f32,
    pub boost_frame_duration: f32,
    pub boost_bounce_height: f32,

    // === Puddle ===
    pub puddle_slow_factor: f32,
    pub puddle_slow_secs: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,

            rider_start_x: RIDER_START_X,
            rider_y: RIDER_Y,
            rider_lateral_speed: RIDER_LATERAL_SPEED,
            rider_max_lean: RIDER_MAX_LEAN,
            rider_lean_decay: RIDER_LEAN_DECAY,
            rider_lean_snap: RIDER_LEAN_SNAP,
            anim_frame_duration: ANIM_FRAME_DURATION,

            initial_obstacles: INITIAL_OBSTACLES,
            spawn_start_y: SPAWN_START_Y,
            spawn_spacing: SPAWN_SPACING,
            spawn_margin: SPAWN_MARGIN,
            recycle_y: RECYCLE_Y,

            base_speed: BASE_SPEED,
            speed_growth: SPEED_GROWTH,
            speed_cadence: SPEED_CADENCE,
            max_speed: MAX_SPEED,

            boost_factor: BOOST_FACTOR,
            boost_duration: BOOST_DURATION,
            boost_frame_duration: BOOST_FRAME_DURATION,
            boost_bounce_height: BOOST_BOUNCE_HEIGHT,

            puddle_slow_factor: PUDDLE_SLOW_FACTOR,
            puddle_slow_secs: PUDDLE_SLOW_SECS,
        }
    }
}

impl Tuning {
    /// Balance used by the arcade ruleset: gentler ramp, lower ceiling, tighter spacing
    pub fn arcade() -> Self {
        Self {
            speed_growth: 1.05,
            max_speed: 6.0,
            spawn_spacing: 250.0,
            ..Self::default()
        }
    }

    /// Repair values that would break simulation invariants.
    ///
    /// Returns the number of fields that had to be corrected.
    pub fn sanitize(&mut self) -> usize {
        let mut fixed = 0;

        if self.initial_obstacles == 0 {
            log::warn!("initial_obstacles must be at least 1, using {}", INITIAL_OBSTACLES);
            self.initial_obstacles = INITIAL_OBSTACLES;
            fixed += 1;
        }
        if self.speed_growth < 1.0 {
            log::warn!("speed_growth {} would slow the road down, using 1.0", self.speed_growth);
            self.speed_growth = 1.0;
            fixed += 1;
        }
        if self.base_speed.is_nan() || self.base_speed <= 0.0 {
            log::warn!("base_speed {} must be positive, using {}", self.base_speed, BASE_SPEED);
            self.base_speed = BASE_SPEED;
            fixed += 1;
        }
        if self.rider_lateral_speed.is_nan() || self.rider_lateral_speed <= 0.0 {
            log::warn!(
                "rider_lateral_speed {} must be positive, using {}",
                self.rider_lateral_speed,
                RIDER_LATERAL_SPEED
            );
            self.rider_lateral_speed = RIDER_LATERAL_SPEED;
            fixed += 1;
        }
        if self.screen_width.is_nan() || self.screen_width < RIDER_SPRITE_WIDTH {
            log::warn!(
                "screen_width {} is narrower than the rider, using {}",
                self.screen_width,
                SCREEN_WIDTH
            );
            self.screen_width = SCREEN_WIDTH;
            fixed += 1;
        }
        let half = RIDER_SPRITE_WIDTH / 2.0;
        let max_x = self.screen_width - half;
        if !(half..=max_x).contains(&self.rider_start_x) {
            let x = if self.rider_start_x.is_nan() {
                self.screen_width / 2.0
            } else {
                self.rider_start_x.clamp(half, max_x)
            };
            log::warn!("rider_start_x {} is off the road, using {}", self.rider_start_x, x);
            self.rider_start_x = x;
            fixed += 1;
        }
        if self.max_speed < self.base_speed {
            log::warn!(
                "max_speed {} is below base_speed {}, raising it",
                self.max_speed,
                self.base_speed
            );
            self.max_speed = self.base_speed;
            fixed += 1;
        }
        if self.anim_frame_duration <= 0.0 || self.boost_frame_duration <= 0.0 {
            log::warn!("animation frame durations must be positive, using defaults");
            self.anim_frame_duration = ANIM_FRAME_DURATION;
            self.boost_frame_duration = BOOST_FRAME_DURATION;
            fixed += 1;
        }
        if !(0.0..1.0).contains(&self.rider_lean_decay) {
            log::warn!("rider_lean_decay must be in [0, 1), using {}", RIDER_LEAN_DECAY);
            self.rider_lean_decay = RIDER_LEAN_DECAY;
            fixed += 1;
        }
        if self.spawn_spacing <= 0.0 {
            log::warn!("spawn_spacing must be positive, using {}", SPAWN_SPACING);
            self.spawn_spacing = SPAWN_SPACING;
            fixed += 1;
        }

        fixed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_consts() {
        let t = Tuning::default();
        assert_eq!(t.base_speed, BASE_SPEED);
        assert_eq!(t.max_speed, MAX_SPEED);
        assert_eq!(t.initial_obstacles, 5);
        assert_eq!(t.spawn_start_y, -100.0);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let t: Tuning = serde_json::from_str(r#"{ "max_speed": 12.0 }"#).unwrap();
        assert_eq!(t.max_speed, 12.0);
        assert_eq!(t.base_speed, BASE_SPEED);
        assert_eq!(t.spawn_spacing, SPAWN_SPACING);
    }

    #[test]
    fn test_sanitize_repairs_bad_values() {
        let mut t = Tuning {
            initial_obstacles: 0,
            speed_growth: 0.5,
            max_speed: 1.0,
            ..Tuning::default()
        };
        assert_eq!(t.sanitize(), 3);
        assert_eq!(t.initial_obstacles, INITIAL_OBSTACLES);
        assert_eq!(t.speed_growth, 1.0);
        assert_eq!(t.max_speed, t.base_speed);

        let mut ok = Tuning::default();
        assert_eq!(ok.sanitize(), 0);
    }

    #[test]
    fn test_sanitize_keeps_speeds_positive() {
        let mut t = Tuning {
            base_speed: -1.0,
            rider_lateral_speed: 0.0,
            speed_cadence: 1,
            ..Tuning::default()
        };
        assert_eq!(t.sanitize(), 2);
        assert_eq!(t.base_speed, BASE_SPEED);
        assert_eq!(t.rider_lateral_speed, RIDER_LATERAL_SPEED);
        assert!(t.max_speed >= t.base_speed);

        // A ramp built from the repaired tuning only ever speeds up
        let mut d = crate::sim::DifficultyController::from_tuning(&t);
        let before = d.speed();
        assert!(d.maybe_escalate(1));
        assert!(d.speed() > before);
    }

    #[test]
    fn test_sanitize_fits_rider_on_road() {
        let mut tiny = Tuning {
            screen_width: 30.0,
            ..Tuning::default()
        };
        assert_eq!(tiny.sanitize(), 1);
        assert_eq!(tiny.screen_width, SCREEN_WIDTH);

        // A narrower road pulls the default start x back inside it
        let mut narrow = Tuning {
            screen_width: 300.0,
            ..Tuning::default()
        };
        assert_eq!(narrow.sanitize(), 1);
        assert_eq!(narrow.rider_start_x, 300.0 - RIDER_SPRITE_WIDTH / 2.0);
    }
}
