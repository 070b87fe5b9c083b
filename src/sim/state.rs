//! Game state and core simulation types
//!
//! Everything the frame loop mutates lives in `GameState`. The frontend only
//! reads it (through `render::build_frame`) and feeds `TickInput` back in.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::difficulty::DifficultyController;
use super::obstacle::ObstacleKind;
use super::rider::Rider;
use super::road::RoadScroller;
use super::track::ObstacleTrack;
use crate::consts::BOOST_BOUNCE_RATE;
use crate::settings::{DifficultyTrigger, Rules, Settings};
use crate::tuning::Tuning;

/// Which screen is active. Gameplay only advances in `Playing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen; also where a crashed run lands
    #[default]
    Menu,
    /// Active gameplay
    Playing,
    /// Gameplay frozen, overlay shown
    Paused,
    /// Info panel over the menu
    About,
}

/// Menu buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MenuItem {
    Play,
    About,
    Quit,
}

impl MenuItem {
    pub const ALL: [MenuItem; 3] = [MenuItem::Play, MenuItem::About, MenuItem::Quit];

    pub fn label(&self) -> &'static str {
        match self {
            MenuItem::Play => "PLAY",
            MenuItem::About => "ABOUT",
            MenuItem::Quit => "QUIT",
        }
    }
}

/// A temporary slowdown from a hazard
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlowEffect {
    /// Multiplier on the rider's lateral speed
    pub factor: f32,
    pub remaining_secs: f32,
}

/// Transient effects. Nothing here is ever folded into the base values, so
/// expiry restores them exactly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActiveEffects {
    /// Seconds of boost left (0 = not boosting)
    pub boost_secs: f32,
    pub slow: Option<SlowEffect>,
}

impl ActiveEffects {
    #[inline]
    pub fn boosting(&self) -> bool {
        self.boost_secs > 0.0
    }
}

/// How a finished run ended
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub run: u32,
    pub elapsed_secs: f32,
    pub score: u64,
    pub recycled: u64,
    pub top_speed: f32,
    pub crashed_into: ObstacleKind,
}

/// Comparable view of everything a restart must reset.
///
/// Obstacle kinds and x positions are random per run and left out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSnapshot {
    pub rider_pos: Vec2,
    pub rider_lean: f32,
    pub rider_frame: usize,
    pub obstacle_ys: Vec<f32>,
    pub next_spawn_y: f32,
    pub speed: f32,
    pub road_strips: [f32; 2],
    pub effects: ActiveEffects,
    pub elapsed_secs: f32,
    pub score: u64,
    pub recycled: u64,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub rider: Rider,
    pub track: ObstacleTrack,
    pub road: RoadScroller,
    pub difficulty: DifficultyController,
    pub effects: ActiveEffects,
    /// Seconds of gameplay in the current run (paused time excluded)
    pub elapsed_secs: f32,
    pub score: u64,
    /// Obstacles recycled in the current run
    pub recycled: u64,
    /// Highest effective speed reached in the current run
    pub top_speed: f32,
    /// Runs started since boot
    pub runs: u32,
    pub last_run: Option<RunSummary>,
    /// Window size reported by the frontend, in its own units
    pub viewport: (u32, u32),
    pub tuning: Tuning,
    pub rules: Rules,
}

impl GameState {
    /// Boot state: on the menu, with a run already laid out behind it
    pub fn new(seed: u64, tuning: Tuning, rules: Rules) -> Self {
        let pool: Vec<ObstacleKind> = if rules.puddles {
            ObstacleKind::ALL.to_vec()
        } else {
            ObstacleKind::LETHAL.to_vec()
        };

        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Menu,
            rider: Rider::new(&tuning),
            track: ObstacleTrack::new(&pool, &tuning),
            road: RoadScroller::new(tuning.screen_height),
            difficulty: DifficultyController::from_tuning(&tuning),
            effects: ActiveEffects::default(),
            elapsed_secs: 0.0,
            score: 0,
            recycled: 0,
            top_speed: 0.0,
            runs: 0,
            last_run: None,
            viewport: (tuning.screen_width as u32, tuning.screen_height as u32),
            tuning,
            rules,
        };

        state.reset_run();
        state
    }

    pub fn from_settings(seed: u64, settings: &Settings) -> Self {
        Self::new(seed, settings.tuning.clone(), settings.rules)
    }

    /// Put every run-scoped value back to its starting point
    pub fn reset_run(&mut self) {
        self.rider = Rider::new(&self.tuning);
        self.track.reset(&mut self.rng, &self.tuning);
        self.road.reset();
        self.difficulty.reset();
        self.effects = ActiveEffects::default();
        self.elapsed_secs = 0.0;
        self.score = 0;
        self.recycled = 0;
        self.top_speed = self.scroll_speed();
    }

    /// Effective scroll speed: the ramp value times any active boost
    pub fn scroll_speed(&self) -> f32 {
        let speed = self.difficulty.speed();
        if self.effects.boosting() {
            speed * self.tuning.boost_factor
        } else {
            speed
        }
    }

    /// Rider lateral speed with any hazard slowdown applied
    pub fn lateral_speed(&self) -> f32 {
        match self.effects.slow {
            Some(slow) => self.tuning.rider_lateral_speed * slow.factor,
            None => self.tuning.rider_lateral_speed,
        }
    }

    /// Active animation frame duration
    pub fn frame_duration(&self) -> f32 {
        if self.effects.boosting() {
            self.tuning.boost_frame_duration
        } else {
            self.tuning.anim_frame_duration
        }
    }

    /// Rider y for this frame (bounces while boosting)
    pub fn rider_y(&self) -> f32 {
        if self.effects.boosting() {
            self.tuning.rider_y
                - self.tuning.boost_bounce_height
                    * (self.effects.boost_secs * BOOST_BOUNCE_RATE).sin()
        } else {
            self.tuning.rider_y
        }
    }

    /// Value fed to the difficulty ramp at each recycle
    pub fn difficulty_trigger(&self) -> u64 {
        match self.rules.difficulty_trigger {
            DifficultyTrigger::Elapsed => self.elapsed_secs as u64,
            DifficultyTrigger::Recycles => self.recycled,
            DifficultyTrigger::Score => self.score,
        }
    }

    /// Points for one recycled obstacle: faster roads pay more
    pub fn recycle_points(&self) -> u64 {
        1 + (self.scroll_speed() / 3.0) as u64
    }

    pub fn snapshot(&self) -> RunSnapshot {
        RunSnapshot {
            rider_pos: self.rider.pos,
            rider_lean: self.rider.lean,
            rider_frame: self.rider.frame,
            obstacle_ys: self.track.iter().map(|o| o.y()).collect(),
            next_spawn_y: self.track.next_spawn_y(),
            speed: self.difficulty.speed(),
            road_strips: self.road.strips(),
            effects: self.effects.clone(),
            elapsed_secs: self.elapsed_secs,
            score: self.score,
            recycled: self.recycled,
        }
    }

    /// Close out the current run after a fatal collision
    pub(crate) fn finish_run(&mut self, crashed_into: ObstacleKind) -> RunSummary {
        let summary = RunSummary {
            run: self.runs,
            elapsed_secs: self.elapsed_secs,
            score: self.score,
            recycled: self.recycled,
            top_speed: self.top_speed,
            crashed_into,
        };
        self.last_run = Some(summary.clone());
        summary
    }
}
