//! Bike Racer - a top-down scrolling arcade racer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (rider, obstacle track, road, difficulty, state machine)
//! - `render`: Per-frame draw list handed to the presentation layer
//! - `platform`: Terminal frontend, input mapping and frame pacing
//! - `headless`: Fixed-step autopilot sessions
//! - `settings`: Player-facing configuration and rule presets
//! - `tuning`: Data-driven game balance

pub mod headless;
pub mod platform;
pub mod render;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::{GameVariant, Rules, Settings};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Logical view size. All gameplay coordinates live in this space.
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Speeds are tuned as "distance per nominal 1/60s tick"
    pub const FRAME_RATE_NORMALIZER: f32 = 60.0;
    /// Fixed timestep used by headless runs
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Largest frame delta the loop will feed the simulation
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Rider sprite (one animation frame)
    pub const RIDER_SPRITE_WIDTH: f32 = 48.0;
    pub const RIDER_SPRITE_HEIGHT: f32 = 84.0;
    /// Rider collision footprint (narrower than the sprite to keep collisions fair)
    pub const RIDER_FOOTPRINT_WIDTH: f32 = 30.0;
    pub const RIDER_FOOTPRINT_HEIGHT: f32 = 60.0;
    pub const RIDER_START_X: f32 = 400.0;
    pub const RIDER_Y: f32 = 440.0;
    pub const RIDER_LATERAL_SPEED: f32 = 4.0;
    /// Lean, in degrees
    pub const RIDER_MAX_LEAN: f32 = 15.0;
    pub const RIDER_LEAN_DECAY: f32 = 0.8;
    pub const RIDER_LEAN_SNAP: f32 = 0.5;

    /// Sprite-sheet animation
    pub const ANIM_FRAME_COUNT: usize = 4;
    pub const ANIM_FRAME_DURATION: f32 = 0.1;

    /// Obstacle track
    pub const INITIAL_OBSTACLES: usize = 5;
    pub const SPAWN_START_Y: f32 = -100.0;
    pub const SPAWN_SPACING: f32 = 300.0;
    pub const SPAWN_MARGIN: f32 = 100.0;
    /// Obstacles below this y are recycled (50px under the view)
    pub const RECYCLE_Y: f32 = 650.0;

    /// Difficulty ramp
    pub const BASE_SPEED: f32 = 2.5;
    pub const SPEED_GROWTH: f32 = 1.6;
    pub const SPEED_CADENCE: u32 = 10;
    pub const MAX_SPEED: f32 = 8.0;

    /// Boost
    pub const BOOST_FACTOR: f32 = 1.7;
    pub const BOOST_DURATION: f32 = 0.7;
    pub const BOOST_FRAME_DURATION: f32 = 0.05;
    pub const BOOST_BOUNCE_HEIGHT: f32 = 30.0;
    pub const BOOST_BOUNCE_RATE: f32 = 10.0;

    /// Puddle hazard
    pub const PUDDLE_SLOW_FACTOR: f32 = 0.5;
    pub const PUDDLE_SLOW_SECS: f32 = 1.5;
}

/// Scale a per-tick speed to the distance covered over `dt` seconds
#[inline]
pub fn per_tick_distance(speed: f32, dt: f32) -> f32 {
    speed * dt * consts::FRAME_RATE_NORMALIZER
}
