//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only enters through the `dt` handed to `tick`
//! - Seeded RNG only
//! - Stable iteration order (obstacles in spawn order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod difficulty;
pub mod obstacle;
pub mod rider;
pub mod road;
pub mod state;
pub mod tick;
pub mod track;

pub use collision::Footprint;
pub use difficulty::DifficultyController;
pub use obstacle::{CollisionEffect, Obstacle, ObstacleKind};
pub use rider::{Rider, Steer};
pub use road::RoadScroller;
pub use state::{
    ActiveEffects, GamePhase, GameState, MenuItem, RunSnapshot, RunSummary, SlowEffect,
};
pub use tick::{GameEvent, TickInput, tick};
pub use track::ObstacleTrack;
