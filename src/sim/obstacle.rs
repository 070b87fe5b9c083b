//! Obstacle kinds and the scrolling obstacle entity

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Footprint;
use crate::per_tick_distance;
use crate::tuning::Tuning;

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    Car,
    Car2,
    Construction,
    RoadBarrier,
    ParkedBike,
    /// Slows the rider instead of ending the run
    Puddle,
}

impl ObstacleKind {
    /// Kinds that end the run on contact
    pub const LETHAL: [ObstacleKind; 5] = [
        ObstacleKind::Car,
        ObstacleKind::Car2,
        ObstacleKind::Construction,
        ObstacleKind::RoadBarrier,
        ObstacleKind::ParkedBike,
    ];

    pub const ALL: [ObstacleKind; 6] = [
        ObstacleKind::Car,
        ObstacleKind::Car2,
        ObstacleKind::Construction,
        ObstacleKind::RoadBarrier,
        ObstacleKind::ParkedBike,
        ObstacleKind::Puddle,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ObstacleKind::Car => "car",
            ObstacleKind::Car2 => "car2",
            ObstacleKind::Construction => "construction",
            ObstacleKind::RoadBarrier => "road barrier",
            ObstacleKind::ParkedBike => "parked bike",
            ObstacleKind::Puddle => "puddle",
        }
    }

    /// Uniform sprite scale applied when drawing
    pub fn scale(&self) -> f32 {
        match self {
            ObstacleKind::Car | ObstacleKind::Car2 => 0.85,
            ObstacleKind::Construction | ObstacleKind::RoadBarrier => 1.0,
            ObstacleKind::ParkedBike => 0.6,
            ObstacleKind::Puddle => 0.9,
        }
    }

    /// Collision footprint size (narrower than the drawn sprite)
    pub fn footprint_size(&self) -> Vec2 {
        match self {
            ObstacleKind::Car | ObstacleKind::Car2 => Vec2::new(70.0, 40.0),
            ObstacleKind::Construction => Vec2::new(60.0, 60.0),
            ObstacleKind::RoadBarrier => Vec2::new(80.0, 20.0),
            ObstacleKind::ParkedBike => Vec2::new(60.0, 30.0),
            ObstacleKind::Puddle => Vec2::new(70.0, 20.0),
        }
    }

    /// Unscaled sprite size. Asset loading guarantees these dimensions even
    /// when it has to substitute a placeholder.
    pub fn sprite_size(&self) -> Vec2 {
        match self {
            ObstacleKind::Car | ObstacleKind::Car2 => Vec2::new(100.0, 60.0),
            ObstacleKind::Construction => Vec2::new(100.0, 100.0),
            ObstacleKind::RoadBarrier => Vec2::new(120.0, 30.0),
            ObstacleKind::ParkedBike => Vec2::new(200.0, 67.0),
            ObstacleKind::Puddle => Vec2::new(100.0, 30.0),
        }
    }

    /// On-screen sprite size
    pub fn visual_size(&self) -> Vec2 {
        self.sprite_size() * self.scale()
    }

    /// What touching this kind does to the rider
    pub fn collision_effect(&self, tuning: &Tuning) -> CollisionEffect {
        match self {
            ObstacleKind::Puddle => CollisionEffect::Hazard {
                speed_factor: tuning.puddle_slow_factor,
                duration_secs: tuning.puddle_slow_secs,
            },
            _ => CollisionEffect::Lethal,
        }
    }

    /// Half of the widest footprint of the given kinds
    pub fn widest_half_footprint(kinds: &[ObstacleKind]) -> f32 {
        kinds
            .iter()
            .map(|k| k.footprint_size().x / 2.0)
            .fold(0.0, f32::max)
    }
}

/// Outcome of the rider touching an obstacle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CollisionEffect {
    /// Ends the run
    Lethal,
    /// Temporarily scales the rider's lateral speed, then reverts
    Hazard { speed_factor: f32, duration_secs: f32 },
}

/// A scrolling obstacle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    pub effect: CollisionEffect,
    pos: Vec2,
    footprint: Footprint,
}

impl Obstacle {
    pub fn new(id: u32, kind: ObstacleKind, pos: Vec2, effect: CollisionEffect) -> Self {
        Self {
            id,
            kind,
            effect,
            pos,
            footprint: Footprint::from_center(pos, kind.footprint_size()),
        }
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn footprint(&self) -> &Footprint {
        &self.footprint
    }

    #[inline]
    pub fn is_lethal(&self) -> bool {
        self.effect == CollisionEffect::Lethal
    }

    /// Scroll down by `speed` (per nominal tick) over `dt` seconds
    pub fn advance(&mut self, speed: f32, dt: f32) {
        self.pos.y += per_tick_distance(speed, dt);
        self.footprint.recenter(self.pos);
    }
}
