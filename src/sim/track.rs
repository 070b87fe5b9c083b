//! Obstacle track: spawn, scroll, recycle
//!
//! Obstacles are kept in spawn order. Because every obstacle scrolls at the
//! same speed, the front of the queue is always the lowest on screen and the
//! only one that can be due for recycling.

use std::collections::VecDeque;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Footprint;
use super::obstacle::{Obstacle, ObstacleKind};
use crate::tuning::Tuning;

/// Ordered queue of live obstacles plus the spawn cursor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleTrack {
    obstacles: VecDeque<Obstacle>,
    /// Kinds `spawn` picks from, uniformly
    pool: Vec<ObstacleKind>,
    /// Y of the next spawn; only ever decreases within a run
    next_spawn_y: f32,
    next_id: u32,
}

impl ObstacleTrack {
    /// An empty track. Falls back to the lethal kinds when `pool` is empty.
    pub fn new(pool: &[ObstacleKind], tuning: &Tuning) -> Self {
        let pool = if pool.is_empty() {
            ObstacleKind::LETHAL.to_vec()
        } else {
            pool.to_vec()
        };
        Self {
            obstacles: VecDeque::with_capacity(tuning.initial_obstacles + 1),
            pool,
            next_spawn_y: tuning.spawn_start_y,
            next_id: 1,
        }
    }

    /// Clear the track, rewind the spawn cursor and lay down the opening obstacles
    pub fn reset<R: Rng>(&mut self, rng: &mut R, tuning: &Tuning) {
        self.obstacles.clear();
        self.next_spawn_y = tuning.spawn_start_y;
        self.next_id = 1;
        for _ in 0..tuning.initial_obstacles {
            self.spawn(rng, tuning);
        }
    }

    /// Horizontal band obstacles may spawn in. Inset by at least half the
    /// widest footprint in the pool so every obstacle stays fully on the road.
    pub fn spawn_band(&self, tuning: &Tuning) -> (f32, f32) {
        let margin = tuning
            .spawn_margin
            .max(ObstacleKind::widest_half_footprint(&self.pool));
        let lo = margin.min(tuning.screen_width / 2.0);
        let hi = (tuning.screen_width - margin).max(lo);
        (lo, hi)
    }

    /// Append one random obstacle at the spawn cursor and move the cursor up.
    ///
    /// This is the only way obstacles are created.
    pub fn spawn<R: Rng>(&mut self, rng: &mut R, tuning: &Tuning) {
        let kind = self.pool[rng.random_range(0..self.pool.len())];
        let (lo, hi) = self.spawn_band(tuning);
        let x = if hi > lo { rng.random_range(lo..=hi) } else { lo };

        let id = self.next_id;
        self.next_id += 1;

        let obstacle = Obstacle::new(
            id,
            kind,
            Vec2::new(x, self.next_spawn_y),
            kind.collision_effect(tuning),
        );
        self.obstacles.push_back(obstacle);
        self.next_spawn_y -= tuning.spawn_spacing;
    }

    /// Scroll every obstacle down
    pub fn advance(&mut self, speed: f32, dt: f32) {
        for obstacle in &mut self.obstacles {
            obstacle.advance(speed, dt);
        }
    }

    /// Obstacles whose footprint overlaps `footprint`, in spawn order
    pub fn collisions<'a>(
        &'a self,
        footprint: &'a Footprint,
    ) -> impl Iterator<Item = &'a Obstacle> + 'a {
        self.obstacles
            .iter()
            .filter(move |o| o.footprint().overlaps(footprint))
    }

    /// Replace the front obstacle once it has scrolled past the recycle line.
    ///
    /// Returns the removed obstacle. Only the front is ever eligible, so this
    /// recycles at most one obstacle per call.
    pub fn recycle_if_needed<R: Rng>(&mut self, rng: &mut R, tuning: &Tuning) -> Option<Obstacle> {
        let Some(front) = self.obstacles.front() else {
            log::warn!("recycle_if_needed on an empty track");
            return None;
        };
        if front.y() <= tuning.recycle_y {
            return None;
        }

        let removed = self.obstacles.pop_front()?;
        self.spawn(rng, tuning);
        log::debug!(
            "Recycled {} #{} -> spawned at y={}",
            removed.kind.name(),
            removed.id,
            self.next_spawn_y + tuning.spawn_spacing
        );
        Some(removed)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    #[inline]
    pub fn next_spawn_y(&self) -> f32 {
        self.next_spawn_y
    }

    pub fn front(&self) -> Option<&Obstacle> {
        self.obstacles.front()
    }

    pub fn pool(&self) -> &[ObstacleKind] {
        &self.pool
    }

    /// Obstacles in spawn order (oldest first)
    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }
}
