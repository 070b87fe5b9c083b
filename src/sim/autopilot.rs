//! Demo-mode steering
//!
//! Picks the closest obstacle ahead that sits in the rider's lane and steers
//! around it on whichever side is nearer and still on the road. With nothing
//! ahead the rider drifts back toward the middle.

use std::cmp::Ordering;

use super::obstacle::Obstacle;
use super::rider::{Rider, Steer};
use super::state::GameState;

/// Extra clearance kept on each side of an obstacle
const DODGE_PADDING: f32 = 14.0;
/// Ignore centering errors smaller than this
const DEADZONE: f32 = 3.0;
/// How far from the middle the rider may idle
const CENTER_SLACK: f32 = 60.0;
/// Minimum lookahead above the rider
const MIN_LOOKAHEAD: f32 = 160.0;

/// Steering for this frame
pub fn steer(state: &GameState) -> Steer {
    let rider = state.rider.footprint();
    let width = state.tuning.screen_width;
    let min_x = Rider::half_width();
    let max_x = width - Rider::half_width();

    // Roughly one second of travel, plus the rider's own height
    let lookahead = (state.scroll_speed() * 60.0).max(MIN_LOOKAHEAD) + rider.size().y;
    let half = rider.size().x / 2.0 + DODGE_PADDING;
    let x = state.rider.pos.x;

    let in_lane = |o: &&Obstacle| {
        let f = o.footprint();
        f.bottom() > rider.top() - lookahead
            && f.top() < rider.bottom()
            && f.left() < x + half
            && f.right() > x - half
    };

    // Lowest obstacle in the lane is the one that arrives first
    let threat = state
        .track
        .iter()
        .filter(in_lane)
        .max_by(|a, b| a.y().partial_cmp(&b.y()).unwrap_or(Ordering::Equal));

    let target = match threat {
        Some(obstacle) => {
            let f = obstacle.footprint();
            let left = f.left() - half;
            let right = f.right() + half;
            let left_ok = left >= min_x;
            let right_ok = right <= max_x;
            match (left_ok, right_ok) {
                (true, true) => {
                    if x - left <= right - x {
                        left
                    } else {
                        right
                    }
                }
                (true, false) => left,
                (false, true) => right,
                // Wider than the road allows; hug whichever wall is farther from it
                (false, false) => {
                    if f.center.x > width / 2.0 {
                        min_x
                    } else {
                        max_x
                    }
                }
            }
        }
        None => {
            let center = width / 2.0;
            if (x - center).abs() <= CENTER_SLACK {
                x
            } else {
                center
            }
        }
    };

    let error = target.clamp(min_x, max_x) - x;
    Steer {
        left: error < -DEADZONE,
        right: error > DEADZONE,
    }
}
