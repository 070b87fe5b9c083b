//! Two-strip road scroller
//!
//! Two view-tall strips stacked vertically. When the lower one scrolls fully
//! past the bottom it jumps up two strip heights and becomes the upper one, so
//! exactly one seam is ever visible. Both tops are derived from one offset,
//! which keeps the strips exactly one height apart no matter how long the
//! road scrolls.

use serde::{Deserialize, Serialize};

use crate::per_tick_distance;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadScroller {
    /// Top edge of the lower strip, in [0, strip_height)
    offset: f32,
    /// Index of the strip currently below the other
    lower: usize,
    strip_height: f32,
}

impl RoadScroller {
    pub fn new(strip_height: f32) -> Self {
        Self {
            offset: 0.0,
            lower: 1,
            strip_height: strip_height.max(1.0),
        }
    }

    pub fn reset(&mut self) {
        self.offset = 0.0;
        self.lower = 1;
    }

    /// Scroll both strips down, wrapping the lower one once it leaves the view
    pub fn advance(&mut self, speed: f32, dt: f32) {
        self.offset += per_tick_distance(speed, dt).max(0.0);
        while self.offset >= self.strip_height {
            self.offset -= self.strip_height;
            self.lower ^= 1;
        }
    }

    /// Top edges of both strips
    pub fn strips(&self) -> [f32; 2] {
        let mut tops = [0.0; 2];
        tops[self.lower] = self.offset;
        tops[self.lower ^ 1] = self.offset - self.strip_height;
        tops
    }

    #[inline]
    pub fn strip_height(&self) -> f32 {
        self.strip_height
    }

    /// Strip tops that fall inside the view `[0, strip_height)`
    pub fn visible_seams(&self) -> usize {
        self.strips()
            .iter()
            .filter(|&&top| top >= 0.0 && top < self.strip_height)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_layout() {
        let road = RoadScroller::new(600.0);
        assert_eq!(road.strips(), [-600.0, 0.0]);
        assert_eq!(road.visible_seams(), 1);
    }

    #[test]
    fn test_scrolls_down() {
        let mut road = RoadScroller::new(600.0);
        road.advance(2.5, 1.0 / 60.0);
        let [a, b] = road.strips();
        assert!((a - -597.5).abs() < 1e-3);
        assert!((b - 2.5).abs() < 1e-3);
    }

    #[test]
    fn test_wraps_past_bottom() {
        let mut road = RoadScroller::new(600.0);
        // 601px in one step pushes the lower strip past the bottom
        road.advance(601.0, 1.0 / 60.0);
        let [a, b] = road.strips();
        assert!((a - 1.0).abs() < 1e-2);
        assert!((b - -599.0).abs() < 1e-2);
    }

    #[test]
    fn test_single_seam_over_long_scroll() {
        let mut road = RoadScroller::new(600.0);
        for i in 0..5000 {
            let speed = 2.5 + (i % 7) as f32;
            road.advance(speed, 1.0 / 60.0);
            assert_eq!(road.visible_seams(), 1, "step {i}: {:?}", road.strips());
            let [a, b] = road.strips();
            assert!(((a - b).abs() - 600.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_reset() {
        let mut road = RoadScroller::new(600.0);
        road.advance(5.0, 1.0);
        road.reset();
        assert_eq!(road.strips(), [-600.0, 0.0]);
    }
}
