//! Fixed screen layout for menus and overlays, in logical view coordinates

use glam::Vec2;

use crate::sim::MenuItem;

/// Axis-aligned rectangle, top-left origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.pos.x
            && point.x <= self.pos.x + self.size.x
            && point.y >= self.pos.y
            && point.y <= self.pos.y + self.size.y
    }
}

pub const BUTTON_SIZE: Vec2 = Vec2::new(150.0, 60.0);

/// Menu button background for `item`
pub fn button_rect(item: MenuItem) -> Rect {
    let y = match item {
        MenuItem::Play => 245.0,
        MenuItem::About => 295.0,
        MenuItem::Quit => 345.0,
    };
    Rect::new(325.0, y, BUTTON_SIZE.x, BUTTON_SIZE.y)
}

/// Where the button label is drawn
pub fn button_label_pos(item: MenuItem) -> Vec2 {
    match item {
        MenuItem::Play => Vec2::new(350.0, 250.0),
        MenuItem::About => Vec2::new(340.0, 300.0),
        MenuItem::Quit => Vec2::new(350.0, 350.0),
    }
}

/// Button under `point`, if any.
///
/// Buttons overlap by 10px; buttons are checked top to bottom and the upper one wins.
pub fn hit_test(point: Vec2) -> Option<MenuItem> {
    MenuItem::ALL
        .iter()
        .copied()
        .find(|&item| button_rect(item).contains(point))
}

pub const TITLE_POS: Vec2 = Vec2::new(220.0, 100.0);
pub const TITLE_SIZE: f32 = 60.0;
pub const BUTTON_TEXT_SIZE: f32 = 45.0;

pub const ABOUT_PANEL: Rect = Rect::new(100.0, 100.0, 600.0, 400.0);
pub const ABOUT_TEXT_POS: Vec2 = Vec2::new(150.0, 150.0);
pub const ABOUT_TEXT_SIZE: f32 = 30.0;

pub const PAUSE_TEXT_POS: Vec2 = Vec2::new(200.0, 200.0);
pub const PAUSE_TEXT_SIZE: f32 = 50.0;

pub const HUD_TIME_POS: Vec2 = Vec2::new(20.0, 20.0);
pub const HUD_TIME_SIZE: f32 = 28.0;
pub const HUD_SPEED_POS: Vec2 = Vec2::new(20.0, 60.0);
pub const HUD_SCORE_POS: Vec2 = Vec2::new(20.0, 90.0);
pub const HUD_BOOST_POS: Vec2 = Vec2::new(20.0, 120.0);
pub const HUD_FPS_POS: Vec2 = Vec2::new(680.0, 20.0);
pub const HUD_TEXT_SIZE: f32 = 24.0;

pub const LAST_RUN_POS: Vec2 = Vec2::new(220.0, 440.0);
