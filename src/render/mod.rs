//! Per-frame draw list
//!
//! `build_frame` turns a read-only view of the game state into an ordered list
//! of draw calls. Whatever presents the frame (the terminal frontend, a test)
//! just walks the list front to back.

pub mod layout;

use glam::Vec2;

use crate::consts::{RIDER_SPRITE_HEIGHT, RIDER_SPRITE_WIDTH};
use crate::sim::{GamePhase, GameState, MenuItem, ObstacleKind, RunSummary};
use layout::Rect;

/// RGBA, 0..1
pub type Color = [f32; 4];

pub const WHITE: Color = [1.0, 1.0, 1.0, 1.0];
pub const BUTTON_FILL: Color = [0.0, 0.0, 0.0, 200.0 / 255.0];
pub const BUTTON_FILL_HOVER: Color = [0.0, 0.0, 0.0, 150.0 / 255.0];
pub const PANEL_FILL: Color = [0.0, 0.0, 0.0, 220.0 / 255.0];
pub const PAUSE_DIM: Color = [0.0, 0.0, 0.0, 0.5];
pub const BOOST_COLOR: Color = [1.0, 0.8, 0.2, 1.0];

/// Label tint for a hovered button
fn hover_tint(item: MenuItem) -> Color {
    match item {
        MenuItem::Play => [200.0 / 255.0, 1.0, 200.0 / 255.0, 1.0],
        MenuItem::About => [200.0 / 255.0, 200.0 / 255.0, 1.0, 1.0],
        MenuItem::Quit => [1.0, 200.0 / 255.0, 200.0 / 255.0, 1.0],
    }
}

/// Image a sprite call refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteId {
    Background,
    MenuBackground,
    RoadStrip,
    Obstacle(ObstacleKind),
    /// One cell of the four-frame rider sheet
    Rider { frame: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    /// Axis-aligned sprite. `pos` is the top-left corner.
    Sprite {
        sprite: SpriteId,
        pos: Vec2,
        size: Vec2,
        /// Degrees, about the sprite center
        rotation: f32,
    },
    Rect {
        rect: Rect,
        fill: Color,
        outline: Option<Color>,
    },
    Text {
        text: String,
        pos: Vec2,
        size: f32,
        color: Color,
    },
}

/// Everything to present this frame
#[derive(Debug, Clone, Default)]
pub struct Frame {
    pub viewport: (u32, u32),
    pub calls: Vec<DrawCall>,
}

impl Frame {
    fn sprite(&mut self, sprite: SpriteId, pos: Vec2, size: Vec2, rotation: f32) {
        self.calls.push(DrawCall::Sprite {
            sprite,
            pos,
            size,
            rotation,
        });
    }

    fn text(&mut self, text: impl Into<String>, pos: Vec2, size: f32, color: Color) {
        self.calls.push(DrawCall::Text {
            text: text.into(),
            pos,
            size,
            color,
        });
    }

    fn rect(&mut self, rect: Rect, fill: Color, outline: Option<Color>) {
        self.calls.push(DrawCall::Rect {
            rect,
            fill,
            outline,
        });
    }

    /// Append the FPS counter (frontend only knows the real frame rate)
    pub fn push_fps(&mut self, fps: f32) {
        self.text(
            format!("FPS: {:.0}", fps),
            layout::HUD_FPS_POS,
            layout::HUD_TEXT_SIZE,
            WHITE,
        );
    }
}

/// "m:ss", whole seconds
pub fn clock(secs: f32) -> String {
    let total = secs.max(0.0) as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

/// "TIME: m:ss" from seconds of gameplay
pub fn format_time(elapsed_secs: f32) -> String {
    format!("TIME: {}", clock(elapsed_secs))
}

/// Speed shown to the player, as a percentage (speed x 50)
pub fn speed_percent(speed: f32) -> i64 {
    (speed * 50.0) as i64
}

pub fn speed_label(speed: f32) -> String {
    format!("SPEED: {}%", speed_percent(speed))
}

pub fn about_text(boost_enabled: bool) -> String {
    let mut text = String::from(
        "BIKE RACER GAME\n\nAvoid obstacles!\nControls:\nLEFT/RIGHT - Move\n",
    );
    if boost_enabled {
        text.push_str("UP - Boost\n");
    }
    text.push_str("ESC - Pause\n\nWritten in Rust");
    text
}

pub fn last_run_text(summary: &RunSummary) -> String {
    format!(
        "LAST RUN  {}  SCORE: {}  TOP SPEED: {}%\nCrashed into: {}",
        clock(summary.elapsed_secs),
        summary.score,
        speed_percent(summary.top_speed),
        summary.crashed_into.name(),
    )
}

/// Build the draw list for the current state.
///
/// `hovered` is the menu button under the pointer or cursor, if any.
pub fn build_frame(state: &GameState, hovered: Option<MenuItem>) -> Frame {
    let mut frame = Frame {
        viewport: state.viewport,
        calls: Vec::with_capacity(32),
    };
    let view = Vec2::new(state.tuning.screen_width, state.tuning.screen_height);

    match state.phase {
        GamePhase::Playing | GamePhase::Paused => {
            draw_run(&mut frame, state, view);
            if state.phase == GamePhase::Paused {
                frame.rect(Rect { pos: Vec2::ZERO, size: view }, PAUSE_DIM, None);
                frame.text(
                    "PAUSED\nPress ESC to resume",
                    layout::PAUSE_TEXT_POS,
                    layout::PAUSE_TEXT_SIZE,
                    WHITE,
                );
            }
        }
        GamePhase::Menu => {
            frame.sprite(SpriteId::MenuBackground, Vec2::ZERO, view, 0.0);
            for item in MenuItem::ALL {
                let hot = hovered == Some(item);
                let fill = if hot { BUTTON_FILL_HOVER } else { BUTTON_FILL };
                frame.rect(layout::button_rect(item), fill, Some(WHITE));
            }
            for item in MenuItem::ALL {
                let color = if hovered == Some(item) {
                    hover_tint(item)
                } else {
                    WHITE
                };
                frame.text(
                    item.label(),
                    layout::button_label_pos(item),
                    layout::BUTTON_TEXT_SIZE,
                    color,
                );
            }
            frame.text("BIKE RACER", layout::TITLE_POS, layout::TITLE_SIZE, WHITE);
            if let Some(summary) = &state.last_run {
                frame.text(
                    last_run_text(summary),
                    layout::LAST_RUN_POS,
                    layout::HUD_TEXT_SIZE,
                    WHITE,
                );
            }
        }
        GamePhase::About => {
            frame.sprite(SpriteId::MenuBackground, Vec2::ZERO, view, 0.0);
            frame.rect(layout::ABOUT_PANEL, PANEL_FILL, Some(WHITE));
            frame.text(
                about_text(state.rules.boost),
                layout::ABOUT_TEXT_POS,
                layout::ABOUT_TEXT_SIZE,
                WHITE,
            );
        }
    }

    frame
}

/// Road, obstacles, rider, HUD
fn draw_run(frame: &mut Frame, state: &GameState, view: Vec2) {
    frame.sprite(SpriteId::Background, Vec2::ZERO, view, 0.0);

    let strip = Vec2::new(view.x, state.road.strip_height());
    for top in state.road.strips() {
        frame.sprite(SpriteId::RoadStrip, Vec2::new(0.0, top), strip, 0.0);
    }

    // Spawn order: oldest (lowest on screen) first
    for obstacle in state.track.iter() {
        let size = obstacle.kind.visual_size();
        frame.sprite(
            SpriteId::Obstacle(obstacle.kind),
            obstacle.pos() - size / 2.0,
            size,
            0.0,
        );
    }

    let rider = &state.rider;
    let size = Vec2::new(RIDER_SPRITE_WIDTH, RIDER_SPRITE_HEIGHT);
    frame.sprite(
        SpriteId::Rider { frame: rider.frame },
        rider.pos - size / 2.0,
        size,
        rider.lean,
    );

    frame.text(
        format_time(state.elapsed_secs),
        layout::HUD_TIME_POS,
        layout::HUD_TIME_SIZE,
        WHITE,
    );
    frame.text(
        speed_label(state.scroll_speed()),
        layout::HUD_SPEED_POS,
        layout::HUD_TEXT_SIZE,
        WHITE,
    );
    frame.text(
        format!("SCORE: {}", state.score),
        layout::HUD_SCORE_POS,
        layout::HUD_TEXT_SIZE,
        WHITE,
    );
    if state.rules.boost {
        let (label, color) = if state.effects.boosting() {
            ("BOOST!", BOOST_COLOR)
        } else {
            ("BOOST READY", WHITE)
        };
        frame.text(label, layout::HUD_BOOST_POS, layout::HUD_TEXT_SIZE, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Rules;
    use crate::sim::state::SlowEffect;
    use crate::tuning::Tuning;

    fn state() -> GameState {
        GameState::new(99, Tuning::default(), Rules::default())
    }

    fn texts(frame: &Frame) -> Vec<&str> {
        frame
            .calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    fn sprites(frame: &Frame) -> Vec<SpriteId> {
        frame
            .calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Sprite { sprite, .. } => Some(*sprite),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0.0), "TIME: 0:00");
        assert_eq!(format_time(9.99), "TIME: 0:09");
        assert_eq!(format_time(75.2), "TIME: 1:15");
        assert_eq!(format_time(600.0), "TIME: 10:00");
    }

    #[test]
    fn test_speed_label() {
        assert_eq!(speed_label(2.5), "SPEED: 125%");
        assert_eq!(speed_label(4.0), "SPEED: 200%");
        assert_eq!(speed_label(8.0), "SPEED: 400%");
    }

    #[test]
    fn test_menu_frame() {
        let frame = build_frame(&state(), None);
        assert_eq!(frame.viewport, (800, 600));
        let t = texts(&frame);
        assert!(t.contains(&"PLAY"));
        assert!(t.contains(&"ABOUT"));
        assert!(t.contains(&"QUIT"));
        assert!(t.contains(&"BIKE RACER"));
        assert_eq!(sprites(&frame), vec![SpriteId::MenuBackground]);
    }

    #[test]
    fn test_menu_hover_highlight() {
        let frame = build_frame(&state(), Some(MenuItem::About));
        let fills: Vec<Color> = frame
            .calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Rect { fill, .. } => Some(*fill),
                _ => None,
            })
            .collect();
        assert_eq!(fills, vec![BUTTON_FILL, BUTTON_FILL_HOVER, BUTTON_FILL]);
    }

    #[test]
    fn test_playing_draw_order() {
        let mut s = state();
        s.phase = GamePhase::Playing;
        let frame = build_frame(&s, None);
        let sprites = sprites(&frame);

        assert_eq!(sprites[0], SpriteId::Background);
        assert_eq!(sprites[1], SpriteId::RoadStrip);
        assert_eq!(sprites[2], SpriteId::RoadStrip);
        let kinds: Vec<SpriteId> = s.track.iter().map(|o| SpriteId::Obstacle(o.kind)).collect();
        assert_eq!(&sprites[3..8], kinds.as_slice());
        assert_eq!(sprites[8], SpriteId::Rider { frame: 0 });
        assert_eq!(sprites.len(), 9);

        let t = texts(&frame);
        assert_eq!(t, vec!["TIME: 0:00", "SPEED: 125%", "SCORE: 0"]);
    }

    #[test]
    fn test_paused_overlay_on_top() {
        let mut s = state();
        s.phase = GamePhase::Paused;
        let frame = build_frame(&s, None);
        match frame.calls.last() {
            Some(DrawCall::Text { text, .. }) => assert_eq!(text, "PAUSED\nPress ESC to resume"),
            other => panic!("unexpected last call {other:?}"),
        }
    }

    #[test]
    fn test_about_panel() {
        let mut s = state();
        s.phase = GamePhase::About;
        let frame = build_frame(&s, None);
        let t = texts(&frame);
        assert_eq!(t.len(), 1);
        assert!(t[0].starts_with("BIKE RACER GAME"));
        assert!(!t[0].contains("Boost"));

        s.rules.boost = true;
        let frame = build_frame(&s, None);
        assert!(texts(&frame)[0].contains("UP - Boost"));
    }

    #[test]
    fn test_boost_hud() {
        let mut s = GameState::new(
            1,
            Tuning::default(),
            Rules {
                boost: true,
                ..Rules::default()
            },
        );
        s.phase = GamePhase::Playing;
        assert!(texts(&build_frame(&s, None)).contains(&"BOOST READY"));
        s.effects.boost_secs = 0.3;
        s.effects.slow = Some(SlowEffect {
            factor: 0.5,
            remaining_secs: 1.0,
        });
        assert!(texts(&build_frame(&s, None)).contains(&"BOOST!"));
    }

    #[test]
    fn test_last_run_on_menu() {
        let mut s = state();
        s.last_run = Some(RunSummary {
            run: 1,
            elapsed_secs: 83.0,
            score: 12,
            recycled: 10,
            top_speed: 4.0,
            crashed_into: ObstacleKind::Car,
        });
        let frame = build_frame(&s, None);
        let t = texts(&frame);
        let line = t.iter().find(|t| t.starts_with("LAST RUN")).copied();
        assert_eq!(
            line,
            Some("LAST RUN  1:23  SCORE: 12  TOP SPEED: 200%\nCrashed into: car")
        );
    }

    #[test]
    fn test_fps_appended() {
        let mut frame = build_frame(&state(), None);
        frame.push_fps(59.6);
        assert_eq!(texts(&frame).last().copied(), Some("FPS: 60"));
    }
}
