//! Keyboard/mouse state to `TickInput`
//!
//! Frontends report raw key transitions here; `take` turns the accumulated
//! state into one frame's semantic input. Terminals that never report key
//! releases get a short hold window per press instead.

use glam::Vec2;

use crate::render::layout;
use crate::sim::{GamePhase, MenuItem, TickInput};

/// How long a press counts as held when releases are not reported
pub const HOLD_WINDOW_SECS: f32 = 0.2;

/// Keys the game cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Enter,
    Esc,
    Backspace,
    Char(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Held {
    Left = 0,
    Right = 1,
    Boost = 2,
}

#[derive(Debug, Clone)]
pub struct InputState {
    /// Terminal reports releases (keyboard enhancement)
    release_events: bool,
    /// Per held control: `Some(secs)` while held; secs only counts down
    /// in hold-window mode
    held: [Option<f32>; 3],
    pending: TickInput,
    menu_cursor: usize,
    /// Last pointer position in logical coordinates; cleared by keyboard use
    pointer: Option<Vec2>,
    demo: bool,
}

impl InputState {
    pub fn new(release_events: bool, demo: bool) -> Self {
        Self {
            release_events,
            held: [None; 3],
            pending: TickInput::default(),
            menu_cursor: 0,
            pointer: None,
            demo,
        }
    }

    /// A key went down (or auto-repeated)
    pub fn key_down(&mut self, key: Key, phase: GamePhase) {
        if key == Key::Char('d') {
            self.demo = !self.demo;
            log::info!("Demo mode: {}", self.demo);
            return;
        }

        match phase {
            GamePhase::Menu => {
                self.pointer = None;
                let count = MenuItem::ALL.len();
                match key {
                    Key::Up => self.menu_cursor = (self.menu_cursor + count - 1) % count,
                    Key::Down => self.menu_cursor = (self.menu_cursor + 1) % count,
                    Key::Enter | Key::Char(' ') => {
                        self.pending.activate = Some(MenuItem::ALL[self.menu_cursor]);
                    }
                    Key::Char('p') => self.pending.activate = Some(MenuItem::Play),
                    Key::Char('a') => self.pending.activate = Some(MenuItem::About),
                    Key::Char('q') => self.pending.activate = Some(MenuItem::Quit),
                    _ => {}
                }
            }
            GamePhase::About => {
                if matches!(key, Key::Esc | Key::Backspace | Key::Enter | Key::Char('q')) {
                    self.pending.back = true;
                }
            }
            GamePhase::Playing | GamePhase::Paused => match key {
                Key::Left => self.hold(Held::Left),
                Key::Right => self.hold(Held::Right),
                Key::Up | Key::Char(' ') => self.hold(Held::Boost),
                Key::Esc | Key::Char('p') => self.pending.pause = true,
                Key::Char('q') => self.pending.close = true,
                _ => {}
            },
        }
    }

    /// A key came up. Only reported by terminals with release events.
    pub fn key_up(&mut self, key: Key) {
        match key {
            Key::Left => self.held[Held::Left as usize] = None,
            Key::Right => self.held[Held::Right as usize] = None,
            Key::Up | Key::Char(' ') => self.held[Held::Boost as usize] = None,
            _ => {}
        }
    }

    fn hold(&mut self, control: Held) {
        self.held[control as usize] = Some(HOLD_WINDOW_SECS);
    }

    fn is_held(&self, control: Held) -> bool {
        self.held[control as usize].is_some()
    }

    pub fn pointer_moved(&mut self, point: Vec2) {
        self.pointer = Some(point);
    }

    /// Mouse click at a logical position
    pub fn click(&mut self, point: Vec2, phase: GamePhase) {
        self.pointer = Some(point);
        if phase == GamePhase::Menu {
            if let Some(item) = layout::hit_test(point) {
                self.pending.activate = Some(item);
            }
        }
    }

    pub fn resized(&mut self, width: u32, height: u32) {
        self.pending.resize = Some((width, height));
    }

    pub fn close(&mut self) {
        self.pending.close = true;
    }

    /// Button to highlight on the menu
    pub fn hovered(&self) -> Option<MenuItem> {
        match self.pointer {
            Some(point) => layout::hit_test(point),
            None => MenuItem::ALL.get(self.menu_cursor).copied(),
        }
    }

    /// Input for this frame. One-shot signals are consumed; hold windows
    /// age by `dt` afterwards.
    pub fn take(&mut self, dt: f32) -> TickInput {
        let mut input = std::mem::take(&mut self.pending);
        input.left = self.is_held(Held::Left);
        input.right = self.is_held(Held::Right);
        input.boost = self.is_held(Held::Boost);
        input.idle_mode = self.demo;

        if !self.release_events {
            for slot in &mut self.held {
                if let Some(secs) = slot {
                    *secs -= dt;
                    if *secs <= 0.0 {
                        *slot = None;
                    }
                }
            }
        }

        input
    }
}
