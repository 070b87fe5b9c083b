//! Terminal frontend (crossterm + ratatui)

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, KeyboardEnhancementFlags, MouseButton, MouseEventKind,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
    supports_keyboard_enhancement,
};
use glam::Vec2;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect as CellRect;

use super::input::{InputState, Key};
use super::raster::{FrameWidget, Viewport};
use crate::render::Frame;
use crate::sim::GamePhase;

pub struct TerminalUi {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Key release events are reported
    enhanced: bool,
    /// Mapping used for the last drawn frame
    viewport: Viewport,
    restored: bool,
}

impl TerminalUi {
    /// Switch the terminal into raw/alternate-screen mode
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

        let enhanced = supports_keyboard_enhancement().unwrap_or(false);
        if enhanced {
            execute!(
                stdout,
                PushKeyboardEnhancementFlags(
                    KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                        | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                )
            )?;
        }
        log::info!(
            "Terminal ready (key release events: {})",
            if enhanced { "yes" } else { "no, using hold window" }
        );

        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        terminal.hide_cursor()?;
        terminal.clear()?;
        let size = terminal.size()?;

        Ok(Self {
            terminal,
            enhanced,
            viewport: Viewport::new(size, Vec2::ONE),
            restored: false,
        })
    }

    pub fn release_events(&self) -> bool {
        self.enhanced
    }

    /// Current size in cells
    pub fn size(&self) -> io::Result<CellRect> {
        self.terminal.size()
    }

    pub fn draw(&mut self, frame: &Frame, view: Vec2) -> io::Result<()> {
        let mut viewport = self.viewport;
        self.terminal.draw(|f| {
            let area = f.size();
            viewport = Viewport::new(area, view);
            f.render_widget(FrameWidget { frame, view }, area);
        })?;
        self.viewport = viewport;
        Ok(())
    }

    /// Wait up to `timeout` for input, then drain everything queued
    pub fn poll_events(
        &mut self,
        input: &mut InputState,
        phase: GamePhase,
        timeout: Duration,
    ) -> io::Result<()> {
        let mut wait = timeout;
        while event::poll(wait)? {
            wait = Duration::ZERO;
            match event::read()? {
                Event::Key(key) => self.handle_key(input, phase, key),
                Event::Mouse(mouse) => {
                    let point = self.viewport.to_logical(mouse.column, mouse.row);
                    match mouse.kind {
                        MouseEventKind::Down(MouseButton::Left) => input.click(point, phase),
                        MouseEventKind::Moved => input.pointer_moved(point),
                        _ => {}
                    }
                }
                Event::Resize(width, height) => input.resized(width as u32, height as u32),
                _ => {}
            }
        }
        Ok(())
    }

    fn handle_key(&self, input: &mut InputState, phase: GamePhase, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
        {
            input.close();
            return;
        }

        let Some(mapped) = map_key(key.code) else {
            return;
        };
        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => input.key_down(mapped, phase),
            KeyEventKind::Release => input.key_up(mapped),
        }
    }

    /// Put the terminal back the way we found it
    pub fn restore(&mut self) -> io::Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;

        disable_raw_mode()?;
        if self.enhanced {
            execute!(self.terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
        }
        execute!(
            self.terminal.backend_mut(),
            DisableMouseCapture,
            LeaveAlternateScreen
        )?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Drop for TerminalUi {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            log::warn!("Failed to restore terminal: {}", e);
        }
    }
}

fn map_key(code: KeyCode) -> Option<Key> {
    let key = match code {
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Esc,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Char(c) => Key::Char(c.to_ascii_lowercase()),
        _ => return None,
    };
    Some(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_key() {
        assert_eq!(map_key(KeyCode::Left), Some(Key::Left));
        assert_eq!(map_key(KeyCode::Char('P')), Some(Key::Char('p')));
        assert_eq!(map_key(KeyCode::Tab), None);
    }
}
