//! Draw list to terminal cells
//!
//! Scales the 800x600 logical view onto whatever cell area the terminal gives
//! us. Sprites become colored blocks with a glyph, rectangles blend into the
//! cells beneath them, text is placed at the scaled position.

use glam::Vec2;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect as CellRect;
use ratatui::style::{Color as CellColor, Style};
use ratatui::widgets::Widget;

use crate::render::layout::Rect;
use crate::render::{Color, DrawCall, Frame, SpriteId};
use crate::sim::ObstacleKind;

const GRASS: (u8, u8, u8) = (40, 90, 40);
const MENU_BG: (u8, u8, u8) = (20, 24, 48);
const ASPHALT: (u8, u8, u8) = (70, 70, 74);
const LANE_MARK: (u8, u8, u8) = (230, 230, 200);
const RIDER: (u8, u8, u8) = (250, 210, 40);
/// Logical length of one dash (and one gap) in the center line
const DASH_LENGTH: f32 = 40.0;

/// Logical view to cell mapping
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub area: CellRect,
    /// Logical view size
    pub view: Vec2,
    pub scale: Vec2,
}

impl Viewport {
    pub fn new(area: CellRect, view: Vec2) -> Self {
        Self {
            area,
            view,
            scale: Vec2::new(
                area.width as f32 / view.x.max(1.0),
                area.height as f32 / view.y.max(1.0),
            ),
        }
    }

    /// Cell column/row containing a logical point (may be outside the area)
    fn cell(&self, p: Vec2) -> (i32, i32) {
        (
            self.area.x as i32 + (p.x * self.scale.x).floor() as i32,
            self.area.y as i32 + (p.y * self.scale.y).floor() as i32,
        )
    }

    /// Cells covered by a logical rectangle, clipped to the area
    fn cells(&self, pos: Vec2, size: Vec2) -> Option<CellRect> {
        let (x0, y0) = self.cell(pos);
        let (x1, y1) = self.cell(pos + size);
        // Anything with a visible extent covers at least one cell
        let x1 = x1.max(x0 + 1);
        let y1 = y1.max(y0 + 1);

        let left = self.area.x as i32;
        let top = self.area.y as i32;
        let right = left + self.area.width as i32;
        let bottom = top + self.area.height as i32;

        let cx0 = x0.clamp(left, right);
        let cx1 = x1.clamp(left, right);
        let cy0 = y0.clamp(top, bottom);
        let cy1 = y1.clamp(top, bottom);
        if cx1 <= cx0 || cy1 <= cy0 {
            return None;
        }
        Some(CellRect::new(
            cx0 as u16,
            cy0 as u16,
            (cx1 - cx0) as u16,
            (cy1 - cy0) as u16,
        ))
    }

    /// Logical point at the center of a cell
    pub fn to_logical(&self, column: u16, row: u16) -> Vec2 {
        Vec2::new(
            (column.saturating_sub(self.area.x) as f32 + 0.5) / self.scale.x.max(f32::EPSILON),
            (row.saturating_sub(self.area.y) as f32 + 0.5) / self.scale.y.max(f32::EPSILON),
        )
    }
}

fn rgb((r, g, b): (u8, u8, u8)) -> CellColor {
    CellColor::Rgb(r, g, b)
}

fn to_cell_color(color: Color) -> CellColor {
    let c = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    CellColor::Rgb(c(color[0]), c(color[1]), c(color[2]))
}

/// `src` over `dst` using src alpha
fn blend(dst: CellColor, src: Color) -> CellColor {
    let a = src[3].clamp(0.0, 1.0);
    match dst {
        CellColor::Rgb(r, g, b) => {
            let mix = |d: u8, s: f32| {
                (d as f32 * (1.0 - a) + s.clamp(0.0, 1.0) * 255.0 * a).round() as u8
            };
            CellColor::Rgb(mix(r, src[0]), mix(g, src[1]), mix(b, src[2]))
        }
        _ => to_cell_color(src),
    }
}

fn obstacle_look(kind: ObstacleKind) -> (char, (u8, u8, u8)) {
    match kind {
        ObstacleKind::Car => ('C', (200, 40, 40)),
        ObstacleKind::Car2 => ('C', (40, 90, 200)),
        ObstacleKind::Construction => ('#', (230, 140, 20)),
        ObstacleKind::RoadBarrier => ('=', (220, 220, 220)),
        ObstacleKind::ParkedBike => ('b', (160, 60, 170)),
        ObstacleKind::Puddle => ('~', (60, 150, 210)),
    }
}

/// Rider glyph by lean, with the pedal frame alternating the shading
fn rider_glyph(frame: usize, lean: f32) -> char {
    if lean < -5.0 {
        '<'
    } else if lean > 5.0 {
        '>'
    } else if frame % 2 == 0 {
        'A'
    } else {
        '^'
    }
}

fn fill(buf: &mut Buffer, cells: CellRect, symbol: char, fg: CellColor, bg: CellColor) {
    for y in cells.top()..cells.bottom() {
        for x in cells.left()..cells.right() {
            buf.get_mut(x, y).set_char(symbol).set_fg(fg).set_bg(bg);
        }
    }
}

/// Widget wrapper so a `Frame` can go straight into `terminal.draw`
pub struct FrameWidget<'a> {
    pub frame: &'a Frame,
    pub view: Vec2,
}

impl Widget for FrameWidget<'_> {
    fn render(self, area: CellRect, buf: &mut Buffer) {
        let vp = Viewport::new(area, self.view);
        for call in &self.frame.calls {
            draw_call(buf, &vp, call);
        }
    }
}

fn draw_call(buf: &mut Buffer, vp: &Viewport, call: &DrawCall) {
    match call {
        DrawCall::Sprite {
            sprite,
            pos,
            size,
            rotation,
        } => {
            let Some(cells) = vp.cells(*pos, *size) else {
                return;
            };
            match sprite {
                SpriteId::Background => fill(buf, cells, ' ', rgb(GRASS), rgb(GRASS)),
                SpriteId::MenuBackground => fill(buf, cells, ' ', rgb(MENU_BG), rgb(MENU_BG)),
                SpriteId::RoadStrip => draw_road(buf, vp, cells, *pos),
                SpriteId::Obstacle(kind) => {
                    let (glyph, color) = obstacle_look(*kind);
                    fill(buf, cells, glyph, CellColor::Black, rgb(color));
                }
                SpriteId::Rider { frame } => {
                    // One cell at the sprite center; the sheet has transparent margins
                    let glyph = rider_glyph(*frame, *rotation);
                    let (x, y) = vp.cell(*pos + *size / 2.0);
                    let inside = x >= cells.left() as i32
                        && x < cells.right() as i32
                        && y >= cells.top() as i32
                        && y < cells.bottom() as i32;
                    if inside {
                        buf.get_mut(x as u16, y as u16)
                            .set_char(glyph)
                            .set_fg(CellColor::Black)
                            .set_bg(rgb(RIDER));
                    }
                }
            }
        }
        DrawCall::Rect {
            rect,
            fill: color,
            outline,
        } => draw_rect(buf, vp, rect, *color, *outline),
        DrawCall::Text {
            text,
            pos,
            size,
            color,
        } => {
            let line_rows = ((size * 1.2 * vp.scale.y).round() as i32).max(1);
            let (x, y) = vp.cell(*pos);
            let style = Style::default().fg(to_cell_color(*color));
            for (i, line) in text.lines().enumerate() {
                let row = y + i as i32 * line_rows;
                if row < vp.area.top() as i32 || row >= vp.area.bottom() as i32 {
                    continue;
                }
                let col = x.clamp(vp.area.left() as i32, vp.area.right() as i32);
                if col >= vp.area.right() as i32 {
                    continue;
                }
                let width = (vp.area.right() as i32 - col) as usize;
                buf.set_stringn(col as u16, row as u16, line, width, style);
            }
        }
    }
}

/// Asphalt with a dashed center line that scrolls with the strip
fn draw_road(buf: &mut Buffer, vp: &Viewport, cells: CellRect, strip_top: Vec2) {
    fill(buf, cells, ' ', rgb(ASPHALT), rgb(ASPHALT));
    let (center_col, _) = vp.cell(Vec2::new(vp.view.x / 2.0, 0.0));
    if center_col < cells.left() as i32 || center_col >= cells.right() as i32 {
        return;
    }
    for row in cells.top()..cells.bottom() {
        let logical_y = vp.to_logical(center_col as u16, row).y - strip_top.y;
        if ((logical_y / DASH_LENGTH).floor() as i64).rem_euclid(2) == 0 {
            buf.get_mut(center_col as u16, row)
                .set_char('|')
                .set_fg(rgb(LANE_MARK));
        }
    }
}

fn draw_rect(buf: &mut Buffer, vp: &Viewport, rect: &Rect, color: Color, outline: Option<Color>) {
    let Some(cells) = vp.cells(rect.pos, rect.size) else {
        return;
    };
    for y in cells.top()..cells.bottom() {
        for x in cells.left()..cells.right() {
            let cell = buf.get_mut(x, y);
            let bg = blend(cell.bg, color);
            cell.set_bg(bg);
        }
    }

    let Some(outline) = outline else {
        return;
    };
    let fg = to_cell_color(outline);
    let (l, r) = (cells.left(), cells.right() - 1);
    let (t, b) = (cells.top(), cells.bottom() - 1);
    for x in l..=r {
        buf.get_mut(x, t).set_char('-').set_fg(fg);
        buf.get_mut(x, b).set_char('-').set_fg(fg);
    }
    for y in t..=b {
        buf.get_mut(l, y).set_char('|').set_fg(fg);
        buf.get_mut(r, y).set_char('|').set_fg(fg);
    }
    for (x, y) in [(l, t), (r, t), (l, b), (r, b)] {
        buf.get_mut(x, y).set_char('+').set_fg(fg);
    }
}
