//! Framebuffer and style types for terminal rendering.

use crate::core::types::Color;

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Resolve a scene color, using `fallback` for values the terminal
    /// cannot interpret.
    pub fn resolve(color: &Color, fallback: Rgb) -> Self {
        color
            .rgb()
            .map(|(r, g, b)| Self::new(r, g, b))
            .unwrap_or(fallback)
    }
}

/// Minimal per-cell styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    pub fg: Rgb,
    pub bg: Rgb,
    pub bold: bool,
    pub dim: bool,
}

impl CellStyle {
    pub const fn fg_on(fg: Rgb, bg: Rgb) -> Self {
        Self {
            fg,
            bg,
            bold: false,
            dim: false,
        }
    }
}

impl Default for CellStyle {
    fn default() -> Self {
        Self::fg_on(Rgb::new(220, 220, 220), Rgb::new(0, 0, 0))
    }
}

/// A single terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: CellStyle,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            style: CellStyle::default(),
        }
    }
}

/// 2D framebuffer of styled character cells.
///
/// Writes outside the buffer are clipped, so callers can draw entities that
/// hang off the edge without bounds checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            cells: vec![Cell::default(); len],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Resize the framebuffer.
    ///
    /// This preserves the underlying allocation when possible.
    pub fn resize(&mut self, width: u16, height: u16) {
        if self.width == width && self.height == height {
            return;
        }
        self.width = width;
        self.height = height;
        let len = (width as usize) * (height as usize);
        self.cells.resize(len, Cell::default());
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline(always)]
    fn idx(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= i32::from(self.width) || y >= i32::from(self.height) {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.idx(x, y).and_then(|i| self.cells.get(i).copied())
    }

    pub fn set(&mut self, x: i32, y: i32, cell: Cell) {
        if let Some(slot) = self.idx(x, y).and_then(|i| self.cells.get_mut(i)) {
            *slot = cell;
        }
    }

    pub fn clear(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    pub fn put_char(&mut self, x: i32, y: i32, ch: char, style: CellStyle) {
        self.set(x, y, Cell { ch, style });
    }

    pub fn put_str(&mut self, x: i32, y: i32, s: &str, style: CellStyle) {
        for (i, ch) in s.chars().enumerate() {
            let cx = x.saturating_add(i as i32);
            if cx >= i32::from(self.width) {
                break;
            }
            self.put_char(cx, y, ch, style);
        }
    }

    /// Write `s` so that its middle character lands on column `cx`.
    pub fn put_str_centered(&mut self, cx: i32, y: i32, s: &str, style: CellStyle) {
        let len = s.chars().count() as i32;
        self.put_str(cx.saturating_sub(len / 2), y, s, style);
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, w: u16, h: u16, ch: char, style: CellStyle) {
        for dy in 0..i32::from(h) {
            for dx in 0..i32::from(w) {
                self.put_char(x + dx, y + dy, ch, style);
            }
        }
    }

    /// Rows as plain text, for tests and logging.
    pub fn text(&self) -> String {
        let mut out = String::with_capacity(self.cells.len() + self.height as usize);
        for row in self.cells.chunks(self.width.max(1) as usize) {
            out.extend(row.iter().map(|c| c.ch));
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_outside_are_clipped() {
        let mut fb = FrameBuffer::new(3, 2);
        let style = CellStyle::default();
        fb.put_char(-1, 0, 'x', style);
        fb.put_char(3, 0, 'x', style);
        fb.put_char(0, 2, 'x', style);
        assert!(fb.cells().iter().all(|c| c.ch == ' '));
        assert_eq!(fb.get(-1, 0), None);
    }

    #[test]
    fn centered_string_straddles_column() {
        let mut fb = FrameBuffer::new(9, 1);
        fb.put_str_centered(4, 0, "Ann", CellStyle::default());
        assert_eq!(fb.text(), "   Ann   \n");
    }

    #[test]
    fn string_starting_left_of_buffer_is_partially_drawn() {
        let mut fb = FrameBuffer::new(4, 1);
        fb.put_str(-2, 0, "abcd", CellStyle::default());
        assert_eq!(fb.text(), "cd  \n");
    }

    #[test]
    fn resolves_scene_colors() {
        let fallback = Rgb::new(1, 2, 3);
        assert_eq!(Rgb::resolve(&Color::new("#f00"), fallback), Rgb::new(255, 0, 0));
        assert_eq!(Rgb::resolve(&Color::new("chartreuse-ish"), fallback), fallback);
    }
}
