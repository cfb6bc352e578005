//! SceneView: rasterises a [`Scene`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Screen units are scaled so the whole board fits the viewport. Terminal
//! cells are roughly twice as tall as they are wide, so one row covers
//! `cell_aspect` times the units one column covers and circles stay round.

use crate::core::types::Color;
use crate::core::{Element, Frame, Point, Scene, ShadowLayer};
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};

const BODY: char = '█';
const INSET_GLOW: char = '▒';
const OUTSET_GLOW: char = '░';
const DOT: char = '●';

const FALLBACK_FG: Rgb = Rgb::new(220, 220, 220);
const FALLBACK_BG: Rgb = Rgb::new(0, 0, 0);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Maps scene coordinates onto framebuffer cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Column of the frame's left border.
    pub left: i32,
    /// Row of the frame's top border.
    pub top: i32,
    /// Content size in cells, excluding the border.
    pub cols: u16,
    pub rows: u16,
    /// Screen units covered by one column / one row.
    pub unit_w: f64,
    pub unit_h: f64,
}

impl Projection {
    pub fn fit(frame: &Frame, viewport: Viewport, cell_aspect: f64) -> Self {
        let avail_cols = viewport.width.saturating_sub(2).max(1);
        let avail_rows = viewport.height.saturating_sub(2).max(1);
        let fw = frame.width.max(1.0);
        let fh = frame.height.max(1.0);

        let unit_w = (fw / f64::from(avail_cols))
            .max(fh / (f64::from(avail_rows) * cell_aspect))
            .max(f64::MIN_POSITIVE);
        let unit_h = unit_w * cell_aspect;

        let cols = ((frame.width.max(0.0) / unit_w).ceil() as u16).clamp(1, avail_cols);
        let rows = ((frame.height.max(0.0) / unit_h).ceil() as u16).clamp(1, avail_rows);

        Self {
            left: i32::from(viewport.width.saturating_sub(cols + 2) / 2),
            top: i32::from(viewport.height.saturating_sub(rows + 2) / 2),
            cols,
            rows,
            unit_w,
            unit_h,
        }
    }

    pub fn col(&self, x: f64) -> i32 {
        self.left.saturating_add(1).saturating_add(cells(x / self.unit_w))
    }

    pub fn row(&self, y: f64) -> i32 {
        self.top.saturating_add(1).saturating_add(cells(y / self.unit_h))
    }

    /// Scene coordinate at the middle of a cell.
    pub fn cell_center(&self, col: i32, row: i32) -> Point {
        Point::new(
            (f64::from(col - self.left - 1) + 0.5) * self.unit_w,
            (f64::from(row - self.top - 1) + 0.5) * self.unit_h,
        )
    }

    /// Whether a cell lies inside the board's content area.
    pub fn contains(&self, col: i32, row: i32) -> bool {
        col > self.left
            && row > self.top
            && col <= self.left + i32::from(self.cols)
            && row <= self.top + i32::from(self.rows)
    }
}

/// Cells far past any viewport all land on the same clipped column.
const MAX_CELL_OFFSET: f64 = 1.0e6;

fn cells(units: f64) -> i32 {
    if units.is_nan() {
        return 0;
    }
    units.floor().clamp(-MAX_CELL_OFFSET, MAX_CELL_OFFSET) as i32
}

/// A lightweight terminal renderer for arena scenes.
#[derive(Debug, Clone, Copy)]
pub struct SceneView {
    cell_aspect: f64,
    styled: bool,
}

impl Default for SceneView {
    fn default() -> Self {
        // 2:1 compensates for typical terminal glyph aspect ratio.
        Self {
            cell_aspect: 2.0,
            styled: true,
        }
    }
}

impl SceneView {
    pub fn new(cell_aspect: f64) -> Self {
        Self {
            cell_aspect: if cell_aspect > 0.0 { cell_aspect } else { 2.0 },
            styled: true,
        }
    }

    /// Without styling every cell uses the default colors; shapes and glyphs
    /// are unchanged.
    pub fn with_styled(mut self, styled: bool) -> Self {
        self.styled = styled;
        self
    }

    pub fn is_styled(&self) -> bool {
        self.styled
    }

    /// Render `scene` into an existing framebuffer, replacing all of it.
    pub fn render_into(&self, scene: &Scene, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::default());

        let frame = &scene.frame;
        let proj = Projection::fit(frame, viewport, self.cell_aspect);
        let board = self.style(&frame.foreground, &frame.background);

        fb.fill_rect(proj.left + 1, proj.top + 1, proj.cols, proj.rows, ' ', board);
        self.draw_border(
            fb,
            proj.left,
            proj.top,
            proj.cols + 2,
            proj.rows + 2,
            self.style(&frame.border.color, &frame.background),
        );

        // Halos first so no glow ever covers another entity's body.
        for element in &scene.elements {
            self.draw_glow(fb, &proj, frame, element);
        }
        for element in &scene.elements {
            self.draw_body(fb, &proj, frame, element);
            self.draw_label(fb, &proj, frame, element);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, scene: &Scene, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(scene, viewport, &mut fb);
        fb
    }

    /// Render plain text lines centered in the viewport (the initial layout).
    pub fn render_text_into(&self, text: &str, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::default());

        let lines: Vec<&str> = text.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
        let first = i32::from(viewport.height) / 2 - lines.len() as i32 / 2;
        let mid = i32::from(viewport.width) / 2;
        for (i, line) in lines.iter().enumerate() {
            fb.put_str_centered(mid, first + i as i32, line, CellStyle::default());
        }
    }

    fn style(&self, fg: &Color, bg: &Color) -> CellStyle {
        if !self.styled {
            return CellStyle::default();
        }
        CellStyle::fg_on(Rgb::resolve(fg, FALLBACK_FG), Rgb::resolve(bg, FALLBACK_BG))
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: i32, y: i32, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }
        let (w, h) = (i32::from(w), i32::from(h));

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_glow(&self, fb: &mut FrameBuffer, proj: &Projection, frame: &Frame, e: &Element) {
        let radius = e.bounds.width / 2.0;
        let center = e.bounds.center();
        let reach = e
            .glow_layers()
            .filter(|l| !l.inset)
            .map(ShadowLayer::reach)
            .fold(0.0, f64::max);
        if reach <= 0.0 {
            return;
        }

        for_each_cell(proj, center, radius + reach, |col, row, p| {
            if distance(p, center) <= radius {
                return;
            }
            // The first listed ring is the topmost one.
            let ring = e.glow_layers().filter(|l| !l.inset).find(|l| {
                let shifted = Point::new(center.x + l.offset_x, center.y + l.offset_y);
                distance(p, shifted) <= radius + l.spread + l.blur / 2.0
            });
            if let Some(l) = ring {
                let style = CellStyle {
                    dim: true,
                    ..self.style(&l.color, &frame.background)
                };
                fb.put_char(col, row, OUTSET_GLOW, style);
            }
        });
    }

    fn draw_body(&self, fb: &mut FrameBuffer, proj: &Projection, frame: &Frame, e: &Element) {
        let radius = e.bounds.width / 2.0;
        let center = e.bounds.center();
        let border = e.border();
        let border_style = self.style(&border.color, &frame.background);
        // At least one column wide so thin borders stay visible.
        let border_w = border.width.max(proj.unit_w);
        let mut drawn = false;

        for_each_cell(proj, center, radius, |col, row, p| {
            let d = distance(p, center);
            if d > radius {
                return;
            }
            drawn = true;
            if d > radius - border_w {
                fb.put_char(col, row, BODY, border_style);
                return;
            }
            let ring = e.glow_layers().filter(|l| l.inset).find(|l| {
                let shifted = Point::new(center.x + l.offset_x, center.y + l.offset_y);
                distance(p, shifted) >= radius - (l.spread + l.blur / 2.0)
            });
            match ring {
                Some(l) => {
                    let style = self.style(&l.color, &frame.background);
                    fb.put_char(col, row, INSET_GLOW, style);
                }
                None => {
                    let style = self.style(&frame.foreground, &frame.background);
                    fb.put_char(col, row, ' ', style);
                }
            }
        });

        // Smaller than a cell: still show where it is.
        if !drawn {
            let (col, row) = (proj.col(center.x), proj.row(center.y));
            if proj.contains(col, row) {
                fb.put_char(col, row, DOT, border_style);
            }
        }
    }

    fn draw_label(&self, fb: &mut FrameBuffer, proj: &Projection, frame: &Frame, e: &Element) {
        let Some(label) = &e.label else {
            return;
        };
        if label.text.is_empty() {
            return;
        }
        let style = CellStyle {
            bold: true,
            ..self.style(&frame.foreground, &frame.background)
        };
        let text: String = label.text.chars().filter(|c| !c.is_control()).collect();
        fb.put_str_centered(
            proj.col(label.anchor.x),
            proj.row(label.anchor.y),
            &text,
            style,
        );
    }
}

/// Visit every board cell whose square overlaps the disc of `reach` around
/// `center`, passing the cell's scene-space midpoint.
fn for_each_cell(
    proj: &Projection,
    center: Point,
    reach: f64,
    mut f: impl FnMut(i32, i32, Point),
) {
    let (c0, c1) = (proj.col(center.x - reach), proj.col(center.x + reach));
    let (r0, r1) = (proj.row(center.y - reach), proj.row(center.y + reach));
    let c0 = c0.max(proj.left + 1);
    let r0 = r0.max(proj.top + 1);
    let c1 = c1.min(proj.left + i32::from(proj.cols));
    let r1 = r1.min(proj.top + i32::from(proj.rows));

    for row in r0..=r1 {
        for col in c0..=c1 {
            f(col, row, proj.cell_center(col, row));
        }
    }
}

fn distance(a: Point, b: Point) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}
