//! Layout mapper: logical center + size to screen placement.
//!
//! Every entity is a circle centered on its coordinate, so placement is just
//! the bounding square shifted by half its size.

use crate::scene::{Point, Rect};

/// Clamp a size to something drawable. Non-finite and negative sizes are 0.
pub fn extent(size: f64) -> f64 {
    if size.is_finite() && size > 0.0 {
        size
    } else {
        0.0
    }
}

fn coordinate(v: f64) -> f64 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}

/// Bounding box of a circle of diameter `size` centered on `(pos_x, pos_y)`.
///
/// ```
/// use arena_view_core::layout::place;
/// use arena_view_core::Rect;
///
/// assert_eq!(place(100.0, 100.0, 40.0), Rect::new(80.0, 80.0, 40.0, 40.0));
/// ```
pub fn place(pos_x: f64, pos_y: f64, size: f64) -> Rect {
    let s = extent(size);
    Rect::new(coordinate(pos_x) - s / 2.0, coordinate(pos_y) - s / 2.0, s, s)
}

/// Center of a label hung below a circle.
///
/// The label sits one full `size` below the circle's center, so its middle
/// lines up with the bottom edge plus half a diameter.
pub fn label_anchor(bounds: &Rect) -> Point {
    let c = bounds.center();
    Point::new(c.x, c.y + bounds.height)
}
