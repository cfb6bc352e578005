//! Typed scene tree.
//!
//! A [`Scene`] is what back ends serialise. It carries geometry and
//! declarative effect directives only; it never contains markup.

use arrayvec::ArrayVec;
use serde::Serialize;

use crate::types::Color;

/// Maximum glow layers a single directive carries (power-up fruit).
pub const MAX_GLOW_LAYERS: usize = 6;

/// Maximum directives on one element (one per player rule).
pub const MAX_EFFECTS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned box in screen units, relative to the frame's content area.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Solid line: a border or an outline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stroke {
    pub width: f64,
    pub color: Color,
}

impl Stroke {
    pub fn new(width: f64, color: impl Into<Color>) -> Self {
        Self {
            width,
            color: color.into(),
        }
    }
}

/// One shadow ring of a glow.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShadowLayer {
    /// Drawn inside the shape's edge instead of outside it.
    pub inset: bool,
    pub offset_x: f64,
    pub offset_y: f64,
    pub blur: f64,
    pub spread: f64,
    pub color: Color,
}

impl ShadowLayer {
    pub fn outset(blur: f64, spread: f64, color: &str) -> Self {
        Self {
            inset: false,
            offset_x: 0.0,
            offset_y: 0.0,
            blur,
            spread,
            color: Color::new(color),
        }
    }

    pub fn inset(offset_x: f64, blur: f64, color: &str) -> Self {
        Self {
            inset: true,
            offset_x,
            offset_y: 0.0,
            blur,
            spread: 0.0,
            color: Color::new(color),
        }
    }

    /// Move the ring horizontally.
    pub fn shifted(mut self, offset_x: f64) -> Self {
        self.offset_x = offset_x;
        self
    }

    /// How far past the shape's edge the ring reaches.
    pub fn reach(&self) -> f64 {
        self.spread + self.blur / 2.0 + self.offset_x.abs().max(self.offset_y.abs())
    }
}

/// Which rule produced a glow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GlowKind {
    Digesting,
    Powered,
    PowerUp,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Glow {
    pub kind: GlowKind,
    pub layers: ArrayVec<ShadowLayer, MAX_GLOW_LAYERS>,
}

/// A declarative visual embellishment.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum Effect {
    Glow(Glow),
    /// Replaces the base border with a flat line.
    Outline(Stroke),
}

impl Effect {
    pub fn as_glow(&self) -> Option<&Glow> {
        match self {
            Effect::Glow(glow) => Some(glow),
            Effect::Outline(_) => None,
        }
    }
}

/// The always-present shape: a circle filling `bounds` with a solid border.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BaseShape {
    pub border: Stroke,
}

/// Text drawn centered on `anchor`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Label {
    pub text: String,
    pub anchor: Point,
    pub font_size: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Player,
    Fruit,
}

/// One entity of the scene.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element {
    pub kind: ElementKind,
    /// `pid` for players, `fruit-{x}-{y}` for fruits.
    pub key: String,
    pub bounds: Rect,
    pub shape: BaseShape,
    /// In composition order: status effect first, then power glow.
    pub effects: ArrayVec<Effect, MAX_EFFECTS>,
    pub label: Option<Label>,
}

impl Element {
    /// The border actually drawn: the last outline directive wins over the
    /// base border.
    pub fn border(&self) -> &Stroke {
        self.effects
            .iter()
            .rev()
            .find_map(|effect| match effect {
                Effect::Outline(stroke) => Some(stroke),
                Effect::Glow(_) => None,
            })
            .unwrap_or(&self.shape.border)
    }

    pub fn glows(&self) -> impl Iterator<Item = &Glow> + '_ {
        self.effects.iter().filter_map(Effect::as_glow)
    }

    pub fn has_glow(&self, kind: GlowKind) -> bool {
        self.glows().any(|glow| glow.kind == kind)
    }

    /// All shadow rings of all glows, concatenated in composition order.
    pub fn glow_layers(&self) -> impl Iterator<Item = &ShadowLayer> + '_ {
        self.glows().flat_map(|glow| glow.layers.iter())
    }
}

/// Outer board frame; child coordinates are relative to its content box.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub width: f64,
    pub height: f64,
    /// Space around the bordered board.
    pub padding: f64,
    pub border: Stroke,
    pub background: Color,
    pub foreground: Color,
}

/// Composed output for one snapshot.
///
/// `elements` holds all players in snapshot order followed by all fruits in
/// snapshot order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub frame: Frame,
    pub elements: Vec<Element>,
}

impl Scene {
    pub fn players(&self) -> impl Iterator<Item = &Element> + '_ {
        self.elements
            .iter()
            .filter(|e| e.kind == ElementKind::Player)
    }

    pub fn fruits(&self) -> impl Iterator<Item = &Element> + '_ {
        self.elements
            .iter()
            .filter(|e| e.kind == ElementKind::Fruit)
    }

    pub fn player(&self, pid: &str) -> Option<&Element> {
        self.players().find(|e| e.key == pid)
    }
}
