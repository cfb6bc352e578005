//! Core scene module - pure, deterministic, and testable
//!
//! This crate turns one [`Snapshot`](arena_view_types::Snapshot) into one
//! [`Scene`]. It has **no dependencies** on terminals, files, or networking:
//!
//! - **Deterministic**: the same snapshot always composes the same scene
//! - **Total**: malformed or unknown entity fields never fail, they render
//!   with the base shape only
//! - **Testable**: every rule is a plain function over snapshot records
//!
//! # Module Structure
//!
//! - [`style`]: effect rules (digesting blink, fleeing outline, powered glow,
//!   power-up fruit glow)
//! - [`layout`]: center/size to top-left placement, label anchoring
//! - [`scene`]: the typed scene tree every back end consumes
//! - [`compose`]: frame, then players, then fruits
//! - [`mount`]: the trait a display surface implements
//!
//! # Effect composition
//!
//! Rules are evaluated independently and concatenated in a fixed order:
//!
//! ```text
//! base shape  ->  status effect (digesting | fleeing)  ->  powered glow
//! ```
//!
//! A digesting, powered player therefore carries two glows, and both render.
//!
//! # Example
//!
//! ```
//! use arena_view_core::compose;
//! use arena_view_types::{Player, Settings, Snapshot};
//!
//! let snap = Snapshot {
//!     settings: Settings::new(800.0, 600.0),
//!     players: vec![Player::new("p1", "Ann").at(100.0, 100.0, 40.0).with_powered(1.0)],
//!     fruits: vec![],
//! };
//!
//! let scene = compose(&snap);
//! let ann = scene.player("p1").unwrap();
//! assert_eq!((ann.bounds.x, ann.bounds.y), (80.0, 80.0));
//! assert_eq!(ann.glow_layers().count(), 3);
//! ```

pub mod compose;
pub mod layout;
pub mod mount;
pub mod scene;
pub mod style;

pub use arena_view_types as types;

pub use compose::compose;
pub use mount::{Assets, Mount, MountError};
pub use scene::{
    BaseShape, Effect, Element, ElementKind, Frame, Glow, GlowKind, Label, Point, Rect, Scene,
    ShadowLayer, Stroke,
};
pub use style::Style;
