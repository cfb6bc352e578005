//! Core types module - snapshot data model shared by every crate
//!
//! This module defines the value records a `board_tick` event carries. All
//! types are plain data with serde support, usable from the composer, the
//! transport, and every rendering back end.
//!
//! # Snapshot shape
//!
//! ```text
//! {
//!   "settings": {"width": 800, "height": 600},
//!   "players": [{"pid": "p1", "name": "Ann", "color": "#f00",
//!                "pos_x": 100, "pos_y": 100, "size": 40,
//!                "powered": 0, "status": "normal", "status_timer": 0}],
//!   "fruits":  [{"pos_x": 50, "pos_y": 50, "size": 20, "type": "power_up"}]
//! }
//! ```
//!
//! # Lenient decoding
//!
//! A single bad snapshot must never abort the live render loop, so decoding
//! recovers locally instead of failing:
//!
//! | input | decoded as |
//! |-------|------------|
//! | missing or non-numeric number | `0.0` |
//! | NaN / infinite number | `0.0` |
//! | negative `status_timer` | `0` |
//! | missing `status` / `type` | `Normal` |
//! | unrecognised `status` / `type` | `Unknown(raw)` |
//! | atom-style enum (`":digesting"`) | same as `"digesting"` |
//! | numeric `pid` / `name` | its decimal text |
//! | list entry that is not an object | dropped |
//!
//! Only a payload that is not a JSON object at all is rejected.
//!
//! # Examples
//!
//! ```
//! use arena_view_types::{PlayerStatus, Snapshot};
//!
//! let value = serde_json::json!({
//!     "settings": {"width": 800, "height": 600},
//!     "players": [{"pid": "p1", "name": "Ann", "pos_x": 100, "status": ":fleeing"}],
//!     "fruits": []
//! });
//!
//! let snap = Snapshot::from_value(&value).unwrap();
//! assert_eq!(snap.players[0].status, PlayerStatus::Fleeing);
//! assert_eq!(snap.players[0].size, 0.0);
//! ```

mod color;
mod lenient;
mod snapshot;

pub use color::Color;
pub use snapshot::{Fruit, FruitKind, Player, PlayerStatus, Settings, Snapshot};

/// Name of the event carrying a full board snapshot.
pub const BOARD_TICK: &str = "board_tick";
