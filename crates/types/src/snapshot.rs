use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::color::Color;
use crate::lenient;

/// Board canvas dimensions in screen units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default, deserialize_with = "lenient::number")]
    pub width: f64,
    #[serde(default, deserialize_with = "lenient::number")]
    pub height: f64,
}

impl Settings {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Transient player status driving status-specific effects.
///
/// `Unknown` keeps whatever the server sent so newer server-side statuses
/// flow through as "no extra effect" instead of failing to decode.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum PlayerStatus {
    #[default]
    Normal,
    Digesting,
    Fleeing,
    Unknown(String),
}

impl PlayerStatus {
    /// Parse a wire tag. A leading `:` (atom-style encoding) is ignored.
    ///
    /// ```
    /// use arena_view_types::PlayerStatus;
    ///
    /// assert_eq!(PlayerStatus::from_wire(":digesting"), PlayerStatus::Digesting);
    /// assert_eq!(PlayerStatus::from_wire("fleeing"), PlayerStatus::Fleeing);
    /// assert_eq!(
    ///     PlayerStatus::from_wire("frozen"),
    ///     PlayerStatus::Unknown("frozen".to_string())
    /// );
    /// ```
    pub fn from_wire(s: &str) -> Self {
        match s.trim().trim_start_matches(':') {
            "normal" => Self::Normal,
            "digesting" => Self::Digesting,
            "fleeing" => Self::Fleeing,
            other => Self::Unknown(other.to_string()),
        }
    }

    pub fn as_wire(&self) -> &str {
        match self {
            Self::Normal => "normal",
            Self::Digesting => "digesting",
            Self::Fleeing => "fleeing",
            Self::Unknown(raw) => raw,
        }
    }
}

impl<'de> Deserialize<'de> for PlayerStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Ok(match Option::<Value>::deserialize(deserializer)? {
            None => Self::Normal,
            Some(Value::String(s)) => Self::from_wire(&s),
            Some(other) => Self::Unknown(other.to_string()),
        })
    }
}

impl Serialize for PlayerStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_wire())
    }
}

/// Fruit pickup type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum FruitKind {
    #[default]
    Normal,
    PowerUp,
    Unknown(String),
}

impl FruitKind {
    /// Parse a wire tag. A leading `:` (atom-style encoding) is ignored.
    pub fn from_wire(s: &str) -> Self {
        match s.trim().trim_start_matches(':') {
            "normal" => Self::Normal,
            "power_up" => Self::PowerUp,
            other => Self::Unknown(other.to_string()),
        }
    }

    pub fn as_wire(&self) -> &str {
        match self {
            Self::Normal => "normal",
            Self::PowerUp => "power_up",
            Self::Unknown(raw) => raw,
        }
    }
}

impl<'de> Deserialize<'de> for FruitKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Ok(match Option::<Value>::deserialize(deserializer)? {
            None => Self::Normal,
            Some(Value::String(s)) => Self::from_wire(&s),
            Some(other) => Self::Unknown(other.to_string()),
        })
    }
}

impl Serialize for FruitKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_wire())
    }
}

/// One player as reported by the server for a single tick.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Player {
    #[serde(default, deserialize_with = "lenient::text")]
    pub pid: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::color")]
    pub color: Color,
    #[serde(default, deserialize_with = "lenient::number")]
    pub pos_x: f64,
    #[serde(default, deserialize_with = "lenient::number")]
    pub pos_y: f64,
    #[serde(default, deserialize_with = "lenient::number")]
    pub size: f64,
    #[serde(default, deserialize_with = "lenient::number")]
    pub powered: f64,
    #[serde(default)]
    pub status: PlayerStatus,
    #[serde(default, deserialize_with = "lenient::counter")]
    pub status_timer: u64,
}

impl Player {
    pub fn new(pid: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            pid: pid.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn at(mut self, pos_x: f64, pos_y: f64, size: f64) -> Self {
        self.pos_x = pos_x;
        self.pos_y = pos_y;
        self.size = size;
        self
    }

    pub fn with_color(mut self, color: impl Into<Color>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_status(mut self, status: PlayerStatus, status_timer: u64) -> Self {
        self.status = status;
        self.status_timer = status_timer;
        self
    }

    pub fn with_powered(mut self, powered: f64) -> Self {
        self.powered = powered;
        self
    }
}

/// One fruit pickup for a single tick.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Fruit {
    #[serde(default, deserialize_with = "lenient::number")]
    pub pos_x: f64,
    #[serde(default, deserialize_with = "lenient::number")]
    pub pos_y: f64,
    #[serde(default, deserialize_with = "lenient::number")]
    pub size: f64,
    #[serde(default, rename = "type")]
    pub kind: FruitKind,
}

impl Fruit {
    pub fn new(pos_x: f64, pos_y: f64, size: f64, kind: FruitKind) -> Self {
        Self {
            pos_x,
            pos_y,
            size,
            kind,
        }
    }
}

/// Complete board state for one tick.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default, deserialize_with = "lenient::records")]
    pub fruits: Vec<Fruit>,
    #[serde(default, deserialize_with = "lenient::records")]
    pub players: Vec<Player>,
    #[serde(default, deserialize_with = "lenient::record")]
    pub settings: Settings,
}

impl Snapshot {
    /// Decode an event payload. Fails only when `value` is not an object.
    pub fn from_value(value: &Value) -> Result<Self, serde_json::Error> {
        // Derived struct visitors also accept sequences; only objects are snapshots.
        if !value.is_object() {
            return Err(serde::de::Error::custom("snapshot payload must be an object"));
        }
        Self::deserialize(value)
    }

    pub fn to_value(&self) -> Value {
        // Plain structs of strings and finite numbers always serialize.
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}
