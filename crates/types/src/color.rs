use serde::{Deserialize, Serialize};

/// A color value as sent by the server or used by a style rule.
///
/// The raw text is kept so back ends that understand CSS can pass it through
/// untouched; [`Color::rgb`] resolves the common forms for back ends that
/// need concrete channels.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(String);

impl Color {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resolve `#rgb`, `#rrggbb`, or a handful of CSS names into channels.
    ///
    /// # Examples
    ///
    /// ```
    /// use arena_view_types::Color;
    ///
    /// assert_eq!(Color::new("#f0f").rgb(), Some((255, 0, 255)));
    /// assert_eq!(Color::new("#336699").rgb(), Some((0x33, 0x66, 0x99)));
    /// assert_eq!(Color::new("gold").rgb(), Some((255, 215, 0)));
    /// assert_eq!(Color::new("not-a-color").rgb(), None);
    /// ```
    pub fn rgb(&self) -> Option<(u8, u8, u8)> {
        let s = self.0.trim();
        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex);
        }
        named(&s.to_ascii_lowercase())
    }
}

impl From<&str> for Color {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Color {
    fn from(value: String) -> Self {
        Self(value)
    }
}

fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    if !hex.is_ascii() {
        return None;
    }
    match hex.len() {
        3 => {
            let mut it = hex.chars().map(|c| c.to_digit(16).map(|d| (d * 17) as u8));
            Some((it.next()??, it.next()??, it.next()??))
        }
        6 => {
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
            Some((channel(0)?, channel(2)?, channel(4)?))
        }
        _ => None,
    }
}

fn named(name: &str) -> Option<(u8, u8, u8)> {
    let rgb = match name {
        "black" => (0, 0, 0),
        "white" => (255, 255, 255),
        "grey" | "gray" => (128, 128, 128),
        "silver" => (192, 192, 192),
        "red" => (255, 0, 0),
        "green" => (0, 128, 0),
        "lime" => (0, 255, 0),
        "blue" => (0, 0, 255),
        "yellow" => (255, 255, 0),
        "cyan" | "aqua" => (0, 255, 255),
        "magenta" | "fuchsia" => (255, 0, 255),
        "orange" => (255, 165, 0),
        "purple" => (128, 0, 128),
        "pink" => (255, 192, 203),
        "gold" => (255, 215, 0),
        _ => return None,
    };
    Some(rgb)
}
