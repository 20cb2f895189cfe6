//! Custom serialization helpers for vello::peniko::Color
//!
//! Use with `#[serde(with = "tipkit_theme::serde_color")]`. Accepts
//! `#rrggbb`, `#rrggbbaa` and `transparent`.

use crate::error::{ThemeError, ThemeResult};
use serde::{Deserialize, Deserializer, Serializer};
use vello::peniko::Color;

/// Serialize a Color as a hex string.
pub fn serialize<S>(color: &Color, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&to_hex(*color))
}

/// Deserialize a Color from a hex string.
pub fn deserialize<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    let hex = String::deserialize(deserializer)?;
    parse_color(&hex).map_err(Error::custom)
}

/// Helpers for `Option<Color>` fields.
pub mod option {
    use super::{parse_color, to_hex};
    use serde::{Deserialize, Deserializer, Serializer};
    use vello::peniko::Color;

    /// Serialize an optional Color as an optional hex string.
    pub fn serialize<S>(color: &Option<Color>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match color {
            Some(color) => serializer.serialize_some(&to_hex(*color)),
            None => serializer.serialize_none(),
        }
    }

    /// Deserialize an optional Color from an optional hex string.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Color>, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error;
        Option::<String>::deserialize(deserializer)?
            .map(|hex| parse_color(&hex).map_err(Error::custom))
            .transpose()
    }
}

/// Parse `#rrggbb`, `#rrggbbaa` or `transparent`.
pub fn parse_color(text: &str) -> ThemeResult<Color> {
    let text = text.trim();
    if text.eq_ignore_ascii_case("transparent") {
        return Ok(Color::TRANSPARENT);
    }

    let hex = text.trim_start_matches('#');
    if !hex.is_ascii() || (hex.len() != 6 && hex.len() != 8) {
        log::warn!("Rejecting color {:?}: expected #rrggbb or #rrggbbaa", text);
        return Err(ThemeError::InvalidColor(text.to_string()));
    }

    let channel = |index: usize| {
        u8::from_str_radix(&hex[index..index + 2], 16)
            .map_err(|_| ThemeError::InvalidColor(text.to_string()))
    };
    let r = channel(0)?;
    let g = channel(2)?;
    let b = channel(4)?;
    let a = if hex.len() == 8 { channel(6)? } else { 255 };
    Ok(Color::from_rgba8(r, g, b, a))
}

/// Format a Color as `#rrggbb`, or `#rrggbbaa` when not opaque.
pub fn to_hex(color: Color) -> String {
    let components = color.components;
    let channel = |value: f32| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
    let r = channel(components[0]);
    let g = channel(components[1]);
    let b = channel(components[2]);
    let a = channel(components[3]);
    if a == 255 {
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    } else {
        format!("#{:02x}{:02x}{:02x}{:02x}", r, g, b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        let color = parse_color("#617080").unwrap();
        assert_eq!(to_hex(color), "#617080");
        assert_eq!(to_hex(parse_color("FAFAFAB3").unwrap()), "#fafafab3");
    }

    #[test]
    fn test_parse_transparent() {
        assert_eq!(parse_color("transparent").unwrap(), Color::TRANSPARENT);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_color("#12345"), Err(ThemeError::InvalidColor("#12345".to_string())));
        assert!(parse_color("#zzzzzz").is_err());
        assert!(parse_color("#ééé").is_err());
    }
}
