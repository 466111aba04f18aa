use std::fmt;
use std::str::FromStr;

use phf::phf_map;
use serde::Deserialize;

use crate::error::{Result, TintError};

/// Tint presets accepted wherever a color can be written as text.
static NAMED_COLORS: phf::Map<&'static str, (u8, u8, u8)> = phf_map! {
    "black" => (0, 0, 0),
    "white" => (255, 255, 255),
    "red" => (255, 0, 0),
    "green" => (0, 255, 0),
    "blue" => (0, 0, 255),
    "yellow" => (255, 255, 0),
    "cyan" => (0, 255, 255),
    "magenta" => (255, 0, 255),
    "orange" => (255, 128, 0),
    "purple" => (128, 0, 128),
    "gray" => (128, 128, 128),
    "grey" => (128, 128, 128),
    "midpoint" => (128, 128, 128),
};

/// Target color of the tint. Luminance 255 maps exactly onto it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "ColorRepr")]
pub struct ColorChoice {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Default for ColorChoice {
    fn default() -> Self {
        Self::MIDPOINT
    }
}

impl ColorChoice {
    pub const MIDPOINT: ColorChoice = ColorChoice::rgb(128, 128, 128);

    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Build a color from unchecked integers, rejecting anything outside 0..=255.
    pub fn try_new(red: i64, green: i64, blue: i64) -> Result<Self> {
        Ok(Self {
            red: checked_channel("red", red)?,
            green: checked_channel("green", green)?,
            blue: checked_channel("blue", blue)?,
        })
    }

    pub fn channels(self) -> [u8; 3] {
        [self.red, self.green, self.blue]
    }

    /// Replace one channel by name (`red`, `green` or `blue`).
    pub fn set_channel(&mut self, channel: &str, value: i64) -> Result<()> {
        match channel {
            "red" | "r" => self.red = checked_channel("red", value)?,
            "green" | "g" => self.green = checked_channel("green", value)?,
            "blue" | "b" => self.blue = checked_channel("blue", value)?,
            other => return Err(TintError::InvalidColor(format!("unknown channel '{other}'"))),
        }
        Ok(())
    }
}

fn checked_channel(channel: &'static str, value: i64) -> Result<u8> {
    u8::try_from(value).map_err(|_| TintError::InvalidColorChannel { channel, value })
}

/// Convert a hex string like "#RRGGBB" or "RRGGBB" into a color
pub fn hex_to_rgb(hex: &str) -> Result<ColorChoice> {
    let hex = hex.strip_prefix('#').unwrap_or(hex);

    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(TintError::InvalidColor(format!(
            "hex color must be 6 hex digits, got '{hex}'"
        )));
    }

    let channel = |range: std::ops::Range<usize>, name: &str| {
        u8::from_str_radix(&hex[range], 16)
            .map_err(|_| TintError::InvalidColor(format!("invalid {name} value in '#{hex}'")))
    };

    Ok(ColorChoice::rgb(
        channel(0..2, "red")?,
        channel(2..4, "green")?,
        channel(4..6, "blue")?,
    ))
}

impl FromStr for ColorChoice {
    type Err = TintError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(TintError::InvalidColor("empty color".to_string()));
        }

        if let Some(&(r, g, b)) = NAMED_COLORS.get(s.to_ascii_lowercase().as_str()) {
            return Ok(ColorChoice::rgb(r, g, b));
        }

        if s.contains(',') {
            let parts = s
                .split(',')
                .map(|p| {
                    p.trim()
                        .parse::<i64>()
                        .map_err(|_| TintError::InvalidColor(format!("'{p}' is not an integer")))
                })
                .collect::<Result<Vec<_>>>()?;
            return match parts.as_slice() {
                [r, g, b] => ColorChoice::try_new(*r, *g, *b),
                _ => Err(TintError::InvalidColor(format!(
                    "expected 3 comma-separated channels, got {}",
                    parts.len()
                ))),
            };
        }

        hex_to_rgb(s)
    }
}

impl fmt::Display for ColorChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ColorRepr {
    Text(String),
    Channels([i64; 3]),
}

impl TryFrom<ColorRepr> for ColorChoice {
    type Error = TintError;

    fn try_from(repr: ColorRepr) -> Result<Self> {
        match repr {
            ColorRepr::Text(text) => text.parse(),
            ColorRepr::Channels([r, g, b]) => ColorChoice::try_new(r, g, b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_midpoint() {
        assert_eq!(ColorChoice::default(), ColorChoice::rgb(128, 128, 128));
    }

    #[test]
    fn parses_hex_with_and_without_hash() {
        assert_eq!("#ff8000".parse::<ColorChoice>().unwrap(), ColorChoice::rgb(255, 128, 0));
        assert_eq!("0A0b0C".parse::<ColorChoice>().unwrap(), ColorChoice::rgb(10, 11, 12));
    }

    #[test]
    fn parses_decimal_triple() {
        assert_eq!("10, 200,30".parse::<ColorChoice>().unwrap(), ColorChoice::rgb(10, 200, 30));
    }

    #[test]
    fn parses_named_presets_case_insensitively() {
        assert_eq!("Orange".parse::<ColorChoice>().unwrap(), ColorChoice::rgb(255, 128, 0));
        assert_eq!("grey".parse::<ColorChoice>().unwrap(), ColorChoice::MIDPOINT);
    }

    #[test]
    fn rejects_out_of_range_channels_instead_of_clamping() {
        let err = "10,256,0".parse::<ColorChoice>().unwrap_err();
        assert!(matches!(
            err,
            TintError::InvalidColorChannel { channel: "green", value: 256 }
        ));

        let err = ColorChoice::try_new(-1, 0, 0).unwrap_err();
        assert!(matches!(
            err,
            TintError::InvalidColorChannel { channel: "red", value: -1 }
        ));
    }

    #[test]
    fn rejects_malformed_text() {
        assert!("#12345".parse::<ColorChoice>().is_err());
        assert!("#zz0000".parse::<ColorChoice>().is_err());
        assert!("1,2".parse::<ColorChoice>().is_err());
        assert!("".parse::<ColorChoice>().is_err());
        assert!("chartreuse".parse::<ColorChoice>().is_err());
    }

    #[test]
    fn hex_accepts_only_one_hash_and_plain_digits() {
        assert!(hex_to_rgb("##ff0000").is_err());
        assert!(hex_to_rgb("+f+f+f").is_err());
        assert!("+f+f+f".parse::<ColorChoice>().is_err());
        assert!(hex_to_rgb("ff 000").is_err());
        assert_eq!(hex_to_rgb("#00ff00").unwrap(), ColorChoice::rgb(0, 255, 0));
    }

    #[test]
    fn set_channel_checks_range() {
        let mut color = ColorChoice::default();
        color.set_channel("blue", 7).unwrap();
        assert_eq!(color, ColorChoice::rgb(128, 128, 7));
        assert!(color.set_channel("red", 300).is_err());
        assert!(color.set_channel("alpha", 1).is_err());
        assert_eq!(color, ColorChoice::rgb(128, 128, 7));
    }

    #[test]
    fn deserializes_from_string_or_array() {
        let c: ColorChoice = serde_json::from_str("\"#0000ff\"").unwrap();
        assert_eq!(c, ColorChoice::rgb(0, 0, 255));
        let c: ColorChoice = serde_json::from_str("[1, 2, 3]").unwrap();
        assert_eq!(c, ColorChoice::rgb(1, 2, 3));
        assert!(serde_json::from_str::<ColorChoice>("[1, 2, 999]").is_err());
    }

    #[test]
    fn displays_as_hex() {
        assert_eq!(ColorChoice::rgb(255, 0, 16).to_string(), "#ff0010");
    }
}
