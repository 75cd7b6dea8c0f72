//! Player display colours.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Shading factor for the darker variant used on worker pieces.
const DARKEN: f64 = 0.65;

/// 24-bit RGB colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Default colour of the first seat.
pub const CYAN: Color = Color::rgb(0x00, 0xD0, 0xFF);
/// Default colour of the second seat.
pub const MAGENTA: Color = Color::rgb(0xFF, 0x00, 0x88);

impl Color {
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Each channel scaled down to 65%.
    #[must_use]
    pub fn darker(self) -> Self {
        let scale = |c: u8| (f64::from(c) * DARKEN) as u8;
        Self::rgb(scale(self.r), scale(self.g), scale(self.b))
    }
}

/// Failure to parse a `#RRGGBB` string.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("expected a colour of the form #RRGGBB, got {0:?}")]
pub struct ColorParseError(pub String);

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ColorParseError(s.to_string());
        let hex = s.strip_prefix('#').ok_or_else(err)?;
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(err());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());
        Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}
