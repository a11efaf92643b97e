use core::fmt;
use core::str::FromStr;

use thiserror::Error;

/// Straight-alpha RGBA color, channels in `[0, 1]`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("color literal must start with '#': {0:?}")]
    MissingHash(String),
    #[error("color literal must have 3, 6 or 8 hex digits: {0:?}")]
    BadLength(String),
    #[error("invalid hex digit in color literal: {0:?}")]
    BadDigit(String),
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    #[inline]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub fn from_rgb_u8(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgba_u8(r, g, b, 255)
    }

    #[inline]
    pub fn from_rgba_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::rgba(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a as f32 / 255.0)
    }

    /// Parses `#rgb`, `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(literal: &str) -> Result<Self, ColorParseError> {
        let digits = literal
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError::MissingHash(literal.to_string()))?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError::BadDigit(literal.to_string()));
        }

        let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16);
        let bad = |_| ColorParseError::BadDigit(literal.to_string());

        match digits.len() {
            3 => {
                let nibble = |i: usize| u8::from_str_radix(&digits[i..i + 1], 16).map(|n| n * 17);
                Ok(Self::from_rgb_u8(
                    nibble(0).map_err(bad)?,
                    nibble(1).map_err(bad)?,
                    nibble(2).map_err(bad)?,
                ))
            }
            6 => Ok(Self::from_rgb_u8(
                byte(0).map_err(bad)?,
                byte(2).map_err(bad)?,
                byte(4).map_err(bad)?,
            )),
            8 => Ok(Self::from_rgba_u8(
                byte(0).map_err(bad)?,
                byte(2).map_err(bad)?,
                byte(4).map_err(bad)?,
                byte(6).map_err(bad)?,
            )),
            _ => Err(ColorParseError::BadLength(literal.to_string())),
        }
    }

    #[inline]
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    #[inline]
    pub fn is_opaque(self) -> bool {
        self.a >= 1.0
    }

    /// Premultiplied `[r, g, b, a]` after scaling alpha by `global_alpha`.
    pub fn to_premul(self, global_alpha: f32) -> [f32; 4] {
        let a = (self.a * global_alpha).clamp(0.0, 1.0);
        [
            self.r.clamp(0.0, 1.0) * a,
            self.g.clamp(0.0, 1.0) * a,
            self.b.clamp(0.0, 1.0) * a,
            a,
        ]
    }

    pub fn to_premul_u8(self, global_alpha: f32) -> [u8; 4] {
        self.to_premul(global_alpha).map(|c| (c * 255.0).round() as u8)
    }

    fn to_u8(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a].map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::from_hex(s)
    }
}

/// Formats as `#rrggbbaa`.
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, a] = self.to_u8();
        write!(f, "#{r:02x}{g:02x}{b:02x}{a:02x}")
    }
}
