//! Color value types.
//!
//! Palettes work in floating-point RGB with channels in `[0, 1]`. Anything the
//! caller passes as a named color (`"black"`, `"k"`, `"0.85"`) is forwarded to
//! the backend untouched.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An RGB color, channels in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);
    pub const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);

    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Build from 8-bit channels
    pub fn from_u8(rgb: [u8; 3]) -> Self {
        Self::new(
            rgb[0] as f64 / 255.0,
            rgb[1] as f64 / 255.0,
            rgb[2] as f64 / 255.0,
        )
    }

    pub fn channels(&self) -> [f64; 3] {
        [self.r, self.g, self.b]
    }

    /// Linear interpolation towards `other`, `t` in `[0, 1]`
    pub fn lerp(&self, other: &Rgb, t: f64) -> Rgb {
        Rgb::new(
            self.r * (1.0 - t) + other.r * t,
            self.g * (1.0 - t) + other.g * t,
            self.b * (1.0 - t) + other.b * t,
        )
    }

    pub fn with_alpha(&self, a: f64) -> Rgba {
        Rgba {
            r: self.r,
            g: self.g,
            b: self.b,
            a,
        }
    }

    /// `#rrggbb`
    pub fn to_hex(&self) -> String {
        let to_u8 = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", to_u8(self.r), to_u8(self.g), to_u8(self.b))
    }
}

impl From<colorgrad::Color> for Rgb {
    fn from(c: colorgrad::Color) -> Self {
        Rgb::new(c.r.clamp(0.0, 1.0), c.g.clamp(0.0, 1.0), c.b.clamp(0.0, 1.0))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3}, {:.3})", self.r, self.g, self.b)
    }
}

/// An RGB color with an alpha channel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    pub fn rgb(&self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }
}

/// Any color accepted by a draw call
///
/// `Rgba` is listed first so that an object carrying `a` keeps its alpha when
/// read back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Color {
    Rgba(Rgba),
    Rgb(Rgb),
    /// Backend color specification (name, hex string, grayscale level)
    Named(String),
}

impl From<Rgb> for Color {
    fn from(c: Rgb) -> Self {
        Color::Rgb(c)
    }
}

impl From<Rgba> for Color {
    fn from(c: Rgba) -> Self {
        Color::Rgba(c)
    }
}

impl From<&str> for Color {
    fn from(s: &str) -> Self {
        Color::Named(s.to_string())
    }
}

impl From<String> for Color {
    fn from(s: String) -> Self {
        Color::Named(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Rgb(c) => write!(f, "{}", c.to_hex()),
            Color::Rgba(c) => write!(f, "{} (alpha {:.2})", c.rgb().to_hex(), c.a),
            Color::Named(name) => f.write_str(name),
        }
    }
}
