//! Label colors
//!
//! Colors are kept as normalized RGBA components on the client and sent to
//! the data service as `#RRGGBB` strings.

use crate::error::ColorError;
use std::fmt;
use std::str::FromStr;

/// RGBA color with components in `0.0..=1.0`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red component
    pub red: f32,
    /// Green component
    pub green: f32,
    /// Blue component
    pub blue: f32,
    /// Alpha component (not transmitted)
    pub alpha: f32,
}

impl Color {
    /// Opaque color from normalized components
    pub fn rgb(red: f32, green: f32, blue: f32) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Color from normalized components including alpha
    pub fn rgba(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Opaque color from 8-bit channels
    pub fn from_rgb8(red: u8, green: u8, blue: u8) -> Self {
        Self::rgb(
            f32::from(red) / 255.0,
            f32::from(green) / 255.0,
            f32::from(blue) / 255.0,
        )
    }

    /// Parse `#RRGGBB` or `RRGGBB`
    pub fn from_hex(input: &str) -> Result<Self, ColorError> {
        let digits = input.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidHex(input.to_string()));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| ColorError::InvalidHex(input.to_string()))
        };

        Ok(Self::from_rgb8(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Encode as `#RRGGBB`
    ///
    /// Returns `None` when any RGB component is not finite or falls outside
    /// `0.0..=1.0`.
    pub fn to_hex(&self) -> Option<String> {
        let red = Self::channel_to_u8(self.red)?;
        let green = Self::channel_to_u8(self.green)?;
        let blue = Self::channel_to_u8(self.blue)?;
        Some(format!("#{red:02X}{green:02X}{blue:02X}"))
    }

    fn channel_to_u8(component: f32) -> Option<u8> {
        if !component.is_finite() || !(0.0..=1.0).contains(&component) {
            return None;
        }
        // Range checked above, so the cast cannot truncate.
        Some((component * 255.0).round() as u8)
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_hex() {
            Some(hex) => f.write_str(&hex),
            None => write!(
                f,
                "rgba({}, {}, {}, {})",
                self.red, self.green, self.blue, self.alpha
            ),
        }
    }
}
