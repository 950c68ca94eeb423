use crate::foundation::error::{SinescapeError, SinescapeResult};
use crate::foundation::math::round_half_up;

/// Frames per unit of time. Always finite and strictly positive.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Fps(f64);

impl Fps {
    pub fn new(rate: f64) -> SinescapeResult<Self> {
        if !rate.is_finite() || rate <= 0.0 {
            return Err(SinescapeError::invalid_input(format!(
                "frame rate must be finite and > 0, got {rate}"
            )));
        }
        Ok(Self(rate))
    }

    pub fn as_f64(self) -> f64 {
        self.0
    }

    /// Time between two consecutive frames (`1 / fps`).
    pub fn frame_duration(self) -> f64 {
        1.0 / self.0
    }

    /// Time of frame `index` (`index * frame_duration`).
    pub fn frame_time(self, index: u64) -> f64 {
        self.frame_duration() * index as f64
    }

    /// Number of frames covering `duration`, rounded half-up. Never negative.
    pub fn frames_in(self, duration: f64) -> u64 {
        round_half_up(duration * self.0).max(0.0) as u64
    }
}

impl TryFrom<f64> for Fps {
    type Error = SinescapeError;

    fn try_from(rate: f64) -> Result<Self, Self::Error> {
        Self::new(rate)
    }
}

impl From<Fps> for f64 {
    fn from(fps: Fps) -> Self {
        fps.0
    }
}

/// Opaque 8-bit RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const WHITE: Self = Self::new(0xff, 0xff, 0xff);
    pub const BLACK: Self = Self::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Unpack `0xRRGGBB`. Bits above the low 24 are ignored.
    pub const fn from_packed(packed: u32) -> Self {
        Self {
            r: ((packed >> 16) & 0xff) as u8,
            g: ((packed >> 8) & 0xff) as u8,
            b: (packed & 0xff) as u8,
        }
    }

    pub const fn to_packed(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Parse `#rgb`, `#rrggbb`, `rgb` or `rrggbb`.
    pub fn parse_hex(s: &str) -> SinescapeResult<Self> {
        let hex = s.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bad = || SinescapeError::invalid_input(format!("invalid hex color '{s}'"));
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(bad());
        }

        match hex.len() {
            3 => {
                let nib = |i: usize| -> SinescapeResult<u8> {
                    let v = u8::from_str_radix(&hex[i..i + 1], 16).map_err(|_| bad())?;
                    Ok(v * 0x11)
                };
                Ok(Self::new(nib(0)?, nib(1)?, nib(2)?))
            }
            6 => {
                let packed = u32::from_str_radix(hex, 16).map_err(|_| bad())?;
                Ok(Self::from_packed(packed))
            }
            _ => Err(bad()),
        }
    }

    /// CSS-style `#rrggbb`.
    pub fn to_css_hex(self) -> String {
        format!("#{:06x}", self.to_packed())
    }

    /// Fully opaque RGBA8.
    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 0xff]
    }
}

impl Default for Rgb8 {
    fn default() -> Self {
        Self::WHITE
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
