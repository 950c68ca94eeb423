//! JSON scene documents.
//!
//! A scene is the on-disk form of an [`AnimationRequest`]:
//!
//! ```json
//! {
//!   "width": 100,
//!   "height": 100,
//!   "background": "#eee",
//!   "fps": 60,
//!   "waves": [
//!     { "amplitude": 4, "wavelength": 60, "period": 1, "baseline": 20,
//!       "fill": "fill_above", "color": "#555555" }
//!   ]
//! }
//! ```

use std::path::{Path, PathBuf};

use image::RgbaImage;

use crate::foundation::core::{Fps, Rgb8};
use crate::foundation::error::{SinescapeError, SinescapeResult};
use crate::render::pipeline::AnimationRequest;
use crate::render::surface::{RasterSurface, solid_surface};
use crate::wave::model::{FillMode, Wave};

/// A color written either as a hex string (`"#rgb"`, `"#rrggbb"`) or a packed `0xRRGGBB` integer.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum ColorSpec {
    /// Packed `0xRRGGBB`.
    Packed(u32),
    /// Hex string, `#` optional.
    Hex(String),
}

impl ColorSpec {
    /// Resolve to an [`Rgb8`].
    pub fn resolve(&self) -> SinescapeResult<Rgb8> {
        match self {
            Self::Packed(v) => {
                if *v > 0x00ff_ffff {
                    return Err(SinescapeError::invalid_input(format!(
                        "packed color {v:#x} does not fit in 0xRRGGBB"
                    )));
                }
                Ok(Rgb8::from_packed(*v))
            }
            Self::Hex(s) => Rgb8::parse_hex(s),
        }
    }
}

/// One wave entry of a [`Scene`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WaveSpec {
    /// Peak displacement in pixels.
    pub amplitude: f64,
    /// Horizontal period in pixels. Must be non-zero.
    pub wavelength: f64,
    /// Temporal period. Must be > 0.
    pub period: f64,
    /// Phase offset in radians.
    #[serde(default)]
    pub phase: f64,
    /// Row of the resting curve.
    #[serde(default)]
    pub baseline: f64,
    /// Paint mode; `point` when omitted.
    #[serde(default)]
    pub fill: FillMode,
    /// Wave color; white when omitted.
    #[serde(default)]
    pub color: Option<ColorSpec>,
}

impl WaveSpec {
    /// Validate and build the [`Wave`].
    pub fn to_wave(&self) -> SinescapeResult<Wave> {
        let color = match &self.color {
            Some(c) => c.resolve()?,
            None => Rgb8::default(),
        };
        Wave::builder(self.amplitude, self.wavelength, self.period)
            .phase(self.phase)
            .baseline(self.baseline)
            .fill(self.fill)
            .color(color)
            .build()
    }
}

/// Serialized description of one animation.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scene {
    /// Surface width; ignored when `background_image` is set.
    #[serde(default)]
    pub width: u32,
    /// Surface height; ignored when `background_image` is set.
    #[serde(default)]
    pub height: u32,
    /// Solid background; transparent when omitted.
    #[serde(default)]
    pub background: Option<ColorSpec>,
    /// Image used as background, relative to the scene file's directory.
    #[serde(default)]
    pub background_image: Option<PathBuf>,
    /// Frames per unit of time.
    pub fps: Fps,
    /// Drawn in order; later waves cover earlier ones.
    pub waves: Vec<WaveSpec>,
}

impl Scene {
    /// Parse a scene from JSON text.
    pub fn from_json_str(json: &str) -> SinescapeResult<Self> {
        serde_json::from_str(json).map_err(|e| SinescapeError::serde(e.to_string()))
    }

    /// Read and parse a scene file.
    pub fn load(path: impl AsRef<Path>) -> SinescapeResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| SinescapeError::io(path, e))?;
        Self::from_json_str(&text).map_err(|e| match e {
            SinescapeError::Serde(msg) => {
                SinescapeError::serde(format!("{}: {msg}", path.display()))
            }
            other => other,
        })
    }

    /// Check everything that can be checked without touching the filesystem.
    pub fn validate(&self) -> SinescapeResult<()> {
        if self.waves.is_empty() {
            return Err(SinescapeError::invalid_input("scene has no waves"));
        }
        if self.background_image.is_none() && (self.width == 0 || self.height == 0) {
            return Err(SinescapeError::invalid_input(format!(
                "scene size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if let Some(bg) = &self.background {
            bg.resolve()?;
        }
        self.waves()?;
        Ok(())
    }

    /// Build every wave, tagging failures with the wave's position.
    pub fn waves(&self) -> SinescapeResult<Vec<Wave>> {
        self.waves
            .iter()
            .enumerate()
            .map(|(idx, spec)| {
                spec.to_wave().map_err(|e| match e {
                    SinescapeError::InvalidInput(msg) => {
                        SinescapeError::invalid_input(format!("wave {idx}: {msg}"))
                    }
                    other => other,
                })
            })
            .collect()
    }

    /// Validate and resolve into a renderable request. `base_dir` anchors a
    /// relative `background_image` path.
    pub fn into_request(self, base_dir: &Path) -> SinescapeResult<AnimationRequest<RgbaImage>> {
        self.validate()?;
        let waves = self.waves()?;
        let background = self.background_surface(base_dir)?;
        Ok(AnimationRequest {
            waves,
            background,
            fps: self.fps,
        })
    }

    fn background_surface(&self, base_dir: &Path) -> SinescapeResult<RgbaImage> {
        let mut surface = match &self.background_image {
            Some(rel) => {
                let path = base_dir.join(rel);
                let img = image::open(&path).map_err(|e| match e {
                    image::ImageError::IoError(io) => SinescapeError::io(&path, io),
                    other => SinescapeError::invalid_input(format!(
                        "background image '{}': {other}",
                        path.display()
                    )),
                })?;
                img.to_rgba8()
            }
            None => RgbaImage::blank(self.width, self.height),
        };

        if let Some(bg) = &self.background {
            // A solid color sits underneath any background image.
            let (w, h) = surface.dimensions();
            let mut under: RgbaImage = solid_surface(w, h, bg.resolve()?);
            if self.background_image.is_some() {
                image::imageops::overlay(&mut under, &surface, 0, 0);
            }
            surface = under;
        }
        Ok(surface)
    }
}

#[cfg(test)]
#[path = "../tests/unit/scene.rs"]
mod tests;
