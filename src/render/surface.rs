use std::io::Cursor;

use image::{ImageFormat, Rgba, RgbaImage};

use crate::foundation::core::Rgb8;
use crate::foundation::error::{SinescapeError, SinescapeResult};

/// The raster capabilities the frame generator needs from a pixel surface.
///
/// Coordinates are signed; anything outside `0..width` / `0..height` is
/// clipped away silently, so callers may pass runs that start above the top
/// edge or extend past the bottom.
pub trait RasterSurface: Sized {
    /// Fully transparent surface of the given size.
    fn blank(width: u32, height: u32) -> Self;

    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Paint the rectangle `[x, x + w) x [y, y + h)` with an opaque color.
    /// Non-positive `w`/`h` draws nothing.
    fn fill_rect(&mut self, x: i64, y: i64, w: i64, h: i64, color: Rgb8);

    /// Copy `src` onto this surface with its top-left corner at `(x, y)`.
    fn draw_surface(&mut self, src: &Self, x: i64, y: i64);

    /// Row-major RGBA8 pixel bytes.
    fn raw_pixels(&self) -> &[u8];

    /// Encode the surface as a standalone PNG.
    fn encode_png(&self) -> SinescapeResult<Vec<u8>>;
}

impl RasterSurface for RgbaImage {
    fn blank(width: u32, height: u32) -> Self {
        RgbaImage::new(width, height)
    }

    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    fn fill_rect(&mut self, x: i64, y: i64, w: i64, h: i64, color: Rgb8) {
        let (width, height) = self.dimensions();
        let Some((x0, x1)) = clip_span(x, w, width) else {
            return;
        };
        let Some((y0, y1)) = clip_span(y, h, height) else {
            return;
        };

        let px = Rgba(color.to_rgba());
        for py in y0..y1 {
            for px_x in x0..x1 {
                self.put_pixel(px_x, py, px);
            }
        }
    }

    fn draw_surface(&mut self, src: &Self, x: i64, y: i64) {
        image::imageops::replace(self, src, x, y);
    }

    fn raw_pixels(&self) -> &[u8] {
        self.as_raw()
    }

    fn encode_png(&self) -> SinescapeResult<Vec<u8>> {
        let mut out = Cursor::new(Vec::new());
        self.write_to(&mut out, ImageFormat::Png)
            .map_err(|e| SinescapeError::encoding(format!("png encode failed: {e}")))?;
        Ok(out.into_inner())
    }
}

/// Build a surface of the given size filled with one color.
pub fn solid_surface<S: RasterSurface>(width: u32, height: u32, color: Rgb8) -> S {
    let mut s = S::blank(width, height);
    s.fill_rect(0, 0, i64::from(width), i64::from(height), color);
    s
}

/// Intersect `[start, start + len)` with `[0, limit)`.
fn clip_span(start: i64, len: i64, limit: u32) -> Option<(u32, u32)> {
    if len <= 0 {
        return None;
    }
    let end = start.saturating_add(len);
    let lo = start.clamp(0, i64::from(limit));
    let hi = end.clamp(0, i64::from(limit));
    if lo >= hi {
        return None;
    }
    Some((lo as u32, hi as u32))
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
