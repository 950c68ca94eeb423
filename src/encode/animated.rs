use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, RgbaImage};

use crate::animation::sequencer::Frame;
use crate::foundation::error::{SinescapeError, SinescapeResult};
use crate::foundation::math::Ratio;
use crate::render::pipeline::FrameSink;
use crate::render::surface::RasterSurface;

/// How many times a player should run through the animation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoopCount {
    #[default]
    Infinite,
    Finite(u16),
}

/// Multi-frame image encoder fed with raw RGBA8 buffers.
pub trait AnimationEncoder {
    /// Encode `frames` (each `width * height * 4` bytes, row-major RGBA8) with
    /// one display delay per frame, in milliseconds.
    fn encode(
        &self,
        frames: Vec<Vec<u8>>,
        width: u32,
        height: u32,
        loop_count: LoopCount,
        delays_ms: &[f64],
    ) -> SinescapeResult<Vec<u8>>;
}

/// Animated PNG through the `png` crate.
///
/// Pixels are stored losslessly and each delay is written as an exact
/// fraction of a second, so a 60 fps delay is stored as `1/60`.
#[derive(Clone, Copy, Debug, Default)]
pub struct ApngAnimationEncoder;

impl AnimationEncoder for ApngAnimationEncoder {
    fn encode(
        &self,
        frames: Vec<Vec<u8>>,
        width: u32,
        height: u32,
        loop_count: LoopCount,
        delays_ms: &[f64],
    ) -> SinescapeResult<Vec<u8>> {
        check_frames(&frames, width, height, delays_ms)?;

        // acTL: 0 plays means loop forever.
        let num_plays = match loop_count {
            LoopCount::Infinite => 0,
            LoopCount::Finite(0) => {
                return Err(SinescapeError::encoding(
                    "apng loop count must be >= 1 when finite",
                ));
            }
            LoopCount::Finite(n) => u32::from(n),
        };
        let num_frames = u32::try_from(frames.len()).map_err(|_| {
            SinescapeError::encoding(format!("too many frames for apng: {}", frames.len()))
        })?;

        let mut out = Vec::new();
        {
            let mut enc = png::Encoder::new(&mut out, width, height);
            enc.set_color(png::ColorType::Rgba);
            enc.set_depth(png::BitDepth::Eight);
            enc.set_animated(num_frames, num_plays)
                .map_err(|e| SinescapeError::encoding(format!("apng setup failed: {e}")))?;
            let mut writer = enc
                .write_header()
                .map_err(|e| SinescapeError::encoding(format!("apng header failed: {e}")))?;

            for (idx, (data, &delay_ms)) in frames.iter().zip(delays_ms).enumerate() {
                let (num, den) = apng_delay(idx, delay_ms)?;
                writer
                    .set_frame_delay(num, den)
                    .map_err(|e| SinescapeError::encoding(format!("frame {idx}: {e}")))?;
                writer
                    .write_image_data(data)
                    .map_err(|e| SinescapeError::encoding(format!("frame {idx}: {e}")))?;
            }
            writer
                .finish()
                .map_err(|e| SinescapeError::encoding(format!("apng finish failed: {e}")))?;
        }
        Ok(out)
    }
}

/// Delay as `numerator / denominator` seconds, both fitting the 16-bit fcTL
/// fields. Exact when such a fraction exists, whole milliseconds otherwise.
fn apng_delay(idx: usize, delay_ms: f64) -> SinescapeResult<(u16, u16)> {
    if !delay_ms.is_finite() || delay_ms < 0.0 {
        return Err(SinescapeError::encoding(format!(
            "frame {idx}: delay {delay_ms} ms is not representable"
        )));
    }

    if let Some(r) = Ratio::approximate_within(delay_ms / 1000.0, u128::from(u16::MAX))
        && let (Ok(num), Ok(den)) = (u16::try_from(r.num), u16::try_from(r.den))
    {
        return Ok((num, den));
    }

    let ms = delay_ms.round();
    if ms <= f64::from(u16::MAX) {
        return Ok((ms as u16, 1000));
    }
    let secs = (delay_ms / 1000.0).round();
    if secs <= f64::from(u16::MAX) {
        return Ok((secs as u16, 1));
    }
    Err(SinescapeError::encoding(format!(
        "frame {idx}: delay {delay_ms} ms is too long for apng"
    )))
}

/// Animated GIF through `image`'s GIF codec.
///
/// GIF stores delays in 10 ms units; each delay is rounded to the nearest
/// unit, so a 60 fps delay of 16.67 ms is written as 20 ms. Frames with at
/// most 256 distinct colors keep their exact palette; others are quantized.
/// Prefer [`ApngAnimationEncoder`] when timing or pixels must be exact.
#[derive(Clone, Copy, Debug)]
pub struct GifAnimationEncoder {
    /// Quantizer speed, 1 (best) to 30 (fastest).
    pub speed: i32,
}

impl Default for GifAnimationEncoder {
    fn default() -> Self {
        Self { speed: 10 }
    }
}

impl AnimationEncoder for GifAnimationEncoder {
    fn encode(
        &self,
        frames: Vec<Vec<u8>>,
        width: u32,
        height: u32,
        loop_count: LoopCount,
        delays_ms: &[f64],
    ) -> SinescapeResult<Vec<u8>> {
        if !(1..=30).contains(&self.speed) {
            return Err(SinescapeError::encoding(format!(
                "gif quantizer speed must be in 1..=30, got {}",
                self.speed
            )));
        }
        check_frames(&frames, width, height, delays_ms)?;

        let mut gif_frames = Vec::with_capacity(frames.len());
        for (idx, (data, &delay_ms)) in frames.into_iter().zip(delays_ms).enumerate() {
            let buffer = RgbaImage::from_raw(width, height, data).ok_or_else(|| {
                SinescapeError::encoding(format!("frame {idx}: buffer does not fit {width}x{height}"))
            })?;
            gif_frames.push(image::Frame::from_parts(
                buffer,
                0,
                0,
                gif_delay(idx, delay_ms)?,
            ));
        }

        let repeat = match loop_count {
            LoopCount::Infinite => Repeat::Infinite,
            LoopCount::Finite(n) => Repeat::Finite(n),
        };

        let mut out = Vec::new();
        {
            let mut enc = GifEncoder::new_with_speed(&mut out, self.speed);
            enc.set_repeat(repeat)
                .map_err(|e| SinescapeError::encoding(format!("gif repeat setup failed: {e}")))?;
            enc.encode_frames(gif_frames)
                .map_err(|e| SinescapeError::encoding(format!("gif encode failed: {e}")))?;
        }
        Ok(out)
    }
}

fn gif_delay(idx: usize, delay_ms: f64) -> SinescapeResult<Delay> {
    if !delay_ms.is_finite() || delay_ms < 0.0 || delay_ms > f64::from(u32::MAX) / 1000.0 {
        return Err(SinescapeError::encoding(format!(
            "frame {idx}: delay {delay_ms} ms is not representable"
        )));
    }
    // The codec truncates to centiseconds, so round here instead.
    let centis = (delay_ms / 10.0).round() as u32;
    Ok(Delay::from_numer_denom_ms(centis * 10, 1))
}

/// Checks shared by every encoder: a non-empty surface, at least one frame,
/// one delay per frame and correctly sized buffers.
fn check_frames(
    frames: &[Vec<u8>],
    width: u32,
    height: u32,
    delays_ms: &[f64],
) -> SinescapeResult<()> {
    if width == 0 || height == 0 {
        return Err(SinescapeError::encoding(format!(
            "cannot encode an empty {width}x{height} animation"
        )));
    }
    if frames.is_empty() {
        return Err(SinescapeError::encoding("animation needs at least one frame"));
    }
    if frames.len() != delays_ms.len() {
        return Err(SinescapeError::encoding(format!(
            "got {} frames but {} delays",
            frames.len(),
            delays_ms.len()
        )));
    }

    let expected_len = (width as usize) * (height as usize) * 4;
    for (idx, data) in frames.iter().enumerate() {
        if data.len() != expected_len {
            return Err(SinescapeError::encoding(format!(
                "frame {idx}: buffer has {} bytes, expected {expected_len} for {width}x{height}",
                data.len()
            )));
        }
    }
    Ok(())
}

/// Collects composite frames in order and encodes them into one animated image.
///
/// Nothing is encoded until [`FrameSink::finish`]; a failure at any point
/// discards every frame collected so far. With no frames at all, `finish`
/// returns an empty buffer without calling the encoder.
pub struct AnimationSink<E> {
    encoder: E,
    width: u32,
    height: u32,
    loop_count: LoopCount,
    buffers: Vec<Vec<u8>>,
    delays_ms: Vec<f64>,
}

impl<E: AnimationEncoder> AnimationSink<E> {
    pub fn new(encoder: E, width: u32, height: u32) -> Self {
        Self {
            encoder,
            width,
            height,
            loop_count: LoopCount::Infinite,
            buffers: Vec::new(),
            delays_ms: Vec::new(),
        }
    }

    pub fn with_loop_count(mut self, loop_count: LoopCount) -> Self {
        self.loop_count = loop_count;
        self
    }

    /// Frames collected so far.
    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }
}

impl<S: RasterSurface, E: AnimationEncoder> FrameSink<S> for AnimationSink<E> {
    type Output = Vec<u8>;

    fn accept(&mut self, frame: Frame<S>) -> SinescapeResult<()> {
        let (w, h) = (frame.surface.width(), frame.surface.height());
        if (w, h) != (self.width, self.height) {
            return Err(SinescapeError::encoding(format!(
                "frame {}: surface is {w}x{h}, animation is {}x{}",
                frame.index, self.width, self.height
            )));
        }
        self.buffers.push(frame.surface.raw_pixels().to_vec());
        self.delays_ms.push(frame.delay_ms);
        Ok(())
    }

    fn finish(self) -> SinescapeResult<Vec<u8>> {
        if self.buffers.is_empty() {
            tracing::warn!("animation has no frames, producing an empty buffer");
            return Ok(Vec::new());
        }

        let frames = self.buffers.len();
        let bytes = self.encoder.encode(
            self.buffers,
            self.width,
            self.height,
            self.loop_count,
            &self.delays_ms,
        )?;
        tracing::info!(frames, bytes = bytes.len(), "encoded animation");
        Ok(bytes)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/animated.rs"]
mod tests;
