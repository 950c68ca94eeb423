use crate::animation::duration::waves_loop_duration;
use crate::foundation::core::Fps;
use crate::foundation::error::{SinescapeError, SinescapeResult};
use crate::render::draw::render_wave;
use crate::render::surface::RasterSurface;
use crate::wave::model::Wave;

/// One composite frame of an animation.
#[derive(Clone, Debug)]
pub struct Frame<S> {
    /// 0-based position in the sequence.
    pub index: u64,
    /// Timestamp, `index / fps`.
    pub time: f64,
    /// Display duration in milliseconds (`1000 / fps`).
    pub delay_ms: f64,
    pub surface: S,
}

/// Composite all `waves` over a fresh copy of `background` at time `t`.
///
/// Waves are drawn in list order, so later waves cover earlier ones. The
/// background is only read.
pub fn render_frame_at<S: RasterSurface>(waves: &[Wave], background: &S, t: f64) -> S {
    let mut frame = S::blank(background.width(), background.height());
    frame.draw_surface(background, 0, 0);
    for wave in waves {
        render_wave(wave, &mut frame, t);
    }
    frame
}

/// Lazy, ordered sequence of composite frames covering one full loop.
///
/// Produced by [`generate_frames`]. Calling `generate_frames` again with the
/// same arguments yields an identical sequence.
#[derive(Clone, Debug)]
pub struct FrameSequence<'a, S> {
    waves: &'a [Wave],
    background: &'a S,
    fps: Fps,
    duration: f64,
    frame_count: u64,
    next: u64,
}

impl<'a, S: RasterSurface> FrameSequence<'a, S> {
    /// Loop length (LCM of all wave periods).
    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn fps(&self) -> Fps {
        self.fps
    }

    /// Total frames in the loop, independent of how far iteration has gone.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn width(&self) -> u32 {
        self.background.width()
    }

    pub fn height(&self) -> u32 {
        self.background.height()
    }

    /// Render frame `index` without advancing the iterator.
    pub fn frame(&self, index: u64) -> SinescapeResult<Frame<S>> {
        if index >= self.frame_count {
            return Err(SinescapeError::invalid_input(format!(
                "frame index {index} out of range (frame count {})",
                self.frame_count
            )));
        }
        Ok(self.render(index))
    }

    fn render(&self, index: u64) -> Frame<S> {
        let time = self.fps.frame_time(index);
        tracing::trace!(index, time, "render frame");
        Frame {
            index,
            time,
            delay_ms: self.fps.frame_duration() * 1000.0,
            surface: render_frame_at(self.waves, self.background, time),
        }
    }
}

impl<S: RasterSurface> Iterator for FrameSequence<'_, S> {
    type Item = Frame<S>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.frame_count {
            return None;
        }
        let frame = self.render(self.next);
        self.next += 1;
        Some(frame)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = usize::try_from(self.frame_count - self.next).unwrap_or(usize::MAX);
        (left, Some(left))
    }
}

impl<S: RasterSurface> ExactSizeIterator for FrameSequence<'_, S> {}

/// Plan the frames of one seamless loop of `waves` over `background`.
///
/// The loop lasts `lcm(periods)`; it holds `round(duration * fps)` frames,
/// frame `i` sampled at `t = i / fps`. A frame count of zero is a valid,
/// empty sequence.
#[tracing::instrument(skip(waves, background), fields(wave_count = waves.len()))]
pub fn generate_frames<'a, S: RasterSurface>(
    waves: &'a [Wave],
    background: &'a S,
    fps: Fps,
) -> SinescapeResult<FrameSequence<'a, S>> {
    let duration = waves_loop_duration(waves)?;
    let frame_count = fps.frames_in(duration);
    tracing::debug!(duration, frame_count, "planned animation loop");

    Ok(FrameSequence {
        waves,
        background,
        fps,
        duration,
        frame_count,
        next: 0,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/animation/sequencer.rs"]
mod tests;
