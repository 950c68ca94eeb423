use std::path::Path;

use rayon::prelude::*;

use crate::animation::sequencer::{Frame, generate_frames};
use crate::encode::animated::{AnimationSink, ApngAnimationEncoder};
use crate::encode::still::DirectorySink;
use crate::foundation::core::Fps;
use crate::foundation::error::{SinescapeError, SinescapeResult};
use crate::render::surface::RasterSurface;
use crate::wave::model::Wave;

/// Consumer of a frame sequence. Frames arrive exactly once, in index order.
pub trait FrameSink<S> {
    type Output;

    fn accept(&mut self, frame: Frame<S>) -> SinescapeResult<()>;

    fn finish(self) -> SinescapeResult<Self::Output>;
}

/// How frames are rendered before they reach the sink.
///
/// With `parallel` set, frames are rendered `chunk_size` at a time on a rayon
/// pool and handed to the sink in index order, so sink output is identical to
/// the sequential path.
#[derive(Clone, Debug)]
pub struct RenderThreading {
    pub parallel: bool,
    pub chunk_size: usize,
    pub threads: Option<usize>,
}

impl Default for RenderThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 64,
            threads: None,
        }
    }
}

/// Everything needed to render one animation.
#[derive(Clone, Debug)]
pub struct AnimationRequest<S> {
    /// Drawn in order; later waves cover earlier ones.
    pub waves: Vec<Wave>,
    pub background: S,
    pub fps: Fps,
}

impl<S: RasterSurface + Send + Sync> AnimationRequest<S> {
    pub fn render_to<K: FrameSink<S>>(
        &self,
        sink: K,
        threading: &RenderThreading,
    ) -> SinescapeResult<K::Output> {
        render_to_sink(&self.waves, &self.background, self.fps, sink, threading)
    }

    pub fn write_frames_to_directory(&self, dir: impl AsRef<Path>) -> SinescapeResult<u64> {
        write_frames_to_directory(&self.waves, &self.background, self.fps, dir)
    }

    pub fn encode_animation(&self) -> SinescapeResult<Vec<u8>> {
        encode_animation(&self.waves, &self.background, self.fps)
    }
}

/// Render one full loop and feed every frame to `sink`.
#[tracing::instrument(skip(waves, background, sink), fields(wave_count = waves.len()))]
pub fn render_to_sink<S, K>(
    waves: &[Wave],
    background: &S,
    fps: Fps,
    mut sink: K,
    threading: &RenderThreading,
) -> SinescapeResult<K::Output>
where
    S: RasterSurface + Send + Sync,
    K: FrameSink<S>,
{
    let seq = generate_frames(waves, background, fps)?;

    if !threading.parallel {
        for frame in seq {
            sink.accept(frame)?;
        }
        return sink.finish();
    }

    let pool = build_thread_pool(threading.threads)?;
    let chunk_size = normalized_chunk_size(threading.chunk_size);
    let total = seq.frame_count();

    let mut chunk_start = 0u64;
    while chunk_start < total {
        let chunk_end = (chunk_start + chunk_size).min(total);
        let indices: Vec<u64> = (chunk_start..chunk_end).collect();
        let frames = pool.install(|| {
            indices
                .par_iter()
                .map(|&i| seq.frame(i))
                .collect::<Vec<_>>()
        });
        for frame in frames {
            sink.accept(frame?)?;
        }
        chunk_start = chunk_end;
    }

    sink.finish()
}

/// Write one PNG per frame into `dir` (created when absent). Returns the
/// number of files written.
pub fn write_frames_to_directory<S: RasterSurface + Send + Sync>(
    waves: &[Wave],
    background: &S,
    fps: Fps,
    dir: impl AsRef<Path>,
) -> SinescapeResult<u64> {
    let sink = DirectorySink::create(dir.as_ref())?;
    render_to_sink(waves, background, fps, sink, &RenderThreading::default())
}

/// Encode one full loop as an infinitely repeating animated PNG.
///
/// Every frame keeps its exact pixels and a delay of `1 / fps` seconds. A loop
/// that rounds to zero frames yields an empty buffer.
pub fn encode_animation<S: RasterSurface + Send + Sync>(
    waves: &[Wave],
    background: &S,
    fps: Fps,
) -> SinescapeResult<Vec<u8>> {
    let sink = AnimationSink::new(
        ApngAnimationEncoder,
        background.width(),
        background.height(),
    );
    render_to_sink(waves, background, fps, sink, &RenderThreading::default())
}

fn build_thread_pool(threads: Option<usize>) -> SinescapeResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(SinescapeError::invalid_input(
            "render threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder.build().map_err(|e| {
        SinescapeError::Other(anyhow::anyhow!("failed to build rayon thread pool: {e}"))
    })
}

fn normalized_chunk_size(chunk_size: usize) -> u64 {
    if chunk_size == 0 {
        1
    } else {
        chunk_size as u64
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
