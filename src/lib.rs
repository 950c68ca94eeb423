//! Sinescape renders travelling sine waves into looping animations.
//!
//! # Pipeline overview
//!
//! 1. **Plan**: the loop length is the least common multiple of every wave's
//!    period, so all waves return to their starting phase together.
//! 2. **Sequence**: frame `i` of `round(duration * fps)` is sampled at `t = i / fps`.
//! 3. **Composite**: each frame starts from a copy of the background and draws
//!    the waves in list order.
//! 4. **Sink**: frames go either to one PNG per frame in a directory or into a
//!    single animated PNG (or GIF).
//!
//! Rendering is deterministic: the same waves, background and frame rate always
//! produce the same pixels and the same encoded bytes.
#![forbid(unsafe_code)]

mod animation;
mod encode;
mod foundation;
mod render;
mod wave;

/// JSON scene documents.
pub mod scene;

pub use animation::duration::{loop_duration, waves_loop_duration};
pub use animation::sequencer::{Frame, FrameSequence, generate_frames, render_frame_at};
pub use encode::animated::{
    AnimationEncoder, AnimationSink, ApngAnimationEncoder, GifAnimationEncoder, LoopCount,
};
pub use encode::still::{DirectorySink, ensure_dir, frame_file_name};
pub use foundation::core::{Fps, Rgb8};
pub use foundation::error::{SinescapeError, SinescapeResult};
pub use render::draw::render_wave;
pub use render::pipeline::{
    AnimationRequest, FrameSink, RenderThreading, encode_animation, render_to_sink,
    write_frames_to_directory,
};
pub use render::surface::{RasterSurface, solid_surface};
pub use scene::{ColorSpec, Scene, WaveSpec};
pub use wave::model::{FillMode, Wave, WaveBuilder};
