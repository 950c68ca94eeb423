use std::path::{Path, PathBuf};

use crate::animation::sequencer::Frame;
use crate::foundation::error::{SinescapeError, SinescapeResult};
use crate::render::pipeline::FrameSink;
use crate::render::surface::RasterSurface;

/// File name of frame `index`: `frame-{index}.png`.
pub fn frame_file_name(index: u64) -> String {
    format!("frame-{index}.png")
}

/// Create `dir` (and any missing parents) unless it already exists.
pub fn ensure_dir(dir: &Path) -> SinescapeResult<()> {
    if dir.is_dir() {
        return Ok(());
    }
    std::fs::create_dir_all(dir).map_err(|e| SinescapeError::io(dir, e))
}

/// Writes every frame as its own PNG inside one directory.
///
/// Each file is committed as soon as its frame arrives, so files written
/// before a failure stay on disk. Existing files with the same name are
/// overwritten.
#[derive(Debug)]
pub struct DirectorySink {
    dir: PathBuf,
    written: u64,
}

impl DirectorySink {
    /// Prepare `dir` for output, creating it when absent.
    pub fn create(dir: impl Into<PathBuf>) -> SinescapeResult<Self> {
        let dir = dir.into();
        ensure_dir(&dir)?;
        Ok(Self { dir, written: 0 })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, index: u64) -> PathBuf {
        self.dir.join(frame_file_name(index))
    }
}

impl<S: RasterSurface> FrameSink<S> for DirectorySink {
    type Output = u64;

    fn accept(&mut self, frame: Frame<S>) -> SinescapeResult<()> {
        let (w, h) = (frame.surface.width(), frame.surface.height());
        if w == 0 || h == 0 {
            return Err(SinescapeError::encoding(format!(
                "frame {}: cannot write an empty {w}x{h} png",
                frame.index
            )));
        }
        let path = self.path_for(frame.index);
        let bytes = frame.surface.encode_png().map_err(|e| match e {
            SinescapeError::Encoding(msg) => {
                SinescapeError::encoding(format!("frame {}: {msg}", frame.index))
            }
            other => other,
        })?;
        std::fs::write(&path, bytes).map_err(|e| SinescapeError::io(&path, e))?;
        self.written += 1;
        Ok(())
    }

    fn finish(self) -> SinescapeResult<u64> {
        tracing::info!(
            frames = self.written,
            dir = %self.dir.display(),
            "wrote frame files"
        );
        Ok(self.written)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/still.rs"]
mod tests;
