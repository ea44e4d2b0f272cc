//! File-backed frame source.

use std::path::PathBuf;

use image::DynamicImage;

use formscout_core::source::FrameSource;
use formscout_core::{Rect, ScanError};

/// Frame source that loads a stored screenshot from disk.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl FrameSource for FileSource {
    fn capture(&self, region: Option<Rect>) -> Result<DynamicImage, ScanError> {
        let frame = image::open(&self.path)
            .map_err(|e| ScanError::Capture(format!("{}: {e}", self.path.display())))?;

        Ok(match region {
            Some(r) => frame.crop_imm(r.x, r.y, r.width, r.height),
            None => frame,
        })
    }
}
