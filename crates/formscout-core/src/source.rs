//! Frame source boundary.

use image::DynamicImage;

use crate::error::ScanError;
use crate::models::field::Rect;

/// Supplies raster frames on demand.
///
/// Implementations may grab a live display or load stored screenshots. A
/// source that cannot produce a frame fails with [`ScanError::Capture`],
/// which is fatal to the scan call that needed the frame.
pub trait FrameSource {
    /// Capture the whole surface, or the given sub-rectangle of it.
    fn capture(&self, region: Option<Rect>) -> Result<DynamicImage, ScanError>;
}
