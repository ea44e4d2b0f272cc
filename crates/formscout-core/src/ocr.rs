//! External OCR engine boundary.
//!
//! OCR execution is a black-box collaborator: the pipeline hands it image
//! crops and consumes best-effort text. Slow, empty, or garbage output is
//! expected and never fatal; failures degrade to missing labels or a
//! skipped keyword pass.

use image::DynamicImage;

use crate::error::OcrError;
use crate::models::field::Rect;

/// A single recognized token with its position and confidence.
#[derive(Debug, Clone)]
pub struct OcrToken {
    /// Token text as recognized.
    pub text: String,

    /// Recognition confidence (0.0 - 1.0).
    pub confidence: f32,

    /// Token bounding box in frame coordinates.
    pub bounds: Rect,
}

/// Best-effort text recognition over image regions.
pub trait OcrEngine: Send + Sync {
    /// Recognize the text content of a cropped region.
    fn recognize(&self, image: &DynamicImage) -> Result<String, OcrError>;

    /// Recognize individual tokens with positions and confidences across a
    /// whole frame.
    fn recognize_tokens(&self, image: &DynamicImage) -> Result<Vec<OcrToken>, OcrError>;
}
