//! File-upload control detection from whole-frame OCR tokens.

use image::DynamicImage;
use tracing::{debug, warn};

use crate::models::config::LabelConfig;
use crate::models::field::{FieldKind, FieldRegion, Rect};
use crate::ocr::{OcrEngine, OcrToken};

/// Words that signal a file-upload control.
const UPLOAD_KEYWORDS: [&str; 7] = [
    "upload",
    "choose file",
    "browse",
    "attach",
    "select file",
    "resume",
    "cv",
];

/// Scan the frame's tokens for upload-related keywords and synthesize
/// file-upload regions around the hits.
///
/// Upload controls rarely look like input boxes, so the geometric detector
/// misses them; this pass finds them by their caption text instead. A
/// failing token pass is non-fatal: the scan proceeds without
/// keyword-derived regions.
pub fn detect_upload_controls<O: OcrEngine>(
    frame: &DynamicImage,
    ocr: &O,
    config: &LabelConfig,
) -> Vec<FieldRegion> {
    let tokens = match ocr.recognize_tokens(frame) {
        Ok(tokens) => tokens,
        Err(e) => {
            warn!("token pass failed, skipping upload detection: {e}");
            return Vec::new();
        }
    };

    let mut regions = Vec::new();
    for token in &tokens {
        if token.confidence <= config.min_token_confidence {
            continue;
        }
        let lowered = token.text.to_lowercase();
        if !UPLOAD_KEYWORDS.iter().any(|keyword| lowered.contains(keyword)) {
            continue;
        }
        regions.push(upload_region(token, config));
    }

    debug!(
        "synthesized {} upload regions from {} tokens",
        regions.len(),
        tokens.len()
    );
    regions
}

/// Pad the token box to approximate the clickable control area.
fn upload_region(token: &OcrToken, config: &LabelConfig) -> FieldRegion {
    let b = &token.bounds;
    let bounds = Rect::new(
        b.x.saturating_sub(config.pad_x),
        b.y.saturating_sub(config.pad_y),
        b.width + config.pad_x * 2,
        b.height + config.pad_y * 2,
    );
    FieldRegion::new(bounds, FieldKind::FileUpload, token.confidence)
        .with_label(token.text.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OcrError;
    use image::{GrayImage, Luma};
    use pretty_assertions::assert_eq;

    struct TokenOcr(Vec<OcrToken>);

    impl OcrEngine for TokenOcr {
        fn recognize(&self, _image: &DynamicImage) -> Result<String, OcrError> {
            Ok(String::new())
        }

        fn recognize_tokens(&self, _image: &DynamicImage) -> Result<Vec<OcrToken>, OcrError> {
            Ok(self.0.clone())
        }
    }

    struct BrokenOcr;

    impl OcrEngine for BrokenOcr {
        fn recognize(&self, _image: &DynamicImage) -> Result<String, OcrError> {
            Err(OcrError::Engine("down".into()))
        }

        fn recognize_tokens(&self, _image: &DynamicImage) -> Result<Vec<OcrToken>, OcrError> {
            Err(OcrError::Engine("down".into()))
        }
    }

    fn token(text: &str, confidence: f32, x: u32, y: u32) -> OcrToken {
        OcrToken {
            text: text.to_string(),
            confidence,
            bounds: Rect::new(x, y, 60, 20),
        }
    }

    fn frame() -> DynamicImage {
        DynamicImage::ImageLuma8(GrayImage::from_pixel(640, 480, Luma([255u8])))
    }

    #[test]
    fn synthesizes_padded_upload_regions() {
        let ocr = TokenOcr(vec![token("Upload", 0.9, 100, 200)]);
        let regions = detect_upload_controls(&frame(), &ocr, &LabelConfig::default());

        assert_eq!(regions.len(), 1);
        let region = &regions[0];
        assert_eq!(region.kind, FieldKind::FileUpload);
        assert_eq!(region.bounds, Rect::new(80, 190, 100, 40));
        assert_eq!(region.label.as_deref(), Some("Upload"));
        assert_eq!(region.confidence, 0.9);
    }

    #[test]
    fn ignores_low_confidence_and_unrelated_tokens() {
        let ocr = TokenOcr(vec![
            token("Resume", 0.2, 100, 200),
            token("Submit", 0.9, 100, 300),
        ]);
        let regions = detect_upload_controls(&frame(), &ocr, &LabelConfig::default());
        assert!(regions.is_empty());
    }

    #[test]
    fn matches_keywords_case_insensitively() {
        let ocr = TokenOcr(vec![token("ATTACH", 0.8, 10, 10)]);
        let regions = detect_upload_controls(&frame(), &ocr, &LabelConfig::default());
        assert_eq!(regions.len(), 1);
    }

    #[test]
    fn failed_token_pass_yields_no_regions() {
        let regions = detect_upload_controls(&frame(), &BrokenOcr, &LabelConfig::default());
        assert!(regions.is_empty());
    }

    #[test]
    fn padding_clamps_at_the_origin() {
        let ocr = TokenOcr(vec![token("browse", 0.8, 5, 3)]);
        let regions = detect_upload_controls(&frame(), &ocr, &LabelConfig::default());
        assert_eq!(regions[0].bounds.x, 0);
        assert_eq!(regions[0].bounds.y, 0);
    }
}
