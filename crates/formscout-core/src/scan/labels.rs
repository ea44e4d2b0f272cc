//! Label recovery around detected regions.

use image::{DynamicImage, GenericImageView};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::models::config::LabelConfig;
use crate::models::field::{FieldRegion, Rect};
use crate::ocr::OcrEngine;

lazy_static! {
    static ref NON_WORD: Regex = Regex::new(r"[^\w\s]").unwrap();
}

/// Recovers label text near field regions via the external OCR engine.
///
/// Three sub-regions are sampled per field, in priority order: left of the
/// field, the band above it, then the right side. Most form layouts place
/// labels to the left of or above their input; the right band covers
/// checkbox-style fields. The first sample whose cleaned text fits the
/// length window wins.
pub struct LabelExtractor {
    config: LabelConfig,
}

impl LabelExtractor {
    pub fn new(config: LabelConfig) -> Self {
        Self { config }
    }

    /// Attach labels to regions.
    ///
    /// OCR failure on an individual sample is non-fatal; a region whose
    /// samples all miss keeps `label: None`.
    pub fn attach_labels<O: OcrEngine>(
        &self,
        frame: &DynamicImage,
        regions: Vec<FieldRegion>,
        ocr: &O,
    ) -> Vec<FieldRegion> {
        regions
            .into_iter()
            .map(|region| {
                let label = self.read_label(frame, &region.bounds, ocr);
                FieldRegion { label, ..region }
            })
            .collect()
    }

    fn read_label<O: OcrEngine>(
        &self,
        frame: &DynamicImage,
        bounds: &Rect,
        ocr: &O,
    ) -> Option<String> {
        for sample in self.sample_rects(frame, bounds) {
            let crop = frame.crop_imm(sample.x, sample.y, sample.width, sample.height);
            let text = match ocr.recognize(&crop) {
                Ok(text) => text,
                Err(e) => {
                    debug!("label OCR failed: {e}");
                    continue;
                }
            };
            if let Some(cleaned) = self.clean(&text) {
                return Some(cleaned);
            }
        }
        None
    }

    /// Sample bands in priority order, clamped to the frame.
    pub(crate) fn sample_rects(&self, frame: &DynamicImage, bounds: &Rect) -> Vec<Rect> {
        let (frame_w, frame_h) = frame.dimensions();
        let c = &self.config;

        let band_top = bounds.y.saturating_sub(c.vertical_slack);
        let band_bottom = (bounds.y + bounds.height + c.vertical_slack).min(frame_h);

        let mut samples = Vec::with_capacity(3);

        // Left of the field
        let left_x = bounds.x.saturating_sub(c.side_reach);
        if bounds.x > left_x && band_bottom > band_top {
            samples.push(Rect::new(
                left_x,
                band_top,
                bounds.x - left_x,
                band_bottom - band_top,
            ));
        }

        // Band above the field
        let above_y = bounds.y.saturating_sub(c.above_band);
        if bounds.y > above_y && bounds.x < frame_w {
            let width = bounds.width.min(frame_w - bounds.x);
            if width > 0 {
                samples.push(Rect::new(bounds.x, above_y, width, bounds.y - above_y));
            }
        }

        // Right of the field
        let right_x = bounds.x + bounds.width;
        if right_x < frame_w && band_bottom > band_top {
            samples.push(Rect::new(
                right_x,
                band_top,
                c.side_reach.min(frame_w - right_x),
                band_bottom - band_top,
            ));
        }

        samples
    }

    /// Strip non-word characters, trim, and enforce the length window.
    pub(crate) fn clean(&self, text: &str) -> Option<String> {
        let stripped = NON_WORD.replace_all(text, "");
        let cleaned = stripped.trim();
        let len = cleaned.chars().count();
        if len > self.config.min_len && len < self.config.max_len {
            Some(cleaned.to_string())
        } else {
            None
        }
    }
}
