//! Field detection pipeline.
//!
//! Stages run strictly forward: region detection, geometric classification,
//! label recovery, keyword-derived upload controls, overlap suppression.
//! Each stage consumes the previous stage's output and produces a new
//! collection; nothing is mutated after handoff.

mod classify;
mod dedup;
mod keywords;
mod labels;
mod regions;

pub use classify::classify_geometry;
pub use dedup::suppress_overlaps;
pub use keywords::detect_upload_controls;
pub use labels::LabelExtractor;
pub use regions::RegionDetector;

use std::time::Instant;

use image::{DynamicImage, GenericImageView};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ScanError;
use crate::models::config::ScoutConfig;
use crate::models::field::FieldRegion;
use crate::ocr::OcrEngine;

/// Result of scanning one frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResult {
    /// Deduplicated field candidates in reading order.
    pub regions: Vec<FieldRegion>,

    /// Frame dimensions (width, height).
    pub frame_size: (u32, u32),

    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

impl ScanResult {
    /// The region containing the given frame coordinate, if any.
    pub fn field_at(&self, x: u32, y: u32) -> Option<&FieldRegion> {
        self.regions.iter().find(|r| r.bounds.contains(x, y))
    }
}

/// Detection pipeline over an external OCR engine.
pub struct FieldScanner<O: OcrEngine> {
    ocr: O,
    detector: RegionDetector,
    labels: LabelExtractor,
    config: ScoutConfig,
}

impl<O: OcrEngine> FieldScanner<O> {
    /// Create a scanner with default configuration.
    pub fn new(ocr: O) -> Self {
        Self::with_config(ocr, ScoutConfig::default())
    }

    /// Create a scanner with the given configuration.
    pub fn with_config(ocr: O, config: ScoutConfig) -> Self {
        Self {
            detector: RegionDetector::new(config.detector.clone()),
            labels: LabelExtractor::new(config.labels.clone()),
            ocr,
            config,
        }
    }

    /// Detect and label field candidates in a frame.
    ///
    /// Fails only when the frame itself is unusable; a frame with no
    /// qualifying candidates yields an empty result.
    pub fn scan(&self, frame: &DynamicImage) -> Result<ScanResult, ScanError> {
        let start = Instant::now();
        let (width, height) = frame.dimensions();
        if width == 0 || height == 0 {
            return Err(ScanError::EmptyFrame);
        }

        info!("scanning frame {}x{}", width, height);

        let gray = frame.to_luma8();
        let candidates = self.detector.detect(&gray);
        let labeled = self.labels.attach_labels(frame, candidates, &self.ocr);

        let mut all = labeled;
        all.extend(detect_upload_controls(frame, &self.ocr, &self.config.labels));

        let mut regions = suppress_overlaps(all, self.config.detector.overlap_threshold);
        sort_reading_order(&mut regions);

        let result = ScanResult {
            regions,
            frame_size: (width, height),
            processing_time_ms: start.elapsed().as_millis() as u64,
        };

        info!(
            "scan complete: {} fields in {}ms",
            result.regions.len(),
            result.processing_time_ms
        );
        Ok(result)
    }
}

/// Sort top-to-bottom, left-to-right, grouping rows within 20 pixels.
fn sort_reading_order(regions: &mut [FieldRegion]) {
    regions.sort_by(|a, b| {
        let row_a = a.bounds.y / 20;
        let row_b = b.bounds.y / 20;
        row_a.cmp(&row_b).then(a.bounds.x.cmp(&b.bounds.x))
    });
}
