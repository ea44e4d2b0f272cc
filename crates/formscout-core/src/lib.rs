//! Core library for locating fillable fields in screenshots and mapping
//! them to semantic data keys.
//!
//! This crate provides:
//! - Geometric field candidate detection from raster frames
//! - Label recovery around candidates via an external OCR engine
//! - Overlap suppression across detections
//! - Label-to-key resolution with an AI-assisted strategy over a
//!   deterministic regex fallback
//!
//! The engine only ever emits [`DataKey`] values; resolving a key to an
//! actual personal value is the caller's concern.

pub mod error;
pub mod matching;
pub mod models;
pub mod ocr;
pub mod scan;
pub mod source;

pub use error::{MatchError, OcrError, Result, ScanError, ScoutError};
pub use matching::{AssistedMatcher, MatchResolver, MatchStrategy, PatternMatcher};
pub use models::config::{AssistConfig, DetectorConfig, LabelConfig, MatchConfig, ScoutConfig};
pub use models::field::{FieldKind, FieldMatch, FieldRegion, Rect, ResolvedField};
pub use models::keys::DataKey;
pub use ocr::{OcrEngine, OcrToken};
pub use scan::{FieldScanner, ScanResult};
pub use source::FrameSource;
