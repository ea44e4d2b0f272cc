//! Value types shared across the detection and matching stages.
//!
//! Each stage of the pipeline consumes the previous stage's collection by
//! ownership and produces a new one; none of these records is mutated after
//! handoff.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::keys::DataKey;

/// Axis-aligned rectangle in pixel units, top-left origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Area in square pixels.
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Width over height.
    pub fn aspect_ratio(&self) -> f32 {
        if self.height == 0 {
            return 0.0;
        }
        self.width as f32 / self.height as f32
    }

    /// Area shared with another rectangle.
    pub fn intersection_area(&self, other: &Rect) -> u64 {
        let x1 = self.x.max(other.x);
        let y1 = self.y.max(other.y);
        let x2 = (self.x + self.width).min(other.x + other.width);
        let y2 = (self.y + self.height).min(other.y + other.height);

        if x2 <= x1 || y2 <= y1 {
            return 0;
        }
        (x2 - x1) as u64 * (y2 - y1) as u64
    }

    /// Intersection area over the smaller of the two areas.
    pub fn overlap_ratio(&self, other: &Rect) -> f32 {
        let min_area = self.area().min(other.area());
        if min_area == 0 {
            return 0.0;
        }
        self.intersection_area(other) as f32 / min_area as f32
    }

    /// Whether the point lies inside the rectangle.
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

/// Coarse kind of a detected field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Single-line text input.
    SingleLine,
    /// Multi-line text area.
    MultiLine,
    /// Dropdown or select control.
    Selector,
    /// File upload control.
    FileUpload,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::SingleLine => "single_line",
            FieldKind::MultiLine => "multi_line",
            FieldKind::Selector => "selector",
            FieldKind::FileUpload => "file_upload",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A detected candidate area for a fillable control.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldRegion {
    /// Bounding box in frame coordinates.
    pub bounds: Rect,

    /// Inferred field kind.
    pub kind: FieldKind,

    /// Label text recovered near the region, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Placeholder text read inside the region, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,

    /// Detection confidence (0.0 - 1.0).
    pub confidence: f32,
}

impl FieldRegion {
    pub fn new(bounds: Rect, kind: FieldKind, confidence: f32) -> Self {
        Self {
            bounds,
            kind,
            label: None,
            placeholder: None,
            confidence: confidence.clamp(0.0, 1.0),
        }
    }

    /// Attach a label, returning the enriched region.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Outcome of resolving one field to a semantic data key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldMatch {
    /// Label or identifier of the source field.
    pub field: String,

    /// Matched vocabulary key.
    pub key: DataKey,

    /// Match confidence (0.0 - 1.0).
    pub confidence: f32,

    /// Human-readable rationale for the match.
    pub rationale: String,
}

impl FieldMatch {
    pub fn new(
        field: impl Into<String>,
        key: DataKey,
        confidence: f32,
        rationale: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            key,
            confidence: confidence.clamp(0.0, 1.0),
            rationale: rationale.into(),
        }
    }
}

/// A deduplicated region paired with its resolution outcome.
///
/// `matched` is `None` when neither strategy produced a key, which callers
/// can distinguish from a matched-but-low-confidence field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedField {
    pub region: FieldRegion,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched: Option<FieldMatch>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn intersection_of_disjoint_rects_is_zero() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(20, 20, 10, 10);
        assert_eq!(a.intersection_area(&b), 0);
        assert_eq!(a.overlap_ratio(&b), 0.0);
    }

    #[test]
    fn overlap_ratio_uses_smaller_area() {
        // 10x10 box fully inside a 100x100 box: ratio is 1.0, not 0.01.
        let small = Rect::new(10, 10, 10, 10);
        let big = Rect::new(0, 0, 100, 100);
        assert_eq!(small.intersection_area(&big), 100);
        assert_eq!(small.overlap_ratio(&big), 1.0);
        assert_eq!(big.overlap_ratio(&small), 1.0);
    }

    #[test]
    fn partial_overlap_ratio() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, 0, 10, 10);
        assert_eq!(a.intersection_area(&b), 50);
        assert_eq!(a.overlap_ratio(&b), 0.5);
    }

    #[test]
    fn contains_is_half_open() {
        let r = Rect::new(10, 10, 20, 20);
        assert!(r.contains(10, 10));
        assert!(r.contains(29, 29));
        assert!(!r.contains(30, 30));
        assert!(!r.contains(9, 15));
    }

    #[test]
    fn confidence_is_clamped_on_construction() {
        let region = FieldRegion::new(Rect::new(0, 0, 1, 1), FieldKind::SingleLine, 1.7);
        assert_eq!(region.confidence, 1.0);

        let m = FieldMatch::new("x", DataKey::Email, -0.3, "r");
        assert_eq!(m.confidence, 0.0);
    }
}
