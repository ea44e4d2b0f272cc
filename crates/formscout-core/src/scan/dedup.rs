//! Overlap suppression across candidate regions.

use crate::models::field::FieldRegion;

/// Drop lower-confidence regions that overlap a kept region by more than
/// `overlap_threshold`, where overlap ratio is intersection area over the
/// smaller box area.
///
/// Higher-confidence candidates are locked in first, so a weaker duplicate
/// of a strong detection is always the one dropped, never the reverse.
/// Running the suppression on its own output changes nothing.
pub fn suppress_overlaps(mut regions: Vec<FieldRegion>, overlap_threshold: f32) -> Vec<FieldRegion> {
    regions.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

    let mut kept: Vec<FieldRegion> = Vec::with_capacity(regions.len());
    for region in regions {
        let duplicate = kept
            .iter()
            .any(|existing| region.bounds.overlap_ratio(&existing.bounds) > overlap_threshold);
        if !duplicate {
            kept.push(region);
        }
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::field::{FieldKind, Rect};
    use pretty_assertions::assert_eq;

    fn region(x: u32, y: u32, w: u32, h: u32, confidence: f32) -> FieldRegion {
        FieldRegion::new(Rect::new(x, y, w, h), FieldKind::SingleLine, confidence)
    }

    #[test]
    fn drops_the_lower_confidence_duplicate() {
        let strong = region(100, 100, 200, 30, 0.9);
        let weak = region(110, 102, 200, 30, 0.6);

        let kept = suppress_overlaps(vec![weak, strong], 0.5);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].confidence, 0.9);
    }

    #[test]
    fn keeps_regions_at_or_below_the_threshold() {
        // Half-area overlap exactly: ratio 0.5 is not above the threshold.
        let a = region(0, 0, 100, 20, 0.9);
        let b = region(50, 0, 100, 20, 0.7);

        let kept = suppress_overlaps(vec![a, b], 0.5);
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn keeps_disjoint_regions() {
        let a = region(0, 0, 100, 20, 0.9);
        let b = region(0, 100, 100, 20, 0.7);
        let c = region(0, 200, 100, 20, 0.8);

        let kept = suppress_overlaps(vec![a, b, c], 0.5);
        assert_eq!(kept.len(), 3);
    }

    #[test]
    fn suppression_is_idempotent() {
        let input = vec![
            region(100, 100, 200, 30, 0.9),
            region(110, 102, 200, 30, 0.6),
            region(0, 300, 150, 25, 0.7),
            region(10, 305, 150, 25, 0.7),
        ];

        let once = suppress_overlaps(input, 0.5);
        let twice = suppress_overlaps(once.clone(), 0.5);

        assert_eq!(once.len(), twice.len());
        for (a, b) in once.iter().zip(twice.iter()) {
            assert_eq!(a.bounds, b.bounds);
            assert_eq!(a.confidence, b.confidence);
        }
    }
}
