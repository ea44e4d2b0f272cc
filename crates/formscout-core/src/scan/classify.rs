//! Geometric field kind classification.

use crate::models::field::FieldKind;

/// Assign a field kind from region geometry alone.
///
/// Deterministic: the same geometry always yields the same kind. Tall
/// regions read as text areas, long flat regions as single-line inputs,
/// and compact mid-width regions as dropdowns; everything else defaults to
/// a single-line input.
pub fn classify_geometry(width: u32, height: u32) -> FieldKind {
    if height > 80 {
        FieldKind::MultiLine
    } else if width > 400 && height < 50 {
        FieldKind::SingleLine
    } else if width > 100 && width < 200 && height > 20 && height < 40 {
        FieldKind::Selector
    } else {
        FieldKind::SingleLine
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn tall_regions_are_multi_line() {
        assert_eq!(classify_geometry(300, 81), FieldKind::MultiLine);
        assert_eq!(classify_geometry(300, 200), FieldKind::MultiLine);
    }

    #[test]
    fn long_flat_regions_are_single_line() {
        assert_eq!(classify_geometry(401, 49), FieldKind::SingleLine);
        assert_eq!(classify_geometry(600, 30), FieldKind::SingleLine);
    }

    #[test]
    fn compact_regions_are_selectors() {
        assert_eq!(classify_geometry(150, 30), FieldKind::Selector);
        assert_eq!(classify_geometry(101, 39), FieldKind::Selector);
    }

    #[test]
    fn selector_bounds_are_exclusive() {
        assert_eq!(classify_geometry(100, 30), FieldKind::SingleLine);
        assert_eq!(classify_geometry(200, 30), FieldKind::SingleLine);
        assert_eq!(classify_geometry(150, 20), FieldKind::SingleLine);
        assert_eq!(classify_geometry(150, 40), FieldKind::SingleLine);
    }

    #[test]
    fn everything_else_defaults_to_single_line() {
        assert_eq!(classify_geometry(50, 30), FieldKind::SingleLine);
        assert_eq!(classify_geometry(250, 60), FieldKind::SingleLine);
    }
}
