//! Deterministic pattern-based label matching.

use async_trait::async_trait;

use crate::error::MatchError;
use crate::models::field::{FieldKind, FieldMatch};
use crate::models::keys::DataKey;

use super::patterns::{FIELD_PATTERNS, FILE_KEYWORDS, GENERIC_PATTERNS};
use super::MatchStrategy;

/// Regex-table matcher. Always available; never fails outright.
#[derive(Debug, Clone, Default)]
pub struct PatternMatcher;

impl PatternMatcher {
    pub fn new() -> Self {
        Self
    }

    /// Resolve a label to the best-scoring vocabulary key.
    ///
    /// Keys are tried in vocabulary order and a later key replaces the
    /// current best only on a strictly higher score, so confidence ties
    /// resolve to the earliest key in the vocabulary.
    pub fn resolve_label(&self, label: &str, kind: FieldKind) -> Option<FieldMatch> {
        if label.is_empty() {
            return None;
        }
        let lowered = label.to_lowercase();

        // File-upload controls match their own keyword lists and skip
        // pattern scoring.
        if kind == FieldKind::FileUpload {
            if let Some(file_match) = match_file_keywords(label, &lowered) {
                return Some(file_match);
            }
        }

        let mut best: Option<FieldMatch> = None;
        for entry in FIELD_PATTERNS.iter() {
            for pattern in &entry.patterns {
                if !pattern.is_match(&lowered) {
                    continue;
                }
                let confidence = pattern_confidence(pattern.as_str(), &lowered);
                if best.as_ref().is_none_or(|b| confidence > b.confidence) {
                    best = Some(FieldMatch::new(
                        label,
                        entry.key,
                        confidence,
                        format!("pattern match: {}", pattern.as_str()),
                    ));
                }
            }
        }
        best
    }

    /// Whether a proposed label-to-key mapping is plausible under the
    /// pattern table.
    pub fn validate_mapping(&self, label: &str, key: DataKey) -> bool {
        if label.is_empty() {
            return false;
        }
        let lowered = label.to_lowercase();
        FIELD_PATTERNS
            .iter()
            .find(|entry| entry.key == key)
            .is_some_and(|entry| entry.patterns.iter().any(|p| p.is_match(&lowered)))
    }
}

fn match_file_keywords(label: &str, lowered: &str) -> Option<FieldMatch> {
    for (key, keywords) in FILE_KEYWORDS.iter() {
        if keywords.iter().any(|keyword| lowered.contains(keyword)) {
            return Some(FieldMatch::new(
                label,
                *key,
                0.8,
                format!("file upload field for {key}"),
            ));
        }
    }
    None
}

/// Score a pattern hit. Verbatim and short patterns are trusted more; the
/// designated generic patterns are penalized for ambiguity.
fn pattern_confidence(pattern: &str, lowered_label: &str) -> f32 {
    let mut confidence: f32 = 0.6;

    let literal = pattern_literal(pattern);
    if !literal.is_empty() && lowered_label.contains(&literal) {
        confidence += 0.3;
    }
    if literal.chars().count() < 10 {
        confidence += 0.1;
    }
    if GENERIC_PATTERNS.contains(&pattern) {
        confidence -= 0.2;
    }

    confidence.clamp(0.0, 1.0)
}

/// Reduce a pattern to its literal text: word-boundary anchors stripped,
/// whitespace wildcards collapsed to a single space.
fn pattern_literal(pattern: &str) -> String {
    pattern
        .trim_start_matches(r"\b")
        .trim_end_matches(r"\b")
        .replace(r"\s*", " ")
}

#[async_trait]
impl MatchStrategy for PatternMatcher {
    async fn resolve(
        &self,
        label: &str,
        kind: FieldKind,
    ) -> Result<Option<FieldMatch>, MatchError> {
        Ok(self.resolve_label(label, kind))
    }

    fn name(&self) -> &'static str {
        "pattern"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn resolve(label: &str) -> Option<FieldMatch> {
        PatternMatcher::new().resolve_label(label, FieldKind::SingleLine)
    }

    #[test]
    fn email_label_resolves_with_high_confidence() {
        let m = resolve("Email Address").unwrap();
        assert_eq!(m.key, DataKey::Email);
        assert!(m.confidence >= 0.6);
    }

    #[test]
    fn unrelated_label_has_no_match() {
        assert!(resolve("xyz123").is_none());
    }

    #[test]
    fn empty_label_has_no_match() {
        assert!(resolve("").is_none());
    }

    #[test]
    fn verbatim_short_patterns_score_full_confidence() {
        let m = resolve("Phone").unwrap();
        assert_eq!(m.key, DataKey::Phone);
        assert_eq!(m.confidence, 1.0);
    }

    #[test]
    fn generic_name_pattern_is_penalized() {
        // "name" alone hits the generic full-name pattern: 0.6 + 0.3 + 0.1
        // - 0.2.
        let m = resolve("Name").unwrap();
        assert_eq!(m.key, DataKey::FullName);
        assert!((m.confidence - 0.8).abs() < 1e-6);
    }

    #[test]
    fn specific_pattern_beats_generic_one() {
        let m = resolve("First Name").unwrap();
        assert_eq!(m.key, DataKey::FirstName);
    }

    #[test]
    fn ties_resolve_to_the_earlier_vocabulary_key() {
        // "first" and "last" both score 1.0; first_name precedes last_name.
        let m = resolve("first last").unwrap();
        assert_eq!(m.key, DataKey::FirstName);
        assert_eq!(m.confidence, 1.0);
    }

    #[test]
    fn confidence_is_clamped_for_pathological_labels() {
        let long_label = format!("{} email {}", "x".repeat(250), "y".repeat(250));
        let m = resolve(&long_label).unwrap();
        assert_eq!(m.key, DataKey::Email);
        assert!((0.0..=1.0).contains(&m.confidence));
    }

    #[test]
    fn every_pattern_scores_within_bounds() {
        for entry in FIELD_PATTERNS.iter() {
            for pattern in &entry.patterns {
                let literal = pattern_literal(pattern.as_str());
                let score = pattern_confidence(pattern.as_str(), &literal);
                assert!(
                    (0.0..=1.0).contains(&score),
                    "{} scored {score}",
                    pattern.as_str()
                );
            }
        }
    }

    #[test]
    fn file_upload_keywords_bypass_pattern_scoring() {
        let matcher = PatternMatcher::new();

        let m = matcher
            .resolve_label("Upload Resume", FieldKind::FileUpload)
            .unwrap();
        assert_eq!(m.key, DataKey::Resume);
        assert!((m.confidence - 0.8).abs() < 1e-6);

        let m = matcher
            .resolve_label("Motivation letter", FieldKind::FileUpload)
            .unwrap();
        assert_eq!(m.key, DataKey::CoverLetter);

        let m = matcher
            .resolve_label("Academic record", FieldKind::FileUpload)
            .unwrap();
        assert_eq!(m.key, DataKey::Transcript);
    }

    #[test]
    fn file_keywords_only_apply_to_upload_fields() {
        // On a text input, "resume" has no registered pattern.
        assert!(resolve("resume").is_none());
    }

    #[test]
    fn upload_field_without_file_keyword_falls_back_to_patterns() {
        let matcher = PatternMatcher::new();
        let m = matcher
            .resolve_label("Email", FieldKind::FileUpload)
            .unwrap();
        assert_eq!(m.key, DataKey::Email);
    }

    #[test]
    fn validates_plausible_mappings() {
        let matcher = PatternMatcher::new();
        assert!(matcher.validate_mapping("Email Address", DataKey::Email));
        assert!(matcher.validate_mapping("Given name", DataKey::FirstName));
        assert!(!matcher.validate_mapping("Email Address", DataKey::Phone));
        assert!(!matcher.validate_mapping("", DataKey::Email));
        // File keys have no pattern entries to validate against.
        assert!(!matcher.validate_mapping("resume", DataKey::Resume));
    }
}
