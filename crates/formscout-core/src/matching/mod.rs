//! Label-to-key matching strategies and the resolution chain.

pub mod assist;
pub mod pattern;
pub mod patterns;

pub use assist::AssistedMatcher;
pub use pattern::PatternMatcher;

use std::collections::HashMap;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::MatchError;
use crate::models::config::MatchConfig;
use crate::models::field::{FieldKind, FieldMatch, FieldRegion, ResolvedField};
use crate::models::keys::DataKey;

/// A strategy for resolving one label to a vocabulary key.
#[async_trait]
pub trait MatchStrategy: Send + Sync {
    /// Resolve a label, returning `Ok(None)` when the strategy declines.
    async fn resolve(
        &self,
        label: &str,
        kind: FieldKind,
    ) -> Result<Option<FieldMatch>, MatchError>;

    /// Short strategy name for logs.
    fn name(&self) -> &'static str;
}

/// Resolver chaining the assisted matcher over the deterministic pattern
/// fallback.
///
/// Assist failures are logged and degrade to the pattern path; they are
/// never surfaced to the caller.
pub struct MatchResolver {
    assist: Option<AssistedMatcher>,
    pattern: PatternMatcher,
    config: MatchConfig,
}

impl MatchResolver {
    /// Pattern-only resolver.
    pub fn new() -> Self {
        Self {
            assist: None,
            pattern: PatternMatcher::new(),
            config: MatchConfig::default(),
        }
    }

    /// Consult the assisted matcher first when `Some`.
    pub fn with_assist(mut self, assist: Option<AssistedMatcher>) -> Self {
        self.assist = assist;
        self
    }

    /// Set resolution configuration.
    pub fn with_config(mut self, config: MatchConfig) -> Self {
        self.config = config;
        self
    }

    /// Resolve one region to at most one match.
    pub async fn resolve_field(&self, region: &FieldRegion) -> Option<FieldMatch> {
        let label = region.label.as_deref().unwrap_or("");

        if let Some(assist) = &self.assist {
            if !label.is_empty() {
                match assist.resolve(label, region.kind).await {
                    Ok(Some(found)) => return Some(found),
                    Ok(None) => debug!("{} declined for {label:?}", assist.name()),
                    Err(e) => warn!("{} failed for {label:?}: {e}", assist.name()),
                }
            }
        }

        self.pattern.resolve_label(label, region.kind)
    }

    /// Resolve every region, pairing each with its outcome.
    pub async fn resolve_all(&self, regions: &[FieldRegion]) -> Vec<ResolvedField> {
        let mut resolved = Vec::with_capacity(regions.len());
        for region in regions {
            let matched = self.resolve_field(region).await;
            resolved.push(ResolvedField {
                region: region.clone(),
                matched,
            });
        }
        resolved
    }

    /// Collapse confident matches into a label-to-key map for low-friction
    /// auto-fill. Matches at or below the threshold are dropped; full
    /// detail stays available on the resolved fields.
    pub fn suggested_mappings(&self, resolved: &[ResolvedField]) -> HashMap<String, DataKey> {
        resolved
            .iter()
            .filter_map(|field| field.matched.as_ref())
            .filter(|m| m.confidence > self.config.min_suggest_confidence)
            .map(|m| (m.field.clone(), m.key))
            .collect()
    }
}

impl Default for MatchResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::field::Rect;
    use pretty_assertions::assert_eq;

    fn region(label: &str) -> FieldRegion {
        let mut region = FieldRegion::new(Rect::new(0, 0, 200, 30), FieldKind::SingleLine, 0.7);
        if !label.is_empty() {
            region = region.with_label(label);
        }
        region
    }

    #[tokio::test]
    async fn falls_back_to_pattern_matching_without_assist() {
        let resolver = MatchResolver::new();

        let m = resolver.resolve_field(&region("Email Address")).await.unwrap();
        assert_eq!(m.key, DataKey::Email);

        assert!(resolver.resolve_field(&region("xyz123")).await.is_none());
    }

    #[tokio::test]
    async fn unlabeled_regions_stay_unmatched() {
        let resolver = MatchResolver::new();
        assert!(resolver.resolve_field(&region("")).await.is_none());
    }

    #[tokio::test]
    async fn resolve_all_pairs_every_region() {
        let resolver = MatchResolver::new();
        let regions = vec![region("Email"), region("xyz123")];

        let resolved = resolver.resolve_all(&regions).await;
        assert_eq!(resolved.len(), 2);
        assert!(resolved[0].matched.is_some());
        assert!(resolved[1].matched.is_none());
    }

    #[test]
    fn suggested_mappings_filter_by_confidence() {
        let resolver = MatchResolver::new();
        let resolved = vec![
            ResolvedField {
                region: region("Weak"),
                matched: Some(FieldMatch::new("Weak", DataKey::Email, 0.45, "r")),
            },
            ResolvedField {
                region: region("Strong"),
                matched: Some(FieldMatch::new("Strong", DataKey::Phone, 0.51, "r")),
            },
            ResolvedField {
                region: region("None"),
                matched: None,
            },
        ];

        let mappings = resolver.suggested_mappings(&resolved);
        assert_eq!(mappings.len(), 1);
        assert_eq!(mappings.get("Strong"), Some(&DataKey::Phone));
    }
}
