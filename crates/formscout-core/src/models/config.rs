//! Configuration structures for the detection and matching pipeline.

use serde::{Deserialize, Serialize};

/// Main configuration for the formscout pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoutConfig {
    /// Region detection configuration.
    pub detector: DetectorConfig,

    /// Label recovery configuration.
    pub labels: LabelConfig,

    /// Match resolution configuration.
    pub matching: MatchConfig,

    /// AI-assisted matcher configuration.
    pub assist: AssistConfig,
}

impl Default for ScoutConfig {
    fn default() -> Self {
        Self {
            detector: DetectorConfig::default(),
            labels: LabelConfig::default(),
            matching: MatchConfig::default(),
            assist: AssistConfig::default(),
        }
    }
}

/// Region detector configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Gradient magnitude above which a pixel counts as an edge.
    pub edge_threshold: f32,

    /// Minimum edge pixels for a connected component to be considered.
    pub min_component_pixels: usize,

    /// Accepted width range in pixels (exclusive bounds).
    pub min_width: u32,
    pub max_width: u32,

    /// Accepted height range in pixels (exclusive bounds).
    pub min_height: u32,
    pub max_height: u32,

    /// Minimum bounding-box area in square pixels.
    pub min_area: u64,

    /// Accepted aspect ratio range, width over height (exclusive bounds).
    pub min_aspect: f32,
    pub max_aspect: f32,

    /// Confidence assigned to geometry-derived detections.
    pub base_confidence: f32,

    /// Overlap ratio above which the lower-confidence duplicate is dropped.
    pub overlap_threshold: f32,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            edge_threshold: 128.0,
            min_component_pixels: 10,
            min_width: 20,
            max_width: 800,
            min_height: 15,
            max_height: 100,
            min_area: 300,
            min_aspect: 1.5,
            max_aspect: 20.0,
            base_confidence: 0.7,
            overlap_threshold: 0.5,
        }
    }
}

/// Label recovery configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    /// Horizontal reach of the left and right sample bands, in pixels.
    pub side_reach: u32,

    /// Vertical slack added above and below the field for the side bands.
    pub vertical_slack: u32,

    /// Height of the band sampled above the field.
    pub above_band: u32,

    /// Cleaned label length window (exclusive bounds).
    pub min_len: usize,
    pub max_len: usize,

    /// Minimum per-token OCR confidence for the upload keyword pass.
    pub min_token_confidence: f32,

    /// Padding applied to keyword-derived upload regions.
    pub pad_x: u32,
    pub pad_y: u32,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            side_reach: 200,
            vertical_slack: 20,
            above_band: 40,
            min_len: 2,
            max_len: 50,
            min_token_confidence: 0.3,
            pad_x: 20,
            pad_y: 10,
        }
    }
}

/// Match resolution configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Minimum confidence for a match to appear in suggested mappings.
    pub min_suggest_confidence: f32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            min_suggest_confidence: 0.5,
        }
    }
}

/// Configuration for the external text-understanding service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistConfig {
    /// API credential; absence disables the assisted matcher.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Messages endpoint of the service.
    pub endpoint: String,

    /// Model identifier sent with each request.
    pub model: String,

    /// Response token budget.
    pub max_tokens: u32,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for AssistConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: "https://api.anthropic.com/v1/messages".to_string(),
            model: "claude-3-haiku-20240307".to_string(),
            max_tokens: 100,
            timeout_secs: 20,
        }
    }
}

impl AssistConfig {
    /// Default configuration with the credential taken from
    /// `ANTHROPIC_API_KEY`.
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var("ANTHROPIC_API_KEY")
                .ok()
                .filter(|key| !key.is_empty()),
            ..Self::default()
        }
    }

    /// Whether a credential is present.
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

impl ScoutConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_json_yields_defaults() {
        let config: ScoutConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.detector.min_width, 20);
        assert_eq!(config.detector.overlap_threshold, 0.5);
        assert_eq!(config.labels.side_reach, 200);
        assert_eq!(config.matching.min_suggest_confidence, 0.5);
        assert!(config.assist.api_key.is_none());
    }

    #[test]
    fn partial_json_overrides_one_section() {
        let config: ScoutConfig =
            serde_json::from_str(r#"{"detector": {"edge_threshold": 64.0}}"#).unwrap();
        assert_eq!(config.detector.edge_threshold, 64.0);
        assert_eq!(config.detector.max_width, 800);
    }

    #[test]
    fn unconfigured_assist_is_disabled() {
        assert!(!AssistConfig::default().is_configured());
    }
}
