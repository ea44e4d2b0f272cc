//! AI-assisted label matching via an external text-understanding service.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::MatchError;
use crate::models::config::AssistConfig;
use crate::models::field::{FieldKind, FieldMatch};
use crate::models::keys::DataKey;

use super::MatchStrategy;

/// Matcher that delegates label resolution to a hosted language model.
///
/// Consulted before the pattern matcher when a credential is configured.
/// One request per label; no retries. Any failure, an `unknown` verdict, or
/// an unparseable reply falls through to the deterministic path.
pub struct AssistedMatcher {
    client: reqwest::Client,
    config: AssistConfig,
}

#[derive(Serialize)]
struct AssistRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<Message<'a>>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: String,
}

#[derive(Deserialize)]
struct AssistResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    text: String,
}

impl AssistedMatcher {
    /// Create a matcher from explicit configuration.
    ///
    /// Returns `None` without a credential: an unconfigured service
    /// disables this strategy rather than erroring.
    pub fn new(config: AssistConfig) -> Option<Self> {
        if !config.is_configured() {
            return None;
        }
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .ok()?;
        Some(Self { client, config })
    }

    /// Create a matcher from the environment credential.
    pub fn from_env() -> Option<Self> {
        Self::new(AssistConfig::from_env())
    }

    async fn ask(&self, label: &str, kind: FieldKind) -> Result<String, MatchError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(MatchError::Unavailable)?;

        let request = AssistRequest {
            model: &self.config.model,
            max_tokens: self.config.max_tokens,
            messages: vec![Message {
                role: "user",
                content: prompt(label, kind),
            }],
        };

        let response = self
            .client
            .post(&self.config.endpoint)
            .header("x-api-key", api_key)
            .header("anthropic-version", "2023-06-01")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MatchError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let reply: AssistResponse = response.json().await?;
        reply
            .content
            .into_iter()
            .next()
            .map(|block| block.text)
            .ok_or_else(|| MatchError::Malformed("empty reply".into()))
    }
}

#[async_trait]
impl MatchStrategy for AssistedMatcher {
    async fn resolve(
        &self,
        label: &str,
        kind: FieldKind,
    ) -> Result<Option<FieldMatch>, MatchError> {
        let reply = self.ask(label, kind).await?;
        debug!("assist reply for {label:?}: {reply}");
        Ok(parse_reply(label, &reply))
    }

    fn name(&self) -> &'static str {
        "assisted"
    }
}

/// Parse a `key|confidence|reasoning` reply.
///
/// `unknown`, a key outside the vocabulary, or an unparseable confidence
/// all yield no match.
pub(crate) fn parse_reply(label: &str, reply: &str) -> Option<FieldMatch> {
    let mut parts = reply.trim().splitn(3, '|');
    let key_part = parts.next()?.trim();
    let confidence_part = parts.next()?.trim();
    let reasoning = parts.next()?.trim();

    if key_part == "unknown" {
        return None;
    }
    let key = DataKey::parse(key_part)?;
    let confidence: f32 = confidence_part.parse().ok()?;

    Some(FieldMatch::new(label, key, confidence, reasoning))
}

fn prompt(label: &str, kind: FieldKind) -> String {
    let vocabulary = DataKey::ALL
        .iter()
        .map(|key| key.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Analyze this form field and determine what personal information it is asking for.\n\n\
         Field label: \"{label}\"\n\
         Field kind: {kind}\n\n\
         Available data keys: {vocabulary}\n\n\
         Reply with the single best key, or \"unknown\" if none fits, formatted as:\n\
         key|confidence|reasoning\n\
         Example: email|0.95|clear email field label"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_a_well_formed_reply() {
        let m = parse_reply("Phone Number", "phone|0.92|clear phone field").unwrap();
        assert_eq!(m.key, DataKey::Phone);
        assert_eq!(m.field, "Phone Number");
        assert!((m.confidence - 0.92).abs() < 1e-6);
        assert_eq!(m.rationale, "clear phone field");
    }

    #[test]
    fn unknown_verdict_yields_no_match() {
        assert!(parse_reply("x", "unknown|0.0|no idea").is_none());
    }

    #[test]
    fn out_of_vocabulary_key_is_rejected() {
        assert!(parse_reply("x", "favorite_color|0.9|seems likely").is_none());
    }

    #[test]
    fn malformed_replies_are_rejected() {
        assert!(parse_reply("x", "").is_none());
        assert!(parse_reply("x", "phone").is_none());
        assert!(parse_reply("x", "phone|0.92").is_none());
        assert!(parse_reply("x", "phone|high|because").is_none());
    }

    #[test]
    fn reply_whitespace_is_tolerated() {
        let m = parse_reply("x", "  email | 0.7 | address-shaped label \n").unwrap();
        assert_eq!(m.key, DataKey::Email);
        assert!((m.confidence - 0.7).abs() < 1e-6);
    }

    #[test]
    fn reasoning_may_contain_separators() {
        let m = parse_reply("x", "zip|0.8|postal|code|field").unwrap();
        assert_eq!(m.key, DataKey::Zip);
        assert_eq!(m.rationale, "postal|code|field");
    }

    #[test]
    fn confidence_is_clamped() {
        let m = parse_reply("x", "email|7.5|overconfident").unwrap();
        assert_eq!(m.confidence, 1.0);
    }

    #[test]
    fn unconfigured_matcher_is_disabled() {
        assert!(AssistedMatcher::new(AssistConfig::default()).is_none());
    }

    #[test]
    fn prompt_names_the_label_and_vocabulary() {
        let p = prompt("Expected Salary", FieldKind::SingleLine);
        assert!(p.contains("Expected Salary"));
        assert!(p.contains("salary_expectation"));
        assert!(p.contains("key|confidence|reasoning"));
    }
}
