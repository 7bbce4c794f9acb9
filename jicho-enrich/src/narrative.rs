//! Narrative enrichment with deterministic fallback
//!
//! Builds a short qualitative situation summary from the computed
//! scores. The external call is wrapped in a hard timeout; on any
//! failure the templated fallback is returned instead. No retries.

use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, warn};

use jicho_core::{AlertLevel, NOTABLE_THRESHOLD};
use jicho_engine::{classify, AlertBundle};

use crate::SharedBackend;

/// System prompt for situation narratives
const NARRATIVE_SYSTEM_PROMPT: &str = r#"
You are a civic situation analyst writing for a public citizen-engagement platform.

You are given the output of an automated risk assessment: an overall score, per-indicator scores, and per-region alerts.

Rules:
1. Write one short paragraph (3-5 sentences) summarizing the situation in plain language
2. Mention the most affected regions and the dominant indicators
3. Do not invent facts beyond the provided scores and regions
4. Do not give medical or legal advice
5. Keep a calm, factual tone suitable for the general public

ASSESSMENT DATA:
"#;

/// Narrative generation settings
#[derive(Debug, Clone)]
pub struct NarrativeConfig {
    /// Hard ceiling on the external call
    pub timeout: Duration,
}

impl Default for NarrativeConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(8),
        }
    }
}

/// Generates situation narratives, degrading to a template on failure
pub struct NarrativeEnricher {
    backend: Option<SharedBackend>,
    config: NarrativeConfig,
}

impl NarrativeEnricher {
    pub fn new(backend: Option<SharedBackend>, config: NarrativeConfig) -> Self {
        Self { backend, config }
    }

    /// Enricher that always uses the template (no provider configured)
    pub fn offline() -> Self {
        Self {
            backend: None,
            config: NarrativeConfig::default(),
        }
    }

    /// Produce a narrative for an assessment. Never fails.
    pub async fn summarize(&self, bundle: &AlertBundle) -> String {
        let Some(backend) = &self.backend else {
            return fallback_narrative(bundle);
        };

        let input = assessment_input(bundle);

        match timeout(
            self.config.timeout,
            backend.generate(NARRATIVE_SYSTEM_PROMPT, &input),
        )
        .await
        {
            Ok(Ok(text)) => {
                debug!("narrative generated by {}", backend.model_name());
                text.trim().to_string()
            }
            Ok(Err(e)) => {
                warn!("narrative generation failed, using template: {}", e);
                fallback_narrative(bundle)
            }
            Err(_) => {
                warn!(
                    "narrative generation timed out after {:?}, using template",
                    self.config.timeout
                );
                fallback_narrative(bundle)
            }
        }
    }
}

/// Assemble the provider input from the computed assessment
fn assessment_input(bundle: &AlertBundle) -> String {
    let mut input = String::new();

    input.push_str(&format!(
        "Overall score: {:.2} ({})\n\n",
        bundle.overall.value,
        classify(bundle.overall.value)
    ));

    input.push_str("Indicators:\n");
    let mut scores: Vec<_> = bundle.overall.per_indicator.values().collect();
    scores.sort_by(|a, b| {
        b.normalized
            .partial_cmp(&a.normalized)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    for s in scores.iter().filter(|s| s.normalized > NOTABLE_THRESHOLD) {
        input.push_str(&format!(
            "- {}: {:.2} ({} phrase matches)\n",
            s.indicator, s.normalized, s.raw_matches
        ));
    }

    if !bundle.per_entity.is_empty() {
        input.push_str("\nRegional alerts:\n");
        for alert in bundle.per_entity.iter().take(10) {
            input.push_str(&format!(
                "- {}: {} ({:.2})\n",
                alert.entity, alert.level, alert.score
            ));
        }
    }

    input
}

/// Deterministic summary built only from the computed scores
pub fn fallback_narrative(bundle: &AlertBundle) -> String {
    let level = classify(bundle.overall.value);
    let triggered = bundle.overall.triggered.len();
    let total = bundle.overall.per_indicator.len();

    if bundle.overall.value == 0.0 {
        return format!(
            "No risk indicators detected across the monitored sources; situation assessed as {}.",
            AlertLevel::Low
        );
    }

    let mut text = format!(
        "{} of {} indicators triggered; risk assessed as {}.",
        triggered, total, level
    );

    if let Some(top) = bundle.per_entity.first() {
        text.push_str(&format!(
            " Highest regional concern: {} at {} ({:.2}).",
            top.entity, top.level, top.score
        ));
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LlmBackend, LlmError};
    use async_trait::async_trait;
    use jicho_core::{Document, ProfileTable, CRISIS_INDICATORS};
    use jicho_engine::build_alerts;
    use std::sync::Arc;

    struct SlowBackend;

    #[async_trait]
    impl LlmBackend for SlowBackend {
        async fn generate(&self, _system: &str, _user: &str) -> Result<String, LlmError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok("too late".to_string())
        }

        fn model_name(&self) -> &str {
            "slow-mock"
        }
    }

    struct EchoBackend;

    #[async_trait]
    impl LlmBackend for EchoBackend {
        async fn generate(&self, _system: &str, user: &str) -> Result<String, LlmError> {
            Ok(format!("summary of: {}", user.lines().next().unwrap_or("")))
        }

        fn model_name(&self) -> &str {
            "echo-mock"
        }
    }

    fn crisis_bundle() -> AlertBundle {
        let profiles = ProfileTable::builtin();
        let docs = vec![Document::new(
            "wire",
            "protest riot clash attack killed gunfire looting unrest violence demonstrators in Turkana",
        )];
        build_alerts(
            &docs,
            CRISIS_INDICATORS,
            &profiles.candidate_names(),
            &profiles,
        )
    }

    #[tokio::test]
    async fn test_timeout_falls_back_within_ceiling() {
        let enricher = NarrativeEnricher::new(
            Some(Arc::new(SlowBackend)),
            NarrativeConfig {
                timeout: Duration::from_millis(50),
            },
        );

        let bundle = crisis_bundle();
        let start = std::time::Instant::now();
        let narrative = enricher.summarize(&bundle).await;

        assert!(start.elapsed() < Duration::from_secs(5));
        assert!(!narrative.is_empty());
        assert!(
            narrative.contains("risk assessed as"),
            "fallback must reference the computed level: {}",
            narrative
        );
    }

    #[tokio::test]
    async fn test_backend_output_used_when_available() {
        let enricher =
            NarrativeEnricher::new(Some(Arc::new(EchoBackend)), NarrativeConfig::default());
        let narrative = enricher.summarize(&crisis_bundle()).await;
        assert!(narrative.starts_with("summary of:"));
    }

    #[tokio::test]
    async fn test_offline_enricher_uses_template() {
        let enricher = NarrativeEnricher::offline();
        let narrative = enricher.summarize(&crisis_bundle()).await;
        assert!(narrative.contains("indicators triggered"));
        assert!(narrative.contains("Turkana"));
    }

    #[test]
    fn test_fallback_mentions_level() {
        let bundle = crisis_bundle();
        let text = fallback_narrative(&bundle);
        assert!(text.contains(&classify(bundle.overall.value).to_string()));
    }
}
