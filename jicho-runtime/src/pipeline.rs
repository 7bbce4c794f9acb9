//! Assessment pipeline
//!
//! fetch (concurrent fan-out) -> score -> aggregate -> recommend ->
//! enrich -> report. Data insufficiency and partial source failure are
//! quiet successes; only catalog/profile misconfiguration is surfaced
//! as an error.

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use jicho_core::{Alert, AlertLevel, CatalogError, ProfileError, ProfileTable};
use jicho_engine::{build_alerts, classify, recommend, AlertBundle};
use jicho_enrich::NarrativeEnricher;
use jicho_sources::{fetch_all, SharedSource};

/// Pipeline failures (configuration defects only)
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("catalog configuration error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("profile configuration error: {0}")]
    Profile(#[from] ProfileError),
}

/// Pipeline configuration
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Catalog to score against (parsed and validated at run time)
    pub catalog: String,
    /// Fan-out width for source fetches
    pub max_concurrent_fetches: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            catalog: "crisis".to_string(),
            max_concurrent_fetches: 4,
        }
    }
}

/// The report handed to callers; the sole outbound contract
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentReport {
    /// National and per-entity alerts, descending score
    pub alerts: Vec<Alert>,
    /// Severity of the unmodified national score
    pub national_level: AlertLevel,
    /// Qualitative summary (AI-generated or templated)
    pub narrative: String,
    /// Country-wide guidance
    pub recommendations: Vec<String>,
    /// Number of distinct documents scored
    pub source_count: usize,
    /// When the assessment ran
    pub generated_at: DateTime<Utc>,
}

/// One configured assessment pipeline
pub struct AssessmentPipeline {
    sources: Vec<SharedSource>,
    profiles: ProfileTable,
    enricher: NarrativeEnricher,
    config: PipelineConfig,
}

impl AssessmentPipeline {
    pub fn new(
        sources: Vec<SharedSource>,
        profiles: ProfileTable,
        enricher: NarrativeEnricher,
        config: PipelineConfig,
    ) -> Self {
        Self {
            sources,
            profiles,
            enricher,
            config,
        }
    }

    /// Run one assessment for a query
    pub async fn run(&self, query: &str) -> Result<AssessmentReport, PipelineError> {
        let catalog = jicho_core::lookup_by_name(&self.config.catalog)?;

        let documents = fetch_all(
            &self.sources,
            query,
            self.config.max_concurrent_fetches,
        )
        .await;

        info!(
            catalog = %self.config.catalog,
            documents = documents.len(),
            "running assessment"
        );

        let candidates = self.profiles.candidate_names();
        let bundle = build_alerts(&documents, catalog, &candidates, &self.profiles);

        if bundle.overall.value == 0.0 {
            // Quiet news day: substitute the deterministic all-clear
            // rather than surfacing an error.
            warn!("no indicators matched, emitting all-clear report");
            return Ok(self.all_clear(&bundle, documents.len()).await);
        }

        let national_level = classify(bundle.overall.value);
        let recommendations = match &bundle.national {
            Some(alert) => alert.recommendations.clone(),
            None => recommend(national_level, None, &bundle.overall.triggered),
        };

        let narrative = self.enricher.summarize(&bundle).await;

        let mut alerts = Vec::with_capacity(bundle.per_entity.len() + 1);
        if let Some(national) = bundle.national {
            alerts.push(national);
        }
        alerts.extend(bundle.per_entity);
        alerts.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        Ok(AssessmentReport {
            alerts,
            national_level,
            narrative,
            recommendations,
            source_count: documents.len(),
            generated_at: Utc::now(),
        })
    }

    async fn all_clear(&self, bundle: &AlertBundle, source_count: usize) -> AssessmentReport {
        AssessmentReport {
            alerts: Vec::new(),
            national_level: AlertLevel::Low,
            narrative: self.enricher.summarize(bundle).await,
            recommendations: recommend(AlertLevel::Low, None, &[]),
            source_count,
            generated_at: Utc::now(),
        }
    }
}
