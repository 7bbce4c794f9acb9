//! Alert aggregator
//!
//! Scores the corpus once, discovers which candidate entities the
//! documents actually mention, and assembles per-entity alerts plus a
//! national rollup. Entities with zero mentions are skipped outright
//! rather than reported at LOW.

use serde::Serialize;
use tracing::{debug, info};

use jicho_core::{
    Alert, Document, IndicatorDefinition, ProfileTable, NATIONAL_ALERT_FLOOR, NATIONAL_ENTITY,
};

use crate::{classify, evaluate, recommend, scorer, OverallScore};

/// Maximum per-entity alerts emitted per run
pub const MAX_ENTITY_ALERTS: usize = 5;

/// Source names carried on an entity alert
pub const ENTITY_SOURCE_CAP: usize = 5;

/// Source names carried on the national alert
pub const NATIONAL_SOURCE_CAP: usize = 10;

/// Result of one aggregation run
#[derive(Debug, Clone, Serialize)]
pub struct AlertBundle {
    /// Corpus-wide score the alerts derive from
    pub overall: OverallScore,
    /// Entity alerts, descending score
    pub per_entity: Vec<Alert>,
    /// National rollup, only when the unmodified score clears the floor
    pub national: Option<Alert>,
}

impl AlertBundle {
    /// Zero documents or zero matches: callers substitute an all-clear
    pub fn is_quiet(&self) -> bool {
        self.per_entity.is_empty() && self.national.is_none()
    }
}

/// Build per-entity and national alerts from a document batch
pub fn build_alerts(
    documents: &[Document],
    catalog: &'static [IndicatorDefinition],
    candidates: &[String],
    profiles: &ProfileTable,
) -> AlertBundle {
    let overall = scorer::score(documents, catalog);

    if overall.value == 0.0 {
        debug!("overall score is zero, no alerts to build");
        return AlertBundle {
            overall,
            per_entity: Vec::new(),
            national: None,
        };
    }

    // Discover entities: a candidate qualifies only if some document
    // with indicator-triggering content mentions it. A bare mention in
    // a neutral document does not put an entity on the alert list.
    // Rank by mentioning-document count, names ascending on ties so
    // output order is stable.
    let relevant: Vec<&Document> = documents
        .iter()
        .filter(|d| has_trigger_content(d, catalog))
        .collect();

    let mut discovered: Vec<(&String, Vec<&Document>)> = candidates
        .iter()
        .map(|name| {
            let mentioning: Vec<&Document> = relevant
                .iter()
                .filter(|d| d.mentions(name))
                .copied()
                .collect();
            (name, mentioning)
        })
        .filter(|(_, docs)| !docs.is_empty())
        .collect();

    discovered.sort_by(|(a_name, a_docs), (b_name, b_docs)| {
        b_docs
            .len()
            .cmp(&a_docs.len())
            .then_with(|| a_name.cmp(b_name))
    });
    discovered.truncate(MAX_ENTITY_ALERTS);

    info!(
        entities = discovered.len(),
        score = overall.value,
        "building alerts"
    );

    let mut per_entity: Vec<Alert> = discovered
        .into_iter()
        .map(|(name, mentioning)| {
            let rating = evaluate(&overall, Some(profiles.multiplier(name)));
            let sources = dedup_sources(mentioning.into_iter(), ENTITY_SOURCE_CAP);
            let recommendations = recommend(rating.level, Some(name), &overall.triggered);

            Alert::new(
                rating.level,
                rating.adjusted,
                name,
                overall.triggered.clone(),
                sources,
                recommendations,
            )
        })
        .collect();

    per_entity.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let national = if overall.value > NATIONAL_ALERT_FLOOR {
        let level = classify(overall.value);
        let sources = dedup_sources(documents.iter(), NATIONAL_SOURCE_CAP);
        let recommendations = recommend(level, None, &overall.triggered);

        Some(Alert::new(
            level,
            overall.value,
            NATIONAL_ENTITY,
            overall.triggered.clone(),
            sources,
            recommendations,
        ))
    } else {
        None
    };

    AlertBundle {
        overall,
        per_entity,
        national,
    }
}

fn has_trigger_content(doc: &Document, catalog: &[IndicatorDefinition]) -> bool {
    let content = doc.content.to_lowercase();
    catalog
        .iter()
        .flat_map(|def| def.phrases.iter())
        .any(|phrase| content.contains(&phrase.to_lowercase()))
}

fn dedup_sources<'a>(docs: impl Iterator<Item = &'a Document>, cap: usize) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut sources = Vec::new();
    for doc in docs {
        if seen.insert(doc.source.clone()) {
            sources.push(doc.source.clone());
            if sources.len() >= cap {
                break;
            }
        }
    }
    sources
}
