//! Document scorer
//!
//! Concatenates a document batch into one case-folded corpus and
//! counts which trigger phrases appear. Presence, not frequency: each
//! phrase contributes at most one to its indicator's match count.

use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

use jicho_core::{Document, IndicatorDefinition, TRIGGER_THRESHOLD};

/// Per-indicator result of one scoring run
#[derive(Debug, Clone, Serialize)]
pub struct IndicatorScore {
    /// Indicator name
    pub indicator: String,
    /// Number of distinct trigger phrases found in the corpus
    pub raw_matches: usize,
    /// Clamped weighted score in [0, 1]
    pub normalized: f64,
}

/// Combined result of scoring one corpus against one catalog
#[derive(Debug, Clone, Serialize)]
pub struct OverallScore {
    /// Convex combination of normalized indicator scores, in [0, 1]
    pub value: f64,
    /// Indicator names with normalized score above the trigger
    /// threshold, in catalog order
    pub triggered: Vec<String>,
    /// All per-indicator scores keyed by name
    pub per_indicator: HashMap<String, IndicatorScore>,
}

impl OverallScore {
    /// A zero score over a catalog (the empty-documents result)
    pub fn zero(catalog: &[IndicatorDefinition]) -> Self {
        let per_indicator = catalog
            .iter()
            .map(|def| {
                (
                    def.name.to_string(),
                    IndicatorScore {
                        indicator: def.name.to_string(),
                        raw_matches: 0,
                        normalized: 0.0,
                    },
                )
            })
            .collect();

        Self {
            value: 0.0,
            triggered: Vec::new(),
            per_indicator,
        }
    }

    /// Indicators with normalized score above a threshold, catalog order
    pub fn above(&self, catalog: &[IndicatorDefinition], threshold: f64) -> Vec<String> {
        catalog
            .iter()
            .filter(|def| {
                self.per_indicator
                    .get(def.name)
                    .map(|s| s.normalized > threshold)
                    .unwrap_or(false)
            })
            .map(|def| def.name.to_string())
            .collect()
    }
}

/// Score a batch of documents against an indicator catalog
///
/// Empty input is a valid "insufficient data" result with value 0, not
/// an error. Deterministic for identical inputs.
pub fn score(documents: &[Document], catalog: &[IndicatorDefinition]) -> OverallScore {
    if documents.is_empty() {
        return OverallScore::zero(catalog);
    }

    let corpus = documents
        .iter()
        .map(|d| d.content.to_lowercase())
        .collect::<Vec<_>>()
        .join("\n");

    let mut per_indicator = HashMap::with_capacity(catalog.len());
    let mut value = 0.0;
    let mut triggered = Vec::new();

    for def in catalog {
        let raw_matches = def
            .phrases
            .iter()
            .filter(|phrase| corpus.contains(&phrase.to_lowercase()))
            .count();

        let ratio = raw_matches as f64 / def.phrases.len() as f64;
        let normalized = (ratio * def.weight).min(1.0);

        debug!(
            indicator = def.name,
            raw_matches, normalized, "scored indicator"
        );

        value += normalized * def.share;

        if normalized > TRIGGER_THRESHOLD {
            triggered.push(def.name.to_string());
        }

        per_indicator.insert(
            def.name.to_string(),
            IndicatorScore {
                indicator: def.name.to_string(),
                raw_matches,
                normalized,
            },
        );
    }

    OverallScore {
        value: value.clamp(0.0, 1.0),
        triggered,
        per_indicator,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jicho_core::{lookup, CatalogId, CRISIS_INDICATORS};

    fn docs(contents: &[&str]) -> Vec<Document> {
        contents
            .iter()
            .map(|c| Document::new("test-feed", c))
            .collect()
    }

    #[test]
    fn test_empty_documents_score_zero() {
        let result = score(&[], CRISIS_INDICATORS);
        assert_eq!(result.value, 0.0);
        assert!(result.triggered.is_empty());
        assert!(result
            .per_indicator
            .values()
            .all(|s| s.raw_matches == 0 && s.normalized == 0.0));
    }

    #[test]
    fn test_no_matches_score_zero() {
        let result = score(
            &docs(&["sunny weather expected across the coast"]),
            CRISIS_INDICATORS,
        );
        assert_eq!(result.value, 0.0);
    }

    #[test]
    fn test_phrase_presence_counts_once() {
        let once = score(&docs(&["a riot broke out"]), CRISIS_INDICATORS);
        let thrice = score(
            &docs(&["riot riot riot everywhere, another riot"]),
            CRISIS_INDICATORS,
        );
        assert_eq!(
            once.per_indicator["violence"].raw_matches,
            thrice.per_indicator["violence"].raw_matches
        );
        assert_eq!(once.value, thrice.value);
    }

    #[test]
    fn test_case_insensitive_matching() {
        let lower = score(&docs(&["drought conditions worsen"]), CRISIS_INDICATORS);
        let upper = score(&docs(&["DROUGHT CONDITIONS WORSEN"]), CRISIS_INDICATORS);
        assert_eq!(lower.value, upper.value);
    }

    #[test]
    fn test_determinism() {
        let batch = docs(&[
            "protest and riot in the county, several killed",
            "drought drives hunger in the north",
        ]);
        let a = score(&batch, CRISIS_INDICATORS);
        let b = score(&batch, CRISIS_INDICATORS);
        assert_eq!(a.value, b.value);
        assert_eq!(a.triggered, b.triggered);
    }

    #[test]
    fn test_monotonicity() {
        let mut batch = docs(&["protest in town"]);
        let before = score(&batch, CRISIS_INDICATORS);

        batch.push(Document::new("test-feed", "riot and gunfire reported"));
        let after = score(&batch, CRISIS_INDICATORS);

        assert!(
            after.per_indicator["violence"].normalized
                >= before.per_indicator["violence"].normalized
        );
        assert!(after.value >= before.value);
    }

    #[test]
    fn test_boundedness_on_full_match() {
        // Every crisis phrase in one batch: all scores must stay in [0, 1]
        let all_phrases: Vec<String> = CRISIS_INDICATORS
            .iter()
            .flat_map(|d| d.phrases.iter().map(|p| p.to_string()))
            .collect();
        let batch = docs(&[&all_phrases.join(" ")]);

        let result = score(&batch, CRISIS_INDICATORS);
        assert!(result.value <= 1.0);
        assert!(result
            .per_indicator
            .values()
            .all(|s| (0.0..=1.0).contains(&s.normalized)));
    }

    #[test]
    fn test_triggered_uses_strict_threshold_in_catalog_order() {
        // 8 of 10 violence phrases: 0.8 * 0.9 = 0.72 > 0.5 -> triggered
        let batch = docs(&[
            "protest riot clash attack killed gunfire looting unrest in the region",
        ]);
        let result = score(&batch, CRISIS_INDICATORS);
        assert_eq!(result.triggered, vec!["violence".to_string()]);
    }

    #[test]
    fn test_catalog_lookup_integration() {
        let catalog = lookup(CatalogId::Corruption);
        let result = score(
            &docs(&["auditor-general flags missing funds in ghost project tender award"]),
            catalog,
        );
        assert!(result.value > 0.0);
        assert!(result.per_indicator["fund_misuse"].raw_matches >= 2);
    }
}
