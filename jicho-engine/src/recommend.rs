//! Recommendation engine
//!
//! Pure lookup from severity level and triggered indicators to a
//! bounded list of guidance strings. Always returns at least one item.

use jicho_core::AlertLevel;

/// Maximum recommendations attached to one alert
pub const MAX_RECOMMENDATIONS: usize = 6;

/// Indicator-specific guidance, shared across catalogs
static INDICATOR_GUIDANCE: &[(&str, &str)] = &[
    (
        "violence",
        "Avoid large public gatherings and known flashpoints.",
    ),
    (
        "displacement",
        "Check on relatives in affected areas and note the nearest assistance centres.",
    ),
    (
        "food_insecurity",
        "Follow county relief distribution announcements and conserve household supplies.",
    ),
    (
        "political_tension",
        "Rely on official electoral and government communications, not forwarded messages.",
    ),
    (
        "resource_conflict",
        "Exercise caution when travelling through contested grazing or border areas.",
    ),
    (
        "sensational_language",
        "Treat emotionally charged posts with scepticism until confirmed by a second outlet.",
    ),
    (
        "unverified_claims",
        "Verify claims against established fact-checking services before sharing.",
    ),
    (
        "conspiracy_markers",
        "Cross-check extraordinary claims with multiple independent sources.",
    ),
    (
        "impersonation",
        "Confirm official statements on verified government channels before acting on them.",
    ),
    (
        "manipulated_media",
        "Reverse-search images and check publication dates before resharing media.",
    ),
    (
        "procurement_irregularity",
        "Review public tender portals for the flagged contracts.",
    ),
    (
        "bribery",
        "Report solicitation of bribes to the Ethics and Anti-Corruption Commission.",
    ),
    (
        "fund_misuse",
        "Raise flagged projects at public participation forums.",
    ),
    (
        "audit_findings",
        "Consult the Auditor-General's published reports for detail on the queries.",
    ),
    (
        "nepotism",
        "Request the public job advertisement records for the flagged appointments.",
    ),
];

/// Build the guidance list for an alert
///
/// Never empty: every level carries a baseline item, with escalations
/// layered on top and indicator-specific advice filling the remainder
/// up to [`MAX_RECOMMENDATIONS`].
pub fn recommend(level: AlertLevel, entity: Option<&str>, triggered: &[String]) -> Vec<String> {
    let mut items = Vec::new();

    items.push("Monitor verified county and national government channels for updates.".to_string());

    match level {
        AlertLevel::Low => {
            items.push("No elevated risk detected. Continue normal activity.".to_string());
        }
        AlertLevel::Medium => {
            items.push("Stay informed and review household contingency plans.".to_string());
        }
        AlertLevel::High => {
            items.push("Limit non-essential travel to affected areas.".to_string());
            items.push("Keep emergency contacts and essential documents at hand.".to_string());
        }
        AlertLevel::Critical => {
            items.push("Avoid affected areas entirely until authorities declare them safe.".to_string());
            items.push(
                "Prepare to relocate on short notice and follow official evacuation guidance."
                    .to_string(),
            );
        }
    }

    if let Some(name) = entity {
        items.push(format!("Follow official advisories specific to {}.", name));
    }

    for indicator in triggered {
        if items.len() >= MAX_RECOMMENDATIONS {
            break;
        }
        if let Some((_, guidance)) = INDICATOR_GUIDANCE
            .iter()
            .find(|(name, _)| *name == indicator.as_str())
        {
            items.push(guidance.to_string());
        }
    }

    items.truncate(MAX_RECOMMENDATIONS);
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_never_empty() {
        for level in [
            AlertLevel::Low,
            AlertLevel::Medium,
            AlertLevel::High,
            AlertLevel::Critical,
        ] {
            assert!(!recommend(level, None, &[]).is_empty());
        }
    }

    #[test]
    fn test_bounded() {
        let triggered: Vec<String> = INDICATOR_GUIDANCE
            .iter()
            .map(|(name, _)| name.to_string())
            .collect();
        let items = recommend(AlertLevel::Critical, Some("Turkana"), &triggered);
        assert!(items.len() <= MAX_RECOMMENDATIONS);
    }

    #[test]
    fn test_critical_adds_avoidance_guidance() {
        let items = recommend(AlertLevel::Critical, None, &[]);
        assert!(items.iter().any(|i| i.contains("Avoid affected areas")));
    }

    #[test]
    fn test_low_frames_normal_activity() {
        let items = recommend(AlertLevel::Low, None, &[]);
        assert!(items.iter().any(|i| i.contains("normal activity")));
    }

    #[test]
    fn test_indicator_guidance_attached() {
        let items = recommend(
            AlertLevel::High,
            Some("Garissa"),
            &["violence".to_string()],
        );
        assert!(items.iter().any(|i| i.contains("public gatherings")));
        assert!(items.iter().any(|i| i.contains("Garissa")));
    }
}
