//! Indicator catalog registry
//!
//! Each monitoring feature (crisis early warning, misinformation
//! detection, corruption risk) scores documents against its own table
//! of named indicators. An indicator carries two distinct weights:
//! `weight` scales the phrase-match ratio inside the normalized score,
//! `share` is the indicator's fixed slice of the overall combination.
//! Shares within a catalog sum to 1.0 so the overall score stays a
//! convex combination.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors from catalog lookup and validation
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("unknown catalog: {0}")]
    Unknown(String),

    #[error("indicator '{indicator}' in catalog '{catalog}' has invalid weight {weight}")]
    InvalidWeight {
        catalog: &'static str,
        indicator: &'static str,
        weight: f64,
    },

    #[error("indicator '{indicator}' in catalog '{catalog}' has non-positive share {share}")]
    InvalidShare {
        catalog: &'static str,
        indicator: &'static str,
        share: f64,
    },

    #[error("indicator '{indicator}' in catalog '{catalog}' has no trigger phrases")]
    EmptyPhrases {
        catalog: &'static str,
        indicator: &'static str,
    },
}

/// Identifies one of the built-in indicator catalogs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogId {
    Crisis,
    Misinformation,
    Corruption,
}

impl CatalogId {
    pub fn as_str(&self) -> &'static str {
        match self {
            CatalogId::Crisis => "crisis",
            CatalogId::Misinformation => "misinformation",
            CatalogId::Corruption => "corruption",
        }
    }

    /// All built-in catalogs
    pub fn all() -> &'static [CatalogId] {
        &[
            CatalogId::Crisis,
            CatalogId::Misinformation,
            CatalogId::Corruption,
        ]
    }
}

impl fmt::Display for CatalogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CatalogId {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "crisis" => Ok(CatalogId::Crisis),
            "misinformation" | "misinfo" => Ok(CatalogId::Misinformation),
            "corruption" => Ok(CatalogId::Corruption),
            other => Err(CatalogError::Unknown(other.to_string())),
        }
    }
}

/// A named indicator category with its trigger phrases and weights
#[derive(Debug, Clone, Serialize)]
pub struct IndicatorDefinition {
    /// Unique name within its catalog
    pub name: &'static str,
    /// Per-phrase category weight in [0, 1], applied to the match ratio
    pub weight: f64,
    /// Combination share of this indicator in the overall score
    pub share: f64,
    /// Literal phrases whose presence counts toward the match ratio
    pub phrases: &'static [&'static str],
}

/// Crisis early warning indicators
pub static CRISIS_INDICATORS: &[IndicatorDefinition] = &[
    IndicatorDefinition {
        name: "violence",
        weight: 0.9,
        share: 0.30,
        phrases: &[
            "protest", "riot", "clash", "attack", "killed", "gunfire",
            "looting", "unrest", "violence", "demonstrators",
        ],
    },
    IndicatorDefinition {
        name: "displacement",
        weight: 0.8,
        share: 0.20,
        phrases: &[
            "displaced", "fled their homes", "refugee", "evacuated",
            "idp camp", "left homeless",
        ],
    },
    IndicatorDefinition {
        name: "food_insecurity",
        weight: 0.7,
        share: 0.20,
        phrases: &[
            "drought", "famine", "hunger", "crop failure", "starvation",
            "food shortage", "livestock deaths", "relief food",
        ],
    },
    IndicatorDefinition {
        name: "political_tension",
        weight: 0.6,
        share: 0.15,
        phrases: &[
            "impeachment", "incitement", "boycott", "rigging",
            "by-election", "defection", "hate speech",
        ],
    },
    IndicatorDefinition {
        name: "resource_conflict",
        weight: 0.7,
        share: 0.15,
        phrases: &[
            "cattle rustling", "banditry", "water scarcity",
            "land dispute", "grazing", "pasture",
        ],
    },
];

/// Misinformation pattern indicators
pub static MISINFORMATION_INDICATORS: &[IndicatorDefinition] = &[
    IndicatorDefinition {
        name: "sensational_language",
        weight: 0.8,
        share: 0.25,
        phrases: &[
            "shocking", "you won't believe", "exposed", "secret plan",
            "share before it's deleted", "the truth about",
        ],
    },
    IndicatorDefinition {
        name: "unverified_claims",
        weight: 0.7,
        share: 0.25,
        phrases: &[
            "sources say", "it is alleged", "reportedly", "unconfirmed",
            "rumour", "forwarded as received",
        ],
    },
    IndicatorDefinition {
        name: "conspiracy_markers",
        weight: 0.9,
        share: 0.20,
        phrases: &[
            "cover-up", "they don't want you to know", "deep state",
            "media is hiding", "planned all along",
        ],
    },
    IndicatorDefinition {
        name: "impersonation",
        weight: 0.8,
        share: 0.15,
        phrases: &[
            "official statement", "state house memo", "signed by the president",
            "official communique", "press release",
        ],
    },
    IndicatorDefinition {
        name: "manipulated_media",
        weight: 0.9,
        share: 0.15,
        phrases: &[
            "doctored", "photoshopped", "old video", "deepfake",
            "recycled footage",
        ],
    },
];

/// Corruption risk indicators
pub static CORRUPTION_INDICATORS: &[IndicatorDefinition] = &[
    IndicatorDefinition {
        name: "procurement_irregularity",
        weight: 0.9,
        share: 0.30,
        phrases: &[
            "single-sourced", "inflated tender", "no competitive bidding",
            "tender award", "contract variation", "direct procurement",
        ],
    },
    IndicatorDefinition {
        name: "bribery",
        weight: 0.9,
        share: 0.25,
        phrases: &[
            "kickback", "bribe", "facilitation fee", "brown envelope",
            "kitu kidogo",
        ],
    },
    IndicatorDefinition {
        name: "fund_misuse",
        weight: 0.8,
        share: 0.20,
        phrases: &[
            "unaccounted", "missing funds", "ghost project",
            "pending bills", "diverted funds", "stalled project",
        ],
    },
    IndicatorDefinition {
        name: "audit_findings",
        weight: 0.8,
        share: 0.15,
        phrases: &[
            "auditor-general", "qualified opinion", "irregular expenditure",
            "audit query", "unsupported expenditure",
        ],
    },
    IndicatorDefinition {
        name: "nepotism",
        weight: 0.6,
        share: 0.10,
        phrases: &[
            "relative of", "cronies", "well-connected", "irregular hiring",
        ],
    },
];

/// Look up the indicator table for a catalog
pub fn lookup(id: CatalogId) -> &'static [IndicatorDefinition] {
    match id {
        CatalogId::Crisis => CRISIS_INDICATORS,
        CatalogId::Misinformation => MISINFORMATION_INDICATORS,
        CatalogId::Corruption => CORRUPTION_INDICATORS,
    }
}

/// Parse a catalog name and return its validated indicator table
pub fn lookup_by_name(name: &str) -> Result<&'static [IndicatorDefinition], CatalogError> {
    let id: CatalogId = name.parse()?;
    let catalog = lookup(id);
    validate(id, catalog)?;
    Ok(catalog)
}

/// Reject malformed indicator tables
///
/// A failure here is a deployment defect, not transient state, and is
/// surfaced as a hard configuration error.
pub fn validate(id: CatalogId, catalog: &'static [IndicatorDefinition]) -> Result<(), CatalogError> {
    for def in catalog {
        if !(0.0..=1.0).contains(&def.weight) || !def.weight.is_finite() {
            return Err(CatalogError::InvalidWeight {
                catalog: id.as_str(),
                indicator: def.name,
                weight: def.weight,
            });
        }
        if def.share <= 0.0 || !def.share.is_finite() {
            return Err(CatalogError::InvalidShare {
                catalog: id.as_str(),
                indicator: def.name,
                share: def.share,
            });
        }
        if def.phrases.is_empty() {
            return Err(CatalogError::EmptyPhrases {
                catalog: id.as_str(),
                indicator: def.name,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_name() {
        assert!(lookup_by_name("crisis").is_ok());
        assert!(lookup_by_name("Misinformation").is_ok());
        assert!(matches!(
            lookup_by_name("weather"),
            Err(CatalogError::Unknown(_))
        ));
    }

    #[test]
    fn test_all_catalogs_validate() {
        for &id in CatalogId::all() {
            validate(id, lookup(id)).unwrap();
        }
    }

    #[test]
    fn test_shares_are_convex() {
        for &id in CatalogId::all() {
            let total: f64 = lookup(id).iter().map(|d| d.share).sum();
            assert!(
                (total - 1.0).abs() < 1e-9,
                "{} shares sum to {}",
                id,
                total
            );
        }
    }

    #[test]
    fn test_indicator_names_unique() {
        for &id in CatalogId::all() {
            let mut names: Vec<_> = lookup(id).iter().map(|d| d.name).collect();
            names.sort_unstable();
            names.dedup();
            assert_eq!(names.len(), lookup(id).len());
        }
    }
}
