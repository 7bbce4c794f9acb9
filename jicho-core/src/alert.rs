//! Alert levels and alert records
//!
//! Alerts are created fresh every scoring run and never mutated after
//! construction. Levels are strictly ordered LOW < MEDIUM < HIGH <
//! CRITICAL and assigned via fixed threshold bands in the evaluator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Entity name used for the country-wide alert
pub const NATIONAL_ENTITY: &str = "NATIONAL";

/// Ordinal severity level
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum AlertLevel {
    #[default]
    Low,
    Medium,
    High,
    Critical,
}

impl AlertLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertLevel::Low => "LOW",
            AlertLevel::Medium => "MEDIUM",
            AlertLevel::High => "HIGH",
            AlertLevel::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Round a score to two decimals for presentation
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// A risk alert for one entity (or the national rollup)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    /// Unique alert instance ID
    pub id: Uuid,

    /// Severity band
    pub level: AlertLevel,

    /// Adjusted score in [0, 1], rounded to 2 decimals
    pub score: f64,

    /// Entity name, or [`NATIONAL_ENTITY`]
    pub entity: String,

    /// Names of indicators triggered by the corpus scoring
    pub indicators: Vec<String>,

    /// Contributing source names, capped by the aggregator
    pub sources: Vec<String>,

    /// Human-readable guidance
    pub recommendations: Vec<String>,

    /// When the alert was issued
    pub issued_at: DateTime<Utc>,
}

impl Alert {
    pub fn new(
        level: AlertLevel,
        score: f64,
        entity: &str,
        indicators: Vec<String>,
        sources: Vec<String>,
        recommendations: Vec<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            level,
            score: round2(score),
            entity: entity.to_string(),
            indicators,
            sources,
            recommendations,
            issued_at: Utc::now(),
        }
    }

    pub fn is_national(&self) -> bool {
        self.entity == NATIONAL_ENTITY
    }
}
