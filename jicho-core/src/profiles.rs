//! Entity baseline profiles
//!
//! Each monitored region carries a static baseline multiplier
//! reflecting historical risk context. The multiplier only amplifies:
//! an adjusted score is `value * (1 + multiplier)` clamped to [0, 1].
//! Entities without an entry fall back to a neutral default.

use serde::Deserialize;
use std::collections::HashMap;
use thiserror::Error;

use crate::NEUTRAL_BASELINE;

/// Errors from profile table loading
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("failed to parse profile table: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("entity '{name}' has negative baseline multiplier {multiplier}")]
    NegativeMultiplier { name: String, multiplier: f64 },
}

/// Built-in county baselines (historical crisis context)
pub static COUNTY_BASELINES: &[(&str, f64)] = &[
    ("Turkana", 0.6),
    ("Mandera", 0.7),
    ("Garissa", 0.6),
    ("Wajir", 0.6),
    ("Marsabit", 0.55),
    ("West Pokot", 0.5),
    ("Samburu", 0.5),
    ("Tana River", 0.5),
    ("Baringo", 0.45),
    ("Isiolo", 0.45),
    ("Lamu", 0.5),
    ("Nairobi", 0.2),
    ("Mombasa", 0.3),
    ("Kisumu", 0.3),
    ("Nakuru", 0.25),
    ("Eldoret", 0.3),
    ("Kakamega", 0.25),
    ("Machakos", 0.2),
];

#[derive(Debug, Clone)]
struct ProfileEntry {
    /// Display form of the entity name
    name: String,
    multiplier: f64,
}

/// Lookup table of entity name -> baseline multiplier
///
/// Keys are matched case-insensitively; display names keep the casing
/// they were registered with.
#[derive(Debug, Clone)]
pub struct ProfileTable {
    entries: HashMap<String, ProfileEntry>,
    default_multiplier: f64,
}

#[derive(Debug, Deserialize)]
struct ProfileFile {
    #[serde(default)]
    default_multiplier: Option<f64>,
    #[serde(default)]
    regions: HashMap<String, f64>,
}

impl Default for ProfileTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ProfileTable {
    /// Table seeded with the built-in county baselines
    pub fn builtin() -> Self {
        let mut table = Self::empty();
        for (name, m) in COUNTY_BASELINES {
            table.insert(name, *m);
        }
        table
    }

    /// Empty table (every lookup returns the neutral default)
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
            default_multiplier: NEUTRAL_BASELINE,
        }
    }

    /// Load an operator-supplied override table from TOML
    ///
    /// ```toml
    /// default_multiplier = 0.5
    ///
    /// [regions]
    /// Turkana = 0.6
    /// Nairobi = 0.2
    /// ```
    pub fn from_toml_str(text: &str) -> Result<Self, ProfileError> {
        let file: ProfileFile = toml::from_str(text)?;

        let mut table = Self::empty();
        table.default_multiplier = file.default_multiplier.unwrap_or(NEUTRAL_BASELINE);

        for (name, m) in file.regions {
            if m < 0.0 || !m.is_finite() {
                return Err(ProfileError::NegativeMultiplier {
                    name,
                    multiplier: m,
                });
            }
            table.insert(&name, m);
        }

        Ok(table)
    }

    pub fn insert(&mut self, name: &str, multiplier: f64) {
        self.entries.insert(
            name.to_lowercase(),
            ProfileEntry {
                name: name.to_string(),
                multiplier,
            },
        );
    }

    /// Baseline multiplier for an entity, neutral default when absent
    pub fn multiplier(&self, name: &str) -> f64 {
        self.entries
            .get(&name.to_lowercase())
            .map(|e| e.multiplier)
            .unwrap_or(self.default_multiplier)
    }

    /// Whether the entity has an explicit entry
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&name.to_lowercase())
    }

    /// Candidate entity names for mention scanning, sorted for determinism
    pub fn candidate_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entries.values().map(|e| e.name.clone()).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookup_case_insensitive() {
        let table = ProfileTable::builtin();
        assert_eq!(table.multiplier("turkana"), 0.6);
        assert_eq!(table.multiplier("TURKANA"), 0.6);
    }

    #[test]
    fn test_missing_entity_gets_neutral_default() {
        let table = ProfileTable::builtin();
        assert_eq!(table.multiplier("Atlantis"), NEUTRAL_BASELINE);
    }

    #[test]
    fn test_candidate_names_keep_display_case() {
        let table = ProfileTable::builtin();
        let names = table.candidate_names();
        assert!(names.contains(&"Turkana".to_string()));
        assert!(names.contains(&"West Pokot".to_string()));
    }

    #[test]
    fn test_toml_override() {
        let table = ProfileTable::from_toml_str(
            r#"
            default_multiplier = 0.4

            [regions]
            Turkana = 0.8
            "#,
        )
        .unwrap();

        assert_eq!(table.multiplier("turkana"), 0.8);
        assert_eq!(table.multiplier("elsewhere"), 0.4);
    }

    #[test]
    fn test_negative_multiplier_rejected() {
        let result = ProfileTable::from_toml_str(
            r#"
            [regions]
            Turkana = -0.5
            "#,
        );
        assert!(matches!(
            result,
            Err(ProfileError::NegativeMultiplier { .. })
        ));
    }
}
