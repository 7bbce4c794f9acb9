//! Documents handed to the engine by retrieval sources
//!
//! A document is a short text record from a heterogeneous source
//! (news headline, government bulletin, social post). Documents are
//! immutable once retrieved and scored in batches.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// One retrieved text record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Name of the originating source (outlet, feed, agency)
    pub source: String,

    /// Raw text content
    pub content: String,

    /// When the record was retrieved or published
    pub timestamp: DateTime<Utc>,
}

impl Document {
    /// Create a document timestamped now
    pub fn new(source: &str, content: &str) -> Self {
        Self {
            source: source.to_string(),
            content: content.to_string(),
            timestamp: Utc::now(),
        }
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Content-based hash for deduplication across sources
    pub fn content_hash(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.content.trim().to_lowercase().as_bytes());
        format!("{:x}", hasher.finalize())[..16].to_string()
    }

    /// Case-insensitive substring containment check
    pub fn mentions(&self, name: &str) -> bool {
        self.content.to_lowercase().contains(&name.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_hash_ignores_case_and_padding() {
        let a = Document::new("Daily Nation", "Protests in Turkana County");
        let b = Document::new("The Standard", "  protests in turkana county ");
        assert_eq!(a.content_hash(), b.content_hash());
    }

    #[test]
    fn test_mentions_case_insensitive() {
        let doc = Document::new("feed", "Heavy flooding reported in NAIROBI today");
        assert!(doc.mentions("Nairobi"));
        assert!(!doc.mentions("Mombasa"));
    }
}
