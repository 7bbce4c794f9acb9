//! Document source trait and concurrent fan-out

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

use jicho_core::Document;

/// Errors from document retrieval
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(String),

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("source returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("parse error: {0}")]
    Parse(String),
}

/// A retrieval collaborator that hands the engine document batches
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Human-readable source name, carried on the documents
    fn name(&self) -> &str;

    /// Fetch documents matching a query
    async fn fetch(&self, query: &str) -> Result<Vec<Document>, SourceError>;
}

/// Thread-safe reference to a source
pub type SharedSource = Arc<dyn DocumentSource>;

/// In-memory source for offline runs and tests
pub struct FixedSource {
    name: String,
    documents: Vec<Document>,
}

impl FixedSource {
    pub fn new(name: &str, documents: Vec<Document>) -> Self {
        Self {
            name: name.to_string(),
            documents,
        }
    }
}

#[async_trait]
impl DocumentSource for FixedSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self, _query: &str) -> Result<Vec<Document>, SourceError> {
        Ok(self.documents.clone())
    }
}

/// Fetch from all sources concurrently
///
/// A failed source logs a warning and contributes nothing; partial
/// source failure is never fatal. Results are deduplicated by content
/// hash so the same story syndicated across outlets scores once.
pub async fn fetch_all(
    sources: &[SharedSource],
    query: &str,
    max_concurrent: usize,
) -> Vec<Document> {
    use futures::stream::{self, StreamExt};

    let results: Vec<Vec<Document>> = stream::iter(sources.iter().cloned())
        .map(|source| {
            let query = query.to_string();
            async move {
                match source.fetch(&query).await {
                    Ok(docs) => {
                        debug!("source {} returned {} documents", source.name(), docs.len());
                        docs
                    }
                    Err(e) => {
                        warn!("source {} failed: {}", source.name(), e);
                        Vec::new()
                    }
                }
            }
        })
        .buffer_unordered(max_concurrent.max(1))
        .collect()
        .await;

    let mut seen: HashSet<String> = HashSet::new();
    let mut deduped = Vec::new();

    for doc in results.into_iter().flatten() {
        if seen.insert(doc.content_hash()) {
            deduped.push(doc);
        }
    }

    info!(
        documents = deduped.len(),
        sources = sources.len(),
        "fetched corpus"
    );

    deduped
}
