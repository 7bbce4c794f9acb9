//! JSON bulletin feed sources
//!
//! Government and agency feeds (drought bulletins, situation reports)
//! exposed as JSON endpoints of `{title, body, published_at}` items.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;

use jicho_core::Document;

use crate::{create_client, DocumentSource, FetchConfig, SourceError};

/// A JSON feed document source
pub struct BulletinSource {
    name: String,
    url: String,
    config: FetchConfig,
}

impl BulletinSource {
    pub fn new(name: &str, url: &str, config: FetchConfig) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
            config,
        }
    }
}

// Feed response types
#[derive(Debug, Deserialize)]
struct BulletinFeed {
    items: Vec<BulletinItem>,
}

#[derive(Debug, Deserialize)]
struct BulletinItem {
    title: String,
    #[serde(default)]
    body: String,
    #[serde(default)]
    published_at: Option<DateTime<Utc>>,
}

fn feed_to_documents(feed: BulletinFeed, source: &str) -> Vec<Document> {
    feed.items
        .into_iter()
        .map(|item| {
            let content = if item.body.is_empty() {
                item.title
            } else {
                format!("{}. {}", item.title, item.body)
            };
            let doc = Document::new(source, &content);
            match item.published_at {
                Some(ts) => doc.with_timestamp(ts),
                None => doc,
            }
        })
        .collect()
}

#[async_trait]
impl DocumentSource for BulletinSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self, query: &str) -> Result<Vec<Document>, SourceError> {
        let client = create_client(&self.config)?;

        debug!("fetching bulletin feed {} for query: {}", self.name, query);

        let response = client
            .get(&self.url)
            .query(&[("q", query)])
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SourceError::Status(response.status()));
        }

        let feed: BulletinFeed = response
            .json()
            .await
            .map_err(|e| SourceError::Parse(e.to_string()))?;

        Ok(feed_to_documents(feed, &self.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_to_documents() {
        let feed: BulletinFeed = serde_json::from_str(
            r#"{
                "items": [
                    {
                        "title": "Drought alert for Marsabit",
                        "body": "Vegetation condition index falling.",
                        "published_at": "2026-08-20T06:00:00Z"
                    },
                    { "title": "Situation normal in Nakuru" }
                ]
            }"#,
        )
        .unwrap();

        let docs = feed_to_documents(feed, "NDMA");
        assert_eq!(docs.len(), 2);
        assert!(docs[0].content.starts_with("Drought alert for Marsabit."));
        assert_eq!(docs[1].content, "Situation normal in Nakuru");
        assert!(docs.iter().all(|d| d.source == "NDMA"));
    }
}
