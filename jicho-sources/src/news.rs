//! HTML news headline sources
//!
//! Fetches an outlet's search page and extracts headline text via a
//! CSS selector. Outlets are registered in a static table with a URL
//! template carrying a `{query}` placeholder.

use async_trait::async_trait;
use regex::Regex;
use scraper::{Html, Selector};
use std::sync::LazyLock;
use tracing::debug;

use jicho_core::Document;

use crate::{create_client, DocumentSource, FetchConfig, SourceError};

/// A registered news outlet
#[derive(Debug, Clone)]
pub struct NewsOutlet {
    /// Human-readable name
    pub name: &'static str,
    /// URL template with {query} placeholder
    pub url_template: &'static str,
    /// CSS selector matching headline elements on the results page
    pub headline_selector: &'static str,
    /// Whether this outlet is currently active/reliable
    pub active: bool,
}

impl NewsOutlet {
    /// Build the search URL for a query
    pub fn build_url(&self, query: &str) -> String {
        self.url_template
            .replace("{query}", &urlencoding::encode(query))
    }
}

/// Default outlet registry
pub static NEWS_OUTLETS: &[NewsOutlet] = &[
    NewsOutlet {
        name: "Daily Nation",
        url_template: "https://nation.africa/kenya/search?q={query}",
        headline_selector: "h3.teaser-title, h3 a",
        active: true,
    },
    NewsOutlet {
        name: "The Standard",
        url_template: "https://www.standardmedia.co.ke/search?q={query}",
        headline_selector: "h4.card-title, h2 a",
        active: true,
    },
    NewsOutlet {
        name: "Citizen Digital",
        url_template: "https://www.citizen.digital/search?q={query}",
        headline_selector: "h3.article-title, h2 a",
        active: true,
    },
    NewsOutlet {
        name: "Capital FM",
        url_template: "https://www.capitalfm.co.ke/news/?s={query}",
        headline_selector: "h2.entry-title a",
        active: true,
    },
    NewsOutlet {
        name: "KBC",
        url_template: "https://www.kbc.co.ke/?s={query}",
        headline_selector: "h3.entry-title a",
        active: false,
    },
];

/// Get all active outlets
pub fn active_outlets() -> impl Iterator<Item = &'static NewsOutlet> {
    NEWS_OUTLETS.iter().filter(|o| o.active)
}

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Collapse runs of whitespace in scraped text
fn clean_text(text: &str) -> String {
    WHITESPACE.replace_all(text.trim(), " ").to_string()
}

/// Parse headline documents out of a results page
pub fn parse_headlines(html: &str, outlet: &NewsOutlet) -> Vec<Document> {
    let document = Html::parse_document(html);
    let mut headlines = Vec::new();

    let Ok(selector) = Selector::parse(outlet.headline_selector) else {
        return headlines;
    };

    for element in document.select(&selector) {
        let text = clean_text(&element.text().collect::<String>());
        // Skip nav fragments and empty anchors
        if text.len() < 15 {
            continue;
        }
        headlines.push(Document::new(outlet.name, &text));
    }

    headlines
}

/// One outlet's search page as a document source
pub struct HeadlineSource {
    outlet: &'static NewsOutlet,
    config: FetchConfig,
}

impl HeadlineSource {
    pub fn new(outlet: &'static NewsOutlet, config: FetchConfig) -> Self {
        Self { outlet, config }
    }

    /// Sources for every active outlet in the registry
    pub fn all_active(config: &FetchConfig) -> Vec<Self> {
        active_outlets()
            .map(|outlet| Self::new(outlet, config.clone()))
            .collect()
    }
}

#[async_trait]
impl DocumentSource for HeadlineSource {
    fn name(&self) -> &str {
        self.outlet.name
    }

    async fn fetch(&self, query: &str) -> Result<Vec<Document>, SourceError> {
        let client = create_client(&self.config)?;
        let url = self.outlet.build_url(query);

        debug!("fetching {} with query: {}", self.outlet.name, query);

        let response = client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(SourceError::Status(response.status()));
        }

        let html = response.text().await?;
        Ok(parse_headlines(&html, self.outlet))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url_encodes_query() {
        let outlet = &NEWS_OUTLETS[0];
        let url = outlet.build_url("turkana drought");
        assert!(url.contains("turkana%20drought"));
    }

    #[test]
    fn test_parse_headlines() {
        let outlet = NewsOutlet {
            name: "Test Outlet",
            url_template: "https://example.com/search?q={query}",
            headline_selector: "h2 a",
            active: true,
        };

        let html = r#"
            <html><body>
                <h2><a href="/a">Drought worsens   across northern counties</a></h2>
                <h2><a href="/b">ok</a></h2>
                <h2><a href="/c">Protests erupt over county fund misuse</a></h2>
            </body></html>
        "#;

        let docs = parse_headlines(html, &outlet);
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].content, "Drought worsens across northern counties");
        assert!(docs.iter().all(|d| d.source == "Test Outlet"));
    }

    #[test]
    fn test_active_outlets_skips_inactive() {
        assert!(active_outlets().all(|o| o.active));
    }
}
