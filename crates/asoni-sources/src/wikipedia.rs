use std::time::Duration;

use asoni_config::wikipedia::WikipediaConfig;
use asoni_types::{SourceKind, SourceText};
use async_trait::async_trait;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::error::SourceFetchError;
use crate::source::TextSource;

const RANDOM_ID: &str = "<random>";

/// MediaWiki client pulling plain-text page extracts
#[derive(Clone)]
pub struct WikipediaClient {
    client: reqwest::Client,
    api_url: String,
    seed_titles: Vec<String>,
    num_pages: usize,
}

impl WikipediaClient {
    pub fn new(config: &WikipediaConfig, seed_titles: Vec<String>) -> Result<Self, SourceFetchError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|source| SourceFetchError::Http {
                id: config.api_url.clone(),
                source,
            })?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            seed_titles,
            num_pages: config.num_pages,
        })
    }

    pub fn seed_titles(&self) -> &[String] {
        &self.seed_titles
    }

    /// Random pages fetched after the seeds
    pub fn random_page_count(&self) -> usize {
        self.num_pages.saturating_sub(self.seed_titles.len())
    }

    /// Plain-text extract of `title`; `None` when the page has none
    pub async fn fetch_page(&self, title: &str) -> Result<Option<String>, SourceFetchError> {
        let params = [
            ("action", "query"),
            ("format", "json"),
            ("titles", title),
            ("prop", "extracts"),
            ("explaintext", "1"),
            ("exlimit", "1"),
        ];
        let json = self.query(title, &params).await?;
        Ok(parse_extract(&json))
    }

    /// Title of one random main-namespace page
    pub async fn random_title(&self) -> Result<Option<String>, SourceFetchError> {
        let params = [
            ("action", "query"),
            ("format", "json"),
            ("list", "random"),
            ("rnnamespace", "0"),
            ("rnlimit", "1"),
        ];
        let json = self.query(RANDOM_ID, &params).await?;
        Ok(parse_random_title(&json))
    }

    async fn random_page(&self) -> Result<Option<(String, String)>, SourceFetchError> {
        let Some(title) = self.random_title().await? else {
            return Ok(None);
        };
        Ok(self.fetch_page(&title).await?.map(|text| (title, text)))
    }

    async fn query(&self, id: &str, params: &[(&str, &str)]) -> Result<Value, SourceFetchError> {
        let response = self
            .client
            .get(&self.api_url)
            .query(params)
            .send()
            .await
            .map_err(|source| SourceFetchError::Http {
                id: id.to_string(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(SourceFetchError::Api {
                id: id.to_string(),
                reason: format!("HTTP {}", response.status()),
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|source| SourceFetchError::Http {
                id: id.to_string(),
                source,
            })
    }
}

#[async_trait]
impl TextSource for WikipediaClient {
    fn name(&self) -> &str {
        "wikipedia"
    }

    async fn collect(&self, cancel: &CancellationToken) -> Vec<SourceText> {
        let mut texts = Vec::new();

        tracing::info!("Fetching {} seed pages...", self.seed_titles.len());
        for title in &self.seed_titles {
            let result = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    tracing::warn!("Crawl cancelled after {} pages", texts.len());
                    return texts;
                }
                result = self.fetch_page(title) => result,
            };

            match result {
                Ok(Some(text)) => {
                    texts.push(SourceText::new(title.clone(), SourceKind::Wikipedia, text))
                }
                Ok(None) => tracing::debug!("No extract for '{}'", title),
                Err(e) => tracing::warn!("Error fetching page '{}': {}", title, e),
            }
        }

        let remaining = self.random_page_count();
        if remaining > 0 {
            tracing::info!("Fetching {} random pages...", remaining);
        }

        for i in 0..remaining {
            let result = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    tracing::warn!("Crawl cancelled after {} pages", texts.len());
                    return texts;
                }
                result = self.random_page() => result,
            };

            match result {
                Ok(Some((title, text))) => {
                    texts.push(SourceText::new(title, SourceKind::Wikipedia, text))
                }
                Ok(None) => tracing::debug!("Random page had no extract"),
                Err(e) => tracing::warn!("Error fetching random page: {}", e),
            }

            if (i + 1) % 10 == 0 {
                tracing::info!("Fetched {}/{} random pages...", i + 1, remaining);
            }
        }

        texts
    }
}

/// First non-empty `extract` under `query.pages`
pub fn parse_extract(json: &Value) -> Option<String> {
    json.get("query")?
        .get("pages")?
        .as_object()?
        .values()
        .filter_map(|page| page.get("extract").and_then(Value::as_str))
        .find(|text| !text.trim().is_empty())
        .map(str::to_string)
}

pub fn parse_random_title(json: &Value) -> Option<String> {
    json.get("query")?
        .get("random")?
        .get(0)?
        .get("title")?
        .as_str()
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client(num_pages: usize, seeds: &[&str]) -> WikipediaClient {
        let config = WikipediaConfig {
            // Nothing listens here; tests must not reach the network
            api_url: "http://127.0.0.1:9/w/api.php".to_string(),
            num_pages,
            ..WikipediaConfig::default()
        };
        WikipediaClient::new(&config, seeds.iter().map(|s| s.to_string()).collect()).unwrap()
    }

    #[test]
    fn test_parse_extract() {
        let json = json!({
            "batchcomplete": "",
            "query": {
                "pages": {
                    "1234": {
                        "pageid": 1234,
                        "ns": 0,
                        "title": "თბილისი",
                        "extract": "თბილისი — საქართველოს დედაქალაქი."
                    }
                }
            }
        });
        assert_eq!(
            parse_extract(&json).as_deref(),
            Some("თბილისი — საქართველოს დედაქალაქი.")
        );
    }

    #[test]
    fn test_parse_extract_missing_page() {
        let json = json!({
            "query": { "pages": { "-1": { "ns": 0, "title": "არარსებული", "missing": "" } } }
        });
        assert_eq!(parse_extract(&json), None);

        let empty = json!({ "query": { "pages": { "5": { "extract": "  " } } } });
        assert_eq!(parse_extract(&empty), None);
        assert_eq!(parse_extract(&json!({})), None);
    }

    #[test]
    fn test_parse_random_title() {
        let json = json!({
            "query": { "random": [ { "id": 42, "ns": 0, "title": "ქუთაისი" } ] }
        });
        assert_eq!(parse_random_title(&json).as_deref(), Some("ქუთაისი"));
        assert_eq!(parse_random_title(&json!({ "query": { "random": [] } })), None);
    }

    #[test]
    fn test_random_page_count() {
        assert_eq!(client(100, &["ა", "ბ"]).random_page_count(), 98);
        assert_eq!(client(1, &["ა", "ბ"]).random_page_count(), 0);
    }

    #[tokio::test]
    async fn test_cancelled_crawl_returns_immediately() {
        let cancel = CancellationToken::new();
        cancel.cancel();

        let texts = client(20, &["საქართველო"]).collect(&cancel).await;
        assert!(texts.is_empty());
    }
}
