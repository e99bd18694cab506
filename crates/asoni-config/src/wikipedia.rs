use std::env;

use serde::{Deserialize, Serialize};

fn default_api_url() -> String {
    "https://ka.wikipedia.org/w/api.php".to_string()
}

fn default_user_agent() -> String {
    "GeorgianDictionaryBot/1.0 (Educational project; contact@example.com)".to_string()
}

fn default_num_pages() -> usize {
    100
}

fn default_timeout_seconds() -> u64 {
    10
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct WikipediaConfig {
    /// MediaWiki API endpoint
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Total pages per crawl, seed titles included
    #[serde(default = "default_num_pages")]
    pub num_pages: usize,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    /// Replaces the language's built-in seed titles when set
    pub seed_titles: Option<Vec<String>>,
}

impl Default for WikipediaConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            user_agent: default_user_agent(),
            num_pages: default_num_pages(),
            timeout_seconds: default_timeout_seconds(),
            seed_titles: None,
        }
    }
}

impl WikipediaConfig {
    pub fn apply_env(&mut self) {
        if let Ok(url) = env::var("WIKI_API_URL") {
            self.api_url = url;
        }

        if let Some(pages) = env::var("WIKI_PAGES").ok().and_then(|v| v.parse().ok()) {
            self.num_pages = pages;
        }
    }
}
