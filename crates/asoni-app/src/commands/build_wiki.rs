use anyhow::{Context, Result, bail};
use asoni_config::Config;
use asoni_core::{ExtractorProfile, Metadata, Script, WeightedDictionary};
use asoni_sources::{TextSource, WikipediaClient};
use serde_json::json;
use tokio_util::sync::CancellationToken;

use super::{count_words, log_entries, store};
use crate::cli::BuildWikiArgs;

pub async fn run(
    args: BuildWikiArgs,
    config: &Config,
    script: &dyn Script,
    cancel: &CancellationToken,
) -> Result<()> {
    let mut wikipedia = config.wikipedia.clone();
    if let Some(pages) = args.pages {
        wikipedia.num_pages = pages;
    }
    let min_frequency = args
        .min_frequency
        .unwrap_or(config.dictionary.web_min_frequency);

    let seeds = wikipedia.seed_titles.clone().unwrap_or_else(|| {
        script
            .wikipedia_seed_titles()
            .iter()
            .map(|title| title.to_string())
            .collect()
    });

    tracing::info!("Starting dictionary build...");
    let client = WikipediaClient::new(&wikipedia, seeds).context("Failed to set up Wikipedia client")?;
    let texts = client.collect(cancel).await;
    tracing::info!("Fetched {} pages successfully", texts.len());

    if texts.is_empty() {
        bail!("No pages fetched from {}", wikipedia.api_url);
    }

    let profile = ExtractorProfile::Web;
    let bounds = profile.length_bounds();
    let table = count_words(script, profile, &texts, min_frequency);

    let mut metadata = Metadata::new();
    metadata.insert("pages_scraped".to_string(), json!(texts.len()));
    metadata.insert("min_frequency".to_string(), json!(min_frequency));
    metadata.insert("min_length".to_string(), json!(bounds.min));
    metadata.insert("max_length".to_string(), json!(bounds.max));

    let store = store(config);
    let existing = if args.merge {
        store.load_or_default()?
    } else {
        WeightedDictionary::new()
    };

    let dictionary = existing.merge(table, metadata);
    store.save(&dictionary)?;

    tracing::info!("Total unique words: {}", dictionary.total_unique());
    tracing::info!("Total occurrences: {}", dictionary.total_occurrences());
    log_entries("Top 20 most common words", dictionary.top(20));

    Ok(())
}
