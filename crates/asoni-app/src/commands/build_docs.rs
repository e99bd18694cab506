use anyhow::Result;
use asoni_config::Config;
use asoni_core::{ExtractorProfile, Metadata, Script};
use asoni_sources::{DocumentCollector, TextSource};
use serde_json::json;
use tokio_util::sync::CancellationToken;

use super::{count_words, load_dictionary, log_entries, store};
use crate::cli::BuildDocsArgs;

pub async fn run(
    args: BuildDocsArgs,
    config: &Config,
    script: &dyn Script,
    cancel: &CancellationToken,
) -> Result<()> {
    let docs_dir = args.docs_dir.unwrap_or_else(|| config.dictionary.docs_dir.clone());
    let min_frequency = args
        .min_frequency
        .unwrap_or(config.dictionary.docs_min_frequency);

    // Fail before the slow extraction if there is nothing to merge into
    let existing = load_dictionary(config)?;
    tracing::info!("Existing dictionary: {} words", existing.total_unique());

    let texts = DocumentCollector::new(&docs_dir).collect(cancel).await;
    if texts.is_empty() {
        tracing::warn!("No text extracted from {}; dictionary left unchanged", docs_dir.display());
        return Ok(());
    }

    let table = count_words(script, ExtractorProfile::Document, &texts, min_frequency);

    let mut metadata = Metadata::new();
    metadata.insert("documents_processed".to_string(), json!(true));
    metadata.insert("total_sources".to_string(), json!("Wikipedia + Documents"));

    let dictionary = existing.merge(table, metadata);
    store(config).save(&dictionary)?;

    tracing::info!("Total unique words: {}", dictionary.total_unique());
    tracing::info!("Total occurrences: {}", dictionary.total_occurrences());
    log_entries("Top 30 most common words", dictionary.top(30));
    log_entries("Rarest 20 words", dictionary.rarest(20));

    Ok(())
}
