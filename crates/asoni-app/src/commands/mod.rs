use anyhow::{Context, Result};
use asoni_config::Config;
use asoni_core::{
    DictionaryEntry, DictionaryStore, ExtractorProfile, FrequencyTable, Script, WeightedDictionary,
};
use asoni_lang_georgian::GeorgianScript;
use asoni_types::SourceText;
use tokio_util::sync::CancellationToken;

use crate::cli::{Cli, Command};

mod build_docs;
mod build_wiki;
mod generate;
mod sample;
mod stats;

pub async fn run(cli: Cli, mut config: Config, cancel: CancellationToken) -> Result<()> {
    if let Some(dir) = cli.dict_dir {
        config.dictionary.dir = dir;
    }

    let script = GeorgianScript::new();

    match cli.command {
        Command::BuildWiki(args) => build_wiki::run(args, &config, &script, &cancel).await,
        Command::BuildDocs(args) => build_docs::run(args, &config, &script, &cancel).await,
        Command::Generate(args) => generate::run(args, &config, &script).await,
        Command::Sample(args) => sample::run(args, &config, &script),
        Command::Stats(args) => stats::run(args, &config),
    }
}

pub(crate) fn store(config: &Config) -> DictionaryStore {
    DictionaryStore::new(&config.dictionary.dir)
}

/// Load the dictionary a command cannot work without
pub(crate) fn load_dictionary(config: &Config) -> Result<WeightedDictionary> {
    let store = store(config);
    store.load().with_context(|| {
        format!(
            "No usable dictionary in {}; run `asoni build-wiki` first",
            store.dir().display()
        )
    })
}

/// Normalize, extract and count every text, then apply the frequency cutoff
pub(crate) fn count_words(
    script: &dyn Script,
    profile: ExtractorProfile,
    texts: &[SourceText],
    min_frequency: u64,
) -> FrequencyTable {
    tracing::info!(
        "Extracting '{}' words from {} texts ({:?} profile)",
        script.language_code(),
        texts.len(),
        profile
    );
    let extractor = script.extractor(profile);
    let table = FrequencyTable::aggregate(texts.iter().map(|source| {
        let table = extractor.extract(&script.normalize(&source.text));
        tracing::debug!(
            "{} '{}': {} unique words",
            source.kind.as_str(),
            source.id,
            table.len()
        );
        table
    }));
    tracing::info!("Found {} unique words", table.len());

    let filtered = table.retain_min(min_frequency);
    tracing::info!(
        "After frequency filter (>={}): {} words",
        min_frequency,
        filtered.len()
    );
    filtered
}

pub(crate) fn log_entries(title: &str, entries: &[DictionaryEntry]) {
    tracing::info!("{}:", title);
    for (i, entry) in entries.iter().enumerate() {
        tracing::info!("  {}. {} (frequency: {})", i + 1, entry.word, entry.frequency);
    }
}
