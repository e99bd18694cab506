use anyhow::Result;
use asoni_config::Config;

use super::load_dictionary;
use crate::cli::StatsArgs;

pub fn run(args: StatsArgs, config: &Config) -> Result<()> {
    let dictionary = load_dictionary(config)?;

    println!("=== Dictionary Statistics ===");
    println!("Total unique words: {}", dictionary.total_unique());
    println!("Total occurrences: {}", dictionary.total_occurrences());

    for (key, value) in dictionary.metadata() {
        println!("{}: {}", key, value);
    }

    println!("\nTop {} most common words:", args.top);
    for (i, entry) in dictionary.top(args.top).iter().enumerate() {
        println!("  {}. {} (frequency: {})", i + 1, entry.word, entry.frequency);
    }

    println!("\nRarest {} words:", args.rarest);
    for entry in dictionary.rarest(args.rarest) {
        println!("  {} (frequency: {})", entry.word, entry.frequency);
    }

    Ok(())
}
