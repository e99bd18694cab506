use anyhow::{Context, Result};
use asoni_config::Config;
use asoni_core::content::{random_mixed, random_number, random_sequence};
use asoni_core::{Script, WeightedSampler};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::load_dictionary;
use crate::cli::SampleArgs;

pub fn run(args: SampleArgs, config: &Config, script: &dyn Script) -> Result<()> {
    let dictionary = load_dictionary(config)?;
    let sampler = WeightedSampler::from_dictionary(&dictionary)
        .context("Dictionary weights cannot be sampled")?;

    let mut rng = match args.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    println!("Frequency-weighted words:");
    match sampler.sample_k(args.words, false, &mut rng) {
        Ok(words) => words.iter().for_each(|word| println!("  {}", word)),
        Err(e) => println!("  ({})", e),
    }

    println!("Random sequences:");
    for _ in 0..args.sequences {
        println!("  {}", random_sequence(script.alphabet(), None, &mut rng));
    }

    println!("Random numbers:");
    let locale = script.number_locale();
    for _ in 0..args.numbers {
        println!("  {}", random_number(&locale, &mut rng));
    }

    println!("Mixed text:");
    for _ in 0..args.mixed {
        println!("  {}", random_mixed(script.alphabet(), &mut rng));
    }

    Ok(())
}
