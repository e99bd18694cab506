use anyhow::{Context, Result, bail};
use asoni_config::{BandsConfig, Config};
use asoni_core::{Bands, Script, WeightedSampler};
use asoni_dataset::{BuildMode, DatasetBuilder, package_dataset, write_manifest};
use asoni_render::{GlyphRenderer, RenderOptions, load_fonts};

use super::load_dictionary;
use crate::cli::GenerateArgs;

fn bands(config: &BandsConfig) -> Bands {
    Bands::new(config.word, config.sequence, config.mixed, config.number)
}

pub async fn run(args: GenerateArgs, config: &Config, script: &dyn Script) -> Result<()> {
    let generator = &config.generator;
    let fonts_dir = args.fonts_dir.unwrap_or_else(|| generator.fonts_dir.clone());
    let output_dir = args.output_dir.unwrap_or_else(|| generator.output_dir.clone());
    let labels_path = args.labels.unwrap_or_else(|| generator.labels_path.clone());
    let samples = args.samples.unwrap_or(generator.samples_per_font);
    let mode = if args.sequential {
        BuildMode::Sequential
    } else {
        BuildMode::Parallel {
            workers: args.workers.or(generator.workers),
        }
    };

    let seed = match args.seed.or(generator.seed) {
        Some(seed) => seed,
        None => {
            let seed = rand::random();
            tracing::info!("No seed given, using {}", seed);
            seed
        }
    };

    let dictionary = load_dictionary(config)?;
    let sampler = WeightedSampler::from_dictionary(&dictionary)
        .context("Dictionary weights cannot be sampled")?;
    if sampler.is_empty() {
        tracing::warn!("Dictionary is empty; every label will be synthetic");
    } else {
        tracing::info!(
            "Sampling from {} words; {} are withheld from fonts without digits",
            sampler.len(),
            sampler.excluded()
        );
    }

    let fonts = load_fonts(&fonts_dir, &generator.digitless_fonts)
        .with_context(|| format!("Failed to read fonts from {}", fonts_dir.display()))?;
    if fonts.is_empty() {
        bail!("No .ttf fonts found in {}", fonts_dir.display());
    }

    let options = RenderOptions {
        height: generator.image_height,
        blur: generator.blur,
        random_blur: generator.random_blur,
        distortion: generator.distortion,
    };
    let (renderer, specs) = GlyphRenderer::new(fonts, options);

    let selector = script
        .content_selector()
        .with_bands(bands(&generator.bands))
        .with_sequence_len(generator.sequence_min_len, generator.sequence_max_len);

    let build_dir = output_dir.clone();
    let records = tokio::task::spawn_blocking(move || {
        DatasetBuilder::new(&selector, &sampler, &renderer, build_dir)
            .with_samples_per_font(samples)
            .with_mode(mode)
            .build(&specs, seed)
    })
    .await
    .context("Dataset generation task failed")??;

    write_manifest(&labels_path, &records)?;

    if args.package {
        package_dataset(&output_dir, &labels_path, &records, &generator.package_path)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use asoni_core::ContentKind;

    #[test]
    fn test_bands_follow_config() {
        let bands = bands(&BandsConfig::default());
        assert_eq!(bands.pick(0.5), ContentKind::DictionaryWord);
        assert_eq!(bands.pick(0.8), ContentKind::RandomSequence);
        assert_eq!(bands.pick(0.97), ContentKind::Number);
    }
}
