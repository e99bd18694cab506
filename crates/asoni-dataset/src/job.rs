use std::path::Path;

use asoni_core::{ContentSelector, WeightedSampler};
use asoni_render::{FontSpec, TextRenderer};
use asoni_types::LabelRecord;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::error::DatasetError;

/// Spreads per-font seeds apart so neighbouring fonts do not share streams
const SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// Seed of the `index`-th font job under `base`
pub fn job_seed(base: u64, index: usize) -> u64 {
    base.wrapping_add((index as u64).wrapping_mul(SEED_STRIDE))
}

/// All samples for one font. Owns its RNG seed and touches nothing shared
/// except read-only references, so jobs can run on any thread in any order.
#[derive(Debug, Clone)]
pub struct FontJob {
    pub font: FontSpec,
    pub count: usize,
    pub seed: u64,
}

impl FontJob {
    pub fn new(font: FontSpec, count: usize, seed: u64) -> Self {
        Self { font, count, seed }
    }

    pub fn file_name(&self, index: usize) -> String {
        format!("{}_{}.png", self.font.stem, index)
    }

    pub fn run<R>(
        &self,
        selector: &ContentSelector,
        sampler: &WeightedSampler,
        renderer: &R,
        output_dir: &Path,
    ) -> Result<Vec<LabelRecord>, DatasetError>
    where
        R: TextRenderer + ?Sized,
    {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let mut records = Vec::with_capacity(self.count);

        for i in 0..self.count {
            let sample = selector.generate(sampler, self.font.capability, &mut rng);
            tracing::trace!(font = %self.font.stem, kind = sample.kind.as_str(), "{}", sample.text);

            let image = match renderer.render(&self.font, &sample.text, &mut rng) {
                Ok(Some(image)) => image,
                Ok(None) => {
                    tracing::warn!(
                        "Renderer returned nothing for font {} and text '{}'. Skipping...",
                        self.font.stem,
                        sample.text
                    );
                    continue;
                }
                Err(e) => {
                    tracing::warn!(
                        "Failed to render '{}' with {}: {}. Skipping...",
                        sample.text,
                        self.font.stem,
                        e
                    );
                    continue;
                }
            };

            let file_name = self.file_name(i);
            let path = output_dir.join(&file_name);
            image.save(&path).map_err(|source| DatasetError::Image {
                path: path.display().to_string(),
                source,
            })?;

            records.push(LabelRecord {
                file_name,
                text: sample.text,
            });
        }

        tracing::debug!(
            "Font {} produced {}/{} samples",
            self.font.stem,
            records.len(),
            self.count
        );

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_seeds_differ_per_index() {
        let seeds: Vec<u64> = (0..4).map(|i| job_seed(42, i)).collect();
        assert_eq!(seeds[0], 42);
        for pair in seeds.windows(2) {
            assert_ne!(pair[0], pair[1]);
        }
        assert_eq!(job_seed(u64::MAX, 1), u64::MAX.wrapping_add(SEED_STRIDE));
    }

    #[test]
    fn test_file_names() {
        let job = FontJob::new(
            FontSpec::new("fonts/ka/sylfaen.ttf", Default::default()),
            3,
            0,
        );
        assert_eq!(job.file_name(2), "sylfaen_2.png");
    }
}
