use std::fs;
use std::path::{Path, PathBuf};

use asoni_core::{ContentSelector, WeightedSampler};
use asoni_render::{FontSpec, TextRenderer};
use asoni_types::LabelRecord;
use rayon::prelude::*;

use crate::error::DatasetError;
use crate::job::{FontJob, job_seed};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildMode {
    Sequential,
    /// One rayon task per font; `None` lets rayon size the pool
    Parallel { workers: Option<usize> },
}

impl Default for BuildMode {
    fn default() -> Self {
        BuildMode::Parallel { workers: None }
    }
}

pub struct DatasetBuilder<'a, R: TextRenderer + ?Sized> {
    selector: &'a ContentSelector,
    sampler: &'a WeightedSampler,
    renderer: &'a R,
    output_dir: PathBuf,
    samples_per_font: usize,
    mode: BuildMode,
}

impl<'a, R: TextRenderer + ?Sized> DatasetBuilder<'a, R> {
    pub fn new(
        selector: &'a ContentSelector,
        sampler: &'a WeightedSampler,
        renderer: &'a R,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            selector,
            sampler,
            renderer,
            output_dir: output_dir.into(),
            samples_per_font: 100,
            mode: BuildMode::default(),
        }
    }

    pub fn with_samples_per_font(mut self, samples_per_font: usize) -> Self {
        self.samples_per_font = samples_per_font;
        self
    }

    pub fn with_mode(mut self, mode: BuildMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// One job per font, seeded by position
    pub fn jobs(&self, fonts: &[FontSpec], base_seed: u64) -> Vec<FontJob> {
        fonts
            .iter()
            .enumerate()
            .map(|(i, font)| {
                FontJob::new(font.clone(), self.samples_per_font, job_seed(base_seed, i))
            })
            .collect()
    }

    /// Render every job and concatenate their labels in font order
    pub fn build(&self, fonts: &[FontSpec], base_seed: u64) -> Result<Vec<LabelRecord>, DatasetError> {
        fs::create_dir_all(&self.output_dir).map_err(|source| DatasetError::Io {
            path: self.output_dir.display().to_string(),
            source,
        })?;

        let jobs = self.jobs(fonts, base_seed);
        tracing::info!(
            "Generating {} images for each of {} fonts ({:?})...",
            self.samples_per_font,
            jobs.len(),
            self.mode
        );

        let run = |job: &FontJob| {
            job.run(self.selector, self.sampler, self.renderer, &self.output_dir)
        };

        let per_font: Vec<Vec<LabelRecord>> = match self.mode {
            BuildMode::Sequential => jobs.iter().map(run).collect::<Result<_, _>>()?,
            BuildMode::Parallel { workers } => {
                let mut pool = rayon::ThreadPoolBuilder::new();
                if let Some(workers) = workers {
                    pool = pool.num_threads(workers);
                }
                pool.build()?
                    .install(|| jobs.par_iter().map(run).collect::<Result<_, _>>())?
            }
        };

        let records: Vec<LabelRecord> = per_font.into_iter().flatten().collect();
        tracing::info!(
            "Finished! {} images saved to {}",
            records.len(),
            self.output_dir.display()
        );

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use asoni_core::NumberLocale;
    use asoni_render::RenderError;
    use asoni_types::FontCapability;
    use image::{GrayImage, Luma};
    use rand::RngCore;

    const LETTERS: [char; 4] = ['ა', 'ბ', 'გ', 'დ'];

    /// One white pixel per character; refuses labels containing 'დ'
    struct StubRenderer;

    impl TextRenderer for StubRenderer {
        fn render(
            &self,
            _font: &FontSpec,
            text: &str,
            _rng: &mut dyn RngCore,
        ) -> Result<Option<GrayImage>, RenderError> {
            if text.contains('დ') {
                return Ok(None);
            }
            let width = text.chars().count().max(1) as u32;
            Ok(Some(GrayImage::from_pixel(width, 1, Luma([255]))))
        }
    }

    fn fixtures() -> (ContentSelector, WeightedSampler, Vec<FontSpec>) {
        let locale = NumberLocale::new("+995", 500_000_000, 599_999_999);
        let selector = ContentSelector::new(&LETTERS, locale);
        let sampler = WeightedSampler::new(
            vec!["ენა".to_string(), "მე-5".to_string(), "წიგნი".to_string()],
            vec![0.5, 0.2, 0.3],
        )
        .unwrap();
        let fonts = vec![
            FontSpec::new("a.ttf", FontCapability::full()),
            FontSpec::new("b.ttf", FontCapability::digitless()),
            FontSpec::new("c.ttf", FontCapability::full()),
        ];
        (selector, sampler, fonts)
    }

    fn build(mode: BuildMode, seed: u64) -> (tempfile::TempDir, Vec<LabelRecord>) {
        let (selector, sampler, fonts) = fixtures();
        let dir = tempfile::tempdir().unwrap();
        let records = DatasetBuilder::new(&selector, &sampler, &StubRenderer, dir.path())
            .with_samples_per_font(40)
            .with_mode(mode)
            .build(&fonts, seed)
            .unwrap();
        (dir, records)
    }

    #[test]
    fn test_sequential_and_parallel_yield_same_labels() {
        let (_a, mut sequential) = build(BuildMode::Sequential, 7);
        let (_b, mut parallel) = build(BuildMode::Parallel { workers: Some(3) }, 7);

        sequential.sort();
        parallel.sort();
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_every_record_has_an_image() {
        let (dir, records) = build(BuildMode::Sequential, 11);
        assert!(!records.is_empty());
        for record in &records {
            assert!(dir.path().join(&record.file_name).is_file(), "{}", record.file_name);
        }
    }

    #[test]
    fn test_skipped_renders_leave_no_rows() {
        let (_dir, records) = build(BuildMode::Sequential, 3);
        assert!(records.iter().all(|r| !r.text.contains('დ')));
        // 120 requests, some refused by the renderer
        assert!(records.len() < 120);
    }

    #[test]
    fn test_digitless_font_labels() {
        let (_dir, records) = build(BuildMode::Parallel { workers: None }, 5);
        for record in records.iter().filter(|r| r.file_name.starts_with("b_")) {
            assert!(!record.text.chars().any(|c| c.is_numeric()), "{}", record.text);
        }
    }

    #[test]
    fn test_jobs_are_seeded_by_position() {
        let (selector, sampler, fonts) = fixtures();
        let builder = DatasetBuilder::new(&selector, &sampler, &StubRenderer, "unused");
        let jobs = builder.jobs(&fonts, 100);
        assert_eq!(jobs.len(), 3);
        assert_eq!(jobs[0].seed, job_seed(100, 0));
        assert_eq!(jobs[2].seed, job_seed(100, 2));
        assert_eq!(jobs[1].font.stem, "b");
    }
}
