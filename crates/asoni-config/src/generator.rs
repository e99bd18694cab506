use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_fonts_dir() -> PathBuf {
    PathBuf::from("fonts/ka")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("data/raw")
}

fn default_labels_path() -> PathBuf {
    PathBuf::from("data/labels.csv")
}

fn default_package_path() -> PathBuf {
    PathBuf::from("data/dataset.zip")
}

fn default_samples_per_font() -> usize {
    100
}

fn default_image_height() -> u32 {
    64
}

fn default_blur() -> f32 {
    1.0
}

fn default_true() -> bool {
    true
}

fn default_sequence_min_len() -> usize {
    5
}

fn default_sequence_max_len() -> usize {
    10
}

/// Probability mass of each label source, in draw order
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct BandsConfig {
    pub word: f64,
    pub sequence: f64,
    pub mixed: f64,
    pub number: f64,
}

impl Default for BandsConfig {
    fn default() -> Self {
        Self {
            word: 0.75,
            sequence: 0.20,
            mixed: 0.0,
            number: 0.05,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Directory scanned for *.ttf fonts
    #[serde(default = "default_fonts_dir")]
    pub fonts_dir: PathBuf,
    /// Rendered images land here
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default = "default_labels_path")]
    pub labels_path: PathBuf,
    #[serde(default = "default_package_path")]
    pub package_path: PathBuf,
    #[serde(default = "default_samples_per_font")]
    pub samples_per_font: usize,
    /// Target image height in pixels
    #[serde(default = "default_image_height")]
    pub image_height: u32,
    /// Maximum blur sigma
    #[serde(default = "default_blur")]
    pub blur: f32,
    #[serde(default = "default_true")]
    pub random_blur: bool,
    /// Sine-wave baseline distortion
    #[serde(default = "default_true")]
    pub distortion: bool,
    pub seed: Option<u64>,
    /// Rayon worker count; `None` lets rayon decide
    pub workers: Option<usize>,
    /// Font file stems known to lack digit glyphs
    #[serde(default)]
    pub digitless_fonts: Vec<String>,
    #[serde(default)]
    pub bands: BandsConfig,
    #[serde(default = "default_sequence_min_len")]
    pub sequence_min_len: usize,
    #[serde(default = "default_sequence_max_len")]
    pub sequence_max_len: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            fonts_dir: default_fonts_dir(),
            output_dir: default_output_dir(),
            labels_path: default_labels_path(),
            package_path: default_package_path(),
            samples_per_font: default_samples_per_font(),
            image_height: default_image_height(),
            blur: default_blur(),
            random_blur: true,
            distortion: true,
            seed: None,
            workers: None,
            digitless_fonts: vec![],
            bands: BandsConfig::default(),
            sequence_min_len: default_sequence_min_len(),
            sequence_max_len: default_sequence_max_len(),
        }
    }
}

impl GeneratorConfig {
    pub fn apply_env(&mut self) {
        if let Ok(dir) = env::var("ASONI_FONTS_DIR") {
            self.fonts_dir = PathBuf::from(dir);
        }

        if let Ok(dir) = env::var("ASONI_OUTPUT_DIR") {
            self.output_dir = PathBuf::from(dir);
        }

        if let Some(seed) = env::var("ASONI_SEED").ok().and_then(|v| v.parse().ok()) {
            self.seed = Some(seed);
        }

        if let Some(workers) = env::var("ASONI_WORKERS").ok().and_then(|v| v.parse().ok()) {
            self.workers = Some(workers);
        }
    }
}
