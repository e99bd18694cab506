use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use self::dictionary::DictionaryConfig;
use self::generator::GeneratorConfig;
use self::wikipedia::WikipediaConfig;

pub mod dictionary;
pub mod generator;
pub mod wikipedia;

pub use generator::BandsConfig;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub wikipedia: WikipediaConfig,
    pub dictionary: DictionaryConfig,
    pub generator: GeneratorConfig,

    pub log_format: LogFormat,
}

impl Config {
    /// Defaults with environment overrides
    pub fn new() -> Self {
        let mut config = Config::default();
        config.apply_env();
        config
    }

    /// Read a JSON config file; missing fields fall back to defaults, env still wins
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let file = File::open(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let mut config: Config =
            serde_json::from_reader(BufReader::new(file)).map_err(|source| ConfigError::Parse {
                path: path.display().to_string(),
                source,
            })?;
        config.apply_env();
        Ok(config)
    }

    fn apply_env(&mut self) {
        self.wikipedia.apply_env();
        self.dictionary.apply_env();
        self.generator.apply_env();

        if let Ok(format) = env::var("ASONI_LOG_FORMAT") {
            self.log_format = match format.to_lowercase().as_str() {
                "json" => LogFormat::Json,
                _ => LogFormat::Pretty,
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_original_pipeline() {
        let config = Config::default();
        assert_eq!(config.wikipedia.timeout_seconds, 10);
        assert_eq!(config.dictionary.web_min_frequency, 2);
        assert_eq!(config.dictionary.docs_min_frequency, 1);
        assert_eq!(config.generator.image_height, 64);
        assert_eq!(config.generator.bands, BandsConfig::default());
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let mut file = File::create(&path).unwrap();
        write!(
            file,
            r#"{{ "generator": {{ "samples_per_font": 7, "digitless_fonts": ["bpg_glaho"] }}, "log_format": "json" }}"#
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.generator.samples_per_font, 7);
        assert_eq!(config.generator.digitless_fonts, vec!["bpg_glaho".to_string()]);
        assert_eq!(config.generator.sequence_min_len, 5);
        assert_eq!(config.wikipedia.num_pages, 100);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = Config::load(Path::new("/definitely/not/here.json"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_garbage_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(Config::load(&path), Err(ConfigError::Parse { .. })));
    }
}
