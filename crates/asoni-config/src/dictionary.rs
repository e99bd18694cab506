use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_dir() -> PathBuf {
    PathBuf::from("dictionaries")
}

fn default_docs_dir() -> PathBuf {
    PathBuf::from("data/docs")
}

fn default_web_min_frequency() -> u64 {
    2
}

fn default_docs_min_frequency() -> u64 {
    1
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct DictionaryConfig {
    /// Directory holding ka_dictionary.json and its text exports
    #[serde(default = "default_dir")]
    pub dir: PathBuf,
    /// Source documents (PDF / DOCX) merged by `build-docs`
    #[serde(default = "default_docs_dir")]
    pub docs_dir: PathBuf,
    #[serde(default = "default_web_min_frequency")]
    pub web_min_frequency: u64,
    #[serde(default = "default_docs_min_frequency")]
    pub docs_min_frequency: u64,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            docs_dir: default_docs_dir(),
            web_min_frequency: default_web_min_frequency(),
            docs_min_frequency: default_docs_min_frequency(),
        }
    }
}

impl DictionaryConfig {
    pub fn apply_env(&mut self) {
        if let Ok(dir) = env::var("ASONI_DICT_DIR") {
            self.dir = PathBuf::from(dir);
        }

        if let Ok(dir) = env::var("ASONI_DOCS_DIR") {
            self.docs_dir = PathBuf::from(dir);
        }
    }
}
