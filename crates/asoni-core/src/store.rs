use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tempfile::NamedTempFile;

use crate::dictionary::WeightedDictionary;
use crate::error::PersistenceError;

const DEFAULT_STEM: &str = "ka_dictionary";

/// On-disk home of one weighted dictionary and its derived word lists
#[derive(Debug, Clone)]
pub struct DictionaryStore {
    dir: PathBuf,
    stem: String,
}

impl DictionaryStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            stem: DEFAULT_STEM.to_string(),
        }
    }

    pub fn with_stem(mut self, stem: impl Into<String>) -> Self {
        self.stem = stem.into();
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn json_path(&self) -> PathBuf {
        self.dir.join(format!("{}.json", self.stem))
    }

    pub fn words_path(&self) -> PathBuf {
        self.dir.join(format!("{}.txt", self.stem))
    }

    pub fn weighted_path(&self) -> PathBuf {
        self.dir.join(format!("{}_weighted.txt", self.stem))
    }

    pub fn load(&self) -> Result<WeightedDictionary, PersistenceError> {
        let path = self.json_path();
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(PersistenceError::NotFound(path.display().to_string()));
            }
            Err(source) => return Err(io_error(&path, source)),
        };

        let dictionary: WeightedDictionary = serde_json::from_reader(BufReader::new(file))
            .map_err(|source| PersistenceError::Corrupt {
                path: path.display().to_string(),
                source,
            })?;

        dictionary
            .check_invariants()
            .map_err(|reason| PersistenceError::Inconsistent {
                path: path.display().to_string(),
                reason,
            })?;

        tracing::info!(
            "Loaded dictionary from {} ({} words)",
            path.display(),
            dictionary.len()
        );

        Ok(dictionary)
    }

    /// Load if present, start empty otherwise
    pub fn load_or_default(&self) -> Result<WeightedDictionary, PersistenceError> {
        match self.load() {
            Err(PersistenceError::NotFound(path)) => {
                tracing::info!("No dictionary at {}, starting empty", path);
                Ok(WeightedDictionary::new())
            }
            other => other,
        }
    }

    /// Write the JSON snapshot and both word lists.
    ///
    /// All three files are staged before any is replaced; the JSON snapshot
    /// is renamed last.
    pub fn save(&self, dictionary: &WeightedDictionary) -> Result<(), PersistenceError> {
        fs::create_dir_all(&self.dir).map_err(|source| io_error(&self.dir, source))?;

        let json_path = self.json_path();
        let json = stage(&json_path, |writer| {
            let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
            let mut serializer = serde_json::Serializer::with_formatter(&mut *writer, formatter);
            dictionary.serialize(&mut serializer).map_err(io::Error::other)
        })?;

        let words_path = self.words_path();
        let words = stage(&words_path, |writer| {
            for word in dictionary.words() {
                writeln!(writer, "{}", word)?;
            }
            Ok(())
        })?;

        let weighted_path = self.weighted_path();
        let weighted = stage(&weighted_path, |writer| {
            for entry in dictionary.entries() {
                writeln!(writer, "{}\t{}", entry.word, entry.frequency)?;
            }
            Ok(())
        })?;

        persist(words, &words_path)?;
        persist(weighted, &weighted_path)?;
        persist(json, &json_path)?;

        tracing::info!(
            "Saved dictionary to {} ({} words, {} occurrences)",
            json_path.display(),
            dictionary.total_unique(),
            dictionary.total_occurrences()
        );

        Ok(())
    }
}

fn io_error(path: &Path, source: io::Error) -> PersistenceError {
    PersistenceError::Io {
        path: path.display().to_string(),
        source,
    }
}

/// Write `path`'s future contents into a sibling temp file.
///
/// The temp file is removed on drop unless it is persisted.
fn stage<F>(path: &Path, write: F) -> Result<NamedTempFile, PersistenceError>
where
    F: FnOnce(&mut BufWriter<&NamedTempFile>) -> io::Result<()>,
{
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    let temp_file = NamedTempFile::new_in(parent).map_err(|source| io_error(path, source))?;

    {
        let mut writer = BufWriter::new(&temp_file);
        write(&mut writer).map_err(|source| io_error(path, source))?;
        writer.flush().map_err(|source| io_error(path, source))?;
    }

    Ok(temp_file)
}

fn persist(temp_file: NamedTempFile, path: &Path) -> Result<(), PersistenceError> {
    temp_file
        .persist(path)
        .map_err(|e| io_error(path, e.error))?;
    Ok(())
}
