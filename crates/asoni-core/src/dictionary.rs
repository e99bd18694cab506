use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::frequency::FrequencyTable;

const WEIGHT_TOLERANCE: f64 = 1e-9;

/// Open key-value metadata carried with a dictionary snapshot
pub type Metadata = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    pub word: String,
    pub frequency: u64,
    /// `frequency / total_occurrences` of the owning dictionary
    pub weight: f64,
    /// Length in characters
    pub length: usize,
}

impl DictionaryEntry {
    fn new(word: String, frequency: u64) -> Self {
        let length = word.chars().count();
        Self {
            word,
            frequency,
            weight: 0.0,
            length,
        }
    }
}

/// Frequency-weighted word list, ordered from most to least common
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WeightedDictionary {
    #[serde(rename = "words")]
    entries: Vec<DictionaryEntry>,
    total_unique: usize,
    total_occurrences: u64,
    #[serde(default)]
    metadata: Metadata,
}

impl WeightedDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a fresh dictionary from a single table
    pub fn from_table(table: FrequencyTable, metadata: Metadata) -> Self {
        Self::new().merge(table, metadata)
    }

    /// Fold `incoming` counts into this dictionary and recompute totals, weights and order.
    ///
    /// Existing words get their counts summed, new words are appended in the
    /// table's insertion order before the stable frequency sort, so ties keep
    /// that order. Incoming metadata keys overwrite existing ones.
    pub fn merge(self, incoming: FrequencyTable, metadata: Metadata) -> Self {
        let mut entries = self.entries;
        let mut index: HashMap<String, usize> = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (entry.word.clone(), i))
            .collect();

        let mut updated = 0usize;
        let mut added = 0usize;

        for (word, count) in incoming {
            match index.get(&word) {
                Some(&i) => {
                    entries[i].frequency += count;
                    updated += 1;
                }
                None => {
                    index.insert(word.clone(), entries.len());
                    entries.push(DictionaryEntry::new(word, count));
                    added += 1;
                }
            }
        }

        tracing::info!("Updated {} existing words, added {} new words", updated, added);

        let mut merged_metadata = self.metadata;
        for (key, value) in metadata {
            merged_metadata.insert(key, value);
        }

        Self::recompute(entries, merged_metadata)
    }

    fn recompute(mut entries: Vec<DictionaryEntry>, metadata: Metadata) -> Self {
        let total_occurrences: u64 = entries.iter().map(|e| e.frequency).sum();

        for entry in &mut entries {
            entry.weight = if total_occurrences == 0 {
                0.0
            } else {
                entry.frequency as f64 / total_occurrences as f64
            };
        }

        // Vec::sort_by is stable
        entries.sort_by(|a, b| b.frequency.cmp(&a.frequency));

        Self {
            total_unique: entries.len(),
            total_occurrences,
            entries,
            metadata,
        }
    }

    pub fn entries(&self) -> &[DictionaryEntry] {
        &self.entries
    }

    pub fn get(&self, word: &str) -> Option<&DictionaryEntry> {
        self.entries.iter().find(|e| e.word == word)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_unique(&self) -> usize {
        self.total_unique
    }

    pub fn total_occurrences(&self) -> u64 {
        self.total_occurrences
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.word.as_str())
    }

    pub fn weights(&self) -> Vec<f64> {
        self.entries.iter().map(|e| e.weight).collect()
    }

    pub fn weight_sum(&self) -> f64 {
        self.entries.iter().map(|e| e.weight).sum()
    }

    /// Most frequent `n` entries
    pub fn top(&self, n: usize) -> &[DictionaryEntry] {
        &self.entries[..n.min(self.entries.len())]
    }

    /// Least frequent `n` entries, in dictionary order
    pub fn rarest(&self, n: usize) -> &[DictionaryEntry] {
        &self.entries[self.entries.len().saturating_sub(n)..]
    }

    /// Describe the first broken invariant, if any
    pub fn check_invariants(&self) -> Result<(), String> {
        if self.total_unique != self.entries.len() {
            return Err(format!(
                "total_unique is {} but there are {} words",
                self.total_unique,
                self.entries.len()
            ));
        }

        let sum: u64 = self.entries.iter().map(|e| e.frequency).sum();
        if sum != self.total_occurrences {
            return Err(format!(
                "total_occurrences is {} but frequencies sum to {}",
                self.total_occurrences, sum
            ));
        }

        let mut seen = std::collections::HashSet::with_capacity(self.entries.len());
        for entry in &self.entries {
            if !seen.insert(entry.word.as_str()) {
                return Err(format!("duplicate word '{}'", entry.word));
            }
            if entry.frequency == 0 {
                return Err(format!("word '{}' has zero frequency", entry.word));
            }
            if entry.length != entry.word.chars().count() {
                return Err(format!(
                    "word '{}' has length {} but {} characters",
                    entry.word,
                    entry.length,
                    entry.word.chars().count()
                ));
            }

            let expected = entry.frequency as f64 / self.total_occurrences as f64;
            if (entry.weight - expected).abs() > WEIGHT_TOLERANCE {
                return Err(format!(
                    "word '{}' has weight {} but frequency {}/{} gives {}",
                    entry.word, entry.weight, entry.frequency, self.total_occurrences, expected
                ));
            }
        }

        Ok(())
    }
}
