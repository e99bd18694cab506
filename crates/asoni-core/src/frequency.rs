use indexmap::IndexMap;

/// Word occurrence counts from one extraction pass, in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: IndexMap<String, u64>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self {
            counts: IndexMap::new(),
        }
    }

    /// Add `count` occurrences of `word`; zero counts are ignored
    pub fn add(&mut self, word: &str, count: u64) {
        if count == 0 {
            return;
        }

        match self.counts.get_mut(word) {
            Some(existing) => *existing += count,
            None => {
                self.counts.insert(word.to_string(), count);
            }
        }
    }

    pub fn get(&self, word: &str) -> Option<u64> {
        self.counts.get(word).copied()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(word, count)| (word.as_str(), *count))
    }

    /// Fold another table into this one
    pub fn absorb(&mut self, other: FrequencyTable) {
        for (word, count) in other.counts {
            *self.counts.entry(word).or_insert(0) += count;
        }
    }

    /// Keep only words seen at least `min_frequency` times
    pub fn retain_min(mut self, min_frequency: u64) -> Self {
        self.counts.retain(|_, count| *count >= min_frequency);
        self
    }

    /// Sum many tables into one
    pub fn aggregate<I>(tables: I) -> Self
    where
        I: IntoIterator<Item = FrequencyTable>,
    {
        tables.into_iter().fold(Self::new(), |mut acc, table| {
            acc.absorb(table);
            acc
        })
    }
}

impl IntoIterator for FrequencyTable {
    type Item = (String, u64);
    type IntoIter = indexmap::map::IntoIter<String, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.into_iter()
    }
}

impl<S: Into<String>> FromIterator<(S, u64)> for FrequencyTable {
    fn from_iter<T: IntoIterator<Item = (S, u64)>>(iter: T) -> Self {
        let mut table = Self::new();
        for (word, count) in iter {
            let word: String = word.into();
            table.add(&word, count);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_accumulates() {
        let mut table = FrequencyTable::new();
        table.add("ა", 2);
        table.add("ბ", 1);
        table.add("ა", 3);
        table.add("გ", 0);

        assert_eq!(table.get("ა"), Some(5));
        assert_eq!(table.get("გ"), None);
        assert_eq!(table.len(), 2);
        assert_eq!(table.total(), 6);
    }

    #[test]
    fn test_keeps_first_seen_order() {
        let table: FrequencyTable = [("გ", 1), ("ა", 4), ("გ", 2)].into_iter().collect();
        let words: Vec<&str> = table.iter().map(|(w, _)| w).collect();
        assert_eq!(words, vec!["გ", "ა"]);
    }

    #[test]
    fn test_retain_min_is_inclusive() {
        let table: FrequencyTable = [("ა", 1), ("ბ", 2), ("გ", 3)].into_iter().collect();
        let filtered = table.retain_min(2);
        assert_eq!(filtered.get("ა"), None);
        assert_eq!(filtered.get("ბ"), Some(2));
        assert_eq!(filtered.get("გ"), Some(3));
    }

    #[test]
    fn test_aggregate_sums_per_word() {
        let a: FrequencyTable = [("ა", 1), ("ბ", 2)].into_iter().collect();
        let b: FrequencyTable = [("ბ", 5), ("გ", 1)].into_iter().collect();
        let total = FrequencyTable::aggregate([a, b]);

        assert_eq!(total.get("ა"), Some(1));
        assert_eq!(total.get("ბ"), Some(7));
        assert_eq!(total.get("გ"), Some(1));
    }

    #[test]
    fn test_aggregate_of_nothing_is_empty() {
        assert!(FrequencyTable::aggregate(Vec::new()).is_empty());
    }
}
