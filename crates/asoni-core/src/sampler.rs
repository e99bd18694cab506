use rand::Rng;
use rand::distributions::{Distribution, WeightedIndex};

use crate::dictionary::WeightedDictionary;
use crate::error::SampleError;

/// Words a digitless font cannot be trusted with: a hyphen or any of `0`-`9`
pub fn has_special_chars(word: &str) -> bool {
    word.chars().any(|c| c == '-' || c.is_ascii_digit())
}

#[derive(Debug, Clone)]
struct Pool {
    indices: Vec<usize>,
    distribution: WeightedIndex<f64>,
}

impl Pool {
    /// `None` when no index with positive weight passes `keep`
    fn build<F>(weights: &[f64], keep: F) -> Result<Option<Self>, SampleError>
    where
        F: Fn(usize) -> bool,
    {
        let indices: Vec<usize> = (0..weights.len())
            .filter(|&i| weights[i] > 0.0 && keep(i))
            .collect();

        if indices.is_empty() {
            return Ok(None);
        }

        // WeightedIndex normalizes by the sum itself
        let distribution = WeightedIndex::new(indices.iter().map(|&i| weights[i]))
            .map_err(|e| SampleError::InvalidWeights(e.to_string()))?;

        Ok(Some(Self {
            indices,
            distribution,
        }))
    }

    fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        self.indices[self.distribution.sample(rng)]
    }
}

fn validate(len: usize, weights: &[f64]) -> Result<(), SampleError> {
    if len != weights.len() {
        return Err(SampleError::InvalidWeights(format!(
            "{} words but {} weights",
            len,
            weights.len()
        )));
    }

    if let Some((i, w)) = weights
        .iter()
        .enumerate()
        .find(|(_, w)| !w.is_finite() || **w < 0.0)
    {
        return Err(SampleError::InvalidWeights(format!(
            "weight {} at index {} is not a finite non-negative number",
            w, i
        )));
    }

    Ok(())
}

/// Frequency-proportional word draws over an immutable word list.
///
/// Holds no interior state, so one sampler can be shared by reference
/// across worker threads, each bringing its own RNG.
#[derive(Debug, Clone)]
pub struct WeightedSampler {
    words: Vec<String>,
    all: Option<Pool>,
    filtered: Option<Pool>,
    excluded: usize,
}

impl WeightedSampler {
    pub fn new(words: Vec<String>, weights: Vec<f64>) -> Result<Self, SampleError> {
        validate(words.len(), &weights)?;

        let all = Pool::build(&weights, |_| true)?;
        let filtered = Pool::build(&weights, |i| !has_special_chars(&words[i]))?;
        let excluded = words.iter().filter(|w| has_special_chars(w)).count();

        Ok(Self {
            words,
            all,
            filtered,
            excluded,
        })
    }

    pub fn from_dictionary(dictionary: &WeightedDictionary) -> Result<Self, SampleError> {
        Self::new(
            dictionary.words().map(str::to_string).collect(),
            dictionary.weights(),
        )
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Words dropped by the special-character filter
    pub fn excluded(&self) -> usize {
        self.excluded
    }

    pub fn sample<R: Rng + ?Sized>(
        &self,
        exclude_special_chars: bool,
        rng: &mut R,
    ) -> Result<&str, SampleError> {
        let (pool, excluded) = if exclude_special_chars {
            (self.filtered.as_ref(), self.excluded)
        } else {
            (self.all.as_ref(), 0)
        };

        let pool = pool.ok_or(SampleError::EmptyPool { excluded })?;
        Ok(&self.words[pool.draw(rng)])
    }

    /// `k` independent draws, with replacement
    pub fn sample_k<R: Rng + ?Sized>(
        &self,
        k: usize,
        exclude_special_chars: bool,
        rng: &mut R,
    ) -> Result<Vec<&str>, SampleError> {
        (0..k)
            .map(|_| self.sample(exclude_special_chars, rng))
            .collect()
    }
}

/// One draw without building a reusable sampler
pub fn sample<'a, S, R>(
    words: &'a [S],
    weights: &[f64],
    exclude_special_chars: bool,
    rng: &mut R,
) -> Result<&'a str, SampleError>
where
    S: AsRef<str>,
    R: Rng + ?Sized,
{
    validate(words.len(), weights)?;

    let pool = Pool::build(weights, |i| {
        !exclude_special_chars || !has_special_chars(words[i].as_ref())
    })?;

    match pool {
        Some(pool) => Ok(words[pool.draw(rng)].as_ref()),
        None => Err(SampleError::EmptyPool {
            excluded: if exclude_special_chars {
                words.iter().filter(|w| has_special_chars(w.as_ref())).count()
            } else {
                0
            },
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_special_chars() {
        assert!(has_special_chars("მე-5"));
        assert!(has_special_chars("ნაწილ-ნაწილ"));
        assert!(has_special_chars("xyz2"));
        assert!(!has_special_chars("საქართველო"));
        // Only ASCII digits count: superscripts, fractions and Roman numeral signs do not
        assert!(!has_special_chars("x²"));
        assert!(!has_special_chars("½"));
        assert!(!has_special_chars("Ⅻ"));
    }

    #[test]
    fn test_single_word_always_drawn() {
        let sampler = WeightedSampler::new(words(&["თბილისი"]), vec![1.0]).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..100 {
            assert_eq!(sampler.sample(false, &mut rng).unwrap(), "თბილისი");
            assert_eq!(sampler.sample(true, &mut rng).unwrap(), "თბილისი");
        }
    }

    #[test]
    fn test_filter_can_empty_the_pool() {
        let sampler = WeightedSampler::new(words(&["abc-1", "xyz2"]), vec![0.5, 0.5]).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        assert_eq!(
            sampler.sample(true, &mut rng),
            Err(SampleError::EmptyPool { excluded: 2 })
        );
        assert!(sampler.sample(false, &mut rng).is_ok());
    }

    #[test]
    fn test_filter_only_returns_clean_words() {
        let sampler =
            WeightedSampler::new(words(&["მე-5", "ენა", "xyz2"]), vec![0.9, 0.05, 0.05]).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for word in sampler.sample_k(200, true, &mut rng).unwrap() {
            assert_eq!(word, "ენა");
        }
    }

    #[test]
    fn test_unnormalized_weights_are_proportional() {
        let sampler = WeightedSampler::new(words(&["ა", "ბ"]), vec![3.0, 1.0]).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        let draws = 20_000;
        let hits = sampler
            .sample_k(draws, false, &mut rng)
            .unwrap()
            .into_iter()
            .filter(|w| *w == "ა")
            .count();
        let ratio = hits as f64 / draws as f64;
        assert!((ratio - 0.75).abs() < 0.02, "ratio was {}", ratio);
    }

    #[test]
    fn test_zero_weight_words_are_never_drawn() {
        let sampler = WeightedSampler::new(words(&["ა", "ბ"]), vec![0.0, 2.0]).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        assert!(
            sampler
                .sample_k(100, false, &mut rng)
                .unwrap()
                .iter()
                .all(|w| *w == "ბ")
        );
    }

    #[test]
    fn test_rejects_bad_weights() {
        assert!(matches!(
            WeightedSampler::new(words(&["ა"]), vec![1.0, 2.0]),
            Err(SampleError::InvalidWeights(_))
        ));
        assert!(matches!(
            WeightedSampler::new(words(&["ა"]), vec![f64::NAN]),
            Err(SampleError::InvalidWeights(_))
        ));
        assert!(matches!(
            WeightedSampler::new(words(&["ა"]), vec![-1.0]),
            Err(SampleError::InvalidWeights(_))
        ));
    }

    #[test]
    fn test_empty_sampler() {
        let sampler = WeightedSampler::new(Vec::new(), Vec::new()).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(
            sampler.sample(false, &mut rng),
            Err(SampleError::EmptyPool { excluded: 0 })
        );
    }

    #[test]
    fn test_free_function_matches_filter_semantics() {
        let list = ["abc-1", "xyz2"];
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        assert_eq!(
            sample(&list, &[1.0, 1.0], true, &mut rng),
            Err(SampleError::EmptyPool { excluded: 2 })
        );
        assert!(list.contains(&sample(&list, &[1.0, 1.0], false, &mut rng).unwrap()));
    }

    #[test]
    fn test_same_seed_same_draws() {
        let sampler =
            WeightedSampler::new(words(&["ა", "ბ", "გ"]), vec![0.5, 0.3, 0.2]).unwrap();
        let a = sampler
            .sample_k(50, false, &mut ChaCha8Rng::seed_from_u64(11))
            .unwrap();
        let b = sampler
            .sample_k(50, false, &mut ChaCha8Rng::seed_from_u64(11))
            .unwrap();
        assert_eq!(a, b);
    }
}
