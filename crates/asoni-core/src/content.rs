use std::ops::RangeInclusive;

use asoni_types::FontCapability;
use rand::Rng;

use crate::sampler::WeightedSampler;

const DEFAULT_SEQUENCE_LEN: RangeInclusive<usize> = 3..=12;

/// `length` characters drawn uniformly from `alphabet`; random length in 3..=12 when `None`
pub fn random_sequence<R: Rng + ?Sized>(
    alphabet: &[char],
    length: Option<usize>,
    rng: &mut R,
) -> String {
    if alphabet.is_empty() {
        return String::new();
    }

    let length = length.unwrap_or_else(|| rng.gen_range(DEFAULT_SEQUENCE_LEN));
    (0..length)
        .map(|_| alphabet[rng.gen_range(0..alphabet.len())])
        .collect()
}

/// Locale-specific parts of synthetic numbers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberLocale {
    pub phone_prefix: String,
    pub phone_min: u64,
    pub phone_max: u64,
}

impl NumberLocale {
    pub fn new(phone_prefix: impl Into<String>, phone_min: u64, phone_max: u64) -> Self {
        Self {
            phone_prefix: phone_prefix.into(),
            phone_min,
            phone_max,
        }
    }
}

/// A plain integer, a `DD.MM.YYYY` date, a year or a phone number
pub fn random_number<R: Rng + ?Sized>(locale: &NumberLocale, rng: &mut R) -> String {
    let category: f64 = rng.r#gen();
    number_for_category(category, locale, rng)
}

fn number_for_category<R: Rng + ?Sized>(category: f64, locale: &NumberLocale, rng: &mut R) -> String {
    if category < 0.3 {
        rng.gen_range(0..=9999u32).to_string()
    } else if category < 0.6 {
        // Day capped at 28 so every month is valid
        let day = rng.gen_range(1..=28u32);
        let month = rng.gen_range(1..=12u32);
        let year = rng.gen_range(1900..=2025u32);
        format!("{:02}.{:02}.{}", day, month, year)
    } else if category < 0.8 {
        rng.gen_range(1800..=2025u32).to_string()
    } else {
        let number = rng.gen_range(locale.phone_min..=locale.phone_max);
        format!("{}{}", locale.phone_prefix, number)
    }
}

/// 3 to 8 letters glued to a number in 1..=999, either way round
pub fn random_mixed<R: Rng + ?Sized>(alphabet: &[char], rng: &mut R) -> String {
    let letters = random_sequence(alphabet, Some(rng.gen_range(3..=8)), rng);
    let number = rng.gen_range(1..=999u32);

    if rng.gen_bool(0.5) {
        format!("{}{}", letters, number)
    } else {
        format!("{}{}", number, letters)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    DictionaryWord,
    RandomSequence,
    Mixed,
    Number,
}

impl ContentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::DictionaryWord => "word",
            ContentKind::RandomSequence => "sequence",
            ContentKind::Mixed => "mixed",
            ContentKind::Number => "number",
        }
    }
}

/// Probability of each content kind. Bands are laid out in the order
/// word, sequence, mixed, number; whatever mass is left after the first
/// three goes to numbers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bands {
    pub word: f64,
    pub sequence: f64,
    pub mixed: f64,
    pub number: f64,
}

impl Default for Bands {
    fn default() -> Self {
        Self {
            word: 0.75,
            sequence: 0.20,
            mixed: 0.0,
            number: 0.05,
        }
    }
}

impl Bands {
    pub fn new(word: f64, sequence: f64, mixed: f64, number: f64) -> Self {
        Self {
            word,
            sequence,
            mixed,
            number,
        }
    }

    /// Fold every digit-bearing band into the sequence band when the font has no digits
    pub fn for_capability(self, capability: FontCapability) -> Self {
        if capability.supports_digits {
            return self;
        }

        Self {
            word: self.word,
            sequence: self.sequence + self.mixed + self.number,
            mixed: 0.0,
            number: 0.0,
        }
    }

    pub fn pick(&self, draw: f64) -> ContentKind {
        let word = self.word;
        let sequence = word + self.sequence;
        let mixed = sequence + self.mixed;

        if draw < word {
            ContentKind::DictionaryWord
        } else if draw < sequence {
            ContentKind::RandomSequence
        } else if draw < mixed {
            ContentKind::Mixed
        } else if self.number > 0.0 {
            ContentKind::Number
        } else {
            // Rounding left a sliver above the last band
            ContentKind::RandomSequence
        }
    }
}

/// One label to generate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleRequest {
    pub font_capability: FontCapability,
    /// Uniform draw in [0, 1) choosing the band
    pub source_type: f64,
}

impl SampleRequest {
    pub fn new(font_capability: FontCapability, source_type: f64) -> Self {
        Self {
            font_capability,
            source_type,
        }
    }

    pub fn draw<R: Rng + ?Sized>(font_capability: FontCapability, rng: &mut R) -> Self {
        Self::new(font_capability, rng.r#gen())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    pub text: String,
    /// What actually produced the text, after any fallback
    pub kind: ContentKind,
}

/// Decides what each rendered label says
#[derive(Debug, Clone)]
pub struct ContentSelector {
    alphabet: Vec<char>,
    locale: NumberLocale,
    bands: Bands,
    sequence_len: RangeInclusive<usize>,
}

impl ContentSelector {
    pub fn new(alphabet: &[char], locale: NumberLocale) -> Self {
        Self {
            alphabet: alphabet.to_vec(),
            locale,
            bands: Bands::default(),
            sequence_len: 5..=10,
        }
    }

    pub fn with_bands(mut self, bands: Bands) -> Self {
        self.bands = bands;
        self
    }

    pub fn with_sequence_len(mut self, min: usize, max: usize) -> Self {
        self.sequence_len = min.min(max)..=max.max(min);
        self
    }

    pub fn bands(&self) -> Bands {
        self.bands
    }

    pub fn alphabet(&self) -> &[char] {
        &self.alphabet
    }

    pub fn locale(&self) -> &NumberLocale {
        &self.locale
    }

    /// Band a request lands in, before any fallback
    pub fn resolve(&self, request: &SampleRequest) -> ContentKind {
        self.bands
            .for_capability(request.font_capability)
            .pick(request.source_type)
    }

    pub fn select<R: Rng + ?Sized>(
        &self,
        sampler: &WeightedSampler,
        request: &SampleRequest,
        rng: &mut R,
    ) -> Sample {
        match self.resolve(request) {
            ContentKind::DictionaryWord => {
                let exclude = !request.font_capability.supports_digits;
                match sampler.sample(exclude, rng) {
                    Ok(word) => Sample {
                        text: word.to_string(),
                        kind: ContentKind::DictionaryWord,
                    },
                    Err(e) => {
                        tracing::debug!("Falling back to a random sequence: {}", e);
                        self.sequence(rng)
                    }
                }
            }
            ContentKind::RandomSequence => self.sequence(rng),
            ContentKind::Mixed => Sample {
                text: random_mixed(&self.alphabet, rng),
                kind: ContentKind::Mixed,
            },
            ContentKind::Number => Sample {
                text: random_number(&self.locale, rng),
                kind: ContentKind::Number,
            },
        }
    }

    /// Draw a fresh request for `capability` and select its content
    pub fn generate<R: Rng + ?Sized>(
        &self,
        sampler: &WeightedSampler,
        capability: FontCapability,
        rng: &mut R,
    ) -> Sample {
        let request = SampleRequest::draw(capability, rng);
        self.select(sampler, &request, rng)
    }

    fn sequence<R: Rng + ?Sized>(&self, rng: &mut R) -> Sample {
        let length = rng.gen_range(self.sequence_len.clone());
        Sample {
            text: random_sequence(&self.alphabet, Some(length), rng),
            kind: ContentKind::RandomSequence,
        }
    }
}
