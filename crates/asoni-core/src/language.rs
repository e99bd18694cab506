use crate::content::{ContentSelector, NumberLocale};
use crate::extract::{LengthBounds, WordExtractor};
use crate::preprocess::{DefaultPreprocessor, Preprocessor};

/// Which kind of source an extractor is tuned for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractorProfile {
    /// Encyclopedia text: plain words only
    Web,
    /// PDFs and DOCX: every token class, longer words allowed
    Document,
}

impl ExtractorProfile {
    pub fn length_bounds(&self) -> LengthBounds {
        match self {
            ExtractorProfile::Web => LengthBounds::new(2, 20),
            ExtractorProfile::Document => LengthBounds::new(2, 30),
        }
    }
}

/// Everything the pipeline needs to know about a writing system
pub trait Script: Send + Sync {
    /// ISO 639-1 code ("ka", ...)
    fn language_code(&self) -> &str;

    /// Letters used for random sequences
    fn alphabet(&self) -> &[char];

    fn number_locale(&self) -> NumberLocale;

    fn extractor(&self, profile: ExtractorProfile) -> WordExtractor;

    /// Curated page titles fetched before any random pages
    fn wikipedia_seed_titles(&self) -> &[&'static str] {
        &[]
    }

    fn normalize(&self, text: &str) -> String {
        DefaultPreprocessor.process(text)
    }

    fn content_selector(&self) -> ContentSelector {
        ContentSelector::new(self.alphabet(), self.number_locale())
    }
}
