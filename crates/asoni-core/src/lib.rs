pub mod content;
pub mod dictionary;
pub mod error;
pub mod extract;
pub mod frequency;
pub mod language;
pub mod preprocess;
pub mod sampler;
pub mod store;

pub use content::{Bands, ContentKind, ContentSelector, NumberLocale, Sample, SampleRequest};
pub use dictionary::{DictionaryEntry, Metadata, WeightedDictionary};
pub use error::{EncodingError, PersistenceError, SampleError};
pub use extract::{LengthBounds, TokenClass, WordExtractor};
pub use frequency::FrequencyTable;
pub use language::{ExtractorProfile, Script};
pub use sampler::WeightedSampler;
pub use store::DictionaryStore;

pub use asoni_types::FontCapability;
