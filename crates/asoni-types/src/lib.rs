pub mod types;

pub use types::{FontCapability, LabelRecord, SourceKind, SourceText};
