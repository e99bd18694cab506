pub mod script;
pub mod tokens;

pub use script::{ALPHABET, GeorgianScript, SEED_TITLES};
pub use tokens::{document_classes, web_classes};
