pub mod documents;
pub mod error;
pub mod source;
pub mod wikipedia;

pub use documents::{DocumentCollector, DocumentExtractor, DocxExtractor, PdfExtractor};
pub use error::SourceFetchError;
pub use source::TextSource;
pub use wikipedia::WikipediaClient;
