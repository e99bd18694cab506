#[derive(Debug, thiserror::Error)]
pub enum SourceFetchError {
    #[error("Request for '{id}' failed: {source}")]
    Http {
        id: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Unexpected API response for '{id}': {reason}")]
    Api { id: String, reason: String },

    #[error("Failed to read document {id}: {reason}")]
    Document { id: String, reason: String },

    #[error("IO error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Extraction task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
