#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SampleError {
    #[error("No words to sample from ({excluded} removed by the special-character filter)")]
    EmptyPool { excluded: usize },

    #[error("Invalid weights: {0}")]
    InvalidWeights(String),
}

/// A token that survived matching but is not clean text
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodingError {
    #[error("token contains a replacement character")]
    ReplacementCharacter,

    #[error("token contains control character {0:?}")]
    ControlCharacter(char),
}

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("Dictionary not found: {0}")]
    NotFound(String),

    #[error("Corrupt dictionary {path}: {source}")]
    Corrupt {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Inconsistent dictionary {path}: {reason}")]
    Inconsistent { path: String, reason: String },

    #[error("IO error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
