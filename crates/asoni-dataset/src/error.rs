#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to save image {path}: {source}")]
    Image {
        path: String,
        #[source]
        source: image::ImageError,
    },

    #[error("Manifest error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Packaging error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Failed to start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
