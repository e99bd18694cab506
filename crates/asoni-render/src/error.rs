#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Failed to read font {path}: {source}")]
    FontIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Not a usable font: {0}")]
    InvalidFont(String),

    #[error("Font '{0}' was not loaded by this renderer")]
    UnknownFont(String),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}
