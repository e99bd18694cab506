pub mod error;
pub mod font;
pub mod renderer;

pub use error::RenderError;
pub use font::{FontSpec, LoadedFont, load_fonts};
pub use renderer::{GlyphRenderer, RenderOptions, TextRenderer};
