use std::collections::HashMap;
use std::f32::consts::TAU;
use std::path::PathBuf;

use ab_glyph::{Font, FontVec, Glyph, PxScale, ScaleFont, point};
use image::{GrayImage, Luma};
use rand::{Rng, RngCore};

use crate::error::RenderError;
use crate::font::{FontSpec, LoadedFont};

/// Draws one label with one font.
///
/// `Ok(None)` means the text produced no ink; the caller skips the sample.
pub trait TextRenderer: Send + Sync {
    fn render(
        &self,
        font: &FontSpec,
        text: &str,
        rng: &mut dyn RngCore,
    ) -> Result<Option<GrayImage>, RenderError>;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    /// Output height in pixels
    pub height: u32,
    /// Upper bound of the blur sigma
    pub blur: f32,
    /// Draw the sigma uniformly from `[0, blur]` instead of always using `blur`
    pub random_blur: bool,
    /// Bend the baseline along a random sine wave
    pub distortion: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            height: 64,
            blur: 1.0,
            random_blur: true,
            distortion: true,
        }
    }
}

/// Sine-wave vertical offset for every column
#[derive(Debug, Clone, Copy)]
struct Wave {
    amplitude: f32,
    period: f32,
    phase: f32,
}

impl Wave {
    const FLAT: Wave = Wave {
        amplitude: 0.0,
        period: 1.0,
        phase: 0.0,
    };

    fn random(height: u32, width: u32, rng: &mut dyn RngCore) -> Self {
        Self {
            amplitude: rng.gen_range(0.0..=height as f32 * 0.05),
            period: rng.gen_range(width.max(2) as f32 * 0.5..=width.max(2) as f32 * 2.0),
            phase: rng.gen_range(0.0..TAU),
        }
    }

    fn offset(&self, x: f32) -> f32 {
        self.amplitude * (TAU * x / self.period + self.phase).sin()
    }
}

/// Rasterizes labels with `ab_glyph` outlines: dark text on white, fixed height
pub struct GlyphRenderer {
    /// Keyed by font file path
    faces: HashMap<PathBuf, FontVec>,
    options: RenderOptions,
}

impl GlyphRenderer {
    pub fn new(fonts: Vec<LoadedFont>, options: RenderOptions) -> (Self, Vec<FontSpec>) {
        let mut faces = HashMap::with_capacity(fonts.len());
        let mut specs = Vec::with_capacity(fonts.len());

        for font in fonts {
            let spec = font.spec().clone();
            faces.insert(spec.path.clone(), font.into_face());
            specs.push(spec);
        }

        (Self { faces, options }, specs)
    }

    pub fn options(&self) -> RenderOptions {
        self.options
    }

    fn blur_sigma(&self, rng: &mut dyn RngCore) -> f32 {
        if self.options.blur <= 0.0 {
            0.0
        } else if self.options.random_blur {
            rng.gen_range(0.0..=self.options.blur)
        } else {
            self.options.blur
        }
    }
}

impl TextRenderer for GlyphRenderer {
    fn render(
        &self,
        font: &FontSpec,
        text: &str,
        rng: &mut dyn RngCore,
    ) -> Result<Option<GrayImage>, RenderError> {
        let face = self
            .faces
            .get(&font.path)
            .ok_or_else(|| RenderError::UnknownFont(font.stem.clone()))?;

        let height = self.options.height.max(8);
        let scale = PxScale::from(height as f32 * 0.7);
        let scaled = face.as_scaled(scale);

        let padding = height as f32 * 0.15;
        let text_height = scaled.ascent() - scaled.descent();
        let baseline = (height as f32 - text_height) / 2.0 + scaled.ascent();

        let glyphs = layout(face, scale, text, padding, baseline);
        let Some(last) = glyphs.last() else {
            return Ok(None);
        };
        let advance = scaled.h_advance(last.id);
        let width = (last.position.x + advance + padding).ceil() as u32;
        if width == 0 {
            return Ok(None);
        }

        let wave = if self.options.distortion {
            Wave::random(height, width, rng)
        } else {
            Wave::FLAT
        };

        let mut image = GrayImage::from_pixel(width, height, Luma([255]));
        let mut inked = false;

        for glyph in glyphs {
            let Some(outlined) = face.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outlined.px_bounds();

            outlined.draw(|gx, gy, coverage| {
                let x = bounds.min.x + gx as f32;
                let y = bounds.min.y + gy as f32 + wave.offset(x);
                if x < 0.0 || y < 0.0 || x >= width as f32 || y >= height as f32 {
                    return;
                }

                let ink = 255 - (coverage.clamp(0.0, 1.0) * 255.0) as u8;
                let pixel = image.get_pixel_mut(x as u32, y as u32);
                if ink < pixel.0[0] {
                    pixel.0[0] = ink;
                    inked = true;
                }
            });
        }

        if !inked {
            return Ok(None);
        }

        let sigma = self.blur_sigma(rng);
        if sigma > 0.05 {
            image = image::imageops::blur(&image, sigma);
        }

        Ok(Some(image))
    }
}

/// Positioned glyphs for `text` on one line, kerned
fn layout(face: &FontVec, scale: PxScale, text: &str, start: f32, baseline: f32) -> Vec<Glyph> {
    let scaled = face.as_scaled(scale);
    let mut caret = start;
    let mut previous = None;
    let mut glyphs = Vec::with_capacity(text.len());

    for c in text.chars().filter(|c| !c.is_control()) {
        let id = scaled.glyph_id(c);
        if let Some(previous) = previous {
            caret += scaled.kern(previous, id);
        }
        glyphs.push(id.with_scale_and_position(scale, point(caret, baseline)));
        caret += scaled.h_advance(id);
        previous = Some(id);
    }

    glyphs
}
