use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use ab_glyph::{Font, FontVec};
use asoni_types::FontCapability;

use crate::error::RenderError;

/// What the dataset builder needs to know about a font, without its outlines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontSpec {
    pub path: PathBuf,
    /// File name without extension; prefixes every image rendered with it
    pub stem: String,
    pub capability: FontCapability,
}

impl FontSpec {
    pub fn new(path: impl Into<PathBuf>, capability: FontCapability) -> Self {
        let path = path.into();
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            path,
            stem,
            capability,
        }
    }
}

pub struct LoadedFont {
    spec: FontSpec,
    face: FontVec,
}

impl LoadedFont {
    pub fn load(path: &Path, digitless_fonts: &[String]) -> Result<Self, RenderError> {
        let data = fs::read(path).map_err(|source| RenderError::FontIo {
            path: path.display().to_string(),
            source,
        })?;
        let face = FontVec::try_from_vec(data)
            .map_err(|_| RenderError::InvalidFont(path.display().to_string()))?;

        let mut spec = FontSpec::new(path, FontCapability::full());
        let has_digits = ('0'..='9').all(|c| face.glyph_id(c).0 != 0);
        spec.capability = capability_for(&spec.stem, digitless_fonts, has_digits);

        if !spec.capability.supports_digits {
            tracing::info!("Font '{}' cannot render digits", spec.stem);
        }

        Ok(Self { spec, face })
    }

    pub fn spec(&self) -> &FontSpec {
        &self.spec
    }

    pub fn face(&self) -> &FontVec {
        &self.face
    }

    pub fn into_face(self) -> FontVec {
        self.face
    }
}

/// A font renders digits unless it is listed as digitless or lacks any of the ten glyphs
pub fn capability_for(stem: &str, digitless_fonts: &[String], has_digit_glyphs: bool) -> FontCapability {
    if digitless_fonts.iter().any(|name| name == stem) || !has_digit_glyphs {
        FontCapability::digitless()
    } else {
        FontCapability::full()
    }
}

/// Every `*.ttf` in `dir`, sorted by file name; fonts that fail to load are skipped
pub fn load_fonts(dir: &Path, digitless_fonts: &[String]) -> Result<Vec<LoadedFont>, RenderError> {
    let entries = fs::read_dir(dir).map_err(|source| RenderError::FontIo {
        path: dir.display().to_string(),
        source,
    })?;

    let mut paths: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("ttf"))
        })
        .collect();
    paths.sort();

    let mut fonts = Vec::with_capacity(paths.len());
    for path in unique_stems(paths) {
        match LoadedFont::load(&path, digitless_fonts) {
            Ok(font) => fonts.push(font),
            Err(e) => tracing::warn!("Skipping font: {}", e),
        }
    }

    tracing::info!("Loaded {} fonts from {}", fonts.len(), dir.display());
    Ok(fonts)
}

/// Drop paths whose stem repeats an earlier one, ignoring case.
///
/// Image file names are derived from the stem, so two fonts sharing it
/// would write over each other's samples.
fn unique_stems(paths: Vec<PathBuf>) -> Vec<PathBuf> {
    let mut seen = HashSet::with_capacity(paths.len());
    paths
        .into_iter()
        .filter(|path| {
            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy().to_lowercase())
                .unwrap_or_default();
            let fresh = seen.insert(stem);
            if !fresh {
                tracing::warn!(
                    "Skipping font {}: another font already uses its name",
                    path.display()
                );
            }
            fresh
        })
        .collect()
}
