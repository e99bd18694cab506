use serde::{Deserialize, Serialize};

/// What a font can render, as far as label selection cares
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontCapability {
    pub supports_digits: bool,
}

impl FontCapability {
    pub fn full() -> Self {
        Self {
            supports_digits: true,
        }
    }

    pub fn digitless() -> Self {
        Self {
            supports_digits: false,
        }
    }
}

impl Default for FontCapability {
    fn default() -> Self {
        Self::full()
    }
}

/// One manifest row: an image file and the text rendered into it
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LabelRecord {
    pub file_name: String,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceKind {
    Wikipedia,
    Pdf,
    Docx,
    Inline,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Wikipedia => "wikipedia",
            SourceKind::Pdf => "pdf",
            SourceKind::Docx => "docx",
            SourceKind::Inline => "inline",
        }
    }
}

/// Raw text handed over by a source adapter
#[derive(Debug, Clone)]
pub struct SourceText {
    /// Page title or file name, used in logs
    pub id: String,
    pub kind: SourceKind,
    pub text: String,
}

impl SourceText {
    pub fn new(id: impl Into<String>, kind: SourceKind, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            text: text.into(),
        }
    }
}
