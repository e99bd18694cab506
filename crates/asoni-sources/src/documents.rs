use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock};

use asoni_types::{SourceKind, SourceText};
use async_trait::async_trait;
use regex::Regex;
use tokio_util::sync::CancellationToken;

use crate::error::SourceFetchError;
use crate::source::TextSource;

const DOCX_BODY: &str = "word/document.xml";

static TEXT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<w:t(?:\s[^>]*)?>([^<]*)</w:t>").expect("text run pattern"));

static TAB: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<w:tab\s*/>").expect("tab pattern"));

static CHAR_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&#(x[0-9A-Fa-f]+|[0-9]+);").expect("char ref pattern"));

/// Pulls plain text out of one document format
pub trait DocumentExtractor: Send + Sync {
    fn kind(&self) -> SourceKind;

    /// File extension handled, without the dot
    fn extension(&self) -> &str;

    fn extract(&self, path: &Path) -> Result<String, SourceFetchError>;
}

pub struct PdfExtractor;

impl DocumentExtractor for PdfExtractor {
    fn kind(&self) -> SourceKind {
        SourceKind::Pdf
    }

    fn extension(&self) -> &str {
        "pdf"
    }

    fn extract(&self, path: &Path) -> Result<String, SourceFetchError> {
        pdf_extract::extract_text(path).map_err(|e| SourceFetchError::Document {
            id: display_name(path),
            reason: e.to_string(),
        })
    }
}

pub struct DocxExtractor;

impl DocumentExtractor for DocxExtractor {
    fn kind(&self) -> SourceKind {
        SourceKind::Docx
    }

    fn extension(&self) -> &str {
        "docx"
    }

    fn extract(&self, path: &Path) -> Result<String, SourceFetchError> {
        let document_error = |reason: String| SourceFetchError::Document {
            id: display_name(path),
            reason,
        };

        let file = File::open(path).map_err(|source| SourceFetchError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let mut archive = zip::ZipArchive::new(file).map_err(|e| document_error(e.to_string()))?;
        let mut body = archive
            .by_name(DOCX_BODY)
            .map_err(|e| document_error(format!("{}: {}", DOCX_BODY, e)))?;

        let mut bytes = Vec::new();
        body.read_to_end(&mut bytes)
            .map_err(|e| document_error(e.to_string()))?;

        // Bad bytes become U+FFFD; the extractor drops the tokens holding them
        Ok(docx_text(&String::from_utf8_lossy(&bytes)))
    }
}

/// Text of a WordprocessingML body, one line per paragraph
pub fn docx_text(xml: &str) -> String {
    xml.split("</w:p>")
        .map(|paragraph| {
            let paragraph = TAB.replace_all(paragraph, "<w:t>\t</w:t>");
            TEXT_RUN
                .captures_iter(&paragraph)
                .map(|caps| decode_entities(&caps[1]))
                .collect::<String>()
        })
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }

    let text = CHAR_REF.replace_all(text, |caps: &regex::Captures| {
        let code = &caps[1];
        let value = match code.strip_prefix('x') {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => code.parse().ok(),
        };
        value
            .and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_default()
    });

    // &amp; last so "&amp;lt;" stays "&lt;"
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Reads every supported document in one directory
#[derive(Clone)]
pub struct DocumentCollector {
    dir: PathBuf,
    extractors: Vec<Arc<dyn DocumentExtractor>>,
}

impl DocumentCollector {
    /// PDFs first, then DOCX
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_extractors(dir, vec![Arc::new(PdfExtractor), Arc::new(DocxExtractor)])
    }

    pub fn with_extractors(dir: impl Into<PathBuf>, extractors: Vec<Arc<dyn DocumentExtractor>>) -> Self {
        Self {
            dir: dir.into(),
            extractors,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Files to process, grouped by extractor order and sorted by name within each group.
    /// Not recursive.
    pub fn scan(&self) -> Result<Vec<(PathBuf, Arc<dyn DocumentExtractor>)>, SourceFetchError> {
        let entries = fs::read_dir(&self.dir).map_err(|source| SourceFetchError::Io {
            path: self.dir.display().to_string(),
            source,
        })?;

        let mut files: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .collect();
        files.sort();

        let mut planned = Vec::new();
        for extractor in &self.extractors {
            for path in &files {
                let matches = path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| ext.eq_ignore_ascii_case(extractor.extension()));
                if matches {
                    planned.push((path.clone(), Arc::clone(extractor)));
                }
            }
        }

        Ok(planned)
    }

    /// Blocking extraction of every scanned document; failures are logged and skipped
    pub fn collect_blocking(&self, cancel: &CancellationToken) -> Vec<SourceText> {
        let planned = match self.scan() {
            Ok(planned) => planned,
            Err(e) => {
                tracing::warn!("Cannot scan documents: {}", e);
                return Vec::new();
            }
        };

        tracing::info!(
            "Found {} documents in {}",
            planned.len(),
            self.dir.display()
        );

        let total = planned.len();
        let mut texts = Vec::with_capacity(total);

        for (i, (path, extractor)) in planned.into_iter().enumerate() {
            if cancel.is_cancelled() {
                tracing::warn!("Document extraction cancelled after {} files", i);
                break;
            }

            let name = display_name(&path);
            tracing::info!(
                "[{}/{}] Processing {}: {}",
                i + 1,
                total,
                extractor.extension().to_uppercase(),
                name
            );

            match extractor.extract(&path) {
                Ok(text) if text.trim().is_empty() => {
                    tracing::warn!("No text extracted from {}", name);
                }
                Ok(text) => texts.push(SourceText::new(name, extractor.kind(), text)),
                Err(e) => tracing::warn!("{}", e),
            }
        }

        texts
    }
}

#[async_trait]
impl TextSource for DocumentCollector {
    fn name(&self) -> &str {
        "documents"
    }

    async fn collect(&self, cancel: &CancellationToken) -> Vec<SourceText> {
        let collector = self.clone();
        let cancel = cancel.clone();

        match tokio::task::spawn_blocking(move || collector.collect_blocking(&cancel)).await {
            Ok(texts) => texts,
            Err(e) => {
                tracing::error!("{}", SourceFetchError::from(e));
                Vec::new()
            }
        }
    }
}
