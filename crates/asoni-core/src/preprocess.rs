use unicode_normalization::UnicodeNormalization;

/// Invisible characters that PDF and DOCX extraction leaves inside words
const INVISIBLE: [char; 5] = ['\u{00AD}', '\u{200B}', '\u{200C}', '\u{200D}', '\u{FEFF}'];

pub trait Preprocessor {
    // Default source-text preprocessor
    fn process(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        // Canonical composition only; compatibility folding would rewrite digits and ligatures
        text.nfc().filter(|c| !INVISIBLE.contains(c)).collect()
    }
}

pub struct DefaultPreprocessor;
impl Preprocessor for DefaultPreprocessor {}
