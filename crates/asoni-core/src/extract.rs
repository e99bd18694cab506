
use regex::Regex;

use crate::error::EncodingError;
use crate::frequency::FrequencyTable;

/// Stripped from the end of a match, internal hyphens survive
const TRAILING_PUNCTUATION: [char; 10] = ['.', ',', ';', ':', '!', '?', '»', '"', '\'', ')'];
/// Stripped from the start of a match
const LEADING_PUNCTUATION: [char; 4] = ['«', '"', '\'', '('];

/// Inclusive character-count bounds for accepted tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthBounds {
    pub min: usize,
    pub max: usize,
}

impl LengthBounds {
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, length: usize) -> bool {
        self.min <= length && length <= self.max
    }
}

/// One family of word-like tokens
#[derive(Debug, Clone)]
pub struct TokenClass {
    name: &'static str,
    pattern: Regex,
    /// Reject matches touching another word character on either side
    standalone: bool,
}

impl TokenClass {
    pub fn new(name: &'static str, pattern: Regex) -> Self {
        Self {
            name,
            pattern,
            standalone: false,
        }
    }

    /// A class that only counts when it is not glued to other word characters
    pub fn standalone(name: &'static str, pattern: Regex) -> Self {
        Self {
            name,
            pattern,
            standalone: true,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Raw (uncleaned) matches in `text`
    pub fn find_iter<'t>(&'t self, text: &'t str) -> impl Iterator<Item = &'t str> + 't {
        self.pattern.find_iter(text).filter_map(move |m| {
            if self.standalone {
                let before = text[..m.start()].chars().next_back();
                let after = text[m.end()..].chars().next();
                if before.is_some_and(is_word_char) || after.is_some_and(is_word_char) {
                    return None;
                }
            }
            Some(m.as_str())
        })
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Strip surrounding punctuation; `None` when nothing is left
pub fn clean_token(raw: &str) -> Option<&str> {
    let word = raw
        .trim_end_matches(TRAILING_PUNCTUATION)
        .trim_start_matches(LEADING_PUNCTUATION);
    (!word.is_empty()).then_some(word)
}

pub fn validate_token(word: &str) -> Result<(), EncodingError> {
    for c in word.chars() {
        if c == char::REPLACEMENT_CHARACTER {
            return Err(EncodingError::ReplacementCharacter);
        }
        if c.is_control() {
            return Err(EncodingError::ControlCharacter(c));
        }
    }
    Ok(())
}

/// Regex tokenizer producing word counts from raw text.
///
/// Every class is run over the whole text and the results are unioned, so a
/// compound such as `ნაწილ-ნაწილ` is counted once as a compound and its parts
/// are counted again by the plain-letter class.
#[derive(Debug, Clone)]
pub struct WordExtractor {
    classes: Vec<TokenClass>,
    bounds: LengthBounds,
}

impl WordExtractor {
    pub fn new(classes: Vec<TokenClass>, bounds: LengthBounds) -> Self {
        Self { classes, bounds }
    }

    pub fn extract(&self, text: &str) -> FrequencyTable {
        let mut table = FrequencyTable::new();

        for class in &self.classes {
            for raw in class.find_iter(text) {
                let Some(word) = clean_token(raw) else {
                    continue;
                };

                if !self.bounds.contains(word.chars().count()) {
                    continue;
                }

                if let Err(e) = validate_token(word) {
                    tracing::trace!(class = class.name(), token = word, "dropping token: {}", e);
                    continue;
                }

                table.add(word, 1);
            }
        }

        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn latin_extractor() -> WordExtractor {
        WordExtractor::new(
            vec![
                TokenClass::new("compound", Regex::new(r"[a-z]+(?:-[a-z]+)+").unwrap()),
                TokenClass::standalone("roman", Regex::new(r"[IVXLCDM]+").unwrap()),
                TokenClass::new("plain", Regex::new(r"[a-z]+").unwrap()),
            ],
            LengthBounds::new(2, 6),
        )
    }

    #[test]
    fn test_clean_token_strips_edges_only() {
        assert_eq!(clean_token("«word»."), Some("word"));
        assert_eq!(clean_token("(a-b)"), Some("a-b"));
        assert_eq!(clean_token("\"'"), None);
    }

    #[test]
    fn test_validate_token() {
        assert!(validate_token("ok").is_ok());
        assert_eq!(
            validate_token("a\u{FFFD}b"),
            Err(EncodingError::ReplacementCharacter)
        );
        assert_eq!(
            validate_token("a\u{7}"),
            Err(EncodingError::ControlCharacter('\u{7}'))
        );
    }

    #[test]
    fn test_overlapping_classes_inflate_counts() {
        let table = latin_extractor().extract("to-do");
        assert_eq!(table.get("to-do"), Some(1));
        assert_eq!(table.get("to"), Some(1));
        assert_eq!(table.get("do"), Some(1));
    }

    #[test]
    fn test_length_bounds_are_inclusive() {
        let table = latin_extractor().extract("a ab abcdef abcdefg");
        assert_eq!(table.get("a"), None);
        assert_eq!(table.get("ab"), Some(1));
        assert_eq!(table.get("abcdef"), Some(1));
        assert_eq!(table.get("abcdefg"), None);
    }

    #[test]
    fn test_standalone_class_rejects_glued_matches() {
        let table = latin_extractor().extract("XIV, XIVth AXI (XX)");
        assert_eq!(table.get("XIV"), Some(1));
        assert_eq!(table.get("XI"), None);
        assert_eq!(table.get("XX"), Some(1));
    }

    #[test]
    fn test_tokens_with_decoding_damage_are_dropped() {
        let extractor = WordExtractor::new(
            vec![TokenClass::new("any", Regex::new(r"\S+").unwrap())],
            LengthBounds::new(1, 20),
        );
        let table = extractor.extract("ab a\u{FFFD}b cd\u{1}");
        assert_eq!(table.get("ab"), Some(1));
        assert_eq!(table.len(), 1);
    }
}
