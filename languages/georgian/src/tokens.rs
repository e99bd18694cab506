use std::sync::LazyLock;

use asoni_core::TokenClass;
use regex::Regex;

// ნაწილ-ნაწილ
static COMPOUND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ა-ჰ]+(?:-[ა-ჰ]+)+").expect("compound pattern"));

// მე-5, მე-10
static ORDINAL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"მე-\d+").expect("ordinal pattern"));

// საუკუნე-5
static NUMBERED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ა-ჰ]+-\d+").expect("numbered pattern"));

// XIV, iii
static ROMAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[IVXLCDMivxlcdm]+").expect("roman pattern"));

static PLAIN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ა-ჰ]+").expect("plain pattern"));

/// Encyclopedia text only counts plain words
pub fn web_classes() -> Vec<TokenClass> {
    vec![TokenClass::new("plain", PLAIN.clone())]
}

/// Documents keep hyphenated forms, ordinals and Roman numerals too
pub fn document_classes() -> Vec<TokenClass> {
    vec![
        TokenClass::new("compound", COMPOUND.clone()),
        TokenClass::new("ordinal", ORDINAL.clone()),
        TokenClass::new("numbered", NUMBERED.clone()),
        TokenClass::standalone("roman", ROMAN.clone()),
        TokenClass::new("plain", PLAIN.clone()),
    ]
}
