use asoni_core::{ExtractorProfile, NumberLocale, Script, WordExtractor};

use crate::tokens::{document_classes, web_classes};

/// The 33 letters of the modern Mkhedruli alphabet
pub const ALPHABET: &str = "აბგდევზთიკლმნოპჟრსტუფქღყშჩცძწჭხჯჰ";

pub const SEED_TITLES: [&str; 15] = [
    "საქართველო",
    "თბილისი",
    "საქართველოს_ისტორია",
    "ფიზიკა",
    "მათემატიკა",
    "ქიმია",
    "ბიოლოგია",
    "ლიტერატურა",
    "ხელოვნება",
    "მუსიკა",
    "სპორტი",
    "ეკონომიკა",
    "პოლიტიკა",
    "გეოგრაფია",
    "ფილოსოფია",
];

/// Georgian mobile numbers: +995 5XX XXX XXX
const PHONE_PREFIX: &str = "+995";
const PHONE_MIN: u64 = 500_000_000;
const PHONE_MAX: u64 = 599_999_999;

pub struct GeorgianScript {
    alphabet: Vec<char>,
}

impl GeorgianScript {
    pub fn new() -> Self {
        Self {
            alphabet: ALPHABET.chars().collect(),
        }
    }
}

impl Default for GeorgianScript {
    fn default() -> Self {
        Self::new()
    }
}

impl Script for GeorgianScript {
    fn language_code(&self) -> &str {
        "ka"
    }

    fn alphabet(&self) -> &[char] {
        &self.alphabet
    }

    fn number_locale(&self) -> NumberLocale {
        NumberLocale::new(PHONE_PREFIX, PHONE_MIN, PHONE_MAX)
    }

    fn extractor(&self, profile: ExtractorProfile) -> WordExtractor {
        let classes = match profile {
            ExtractorProfile::Web => web_classes(),
            ExtractorProfile::Document => document_classes(),
        };
        tracing::debug!(
            "Building {:?} extractor with {} token classes",
            profile,
            classes.len()
        );
        WordExtractor::new(classes, profile.length_bounds())
    }

    fn wikipedia_seed_titles(&self) -> &[&'static str] {
        &SEED_TITLES
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use asoni_core::{FontCapability, WeightedSampler};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn documents() -> WordExtractor {
        GeorgianScript::new().extractor(ExtractorProfile::Document)
    }

    #[test]
    fn test_alphabet() {
        let script = GeorgianScript::new();
        assert_eq!(script.alphabet().len(), 33);
        assert!(
            script
                .alphabet()
                .iter()
                .all(|c| ('\u{10D0}'..='\u{10F0}').contains(c))
        );
    }

    #[test]
    fn test_ordinal_and_numbered_words() {
        let table = documents().extract("მე-5 საუკუნე-5 იყო.");
        // Matched by both the ordinal and the numbered class
        assert_eq!(table.get("მე-5"), Some(2));
        assert_eq!(table.get("საუკუნე-5"), Some(1));
        assert_eq!(table.get("საუკუნე"), Some(1));
        assert_eq!(table.get("იყო"), Some(1));
        assert_eq!(table.get("მე"), Some(1));
    }

    #[test]
    fn test_compound_counts_twice() {
        let table = documents().extract("«ნაწილ-ნაწილ»");
        assert_eq!(table.get("ნაწილ-ნაწილ"), Some(1));
        assert_eq!(table.get("ნაწილ"), Some(2));
    }

    #[test]
    fn test_roman_numerals_must_stand_alone() {
        let table = documents().extract("XIV საუკუნე, public (IX)");
        assert_eq!(table.get("XIV"), Some(1));
        assert_eq!(table.get("IX"), Some(1));
        assert_eq!(table.get("lic"), None);
    }

    #[test]
    fn test_web_profile_keeps_plain_words_only() {
        let table = GeorgianScript::new()
            .extractor(ExtractorProfile::Web)
            .extract("მე-5 ნაწილ-ნაწილ XIV");
        assert_eq!(table.get("მე-5"), None);
        assert_eq!(table.get("ნაწილ-ნაწილ"), None);
        assert_eq!(table.get("XIV"), None);
        assert_eq!(table.get("ნაწილ"), Some(2));
    }

    #[test]
    fn test_length_bounds_per_profile() {
        let long: String = "ა".repeat(25);
        let script = GeorgianScript::new();
        assert_eq!(script.extractor(ExtractorProfile::Web).extract(&long).get(&long), None);
        assert_eq!(
            script.extractor(ExtractorProfile::Document).extract(&long).get(&long),
            Some(1)
        );
    }

    #[test]
    fn test_selector_uses_georgian_letters() {
        let script = GeorgianScript::new();
        let selector = script.content_selector();
        let sampler = WeightedSampler::new(Vec::new(), Vec::new()).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(8);

        for _ in 0..200 {
            let sample = selector.generate(&sampler, FontCapability::digitless(), &mut rng);
            assert!(sample.text.chars().all(|c| ALPHABET.contains(c)));
        }
    }
}
