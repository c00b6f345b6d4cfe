//! Localized string shape: the `{lang: text}` mapping used by every
//! human-facing text field in the content model.
//!
//! Legacy records may still hold bare strings where a mapping is expected.
//! `LocalizedText` tolerates both on load; `normalize()` converts everything
//! to the canonical `LocalizedString` shape so downstream code never has to
//! branch on the legacy case.

use crate::i18n::{Language, LanguageRegistry};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A mapping from language code to text.
///
/// Resolution falls back to English when the requested language is empty or
/// absent. Resolution never fails; an empty string means no usable value
/// exists in either the requested language or English.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalizedString(BTreeMap<String, String>);

impl LocalizedString {
    /// Create a localized string with every supported language mapped to `""`.
    ///
    /// Used when seeding new records so edit forms always see the full shape.
    pub fn empty() -> Self {
        let map = LanguageRegistry::get()
            .list_enabled()
            .iter()
            .map(|config| (config.code.to_string(), String::new()))
            .collect();
        Self(map)
    }

    /// Create a localized string holding `text` under the canonical language.
    pub fn from_english(text: impl Into<String>) -> Self {
        let mut localized = Self::empty();
        localized
            .0
            .insert(Language::canonical().code().to_string(), text.into());
        localized
    }

    /// Resolve the text for a language, falling back to English.
    ///
    /// Returns the requested language's value if present and non-empty, else
    /// the English value if present and non-empty, else `""`.
    pub fn get(&self, lang: Language) -> &str {
        if let Some(value) = self.0.get(lang.code()) {
            if !value.is_empty() {
                return value;
            }
        }
        self.0
            .get(Language::canonical().code())
            .map(String::as_str)
            .filter(|value| !value.is_empty())
            .unwrap_or("")
    }

    /// Set the text for a language.
    pub fn set(&mut self, lang: Language, text: impl Into<String>) {
        self.0.insert(lang.code().to_string(), text.into());
    }

    /// True when no language holds a non-empty value.
    pub fn is_blank(&self) -> bool {
        self.0.values().all(|value| value.is_empty())
    }

    /// Languages that have no value while the canonical language does.
    ///
    /// These are the translation targets for the auto-translate flow.
    pub fn missing_languages(&self) -> Vec<Language> {
        let english = self
            .0
            .get(Language::canonical().code())
            .map(String::as_str)
            .unwrap_or("");
        if english.is_empty() {
            return Vec::new();
        }

        Language::all()
            .into_iter()
            .filter(|lang| !lang.is_canonical())
            .filter(|lang| {
                self.0
                    .get(lang.code())
                    .map(|value| value.is_empty())
                    .unwrap_or(true)
            })
            .collect()
    }

    /// Iterate over `(code, text)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// A text field as it arrives from storage: either the canonical localized
/// mapping or a legacy bare string from before the localization scheme.
///
/// New code paths always write the `Localized` variant; the `Plain` variant
/// exists only so old documents load without error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocalizedText {
    Localized(LocalizedString),
    Plain(String),
}

impl LocalizedText {
    /// Convert into a well-formed `LocalizedString`.
    ///
    /// Every supported language is present in the result; a legacy bare
    /// string lands under the canonical language.
    pub fn normalize(&self) -> LocalizedString {
        match self {
            LocalizedText::Plain(text) => LocalizedString::from_english(text.clone()),
            LocalizedText::Localized(localized) => {
                let mut full = LocalizedString::empty();
                for (code, text) in localized.iter() {
                    full.0.insert(code.to_string(), text.to_string());
                }
                full
            }
        }
    }

    /// Resolve the text for a language, falling back to English.
    ///
    /// Works for both the legacy and canonical shapes; never fails.
    pub fn get(&self, lang: Language) -> String {
        match self {
            LocalizedText::Plain(text) => text.clone(),
            LocalizedText::Localized(localized) => localized.get(lang).to_string(),
        }
    }
}

impl Default for LocalizedText {
    fn default() -> Self {
        LocalizedText::Localized(LocalizedString::empty())
    }
}

/// Resolve an optional text field, treating `None` as an empty value.
pub fn resolve_field(field: Option<&LocalizedText>, lang: Language) -> String {
    field.map(|f| f.get(lang)).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn localized(pairs: &[(&str, &str)]) -> LocalizedString {
        let mut ls = LocalizedString::default();
        for (code, text) in pairs {
            ls.0.insert(code.to_string(), text.to_string());
        }
        ls
    }

    // ==================== Resolution Tests ====================

    #[test]
    fn test_get_requested_language() {
        let ls = localized(&[("en", "Hello"), ("de", "Hallo")]);
        assert_eq!(ls.get(Language::GERMAN), "Hallo");
    }

    #[test]
    fn test_get_falls_back_to_english() {
        let ls = localized(&[("en", "Hello")]);
        assert_eq!(ls.get(Language::FRENCH), "Hello");
    }

    #[test]
    fn test_get_empty_value_falls_back() {
        let ls = localized(&[("en", "Hello"), ("nl", "")]);
        assert_eq!(ls.get(Language::DUTCH), "Hello");
    }

    #[test]
    fn test_get_returns_empty_when_nothing_usable() {
        let ls = localized(&[("de", "Hallo")]);
        // German present but English absent: Spanish resolution has no
        // usable value in the requested language or English.
        assert_eq!(ls.get(Language::SPANISH), "");
        assert_eq!(localized(&[]).get(Language::ENGLISH), "");
    }

    // ==================== Shape Tests ====================

    #[test]
    fn test_empty_covers_all_languages() {
        let ls = LocalizedString::empty();
        assert_eq!(ls.iter().count(), 5);
        assert!(ls.is_blank());
    }

    #[test]
    fn test_from_english() {
        let ls = LocalizedString::from_english("Hi");
        assert_eq!(ls.get(Language::ENGLISH), "Hi");
        assert_eq!(ls.get(Language::GERMAN), "Hi");
        assert!(!ls.is_blank());
    }

    #[test]
    fn test_missing_languages() {
        let ls = localized(&[("en", "Hello"), ("de", "Hallo")]);
        let missing = ls.missing_languages();
        assert_eq!(missing.len(), 3);
        assert!(missing.contains(&Language::DUTCH));
        assert!(missing.contains(&Language::SPANISH));
        assert!(missing.contains(&Language::FRENCH));
        assert!(!missing.contains(&Language::GERMAN));
    }

    #[test]
    fn test_missing_languages_without_english_source() {
        let ls = localized(&[("de", "Hallo")]);
        // No English source text, so there is nothing to translate from.
        assert!(ls.missing_languages().is_empty());
    }

    // ==================== Legacy Normalization Tests ====================

    #[test]
    fn test_normalize_plain_string() {
        let legacy = LocalizedText::Plain("Old title".to_string());
        let normalized = legacy.normalize();
        assert_eq!(normalized.get(Language::ENGLISH), "Old title");
        assert_eq!(normalized.iter().count(), 5);
    }

    #[test]
    fn test_normalize_partial_mapping() {
        let partial = LocalizedText::Localized(localized(&[("fr", "Bonjour")]));
        let normalized = partial.normalize();
        assert_eq!(normalized.iter().count(), 5);
        assert_eq!(normalized.get(Language::FRENCH), "Bonjour");
    }

    #[test]
    fn test_deserialize_legacy_string() {
        let text: LocalizedText = serde_json::from_str("\"bare value\"").unwrap();
        assert_eq!(text.get(Language::ENGLISH), "bare value");
    }

    #[test]
    fn test_deserialize_mapping() {
        let text: LocalizedText =
            serde_json::from_str(r#"{"en": "Hello", "nl": "Hallo"}"#).unwrap();
        assert_eq!(text.get(Language::DUTCH), "Hallo");
        assert_eq!(text.get(Language::SPANISH), "Hello");
    }

    #[test]
    fn test_resolve_field_none() {
        assert_eq!(resolve_field(None, Language::ENGLISH), "");
    }

    // ==================== Property Tests ====================

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn arb_localized_text() -> impl Strategy<Value = LocalizedText> {
            let plain = any::<String>().prop_map(LocalizedText::Plain);
            let mapping = proptest::collection::btree_map(
                prop_oneof![
                    Just("en".to_string()),
                    Just("nl".to_string()),
                    Just("de".to_string()),
                    Just("es".to_string()),
                    Just("fr".to_string()),
                    Just("xx".to_string()),
                ],
                any::<String>(),
                0..6,
            )
            .prop_map(|map| LocalizedText::Localized(LocalizedString(map)));
            prop_oneof![plain, mapping]
        }

        proptest! {
            #[test]
            fn resolution_never_panics(text in arb_localized_text()) {
                for lang in Language::all() {
                    let _ = text.get(lang);
                }
            }

            #[test]
            fn empty_result_means_no_usable_value(text in arb_localized_text()) {
                let lang = Language::GERMAN;
                let resolved = text.get(lang);
                if resolved.is_empty() {
                    match &text {
                        LocalizedText::Plain(s) => prop_assert!(s.is_empty()),
                        LocalizedText::Localized(ls) => {
                            prop_assert!(ls.get(lang).is_empty());
                            prop_assert!(ls.get(Language::ENGLISH).is_empty());
                        }
                    }
                }
            }

            #[test]
            fn normalize_always_covers_all_languages(text in arb_localized_text()) {
                prop_assert_eq!(text.normalize().iter().count(), 5);
            }
        }
    }
}
