//! Language type: Flexible, validated language representation.
//!
//! This module provides the `Language` type, a struct that validates
//! against the registry instead of a hardcoded enum.

use crate::i18n::{LanguageConfig, LanguageRegistry};
use anyhow::{bail, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A validated language.
///
/// This type represents a language that has been validated against the
/// registry. It ensures that only supported, enabled languages can be
/// constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Language {
    /// ISO 639-1 language code (e.g., "en", "nl")
    code: &'static str,
}

impl Language {
    pub const ENGLISH: Language = Language { code: "en" };
    pub const DUTCH: Language = Language { code: "nl" };
    pub const GERMAN: Language = Language { code: "de" };
    pub const SPANISH: Language = Language { code: "es" };
    pub const FRENCH: Language = Language { code: "fr" };

    /// Create a Language from a language code string.
    ///
    /// # Arguments
    /// * `code` - The ISO 639-1 language code (e.g., "en", "nl")
    ///
    /// # Returns
    /// * `Ok(Language)` if the code is valid and the language is enabled
    /// * `Err` if the code is not found or the language is disabled
    pub fn from_code(code: &str) -> Result<Language> {
        let registry = LanguageRegistry::get();

        match registry.get_by_code(code) {
            Some(config) if config.enabled => Ok(Language {
                code: config.code, // Use the static str from the registry
            }),
            Some(_) => bail!("Language '{}' is not enabled", code),
            None => bail!("Unknown language code: '{}'", code),
        }
    }

    /// Get the canonical (fallback) language.
    ///
    /// This is the language every localized field falls back to when the
    /// requested language has no value.
    pub fn canonical() -> Language {
        let config = LanguageRegistry::get().canonical();
        Language { code: config.code }
    }

    /// All enabled languages, canonical first.
    pub fn all() -> Vec<Language> {
        let mut langs: Vec<Language> = LanguageRegistry::get()
            .list_enabled()
            .iter()
            .map(|config| Language { code: config.code })
            .collect();
        langs.sort_by_key(|l| !l.is_canonical());
        langs
    }

    /// Detect the best supported language from an `Accept-Language` header
    /// value (or any comma-separated language-tag list).
    ///
    /// Region suffixes are tolerated (`en-US` matches `en`). Returns the
    /// canonical language when nothing in the signal is supported or the
    /// signal is absent.
    pub fn detect(accept_language: Option<&str>) -> Language {
        let Some(raw) = accept_language else {
            return Language::canonical();
        };

        for part in raw.split(',') {
            // Strip quality weight ("nl;q=0.8" -> "nl") and region ("en-US" -> "en")
            let tag = part.split(';').next().unwrap_or("").trim();
            let short = tag.split('-').next().unwrap_or("");
            if let Ok(lang) = Language::from_code(short) {
                return lang;
            }
        }

        Language::canonical()
    }

    /// Get the ISO 639-1 language code.
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Get the full language configuration from the registry.
    ///
    /// # Panics
    /// Panics if the language code is not found in the registry. This should
    /// never happen if the Language was constructed properly (via
    /// `from_code` or constants).
    pub fn config(&self) -> &'static LanguageConfig {
        LanguageRegistry::get()
            .get_by_code(self.code)
            .expect("Language code should always be valid")
    }

    /// Get the English name of the language.
    pub fn name(&self) -> &'static str {
        self.config().name
    }

    /// Get the native name of the language.
    pub fn native_name(&self) -> &'static str {
        self.config().native_name
    }

    /// Check if this is the canonical language.
    pub fn is_canonical(&self) -> bool {
        self.config().is_canonical
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code)
    }
}

impl Serialize for Language {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code)
    }
}

impl<'de> Deserialize<'de> for Language {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        Language::from_code(&code).map_err(serde::de::Error::custom)
    }
}
