//! SEO metadata resolver.
//!
//! Produces the final head metadata for a `(route key, pathname, language)`
//! triple by merging three layers:
//!
//! 1. the static route table (language-agnostic baseline),
//! 2. the global defaults from the `settings/seo` document,
//! 3. sparse per-route overrides from the same document.
//!
//! Field precedence is override > static > global default, except that the
//! title never falls back to the global layer. `no_index` and `og_image`
//! exist only in the override layer; absent means "index normally" and "use
//! the site-wide default image".

use crate::i18n::{Language, LocalizedText};
use crate::seo::routes::route_metadata;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Global defaults, used only when neither an override nor the static table
/// provides a value for a field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalSeoDefaults {
    #[serde(default, rename = "titleSuffix")]
    pub title_suffix: Option<LocalizedText>,
    #[serde(default, rename = "defaultDescription")]
    pub default_description: Option<LocalizedText>,
    #[serde(default, rename = "defaultKeywords")]
    pub default_keywords: Option<LocalizedText>,
    #[serde(default, rename = "defaultOgImage")]
    pub default_og_image: Option<String>,
}

/// Sparse per-route override. Absence of a field (or of the whole record)
/// means "use the static/global default".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeoOverride {
    #[serde(default)]
    pub title: Option<LocalizedText>,
    #[serde(default)]
    pub description: Option<LocalizedText>,
    #[serde(default)]
    pub keywords: Option<LocalizedText>,
    #[serde(default, rename = "ogImage")]
    pub og_image: Option<String>,
    #[serde(default, rename = "noIndex")]
    pub no_index: Option<bool>,
}

/// The `settings/seo` singleton document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeoSettings {
    #[serde(default)]
    pub global: GlobalSeoDefaults,
    #[serde(default)]
    pub routes: BTreeMap<String, SeoOverride>,
}

/// Resolved head metadata for one page.
#[derive(Debug, Clone, PartialEq)]
pub struct SeoMetadata {
    pub title: String,
    pub title_suffix: String,
    pub description: String,
    pub keywords: Vec<String>,
    /// `None` means "use the site-wide default image".
    pub og_image: Option<String>,
    /// `None` means "do not suppress indexing".
    pub no_index: Option<bool>,
}

pub struct SeoResolver {
    settings: SeoSettings,
}

impl SeoResolver {
    pub fn new(settings: SeoSettings) -> Self {
        Self { settings }
    }

    /// Resolve the final metadata for a route.
    ///
    /// `pathname` is the request path, with or without a language prefix.
    /// Unknown route keys resolve against the home baseline.
    pub fn resolve(&self, route_key: &str, pathname: &str, lang: Language) -> SeoMetadata {
        let baseline = route_metadata(route_key);
        let clean_path = strip_language_prefix(pathname);

        // Effective override, most specific last: route key, then a
        // synthesized team key for team profile pages, then a literal-path
        // override. A literal path wins when both it and a keyed override
        // exist.
        let mut overrides = self.settings.routes.get(route_key);
        if let Some(rest) = clean_path.strip_prefix("/team/") {
            let member_id = rest.split('/').next().unwrap_or("");
            if !member_id.is_empty() {
                if let Some(o) = self.settings.routes.get(&format!("team_{}", member_id)) {
                    overrides = Some(o);
                }
            }
        }
        if let Some(o) = self.settings.routes.get(clean_path.as_str()) {
            overrides = Some(o);
        }
        let overrides = overrides.cloned().unwrap_or_default();
        let global = &self.settings.global;

        // Title: override > static. No global-default layer.
        let override_title = resolve_text(overrides.title.as_ref(), lang);
        let title = if override_title.is_empty() {
            baseline.title.to_string()
        } else {
            override_title
        };
        let title_suffix = resolve_text(global.title_suffix.as_ref(), lang);

        // Description: override > static > global default.
        let mut description = resolve_text(overrides.description.as_ref(), lang);
        if description.is_empty() {
            description = baseline.description.to_string();
        }
        if description.is_empty() {
            description = resolve_text(global.default_description.as_ref(), lang);
        }

        // Keywords: override replaces static wholesale, then global default.
        let keywords = if overrides.keywords.is_some() {
            split_keywords(&resolve_text(overrides.keywords.as_ref(), lang))
        } else if !baseline.keywords.is_empty() {
            baseline.keywords.iter().map(|s| s.to_string()).collect()
        } else {
            split_keywords(&resolve_text(global.default_keywords.as_ref(), lang))
        };

        SeoMetadata {
            title,
            title_suffix,
            description,
            keywords,
            og_image: overrides.og_image,
            no_index: overrides.no_index,
        }
    }
}

fn resolve_text(field: Option<&LocalizedText>, lang: Language) -> String {
    field.map(|f| f.get(lang)).unwrap_or_default()
}

/// Split a comma-separated keyword string into a trimmed list.
fn split_keywords(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Strip a leading two-letter language segment: `/fr/foo` -> `/foo`,
/// `/en` -> `/`.
fn strip_language_prefix(pathname: &str) -> String {
    static PREFIX: OnceLock<Regex> = OnceLock::new();
    let re = PREFIX.get_or_init(|| Regex::new(r"^/[a-z]{2}(/|$)").unwrap());
    re.replace(pathname, "/").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::LocalizedString;
    use serde_json::json;

    fn text(en: &str) -> LocalizedText {
        LocalizedText::Localized(LocalizedString::from_english(en))
    }

    fn resolver(settings: serde_json::Value) -> SeoResolver {
        SeoResolver::new(serde_json::from_value(settings).expect("settings"))
    }

    // ==================== Precedence Tests ====================

    #[test]
    fn test_static_baseline_only() {
        let resolver = SeoResolver::new(SeoSettings::default());
        let meta = resolver.resolve("about", "/en/about", Language::ENGLISH);
        assert_eq!(meta.title, "About Us");
        assert!(!meta.description.is_empty());
        assert_eq!(meta.title_suffix, "");
        assert_eq!(meta.no_index, None);
        assert_eq!(meta.og_image, None);
    }

    #[test]
    fn test_override_description_beats_static_and_global() {
        let resolver = resolver(json!({
            "global": { "defaultDescription": { "en": "Global D" } },
            "routes": { "about": { "description": { "en": "Override O" } } }
        }));
        let meta = resolver.resolve("about", "/en/about", Language::ENGLISH);
        assert_eq!(meta.description, "Override O");
    }

    #[test]
    fn test_global_description_only_when_static_empty() {
        // "privacy-policy" has no static description.
        let resolver = resolver(json!({
            "global": { "defaultDescription": { "en": "Global D" } }
        }));
        let meta = resolver.resolve("privacy-policy", "/en/legal/privacy-policy", Language::ENGLISH);
        assert_eq!(meta.description, "Global D");

        // "about" has a static description, so the global layer never wins.
        let meta = resolver.resolve("about", "/en/about", Language::ENGLISH);
        assert_ne!(meta.description, "Global D");
    }

    #[test]
    fn test_title_never_falls_back_to_global() {
        let resolver = resolver(json!({
            "global": { "defaultDescription": { "en": "Global D" } }
        }));
        // No override title anywhere; static baseline title is used even
        // though global defaults exist.
        let meta = resolver.resolve("privacy-policy", "/en/legal/privacy-policy", Language::ENGLISH);
        assert_eq!(meta.title, "Privacy Policy");
    }

    #[test]
    fn test_title_suffix_comes_from_global() {
        let resolver = resolver(json!({
            "global": { "titleSuffix": { "en": " | Agency", "de": " | Agentur" } }
        }));
        let meta = resolver.resolve("home", "/de", Language::GERMAN);
        assert_eq!(meta.title_suffix, " | Agentur");
    }

    // ==================== Keyword Tests ====================

    #[test]
    fn test_override_keywords_replace_static_list() {
        let resolver = resolver(json!({
            "routes": { "about": { "keywords": { "en": "alpha, beta ,gamma" } } }
        }));
        let meta = resolver.resolve("about", "/en/about", Language::ENGLISH);
        assert_eq!(meta.keywords, vec!["alpha", "beta", "gamma"]);
    }

    #[test]
    fn test_static_keywords_when_no_override() {
        let resolver = SeoResolver::new(SeoSettings::default());
        let meta = resolver.resolve("about", "/en/about", Language::ENGLISH);
        assert_eq!(meta.keywords, vec!["about", "digital agency team", "company mission"]);
    }

    #[test]
    fn test_global_keywords_when_static_empty() {
        let resolver = resolver(json!({
            "global": { "defaultKeywords": { "en": "one,two" } }
        }));
        let meta = resolver.resolve("cookie-policy", "/en/legal/cookie-policy", Language::ENGLISH);
        assert_eq!(meta.keywords, vec!["one", "two"]);
    }

    // ==================== Override-Key Resolution Tests ====================

    #[test]
    fn test_team_member_key_synthesis() {
        let resolver = resolver(json!({
            "routes": { "team_ada": { "title": { "en": "Ada Profile" } } }
        }));
        let meta = resolver.resolve("team", "/en/team/ada", Language::ENGLISH);
        assert_eq!(meta.title, "Ada Profile");
    }

    #[test]
    fn test_literal_path_override_for_custom_page() {
        // Ad-hoc page with no static route entry: falls back to the home
        // baseline for the title but picks up the literal-path override.
        let resolver = resolver(json!({
            "routes": { "/landing": { "description": { "en": "Landing page" } } }
        }));
        let meta = resolver.resolve("no-such-route", "/fr/landing", Language::ENGLISH);
        assert_eq!(meta.description, "Landing page");
        assert_eq!(meta.title, route_metadata("home").title);
    }

    #[test]
    fn test_literal_path_wins_over_route_key() {
        let resolver = resolver(json!({
            "routes": {
                "about": { "title": { "en": "Keyed" } },
                "/about": { "title": { "en": "Literal" } }
            }
        }));
        let meta = resolver.resolve("about", "/en/about", Language::ENGLISH);
        assert_eq!(meta.title, "Literal");
    }

    // ==================== Override-Only Fields ====================

    #[test]
    fn test_no_index_and_og_image_only_from_override() {
        let resolver = resolver(json!({
            "routes": { "careers": { "noIndex": true, "ogImage": "/img/careers.png" } }
        }));
        let meta = resolver.resolve("careers", "/en/careers", Language::ENGLISH);
        assert_eq!(meta.no_index, Some(true));
        assert_eq!(meta.og_image, Some("/img/careers.png".to_string()));
    }

    // ==================== Localization Tests ====================

    #[test]
    fn test_override_localized_with_english_fallback() {
        let resolver = resolver(json!({
            "routes": { "about": { "description": { "en": "English D" } } }
        }));
        let meta = resolver.resolve("about", "/nl/about", Language::DUTCH);
        assert_eq!(meta.description, "English D");
    }

    #[test]
    fn test_legacy_bare_string_override() {
        let resolver = resolver(json!({
            "routes": { "about": { "title": "Legacy Title" } }
        }));
        let meta = resolver.resolve("about", "/en/about", Language::SPANISH);
        assert_eq!(meta.title, "Legacy Title");
    }

    // ==================== Helper Tests ====================

    #[test]
    fn test_strip_language_prefix() {
        assert_eq!(strip_language_prefix("/fr/foo"), "/foo");
        assert_eq!(strip_language_prefix("/en"), "/");
        assert_eq!(strip_language_prefix("/foo"), "/foo");
        assert_eq!(strip_language_prefix("/team/ada"), "/team/ada");
        // Only a two-letter first segment is treated as a language.
        assert_eq!(strip_language_prefix("/abc/def"), "/abc/def");
    }

    #[test]
    fn test_split_keywords_trims_and_drops_empties() {
        assert_eq!(split_keywords(" a , b,, c "), vec!["a", "b", "c"]);
        assert!(split_keywords("").is_empty());
    }

    #[test]
    fn test_unknown_route_uses_home_baseline() {
        let resolver = SeoResolver::new(SeoSettings::default());
        let meta = resolver.resolve("garbage", "/en/garbage", Language::ENGLISH);
        assert_eq!(meta.title, route_metadata("home").title);
        assert!(!meta.title.is_empty());
    }

    #[test]
    fn test_text_helper_builds_localized() {
        let t = text("x");
        assert_eq!(t.get(Language::ENGLISH), "x");
    }
}
