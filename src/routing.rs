//! Locale-prefixed URL scheme.
//!
//! Every public page lives under `/<lang>/...` with
//! `<lang> ∈ {en, nl, de, es, fr}`. This module classifies an incoming path
//! into a render or a redirect; redirects exist precisely to normalize the
//! entry points that cannot guarantee a language prefix (the root URL,
//! bookmarked legacy URLs, external inbound links). Every redirect target
//! produced here is language-prefixed.

use crate::i18n::Language;
use crate::seo::route_for_path;

/// What to show for a localized path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    /// A static route from the route table, identified by its key.
    Static(&'static str),
    /// A team member profile (`/team/<slug>`).
    TeamMember(String),
    /// A blog post (`/blog/<slug>`).
    BlogPost(String),
}

impl Page {
    /// The SEO route key for this page.
    pub fn route_key(&self) -> &str {
        match self {
            Page::Static(key) => key,
            Page::TeamMember(_) => "team",
            Page::BlogPost(_) => "blog",
        }
    }
}

/// Outcome of classifying a request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// Permanent redirect to a normalized, language-prefixed location.
    Redirect(String),
    /// Render the page in the given language.
    Render { lang: Language, page: Page },
    /// Unmatched localized path: a 404 scoped to that language.
    NotFound(Language),
    /// Totally unmatched path: the global 404.
    GlobalNotFound,
}

/// Classify a request path.
///
/// `detected` is the language-detection signal for the session (already
/// resolved to a supported language, see `Language::detect`). The query
/// string, when present, is preserved on every redirect.
pub fn classify(path: &str, query: Option<&str>, detected: Language) -> RouteDecision {
    let trimmed = path.trim_start_matches('/');

    // Root always redirects to the detected language.
    if trimmed.is_empty() {
        return RouteDecision::Redirect(with_query(format!("/{}", detected.code()), query));
    }

    let (first, rest) = match trimmed.split_once('/') {
        Some((first, rest)) => (first, rest),
        None => (trimmed, ""),
    };

    if first.len() == 2 && first.chars().all(|c| c.is_ascii_lowercase()) {
        return match Language::from_code(first) {
            Ok(lang) => match match_page(rest) {
                Some(page) => RouteDecision::Render { lang, page },
                None => RouteDecision::NotFound(lang),
            },
            // Unsupported two-letter prefix: substitute the default
            // language, keep the remainder of the path.
            Err(_) => {
                let location = if rest.is_empty() {
                    format!("/{}", Language::canonical().code())
                } else {
                    format!("/{}/{}", Language::canonical().code(), rest)
                };
                RouteDecision::Redirect(with_query(location, query))
            }
        };
    }

    // Legacy path with no language prefix. Redirect to the detected
    // language when the path means something; otherwise it's the global 404.
    if match_page(trimmed).is_some() {
        let location = format!("/{}/{}", detected.code(), trimmed);
        return RouteDecision::Redirect(with_query(location, query));
    }

    RouteDecision::GlobalNotFound
}

/// Match an unprefixed path to a page: the static table first, then the
/// team and blog detail patterns.
fn match_page(path: &str) -> Option<Page> {
    let trimmed = path.trim_matches('/');
    if let Some(key) = route_for_path(trimmed) {
        return Some(Page::Static(key));
    }

    let mut segments = trimmed.split('/');
    match (segments.next(), segments.next(), segments.next()) {
        (Some("team"), Some(slug), None) if !slug.is_empty() => {
            Some(Page::TeamMember(slug.to_string()))
        }
        (Some("blog"), Some(slug), None) if !slug.is_empty() => {
            Some(Page::BlogPost(slug.to_string()))
        }
        _ => None,
    }
}

fn with_query(location: String, query: Option<&str>) -> String {
    match query {
        Some(q) if !q.is_empty() => format!("{}?{}", location, q),
        _ => location,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Root Redirect Tests ====================

    #[test]
    fn test_root_redirects_to_detected_language() {
        let decision = classify("/", None, Language::GERMAN);
        assert_eq!(decision, RouteDecision::Redirect("/de".to_string()));
    }

    #[test]
    fn test_root_with_unsupported_detection_uses_default() {
        // Detection already normalizes unsupported signals to the default.
        let detected = Language::detect(Some("it"));
        let decision = classify("/", None, detected);
        assert_eq!(decision, RouteDecision::Redirect("/en".to_string()));
    }

    // ==================== Legacy Path Tests ====================

    #[test]
    fn test_legacy_path_redirects_with_detected_language() {
        let decision = classify("/about", None, Language::GERMAN);
        assert_eq!(decision, RouteDecision::Redirect("/de/about".to_string()));
    }

    #[test]
    fn test_legacy_path_preserves_query() {
        let decision = classify("/about", Some("ref=x"), Language::GERMAN);
        assert_eq!(decision, RouteDecision::Redirect("/de/about?ref=x".to_string()));
    }

    #[test]
    fn test_legacy_nested_path() {
        let decision = classify("/services/web-development", None, Language::FRENCH);
        assert_eq!(
            decision,
            RouteDecision::Redirect("/fr/services/web-development".to_string())
        );
    }

    #[test]
    fn test_legacy_team_detail_path() {
        let decision = classify("/team/ada", None, Language::ENGLISH);
        assert_eq!(decision, RouteDecision::Redirect("/en/team/ada".to_string()));
    }

    #[test]
    fn test_unmatched_unprefixed_path_is_global_404() {
        assert_eq!(classify("/no-such-page", None, Language::ENGLISH), RouteDecision::GlobalNotFound);
    }

    // ==================== Unsupported Prefix Tests ====================

    #[test]
    fn test_unsupported_language_prefix_substitutes_default() {
        let decision = classify("/it/about", Some("a=1"), Language::GERMAN);
        assert_eq!(decision, RouteDecision::Redirect("/en/about?a=1".to_string()));
    }

    #[test]
    fn test_unsupported_language_prefix_bare() {
        let decision = classify("/pt", None, Language::ENGLISH);
        assert_eq!(decision, RouteDecision::Redirect("/en".to_string()));
    }

    // ==================== Localized Render Tests ====================

    #[test]
    fn test_localized_home() {
        let decision = classify("/nl", None, Language::ENGLISH);
        assert_eq!(
            decision,
            RouteDecision::Render {
                lang: Language::DUTCH,
                page: Page::Static("home")
            }
        );
    }

    #[test]
    fn test_localized_static_route() {
        let decision = classify("/es/legal/privacy-policy", None, Language::ENGLISH);
        assert_eq!(
            decision,
            RouteDecision::Render {
                lang: Language::SPANISH,
                page: Page::Static("privacy-policy")
            }
        );
    }

    #[test]
    fn test_localized_team_member() {
        let decision = classify("/fr/team/ada", None, Language::ENGLISH);
        assert_eq!(
            decision,
            RouteDecision::Render {
                lang: Language::FRENCH,
                page: Page::TeamMember("ada".to_string())
            }
        );
    }

    #[test]
    fn test_localized_blog_post() {
        let decision = classify("/en/blog/hello-world", None, Language::ENGLISH);
        assert_eq!(
            decision,
            RouteDecision::Render {
                lang: Language::ENGLISH,
                page: Page::BlogPost("hello-world".to_string())
            }
        );
    }

    #[test]
    fn test_unmatched_localized_path_is_language_scoped_404() {
        let decision = classify("/de/nope", None, Language::ENGLISH);
        assert_eq!(decision, RouteDecision::NotFound(Language::GERMAN));
    }

    #[test]
    fn test_team_with_extra_segments_is_404() {
        let decision = classify("/en/team/ada/extra", None, Language::ENGLISH);
        assert_eq!(decision, RouteDecision::NotFound(Language::ENGLISH));
    }

    // ==================== Invariant Tests ====================

    #[test]
    fn test_every_redirect_target_is_language_prefixed() {
        let cases = [
            ("/", None),
            ("/about", Some("q=1")),
            ("/it/portfolio", None),
            ("/pt", None),
            ("/blog/some-post", None),
        ];
        for (path, query) in cases {
            if let RouteDecision::Redirect(location) = classify(path, query, Language::DUTCH) {
                let first_segment = location
                    .trim_start_matches('/')
                    .split(['/', '?'])
                    .next()
                    .unwrap();
                assert!(
                    Language::from_code(first_segment).is_ok(),
                    "redirect {} not language-prefixed",
                    location
                );
            }
        }
    }

    #[test]
    fn test_page_route_keys() {
        assert_eq!(Page::Static("about").route_key(), "about");
        assert_eq!(Page::TeamMember("x".to_string()).route_key(), "team");
        assert_eq!(Page::BlogPost("x".to_string()).route_key(), "blog");
    }
}
