//! Sitemap XML assembly.
//!
//! One `<url>` entry per (static route × supported language), plus
//! team-member profile pages and published blog posts across all languages.
//! Draft and archived posts never appear. The `generate-sitemap` binary
//! feeds this from the store and writes `public/sitemap.xml` at build time.

use crate::content::{BlogPost, PostStatus, TeamMember};
use crate::i18n::Language;
use crate::seo::RouteEntry;
use crate::store::{collections, DocumentStore, StoreError};

/// Build the sitemap document.
///
/// `routes` is the static route table; slug lists come from the store.
pub fn build_sitemap(
    base_url: &str,
    routes: &[RouteEntry],
    team_slugs: &[String],
    post_slugs: &[String],
) -> String {
    let base = base_url.trim_end_matches('/');
    let languages = Language::all();

    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n");

    // 1. Static routes
    for route in routes {
        for lang in &languages {
            let loc = if route.path.is_empty() {
                format!("{}/{}", base, lang.code())
            } else {
                format!("{}/{}/{}", base, lang.code(), route.path)
            };
            push_url(&mut xml, &loc, route.changefreq, route.priority);
        }
    }

    // 2. Team member profiles
    for slug in team_slugs {
        for lang in &languages {
            let loc = format!("{}/{}/team/{}", base, lang.code(), slug);
            push_url(&mut xml, &loc, "weekly", 0.8);
        }
    }

    // 3. Published blog posts
    for slug in post_slugs {
        for lang in &languages {
            let loc = format!("{}/{}/blog/{}", base, lang.code(), slug);
            push_url(&mut xml, &loc, "weekly", 0.7);
        }
    }

    xml.push_str("</urlset>\n");
    xml
}

/// Slugs of the team members currently in the store.
pub fn team_slugs(store: &DocumentStore) -> Result<Vec<String>, StoreError> {
    let mut slugs = Vec::new();
    for doc in store.list(collections::TEAM_MEMBERS)? {
        if let Ok(member) = serde_json::from_value::<TeamMember>(doc.data) {
            if !member.slug.is_empty() {
                slugs.push(member.slug);
            }
        }
    }
    Ok(slugs)
}

/// Slugs of the published blog posts. Drafts and archived posts are
/// excluded.
pub fn published_post_slugs(store: &DocumentStore) -> Result<Vec<String>, StoreError> {
    let mut slugs = Vec::new();
    for doc in store.list(collections::BLOG_POSTS)? {
        if let Ok(post) = serde_json::from_value::<BlogPost>(doc.data) {
            if post.status == PostStatus::Published && !post.slug.is_empty() {
                slugs.push(post.slug);
            }
        }
    }
    Ok(slugs)
}

fn push_url(xml: &mut String, loc: &str, changefreq: &str, priority: f64) {
    xml.push_str("  <url>\n");
    xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(loc)));
    xml.push_str(&format!("    <changefreq>{}</changefreq>\n", changefreq));
    xml.push_str(&format!("    <priority>{:.1}</priority>\n", priority));
    xml.push_str("  </url>\n");
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seo::static_routes;
    use serde_json::json;

    fn single_route() -> Vec<RouteEntry> {
        vec![RouteEntry {
            key: "home",
            path: "",
            title: "Home",
            description: "",
            keywords: &[],
            category: "main",
            priority: 1.0,
            changefreq: "daily",
        }]
    }

    fn count_urls(xml: &str) -> usize {
        xml.matches("<url>").count()
    }

    // ==================== Entry Count Tests ====================

    #[test]
    fn test_one_route_two_posts_yields_fifteen_entries() {
        // 1 static route x 5 languages + 2 published posts x 5 languages.
        let xml = build_sitemap(
            "https://example.com",
            &single_route(),
            &[],
            &["post-a".to_string(), "post-b".to_string()],
        );
        assert_eq!(count_urls(&xml), 15);
    }

    #[test]
    fn test_full_route_table_entry_count() {
        let xml = build_sitemap("https://example.com", static_routes(), &[], &[]);
        assert_eq!(count_urls(&xml), static_routes().len() * 5);
    }

    #[test]
    fn test_team_slugs_included_per_language() {
        let xml = build_sitemap(
            "https://example.com",
            &[],
            &["ada".to_string()],
            &[],
        );
        assert_eq!(count_urls(&xml), 5);
        for lang in ["en", "nl", "de", "es", "fr"] {
            assert!(xml.contains(&format!("<loc>https://example.com/{}/team/ada</loc>", lang)));
        }
    }

    // ==================== Shape Tests ====================

    #[test]
    fn test_home_has_no_trailing_slash() {
        let xml = build_sitemap("https://example.com/", &single_route(), &[], &[]);
        assert!(xml.contains("<loc>https://example.com/en</loc>"));
        assert!(!xml.contains("example.com//"));
    }

    #[test]
    fn test_hints_are_emitted() {
        let xml = build_sitemap("https://example.com", &single_route(), &[], &[]);
        assert!(xml.contains("<changefreq>daily</changefreq>"));
        assert!(xml.contains("<priority>1.0</priority>"));
    }

    #[test]
    fn test_document_is_well_formed_urlset() {
        let xml = build_sitemap("https://example.com", &single_route(), &[], &[]);
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">"));
        assert!(xml.trim_end().ends_with("</urlset>"));
        assert_eq!(xml.matches("<url>").count(), xml.matches("</url>").count());
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a&b<c>"), "a&amp;b&lt;c&gt;");
    }

    // ==================== Store Helpers ====================

    #[test]
    fn test_published_post_slugs_exclude_drafts() {
        let store = DocumentStore::in_memory().expect("store");
        store
            .set(collections::BLOG_POSTS, "p1", &json!({"slug": "live", "status": "published"}))
            .unwrap();
        store
            .set(collections::BLOG_POSTS, "p2", &json!({"slug": "wip", "status": "draft"}))
            .unwrap();
        store
            .set(collections::BLOG_POSTS, "p3", &json!({"slug": "old", "status": "archived"}))
            .unwrap();

        let slugs = published_post_slugs(&store).expect("slugs");
        assert_eq!(slugs, vec!["live"]);
    }

    #[test]
    fn test_team_slugs_skip_empty() {
        let store = DocumentStore::in_memory().expect("store");
        store
            .set(collections::TEAM_MEMBERS, "m1", &json!({"name": "Ada", "slug": "ada"}))
            .unwrap();
        store
            .set(collections::TEAM_MEMBERS, "m2", &json!({"name": "Nameless"}))
            .unwrap();

        let slugs = team_slugs(&store).expect("slugs");
        assert_eq!(slugs, vec!["ada"]);
    }
}
