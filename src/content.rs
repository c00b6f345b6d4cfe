//! Typed content records.
//!
//! The store itself is schemaless; these types are the shape contract
//! between the admin write paths and the public renderers. Human-facing
//! text fields are `LocalizedText` so legacy bare-string values load
//! without error, and records in reorderable collections carry an `order`
//! field (see `ordering`).

use crate::i18n::LocalizedText;
use serde::{Deserialize, Serialize};

/// A service offered by the agency. Projects reference services by id
/// through their `category` field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    #[serde(default)]
    pub title: LocalizedText,
    #[serde(default)]
    pub description: LocalizedText,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub order: i64,
}

/// A portfolio project. `category` is expected to name a valid service id;
/// this is advisory only and checked by the diagnostics scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    #[serde(default)]
    pub title: LocalizedText,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: LocalizedText,
    #[serde(default, rename = "imageUrl")]
    pub image_url: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub client: String,
    #[serde(default)]
    pub results: Vec<String>,
    #[serde(default)]
    pub order: i64,
}

/// A team member. The slug drives the public `/team/<slug>` profile page
/// and the `team_<id>` SEO override key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamMember {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: LocalizedText,
    #[serde(default)]
    pub description: LocalizedText,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub specialties: Vec<String>,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub bio: LocalizedText,
    #[serde(default)]
    pub order: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Testimonial {
    #[serde(default)]
    pub quote: LocalizedText,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub order: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Faq {
    #[serde(default)]
    pub question: LocalizedText,
    #[serde(default)]
    pub answer: LocalizedText,
    #[serde(default)]
    pub order: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    #[serde(default)]
    pub title: LocalizedText,
    #[serde(default)]
    pub description: LocalizedText,
    #[serde(default)]
    pub location: String,
    #[serde(default, rename = "employmentType")]
    pub employment_type: String,
    #[serde(default)]
    pub open: bool,
    #[serde(default)]
    pub order: i64,
}

/// Publication state of a blog post. Only published posts appear on the
/// public site and in the sitemap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Draft,
    Published,
    Archived,
}

impl Default for PostStatus {
    fn default() -> Self {
        PostStatus::Draft
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogPost {
    #[serde(default)]
    pub title: LocalizedText,
    #[serde(default)]
    pub excerpt: LocalizedText,
    #[serde(default)]
    pub body: LocalizedText,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub status: PostStatus,
    #[serde(default, rename = "coverImage")]
    pub cover_image: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub order: i64,
}

/// Singleton document at `site_settings/main`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteSettings {
    #[serde(default, rename = "siteName")]
    pub site_name: String,
    #[serde(default)]
    pub tagline: Option<LocalizedText>,
    #[serde(default, rename = "promoBannerEnabled")]
    pub promo_banner_enabled: bool,
    #[serde(default, rename = "promoBannerText")]
    pub promo_banner_text: Option<LocalizedText>,
}

/// Singleton document at `contact_settings/main`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactSettings {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: Option<LocalizedText>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Language;
    use serde_json::json;

    #[test]
    fn test_service_loads_legacy_bare_strings() {
        let service: Service = serde_json::from_value(json!({
            "title": "Web Development",
            "description": {"en": "We build sites", "de": "Wir bauen Websites"},
            "order": 2
        }))
        .expect("Should deserialize");

        assert_eq!(service.title.get(Language::FRENCH), "Web Development");
        assert_eq!(service.description.get(Language::GERMAN), "Wir bauen Websites");
        assert_eq!(service.order, 2);
    }

    #[test]
    fn test_project_defaults() {
        let project: Project = serde_json::from_value(json!({})).expect("Should deserialize");
        assert_eq!(project.order, 0);
        assert!(project.category.is_empty());
        assert_eq!(project.title.get(Language::ENGLISH), "");
    }

    #[test]
    fn test_post_status_serde() {
        assert_eq!(
            serde_json::to_string(&PostStatus::Published).unwrap(),
            "\"published\""
        );
        let status: PostStatus = serde_json::from_str("\"archived\"").unwrap();
        assert_eq!(status, PostStatus::Archived);
    }

    #[test]
    fn test_blog_post_defaults_to_draft() {
        let post: BlogPost =
            serde_json::from_value(json!({"slug": "hello-world"})).expect("Should deserialize");
        assert_eq!(post.status, PostStatus::Draft);
    }

    #[test]
    fn test_team_member_roundtrip() {
        let member = TeamMember {
            name: "Ada".to_string(),
            slug: "ada".to_string(),
            order: 1,
            ..serde_json::from_value(json!({})).unwrap()
        };
        let value = serde_json::to_value(&member).unwrap();
        let back: TeamMember = serde_json::from_value(value).unwrap();
        assert_eq!(back.slug, "ada");
    }
}
