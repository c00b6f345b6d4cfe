use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    // Site
    pub base_url: String,

    // Storage
    pub database_path: String,

    // Admin API
    pub admin_token: String,
    pub admin_email: String,

    // Translation (OpenAI-compatible chat completion API)
    pub translation_api_url: String,
    pub translation_api_key: Option<String>,
    pub translation_model: String,

    // Sitemap output
    pub sitemap_path: String,

    // Server
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            // Site
            base_url: std::env::var("SITE_BASE_URL")
                .unwrap_or_else(|_| "https://www.example-agency.com".to_string()),

            // Storage
            database_path: std::env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "content.db".to_string()),

            // Admin API
            admin_token: std::env::var("ADMIN_TOKEN").context("ADMIN_TOKEN not set")?,
            admin_email: std::env::var("ADMIN_EMAIL")
                .unwrap_or_else(|_| "admin@example-agency.com".to_string()),

            // Translation
            translation_api_url: std::env::var("TRANSLATION_API_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1/chat/completions".to_string()),
            translation_api_key: std::env::var("TRANSLATION_API_KEY").ok(),
            translation_model: std::env::var("TRANSLATION_MODEL")
                .unwrap_or_else(|_| "gpt-4o-mini".to_string()),

            // Sitemap
            sitemap_path: std::env::var("SITEMAP_PATH")
                .unwrap_or_else(|_| "public/sitemap.xml".to_string()),

            // Server
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),
        })
    }
}
