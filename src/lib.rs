//! Library crate for the agency content service.
//!
//! Exposes the modules that back the public site renderer, the admin JSON
//! API, and the auxiliary binaries (sitemap generation, integrity scan).

pub mod audit;
pub mod config;
pub mod content;
pub mod diagnostics;
pub mod http;
pub mod i18n;
pub mod ordering;
pub mod routing;
pub mod security;
pub mod seo;
pub mod settings;
pub mod sitemap;
pub mod store;
pub mod translation;
