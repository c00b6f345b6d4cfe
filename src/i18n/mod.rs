//! Internationalization (i18n) module for multi-language support.
//!
//! This module provides a centralized architecture for managing the five
//! public-site languages. All language-related logic and the localized
//! string shape used by content records is contained here.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for all supported languages and their metadata
//! - `language`: Type-safe Language type validated against the registry
//! - `localized`: The `{lang: text}` mapping used by every human-facing field
//!
//! # Example
//!
//! ```rust,ignore
//! use agency_cms::i18n::{Language, LanguageRegistry};
//!
//! // Get canonical language (English)
//! let canonical = Language::canonical();
//!
//! // Create language from code
//! let dutch = Language::from_code("nl")?;
//!
//! // List all enabled languages
//! let languages = LanguageRegistry::get().list_enabled();
//! ```

mod language;
mod localized;
mod registry;

pub use language::Language;
pub use localized::{resolve_field, LocalizedString, LocalizedText};
pub use registry::{LanguageConfig, LanguageRegistry};
