//! Subscription-backed settings service.
//!
//! Typed read-only snapshots of the three singleton settings documents
//! (`site_settings/main`, `settings/seo`, `contact_settings/main`). The
//! service is built once at startup and passed through composition; views
//! that need live updates clone a watch receiver and drop it when they go
//! away. Snapshots may be delivered repeatedly; consumers read the current
//! value and must not assume each delivery is distinct.

use crate::content::{ContactSettings, SiteSettings};
use crate::seo::{SeoResolver, SeoSettings};
use crate::store::{collections, DocumentStore};
use anyhow::Result;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::watch;
use tracing::warn;

#[derive(Clone)]
pub struct SettingsService {
    site: watch::Receiver<Option<Value>>,
    contact: watch::Receiver<Option<Value>>,
    seo: watch::Receiver<Option<Value>>,
}

impl SettingsService {
    /// Attach to the store's singleton documents.
    pub fn new(store: &DocumentStore) -> Result<Self> {
        Ok(Self {
            site: store.watch(collections::SITE_SETTINGS, collections::MAIN)?,
            contact: store.watch(collections::CONTACT_SETTINGS, collections::MAIN)?,
            seo: store.watch(collections::SETTINGS, collections::SEO)?,
        })
    }

    /// Current site settings snapshot.
    pub fn site(&self) -> SiteSettings {
        snapshot(&self.site, "site_settings/main")
    }

    /// Current contact settings snapshot.
    pub fn contact(&self) -> ContactSettings {
        snapshot(&self.contact, "contact_settings/main")
    }

    /// Current SEO settings snapshot.
    pub fn seo(&self) -> SeoSettings {
        snapshot(&self.seo, "settings/seo")
    }

    /// A resolver over the current SEO settings snapshot.
    pub fn seo_resolver(&self) -> SeoResolver {
        SeoResolver::new(self.seo())
    }

    /// Subscribe to raw site-settings snapshots (for live-updating views).
    /// Dropping the receiver detaches cleanly.
    pub fn subscribe_site(&self) -> watch::Receiver<Option<Value>> {
        self.site.clone()
    }

    /// Subscribe to raw SEO-settings snapshots.
    pub fn subscribe_seo(&self) -> watch::Receiver<Option<Value>> {
        self.seo.clone()
    }
}

/// Parse the current snapshot, falling back to the default shape when the
/// document is missing or does not parse. A malformed settings document
/// must never take the public site down.
fn snapshot<T: DeserializeOwned + Default>(rx: &watch::Receiver<Option<Value>>, name: &str) -> T {
    match rx.borrow().clone() {
        None => T::default(),
        Some(value) => match serde_json::from_value(value) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("Malformed {} document, using defaults: {}", name, e);
                T::default()
            }
        },
    }
}
