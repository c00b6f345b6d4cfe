//! Fire-and-forget audit logging.
//!
//! Every admin write is described in the append-only `audit_logs`
//! collection. Audit writes are a best-effort side channel: they are spawned
//! off the primary operation and a failure is logged but never propagated,
//! so a broken audit path cannot block or roll back content writes.

use crate::store::{collections, DocumentStore};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    Create,
    Update,
    Delete,
    Login,
    Logout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditModule {
    Auth,
    Team,
    Projects,
    Services,
    Blog,
    Settings,
    Contact,
    Jobs,
    Users,
    Testimonials,
    Faqs,
}

impl AuditModule {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditModule::Auth => "auth",
            AuditModule::Team => "team",
            AuditModule::Projects => "projects",
            AuditModule::Services => "services",
            AuditModule::Blog => "blog",
            AuditModule::Settings => "settings",
            AuditModule::Contact => "contact",
            AuditModule::Jobs => "jobs",
            AuditModule::Users => "users",
            AuditModule::Testimonials => "testimonials",
            AuditModule::Faqs => "faqs",
        }
    }
}

/// Immutable audit record. Never updated or deleted through normal flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLogEntry {
    pub action: AuditAction,
    pub module: AuditModule,
    pub description: String,
    pub performed_by: String,
    #[serde(default)]
    pub metadata: Value,
    pub timestamp: String,
}

/// Map a collection name to the audit module it belongs to.
///
/// Returns `None` for collections that are not audited (including the audit
/// log itself).
pub fn module_for_collection(collection: &str) -> Option<AuditModule> {
    match collection {
        collections::SITE_SETTINGS | collections::SETTINGS | collections::CONTACT_SETTINGS => {
            Some(AuditModule::Settings)
        }
        collections::PROJECTS => Some(AuditModule::Projects),
        collections::SERVICES => Some(AuditModule::Services),
        collections::TEAM_MEMBERS => Some(AuditModule::Team),
        collections::TESTIMONIALS => Some(AuditModule::Testimonials),
        collections::FAQS => Some(AuditModule::Faqs),
        collections::JOBS => Some(AuditModule::Jobs),
        collections::BLOG_POSTS => Some(AuditModule::Blog),
        collections::USERS => Some(AuditModule::Users),
        _ => None,
    }
}

/// Writes audit entries on the runtime without blocking the caller.
#[derive(Clone)]
pub struct AuditLogger {
    store: DocumentStore,
}

impl AuditLogger {
    pub fn new(store: DocumentStore) -> Self {
        Self { store }
    }

    /// Record an action. Fire-and-forget: the write happens on a spawned
    /// task and a failure only produces a warning.
    pub fn log(
        &self,
        action: AuditAction,
        module: AuditModule,
        description: impl Into<String>,
        performed_by: impl Into<String>,
        metadata: Value,
    ) {
        let entry = AuditLogEntry {
            action,
            module,
            description: description.into(),
            performed_by: performed_by.into(),
            metadata,
            timestamp: Utc::now().to_rfc3339(),
        };

        let store = self.store.clone();
        tokio::spawn(async move {
            let value = match serde_json::to_value(&entry) {
                Ok(value) => value,
                Err(e) => {
                    warn!("Failed to serialize audit log entry: {}", e);
                    return;
                }
            };
            if let Err(e) = store.create(collections::AUDIT_LOGS, &value) {
                warn!("Failed to create audit log: {}", e);
            }
        });
    }
}

/// Store handle whose mutating operations also produce audit entries.
///
/// Reads pass through untouched. Writes to collections with no audit module
/// are performed but not logged (with a warning, so a schema change that
/// adds a collection is noticed).
#[derive(Clone)]
pub struct AuditedStore {
    store: DocumentStore,
    logger: AuditLogger,
    performed_by: String,
}

impl AuditedStore {
    pub fn new(store: DocumentStore, logger: AuditLogger, performed_by: impl Into<String>) -> Self {
        Self {
            store,
            logger,
            performed_by: performed_by.into(),
        }
    }

    pub fn inner(&self) -> &DocumentStore {
        &self.store
    }

    pub fn create(&self, collection: &str, data: &Value) -> Result<String, crate::store::StoreError> {
        let id = self.store.create(collection, data)?;
        self.log_write(
            AuditAction::Create,
            collection,
            &id,
            format!("Created new item in {}", collection),
            json!({ "collection": collection, "id": id }),
        );
        Ok(id)
    }

    pub fn set(&self, collection: &str, id: &str, data: &Value) -> Result<(), crate::store::StoreError> {
        self.store.set(collection, id, data)?;
        self.log_write(
            AuditAction::Update,
            collection,
            id,
            format!("Updated document in {}", collection),
            json!({ "collection": collection, "id": id }),
        );
        Ok(())
    }

    pub fn update(&self, collection: &str, id: &str, patch: &Value) -> Result<(), crate::store::StoreError> {
        self.store.update(collection, id, patch)?;
        let fields: Vec<&str> = patch
            .as_object()
            .map(|map| map.keys().map(String::as_str).collect())
            .unwrap_or_default();
        self.log_write(
            AuditAction::Update,
            collection,
            id,
            format!("Updated item in {}", collection),
            json!({ "collection": collection, "id": id, "fields": fields }),
        );
        Ok(())
    }

    pub fn delete(&self, collection: &str, id: &str) -> Result<(), crate::store::StoreError> {
        self.store.delete(collection, id)?;
        self.log_write(
            AuditAction::Delete,
            collection,
            id,
            format!("Deleted item from {}", collection),
            json!({ "collection": collection, "id": id }),
        );
        Ok(())
    }

    fn log_write(
        &self,
        action: AuditAction,
        collection: &str,
        _id: &str,
        description: String,
        metadata: Value,
    ) {
        match module_for_collection(collection) {
            Some(module) => {
                self.logger
                    .log(action, module, description, self.performed_by.clone(), metadata);
            }
            None => warn!("No audit module for collection '{}', write not logged", collection),
        }
    }
}
