//! Schemaless document store over SQLite.
//!
//! Documents are JSON objects keyed by `(collection, id)`. The store
//! enforces no schema; shape is a contract between the admin write paths and
//! the public renderers. Mirrors the hosted-store contract the site was
//! built against: CRUD, an all-or-nothing batch, and snapshot subscriptions.

use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;
use uuid::Uuid;

/// Collection names used by the site.
pub mod collections {
    pub const PROJECTS: &str = "projects";
    pub const SERVICES: &str = "services";
    pub const TEAM_MEMBERS: &str = "team_members";
    pub const TESTIMONIALS: &str = "testimonials";
    pub const FAQS: &str = "faqs";
    pub const JOBS: &str = "jobs";
    pub const BLOG_POSTS: &str = "blog_posts";
    pub const AUDIT_LOGS: &str = "audit_logs";
    pub const USERS: &str = "users";
    pub const SITE_SETTINGS: &str = "site_settings";
    pub const SETTINGS: &str = "settings";
    pub const CONTACT_SETTINGS: &str = "contact_settings";

    /// Well-known IDs for the singleton documents.
    pub const MAIN: &str = "main";
    pub const SEO: &str = "seo";
}

/// Typed store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("document {collection}/{id} not found")]
    NotFound { collection: String, id: String },

    #[error("stored document is not valid JSON: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
}

/// A document read back from the store.
#[derive(Debug, Clone)]
pub struct Document {
    pub id: String,
    pub created_at: String,
    pub data: Value,
}

/// One operation in an all-or-nothing batch.
#[derive(Debug, Clone)]
pub enum BatchOp {
    Set {
        collection: String,
        id: String,
        data: Value,
    },
    Update {
        collection: String,
        id: String,
        patch: Value,
    },
    Delete {
        collection: String,
        id: String,
    },
}

type WatchKey = (String, String);

#[derive(Clone)]
pub struct DocumentStore {
    conn: Arc<Mutex<Connection>>,
    watchers: Arc<Mutex<HashMap<WatchKey, watch::Sender<Option<Value>>>>>,
}

impl DocumentStore {
    /// Open (or create) the store at the given path.
    pub fn new(database_path: &str) -> Result<Self> {
        let conn = Connection::open(database_path)
            .context(format!("Failed to open database at {}", database_path))?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS documents (
                collection TEXT NOT NULL,
                id TEXT NOT NULL,
                data TEXT NOT NULL,
                created_at TEXT NOT NULL,
                PRIMARY KEY (collection, id)
            )",
            [],
        )
        .context("Failed to create documents table")?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            watchers: Arc::new(Mutex::new(HashMap::new())),
        })
    }

    /// In-memory store, used by tests and the preview tooling.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory database")?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS documents (
                collection TEXT NOT NULL,
                id TEXT NOT NULL,
                data TEXT NOT NULL,
                created_at TEXT NOT NULL,
                PRIMARY KEY (collection, id)
            )",
            [],
        )?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            watchers: Arc::new(Mutex::new(HashMap::new())),
        })
    }

    /// Read a single document.
    pub fn get(&self, collection: &str, id: &str) -> Result<Option<Value>, StoreError> {
        let conn = self.conn.lock().unwrap();
        let raw: Option<String> = conn
            .query_row(
                "SELECT data FROM documents WHERE collection = ?1 AND id = ?2",
                params![collection, id],
                |row| row.get(0),
            )
            .optional()?;

        match raw {
            Some(text) => Ok(Some(serde_json::from_str(&text)?)),
            None => Ok(None),
        }
    }

    /// List all documents in a collection, oldest first.
    pub fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, data, created_at FROM documents
             WHERE collection = ?1
             ORDER BY created_at, rowid",
        )?;

        let rows = stmt.query_map(params![collection], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?;

        let mut documents = Vec::new();
        for row in rows {
            let (id, raw, created_at) = row?;
            documents.push(Document {
                id,
                created_at,
                data: serde_json::from_str(&raw)?,
            });
        }
        Ok(documents)
    }

    /// Create a document with a generated ID. Returns the new ID.
    pub fn create(&self, collection: &str, data: &Value) -> Result<String, StoreError> {
        let id = Uuid::new_v4().simple().to_string();
        self.set(collection, &id, data)?;
        Ok(id)
    }

    /// Write a document at an explicit ID (upsert). `created_at` is
    /// preserved for existing documents.
    pub fn set(&self, collection: &str, id: &str, data: &Value) -> Result<(), StoreError> {
        {
            let conn = self.conn.lock().unwrap();
            let now = Utc::now().to_rfc3339();
            conn.execute(
                "INSERT INTO documents (collection, id, data, created_at)
                 VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT (collection, id) DO UPDATE SET data = excluded.data",
                params![collection, id, data.to_string(), now],
            )?;
        }
        self.notify(collection, id, Some(data.clone()));
        Ok(())
    }

    /// Shallow-merge `patch` into an existing document.
    ///
    /// Top-level keys in `patch` overwrite the stored values; other keys are
    /// left untouched. Fails with `NotFound` when the document is missing.
    pub fn update(&self, collection: &str, id: &str, patch: &Value) -> Result<(), StoreError> {
        let merged = {
            let conn = self.conn.lock().unwrap();
            let raw: Option<String> = conn
                .query_row(
                    "SELECT data FROM documents WHERE collection = ?1 AND id = ?2",
                    params![collection, id],
                    |row| row.get(0),
                )
                .optional()?;

            let raw = raw.ok_or_else(|| StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            })?;

            let merged = merge_shallow(serde_json::from_str(&raw)?, patch);
            conn.execute(
                "UPDATE documents SET data = ?3 WHERE collection = ?1 AND id = ?2",
                params![collection, id, merged.to_string()],
            )?;
            merged
        };
        self.notify(collection, id, Some(merged));
        Ok(())
    }

    /// Delete a document. Deleting a missing document is not an error.
    pub fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        {
            let conn = self.conn.lock().unwrap();
            conn.execute(
                "DELETE FROM documents WHERE collection = ?1 AND id = ?2",
                params![collection, id],
            )?;
        }
        self.notify(collection, id, None);
        Ok(())
    }

    /// Apply a batch of writes as a single all-or-nothing transaction.
    ///
    /// This is the reorder write path: either every operation lands or none
    /// does. Watchers are notified only after a successful commit.
    pub fn apply_batch(&self, ops: &[BatchOp]) -> Result<(), StoreError> {
        let mut notifications: Vec<(String, String, Option<Value>)> = Vec::new();
        {
            let mut conn = self.conn.lock().unwrap();
            let tx = conn.transaction()?;
            let now = Utc::now().to_rfc3339();

            for op in ops {
                match op {
                    BatchOp::Set { collection, id, data } => {
                        tx.execute(
                            "INSERT INTO documents (collection, id, data, created_at)
                             VALUES (?1, ?2, ?3, ?4)
                             ON CONFLICT (collection, id) DO UPDATE SET data = excluded.data",
                            params![collection, id, data.to_string(), now],
                        )?;
                        notifications.push((collection.clone(), id.clone(), Some(data.clone())));
                    }
                    BatchOp::Update { collection, id, patch } => {
                        let raw: Option<String> = tx
                            .query_row(
                                "SELECT data FROM documents WHERE collection = ?1 AND id = ?2",
                                params![collection, id],
                                |row| row.get(0),
                            )
                            .optional()?;
                        let raw = raw.ok_or_else(|| StoreError::NotFound {
                            collection: collection.clone(),
                            id: id.clone(),
                        })?;
                        let merged = merge_shallow(serde_json::from_str(&raw)?, patch);
                        tx.execute(
                            "UPDATE documents SET data = ?3 WHERE collection = ?1 AND id = ?2",
                            params![collection, id, merged.to_string()],
                        )?;
                        notifications.push((collection.clone(), id.clone(), Some(merged)));
                    }
                    BatchOp::Delete { collection, id } => {
                        tx.execute(
                            "DELETE FROM documents WHERE collection = ?1 AND id = ?2",
                            params![collection, id],
                        )?;
                        notifications.push((collection.clone(), id.clone(), None));
                    }
                }
            }

            tx.commit()?;
        }

        for (collection, id, value) in notifications {
            self.notify(&collection, &id, value);
        }
        Ok(())
    }

    /// Subscribe to snapshots of a single document.
    ///
    /// The receiver is seeded with the current value and updated after every
    /// successful write touching the document. Dropping the receiver
    /// detaches the subscription; the same snapshot may be delivered more
    /// than once, so handlers must be idempotent.
    pub fn watch(&self, collection: &str, id: &str) -> Result<watch::Receiver<Option<Value>>> {
        let current = self.get(collection, id)?;
        let mut watchers = self.watchers.lock().unwrap();
        let sender = watchers
            .entry((collection.to_string(), id.to_string()))
            .or_insert_with(|| watch::channel(current).0);
        Ok(sender.subscribe())
    }

    fn notify(&self, collection: &str, id: &str, value: Option<Value>) {
        let mut watchers = self.watchers.lock().unwrap();
        let key = (collection.to_string(), id.to_string());
        if let Some(sender) = watchers.get(&key) {
            if sender.receiver_count() == 0 {
                // Every receiver is gone; drop the channel. A later watch()
                // re-seeds from the stored document.
                watchers.remove(&key);
            } else {
                // send_replace never fails while a receiver is live.
                sender.send_replace(value);
            }
        }
    }
}

/// Overwrite top-level keys of `base` with the keys of `patch`.
fn merge_shallow(base: Value, patch: &Value) -> Value {
    match (base, patch) {
        (Value::Object(mut base_map), Value::Object(patch_map)) => {
            for (key, value) in patch_map {
                base_map.insert(key.clone(), value.clone());
            }
            Value::Object(base_map)
        }
        // Non-object patches replace the document wholesale.
        (_, patch) => patch.clone(),
    }
}
