//! On-demand data integrity scan.
//!
//! The store enforces no schema, so the invariants of the content model are
//! advisory. This scan walks a fixed set of collections and flags what the
//! write paths should have prevented: missing `order` fields, serialization
//! artifacts leaked into display strings, and project categories that name
//! no known service. It is pull-based tooling, re-run manually; the only
//! automatic fix offered is `repair_order`, which reassigns sequential
//! order values to one collection.

use crate::store::{collections, BatchOp, DocumentStore, StoreError};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;
use tracing::info;

/// Collections covered by the scan (every admin-managed content list).
const SCANNED_COLLECTIONS: &[&str] = &[
    collections::PROJECTS,
    collections::SERVICES,
    collections::TEAM_MEMBERS,
    collections::TESTIMONIALS,
    collections::FAQS,
    collections::JOBS,
    collections::BLOG_POSTS,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Warning,
}

#[derive(Debug, Clone, Serialize)]
pub struct Issue {
    pub severity: Severity,
    pub collection: String,
    pub doc_id: String,
    pub description: String,
}

/// Scan the fixed collections and return a flat list of issues.
///
/// Nothing is fixed here; the scan only reports.
pub fn scan(store: &DocumentStore) -> Result<Vec<Issue>, StoreError> {
    let mut issues = Vec::new();

    let service_ids: HashSet<String> = store
        .list(collections::SERVICES)?
        .into_iter()
        .map(|doc| doc.id)
        .collect();

    for &collection in SCANNED_COLLECTIONS {
        for doc in store.list(collection)? {
            if doc.data.get("order").and_then(Value::as_i64).is_none() {
                issues.push(Issue {
                    severity: Severity::Warning,
                    collection: collection.to_string(),
                    doc_id: doc.id.clone(),
                    description: "Missing or non-integer 'order' field".to_string(),
                });
            }

            for (field, text) in text_fields(&doc.data) {
                if is_corrupted_text(&text) {
                    issues.push(Issue {
                        severity: Severity::Critical,
                        collection: collection.to_string(),
                        doc_id: doc.id.clone(),
                        description: format!(
                            "Field '{}' contains a serialization artifact: {}",
                            field,
                            truncate(&text, 60)
                        ),
                    });
                }
            }

            if collection == collections::PROJECTS {
                let category = doc
                    .data
                    .get("category")
                    .and_then(Value::as_str)
                    .unwrap_or("");
                if category.is_empty() {
                    issues.push(Issue {
                        severity: Severity::Warning,
                        collection: collection.to_string(),
                        doc_id: doc.id.clone(),
                        description: "Project has no category".to_string(),
                    });
                } else if !service_ids.contains(category) {
                    issues.push(Issue {
                        severity: Severity::Critical,
                        collection: collection.to_string(),
                        doc_id: doc.id.clone(),
                        description: format!(
                            "Project category '{}' does not match any service id",
                            category
                        ),
                    });
                }
            }
        }
    }

    info!("Integrity scan found {} issue(s)", issues.len());
    Ok(issues)
}

/// Reassign sequential `order` values (1..N, by creation time) to every
/// document in a collection, as a single all-or-nothing batch.
///
/// This is the one repair the tooling performs automatically; everything
/// else the scan reports has to be fixed by hand.
pub fn repair_order(store: &DocumentStore, collection: &str) -> Result<usize, StoreError> {
    let documents = store.list(collection)?;
    let ops: Vec<BatchOp> = documents
        .iter()
        .enumerate()
        .map(|(index, doc)| BatchOp::Update {
            collection: collection.to_string(),
            id: doc.id.clone(),
            patch: serde_json::json!({ "order": index as i64 + 1 }),
        })
        .collect();
    store.apply_batch(&ops)?;
    info!("Reassigned order for {} document(s) in {}", ops.len(), collection);
    Ok(ops.len())
}

/// Collect the display-string fields of a document: top-level strings and
/// the values of localized mappings.
fn text_fields(data: &Value) -> Vec<(String, String)> {
    let mut fields = Vec::new();
    let Some(map) = data.as_object() else {
        return fields;
    };

    for (key, value) in map {
        match value {
            Value::String(text) => fields.push((key.clone(), text.clone())),
            Value::Object(inner) => {
                for (lang, inner_value) in inner {
                    if let Value::String(text) = inner_value {
                        fields.push((format!("{}.{}", key, lang), text.clone()));
                    }
                }
            }
            _ => {}
        }
    }
    fields
}

/// Detect serialization artifacts leaking into display text.
fn is_corrupted_text(text: &str) -> bool {
    text.contains("[object Object]")
        || text.contains("{\"en\":")
        || text == "undefined"
        || text == "null"
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{}...", cut)
    }
}
