//! Ordered-collection reconciliation.
//!
//! Records in admin-reorderable lists carry an integer `order` field. A
//! drag-reorder submits the full new sequence (every visible item, not just
//! the moved one) and is persisted as one all-or-nothing batch that sets
//! `order = position + 1` for every item. After a successful write the
//! collection's order values are exactly `{1..N}` for the displayed
//! sequence.
//!
//! On a failed batch the caller must re-fetch the authoritative list rather
//! than retry blindly; the failure mode being guarded against is silent
//! divergence between the displayed and persisted order. Two operators
//! reordering the same list race as last-writer-wins, which is accepted.
//! Deletion never compacts the remaining order values; the gap stands until
//! the diagnostics repair pass runs.

use crate::store::{BatchOp, Document, DocumentStore, StoreError};
use serde_json::{json, Value};

/// Read the `order` field of a document, treating a missing or non-integer
/// value as 0 (legacy records predate the field).
pub fn order_of(data: &Value) -> i64 {
    data.get("order").and_then(Value::as_i64).unwrap_or(0)
}

/// Sort documents into display order. Ties keep their creation order
/// (`list` returns creation order, and the sort is stable).
pub fn sort_by_order(documents: &mut [Document]) {
    documents.sort_by_key(|doc| order_of(&doc.data));
}

/// The `order` value for a record appended to a list of `len` items.
pub fn next_order(len: usize) -> i64 {
    len as i64 + 1
}

/// Persist a full reordering of a collection.
///
/// `ids` is the complete new sequence. Every item gets
/// `order = position + 1`, committed as a single batch: either the whole
/// sequence lands or nothing changes.
pub fn persist_order(
    store: &DocumentStore,
    collection: &str,
    ids: &[String],
) -> Result<(), StoreError> {
    let ops: Vec<BatchOp> = ids
        .iter()
        .enumerate()
        .map(|(index, id)| BatchOp::Update {
            collection: collection.to_string(),
            id: id.clone(),
            patch: json!({ "order": index as i64 + 1 }),
        })
        .collect();
    store.apply_batch(&ops)
}

/// Fetch a collection in display order.
pub fn list_ordered(store: &DocumentStore, collection: &str) -> Result<Vec<Document>, StoreError> {
    let mut documents = store.list(collection)?;
    sort_by_order(&mut documents);
    Ok(documents)
}
