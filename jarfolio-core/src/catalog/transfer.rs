//! Import/export merger
//!
//! The catalog round-trips through a portable JSON document shaped
//! `{ "items": [...] }` - the same shape as the persisted snapshot.
//! Import is the one place where a malformed document is surfaced loudly
//! to the caller instead of degrading; the catalog is left untouched on
//! any failure.

use thiserror::Error;

use super::entry::{Catalog, CatalogEntry};
use super::store::CatalogStore;

/// Why an import was rejected.
#[derive(Debug, Error)]
pub enum TransferError {
    /// The document is not well-formed JSON at all.
    #[error("Failed to parse import document as JSON")]
    Parse(#[source] serde_json::Error),

    /// Well-formed JSON, but not the expected `{ "items": [...] }` shape.
    #[error("Invalid import document: expected an object with an `items` array")]
    Format,

    /// The merged catalog could not be persisted; the in-memory catalog
    /// was rolled back.
    #[error("Failed to persist merged catalog")]
    Persist(#[source] anyhow::Error),
}

/// Serialize the catalog to the portable export document.
///
/// Suitable for round-tripping back through [`import_and_merge`] and
/// through snapshot load.
pub fn export_snapshot(catalog: &Catalog) -> anyhow::Result<String> {
    serde_json::to_string_pretty(catalog).map_err(Into::into)
}

/// Validate an externally supplied document and merge it into the store.
///
/// Imported entries are prepended ahead of the existing ones, with no
/// deduplication, no id reassignment, and no digest recomputation. Returns
/// the number of entries merged. On any error the catalog - in memory and
/// on disk - is unmodified.
pub fn import_and_merge(
    store: &mut CatalogStore,
    document: &str,
) -> Result<usize, TransferError> {
    let value: serde_json::Value =
        serde_json::from_str(document).map_err(TransferError::Parse)?;

    let items = value
        .get("items")
        .and_then(|v| v.as_array())
        .ok_or(TransferError::Format)?;

    let entries: Vec<CatalogEntry> =
        serde_json::from_value(serde_json::Value::Array(items.clone()))
            .map_err(|_| TransferError::Format)?;

    let count = entries.len();
    store.prepend_all(entries).map_err(TransferError::Persist)?;

    tracing::debug!("Imported {} entries", count);
    Ok(count)
}
