//! Query engine: filtered, sorted views over the catalog
//!
//! `view` is a pure derivation for display. It never mutates the catalog
//! and is safely repeatable; callers re-run it after every mutation.

use super::entry::CatalogEntry;

/// How a view orders its entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Ascending by name, case-insensitive.
    Alpha,
    /// Descending by size in bytes.
    Size,
    /// Descending by creation timestamp.
    #[default]
    Recent,
}

/// Derive a filtered, sorted view of the catalog.
///
/// Filtering is a single case-insensitive substring check of the trimmed
/// query against the entry's searchable text; an empty query matches
/// everything. Sorts are stable, so ties keep catalog order. An empty
/// result is a normal value, not an error.
pub fn view<'a>(
    items: &'a [CatalogEntry],
    query: &str,
    sort: SortMode,
) -> Vec<&'a CatalogEntry> {
    let needle = query.trim().to_lowercase();

    let mut filtered: Vec<&CatalogEntry> = items
        .iter()
        .filter(|entry| needle.is_empty() || haystack(entry).contains(&needle))
        .collect();

    match sort {
        SortMode::Alpha => {
            filtered.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        }
        SortMode::Size => filtered.sort_by(|a, b| b.size.cmp(&a.size)),
        SortMode::Recent => filtered.sort_by(|a, b| b.added_at.cmp(&a.added_at)),
    }

    filtered
}

/// The searchable text of an entry: name, description, tags, and both
/// Maven coordinates. Absent coordinates contribute empty strings.
fn haystack(entry: &CatalogEntry) -> String {
    format!(
        "{} {} {} {} {}",
        entry.name,
        entry.description,
        entry.tags.join(" "),
        entry.group_id,
        entry.artifact_id
    )
    .to_lowercase()
}
