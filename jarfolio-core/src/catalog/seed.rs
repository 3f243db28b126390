//! Demo seed data
//!
//! Used when no snapshot exists yet (or the one on disk is unreadable):
//! the store installs these three entries and persists them immediately.

use chrono::{Duration, Utc};

use super::entry::{fresh_id, CatalogEntry, EntryDraft};

fn seeded(draft: EntryDraft, days_ago: i64) -> CatalogEntry {
    let added_at = (Utc::now() - Duration::days(days_ago)).timestamp_millis();
    draft.into_entry(fresh_id(), added_at)
}

/// The fixed three-entry demo set.
///
/// Ids and timestamps are generated at call time; the content is fixed, so
/// a reseeded catalog is deterministic in everything callers query against.
pub fn seed_entries() -> Vec<CatalogEntry> {
    vec![
        seeded(
            EntryDraft {
                name: "Sparkle-CLI".to_string(),
                version: "2.1.0".to_string(),
                description: "Fast CLI for file transformations. Compact and battle-tested."
                    .to_string(),
                url: Some("https://example.com/jars/sparkle-cli-2.1.0.jar".to_string()),
                repo: Some("https://github.com/you/sparkle-cli".to_string()),
                license: Some("Apache-2.0".to_string()),
                tags: vec!["cli".to_string(), "utility".to_string()],
                size: 1_432_164,
                ..Default::default()
            },
            10,
        ),
        seeded(
            EntryDraft {
                name: "DB-Connector".to_string(),
                version: "1.4.3".to_string(),
                description: "Lightweight JDBC helper with connection pooling.".to_string(),
                url: Some("https://example.com/jars/db-connector-1.4.3.jar".to_string()),
                repo: Some("https://github.com/you/db-connector".to_string()),
                license: Some("MIT".to_string()),
                tags: vec!["db".to_string(), "jdbc".to_string()],
                size: 654_320,
                ..Default::default()
            },
            30,
        ),
        seeded(
            EntryDraft {
                name: "ImageOps".to_string(),
                version: "0.9.7".to_string(),
                description: "Image processing utilities (resize, crop, filter) for Java apps."
                    .to_string(),
                url: Some("https://example.com/jars/imageops-0.9.7.jar".to_string()),
                repo: Some("https://github.com/you/imageops".to_string()),
                license: Some("BSD-3-Clause".to_string()),
                tags: vec!["image".to_string(), "media".to_string()],
                size: 2_222_331,
                ..Default::default()
            },
            60,
        ),
    ]
}
