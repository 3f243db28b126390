//! Catalog entry data model
//!
//! One `CatalogEntry` tracks the metadata of a single binary artifact.
//! Entries are open to sparse input: every field carries a serde default so
//! that hand-written or externally produced documents deserialize cleanly.

use serde::{Deserialize, Serialize};

/// The root aggregate: an ordered sequence of entries.
///
/// Insertion order is storage order; newest entries sit at the front.
/// Display order is always a derived view (see [`crate::catalog::view`]),
/// never the stored sequence itself.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    /// All tracked entries, newest first.
    #[serde(default)]
    pub items: Vec<CatalogEntry>,
}

/// One tracked artifact's metadata record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    /// Opaque unique identifier, generated at creation, immutable
    #[serde(default = "fresh_id")]
    pub id: String,

    /// Artifact name
    #[serde(default = "default_name")]
    pub name: String,

    /// Version string
    #[serde(default)]
    pub version: String,

    /// Free-text description
    #[serde(default)]
    pub description: String,

    /// Maven-style group coordinate, used for snippet generation
    #[serde(default)]
    pub group_id: String,

    /// Maven-style artifact coordinate, used for snippet generation
    #[serde(default)]
    pub artifact_id: String,

    /// Searchable tags; order preserved, duplicates not enforced away
    #[serde(default)]
    pub tags: Vec<String>,

    /// Remote reference or locally scoped location of the artifact
    #[serde(default)]
    pub url: Option<String>,

    /// Source repository URL
    #[serde(default)]
    pub repo: Option<String>,

    /// License identifier
    #[serde(default)]
    pub license: Option<String>,

    /// Artifact size in bytes; 0 when unknown
    #[serde(default)]
    pub size: u64,

    /// SHA-256 content digest (64 lowercase hex chars), unset until
    /// computed. Never recomputed or invalidated once present.
    #[serde(default)]
    pub digest: Option<String>,

    /// Creation timestamp, milliseconds since epoch; never mutated
    #[serde(default)]
    pub added_at: i64,
}

/// Input to [`crate::catalog::CatalogStore::add`]: an entry before the store
/// assigns its identity and timestamp.
#[derive(Debug, Clone, Default)]
pub struct EntryDraft {
    pub name: String,
    pub version: String,
    pub description: String,
    pub group_id: String,
    pub artifact_id: String,
    pub tags: Vec<String>,
    pub url: Option<String>,
    pub repo: Option<String>,
    pub license: Option<String>,
    pub size: u64,
    pub digest: Option<String>,
}

impl EntryDraft {
    /// Finalize the draft into a stored entry with the given identity.
    pub(crate) fn into_entry(self, id: String, added_at: i64) -> CatalogEntry {
        CatalogEntry {
            id,
            name: if self.name.is_empty() {
                default_name()
            } else {
                self.name
            },
            version: self.version,
            description: self.description,
            group_id: self.group_id,
            artifact_id: self.artifact_id,
            tags: self.tags,
            url: self.url,
            repo: self.repo,
            license: self.license,
            size: self.size,
            digest: self.digest,
            added_at,
        }
    }
}

impl CatalogEntry {
    /// Render a Maven `<dependency>` declaration for this entry.
    ///
    /// Field defaults are part of the observable contract: missing group
    /// falls back to `com.example`, missing artifact to the lowercased name
    /// with whitespace runs replaced by hyphens, missing version to `1.0.0`.
    pub fn maven_snippet(&self) -> String {
        let group = if self.group_id.is_empty() {
            "com.example"
        } else {
            &self.group_id
        };

        let artifact = if !self.artifact_id.is_empty() {
            self.artifact_id.clone()
        } else {
            let base = if self.name.is_empty() {
                "artifact"
            } else {
                &self.name
            };
            base.to_lowercase().split_whitespace().collect::<Vec<_>>().join("-")
        };

        let version = if self.version.is_empty() {
            "1.0.0"
        } else {
            &self.version
        };

        format!(
            "<dependency>\n  <groupId>{group}</groupId>\n  <artifactId>{artifact}</artifactId>\n  <version>{version}</version>\n</dependency>"
        )
    }

    /// First line of the description, trimmed, for compact display.
    pub fn short_description(&self) -> &str {
        self.description
            .lines()
            .next()
            .unwrap_or(&self.description)
            .trim()
    }
}

/// Generate a fresh collision-resistant entry id.
///
/// UUIDv7 behind an opaque `j_` prefix; the exact algorithm is an
/// implementation detail, only uniqueness is contract.
pub(crate) fn fresh_id() -> String {
    format!("j_{}", uuid::Uuid::now_v7().simple())
}

fn default_name() -> String {
    "Unnamed".to_string()
}

/// Render a byte count for humans: `0 B`, `1.4 KB`, `2.1 MB`, ...
///
/// One decimal place, units up to TB.
pub fn format_bytes(n: u64) -> String {
    if n == 0 {
        return "0 B".to_string();
    }

    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

    let mut value = n as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    format!("{} {}", (value * 10.0).round() / 10.0, UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_fresh_ids_are_unique() {
        let ids: std::collections::HashSet<String> = (0..1000).map(|_| fresh_id()).collect();
        assert_eq!(ids.len(), 1000);
        assert!(ids.iter().all(|id| id.starts_with("j_")));
    }

    #[test]
    fn test_sparse_document_deserializes_with_defaults() {
        let entry: CatalogEntry = serde_json::from_str(r#"{"name":"X"}"#).unwrap();

        assert_eq!(entry.name, "X");
        assert!(!entry.id.is_empty());
        assert_eq!(entry.version, "");
        assert_eq!(entry.size, 0);
        assert_eq!(entry.digest, None);
        assert_eq!(entry.added_at, 0);
        assert!(entry.tags.is_empty());
    }

    #[test]
    fn test_wire_names_are_camel_case() {
        let entry: CatalogEntry = serde_json::from_str(
            r#"{"name":"X","groupId":"org.x","artifactId":"x-core","addedAt":1000}"#,
        )
        .unwrap();
        assert_eq!(entry.group_id, "org.x");
        assert_eq!(entry.artifact_id, "x-core");
        assert_eq!(entry.added_at, 1000);

        let json = serde_json::to_value(&entry).unwrap();
        assert!(json.get("groupId").is_some());
        assert!(json.get("addedAt").is_some());
        assert!(json.get("group_id").is_none());
    }

    #[test]
    fn test_draft_defaults_name() {
        let entry = EntryDraft::default().into_entry(fresh_id(), 42);
        assert_eq!(entry.name, "Unnamed");
        assert_eq!(entry.added_at, 42);
    }

    #[test]
    fn test_maven_snippet_all_defaults() {
        let entry = EntryDraft {
            name: "Sparkle CLI".to_string(),
            ..Default::default()
        }
        .into_entry(fresh_id(), 0);

        assert_eq!(
            entry.maven_snippet(),
            "<dependency>\n  <groupId>com.example</groupId>\n  <artifactId>sparkle-cli</artifactId>\n  <version>1.0.0</version>\n</dependency>"
        );
    }

    #[test]
    fn test_maven_snippet_explicit_coordinates() {
        let entry = EntryDraft {
            name: "DB-Connector".to_string(),
            version: "1.4.3".to_string(),
            group_id: "org.acme".to_string(),
            artifact_id: "db-connector".to_string(),
            ..Default::default()
        }
        .into_entry(fresh_id(), 0);

        let snippet = entry.maven_snippet();
        assert!(snippet.contains("<groupId>org.acme</groupId>"));
        assert!(snippet.contains("<artifactId>db-connector</artifactId>"));
        assert!(snippet.contains("<version>1.4.3</version>"));
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(1024), "1 KB");
        assert_eq!(format_bytes(1432164), "1.4 MB");
        assert_eq!(format_bytes(654320), "639.1 KB");
    }
}
