//! Catalog store and snapshot persistence
//!
//! The store owns the in-memory catalog and writes the whole of it to a
//! single JSON snapshot on every mutation, so storage never trails memory
//! when a mutator returns. It is constructed once at process start and
//! passed by reference; there is no ambient singleton.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use super::entry::{fresh_id, Catalog, CatalogEntry, EntryDraft};
use super::seed::seed_entries;

/// Fixed snapshot file name inside the data directory.
pub const SNAPSHOT_FILE: &str = "jarfolio_v1.json";

/// Owns the catalog and the path of its durable snapshot.
#[derive(Debug)]
pub struct CatalogStore {
    catalog: Catalog,
    path: PathBuf,
}

impl CatalogStore {
    /// Open the store at the default platform data directory.
    pub fn open_default() -> Result<Self> {
        let path = Self::default_snapshot_path()?;
        Self::open(path)
    }

    /// Open the store backed by a specific snapshot file.
    ///
    /// A missing snapshot seeds the demo set and persists it immediately.
    /// An unreadable or unparsable snapshot is fail-soft: it is reported
    /// and treated as "no snapshot", never raised to the caller.
    pub fn open(path: PathBuf) -> Result<Self> {
        let catalog = match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<Catalog>(&content) {
                Ok(catalog) => Some(catalog),
                Err(e) => {
                    tracing::warn!(
                        "Failed to parse snapshot {}: {} - reseeding",
                        path.display(),
                        e
                    );
                    None
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!(
                    "Failed to read snapshot {}: {} - reseeding",
                    path.display(),
                    e
                );
                None
            }
        };

        match catalog {
            Some(catalog) => Ok(Self { catalog, path }),
            None => {
                let mut store = Self {
                    catalog: Catalog {
                        items: seed_entries(),
                    },
                    path,
                };
                store.save()?;
                Ok(store)
            }
        }
    }

    /// Default snapshot location under the platform data directory.
    fn default_snapshot_path() -> Result<PathBuf> {
        let data_dir = directories::ProjectDirs::from("dev", "jarfolio", "jarfolio")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .or_else(|| dirs::data_dir().map(|d| d.join("jarfolio")))
            .context("Could not determine data directory")?;

        Ok(data_dir.join(SNAPSHOT_FILE))
    }

    /// The snapshot file backing this store.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read-only view of the whole catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// All entries, newest first.
    pub fn items(&self) -> &[CatalogEntry] {
        &self.catalog.items
    }

    /// Look up a single entry by id.
    pub fn get(&self, id: &str) -> Option<&CatalogEntry> {
        self.catalog.items.iter().find(|e| e.id == id)
    }

    /// Serialize the entire catalog to the snapshot file.
    ///
    /// Every mutator calls this before returning, keeping storage
    /// consistent with memory.
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create data directory: {}", parent.display())
            })?;
        }

        let content =
            serde_json::to_string_pretty(&self.catalog).context("Failed to serialize catalog")?;

        std::fs::write(&self.path, content)
            .with_context(|| format!("Failed to write snapshot: {}", self.path.display()))?;

        Ok(())
    }

    /// Finalize a draft, prepend it, and persist.
    ///
    /// Returns the stored entry with its assigned id and timestamp.
    pub fn add(&mut self, draft: EntryDraft) -> Result<CatalogEntry> {
        let entry = draft.into_entry(fresh_id(), chrono::Utc::now().timestamp_millis());

        self.catalog.items.insert(0, entry.clone());
        if let Err(e) = self.save() {
            self.catalog.items.remove(0);
            return Err(e);
        }

        tracing::debug!("Added entry '{}' ({})", entry.name, entry.id);
        Ok(entry)
    }

    /// Remove the entry with the given id, persisting only when a removal
    /// actually occurred. Returns whether one did.
    pub fn remove(&mut self, id: &str) -> Result<bool> {
        let Some(index) = self.catalog.items.iter().position(|e| e.id == id) else {
            return Ok(false);
        };

        let removed = self.catalog.items.remove(index);
        if let Err(e) = self.save() {
            self.catalog.items.insert(index, removed);
            return Err(e);
        }

        tracing::debug!("Removed entry '{}' ({})", removed.name, removed.id);
        Ok(true)
    }

    /// Discard the current entries, install the given sequence, persist.
    ///
    /// Used for reset-to-seed and for clearing (empty sequence).
    pub fn replace_all(&mut self, entries: Vec<CatalogEntry>) -> Result<()> {
        let previous = std::mem::replace(&mut self.catalog.items, entries);
        if let Err(e) = self.save() {
            self.catalog.items = previous;
            return Err(e);
        }

        Ok(())
    }

    /// Splice imported entries ahead of the existing ones, persist.
    ///
    /// Imported entries keep their ids and digests untouched.
    pub(crate) fn prepend_all(&mut self, entries: Vec<CatalogEntry>) -> Result<()> {
        let previous = self.catalog.items.clone();

        let mut merged = entries;
        merged.extend(self.catalog.items.drain(..));
        self.catalog.items = merged;

        if let Err(e) = self.save() {
            self.catalog.items = previous;
            return Err(e);
        }

        Ok(())
    }
}
