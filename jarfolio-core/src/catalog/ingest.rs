//! Ingestion of new entries
//!
//! Two paths into the catalog: a local file (digest computed over its
//! bytes) and a remote reference (size probed via a HEAD request). Both
//! side computations are strictly best-effort: their failure degrades the
//! entry (digest unset, size 0) and never aborts the ingestion itself.

use anyhow::Result;
use reqwest::header::CONTENT_LENGTH;
use std::path::Path;
use std::time::Duration;

use crate::digest::digest_bytes;

use super::entry::{CatalogEntry, EntryDraft};
use super::store::CatalogStore;

/// HTTP timeout for the size probe.
const PROBE_TIMEOUT: Duration = Duration::from_secs(30);

/// Outcome of a best-effort side computation during ingestion.
///
/// `Degraded` carries the reason so callers and tests can assert graceful
/// degradation instead of inferring it from a silently absent value.
#[derive(Debug, Clone, PartialEq)]
pub enum BestEffort<T> {
    Ok(T),
    Degraded(String),
}

impl<T> BestEffort<T> {
    pub fn is_degraded(&self) -> bool {
        matches!(self, BestEffort::Degraded(_))
    }

    /// The degradation reason, if any.
    pub fn reason(&self) -> Option<&str> {
        match self {
            BestEffort::Ok(_) => None,
            BestEffort::Degraded(reason) => Some(reason),
        }
    }
}

/// Result of ingesting a local file.
#[derive(Debug)]
pub struct FileIngest {
    /// The stored entry.
    pub entry: CatalogEntry,
    /// How the digest computation went; `Degraded` leaves `entry.digest`
    /// unset.
    pub digest: BestEffort<String>,
}

/// Result of ingesting a remote reference.
#[derive(Debug)]
pub struct RemoteIngest {
    /// The stored entry.
    pub entry: CatalogEntry,
    /// How the size probe went; `None` when no probe was attempted (no
    /// URL, or size already supplied), `Degraded` leaves `entry.size` at 0.
    pub size_probe: Option<BestEffort<u64>>,
}

impl CatalogStore {
    /// Ingest a local artifact file.
    ///
    /// The entry takes its name from the file stem and its size from the
    /// byte length. Digest computation is best-effort: an unreadable file
    /// still produces an entry, just with no digest.
    pub async fn ingest_local_file(&mut self, path: &Path) -> Result<FileIngest> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let name = path
            .file_stem()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| file_name.clone());

        let (size, digest) = match tokio::fs::read(path).await {
            Ok(bytes) => (bytes.len() as u64, BestEffort::Ok(digest_bytes(&bytes))),
            Err(e) => {
                tracing::warn!("Digest skipped for {}: {}", path.display(), e);
                (0, BestEffort::Degraded(e.to_string()))
            }
        };

        let draft = EntryDraft {
            name,
            description: format!("Uploaded: {file_name}"),
            size,
            digest: match &digest {
                BestEffort::Ok(d) => Some(d.clone()),
                BestEffort::Degraded(_) => None,
            },
            ..Default::default()
        };

        let entry = self.add(draft)?;
        Ok(FileIngest { entry, digest })
    }

    /// Ingest a remote reference from supplied fields.
    ///
    /// When the draft carries a URL and no size, a lightweight HEAD
    /// request probes for a `Content-Length` hint. Any network failure,
    /// non-success status, or unusable header leaves the size at 0.
    pub async fn ingest_remote_reference(&mut self, mut draft: EntryDraft) -> Result<RemoteIngest> {
        let size_probe = match draft.url.as_deref() {
            Some(url) if draft.size == 0 => {
                let probe = probe_remote_size(url).await;
                match &probe {
                    BestEffort::Ok(size) => draft.size = *size,
                    BestEffort::Degraded(reason) => {
                        tracing::warn!("Size probe failed for {}: {}", url, reason);
                    }
                }
                Some(probe)
            }
            _ => None,
        };

        let entry = self.add(draft)?;
        Ok(RemoteIngest { entry, size_probe })
    }
}

/// Probe a URL for a size hint via a metadata-only HEAD request.
async fn probe_remote_size(url: &str) -> BestEffort<u64> {
    let client = match reqwest::Client::builder()
        .user_agent(concat!("jarfolio/", env!("CARGO_PKG_VERSION")))
        .timeout(PROBE_TIMEOUT)
        .build()
    {
        Ok(client) => client,
        Err(e) => return BestEffort::Degraded(format!("Failed to create HTTP client: {e}")),
    };

    let response = match client.head(url).send().await {
        Ok(response) => response,
        Err(e) => return BestEffort::Degraded(e.to_string()),
    };

    if !response.status().is_success() {
        return BestEffort::Degraded(format!("HTTP {}", response.status()));
    }

    response
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse::<u64>().ok())
        .map(BestEffort::Ok)
        .unwrap_or_else(|| BestEffort::Degraded("No usable Content-Length header".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SNAPSHOT_FILE;
    use std::io::Write;
    use tempfile::TempDir;

    fn open_in(temp_dir: &TempDir) -> CatalogStore {
        CatalogStore::open(temp_dir.path().join(SNAPSHOT_FILE)).unwrap()
    }

    // SHA-256 of the ASCII string "hello world"
    const HELLO_WORLD_SHA256: &str =
        "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9";

    #[tokio::test]
    async fn test_ingest_local_file_computes_digest_and_size() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = open_in(&temp_dir);

        let jar_path = temp_dir.path().join("sparkle.jar");
        let mut file = std::fs::File::create(&jar_path).unwrap();
        file.write_all(b"hello world").unwrap();

        let ingested = store.ingest_local_file(&jar_path).await.unwrap();

        assert_eq!(ingested.entry.name, "sparkle");
        assert_eq!(ingested.entry.description, "Uploaded: sparkle.jar");
        assert_eq!(ingested.entry.size, 11);
        assert_eq!(ingested.entry.digest.as_deref(), Some(HELLO_WORLD_SHA256));
        assert_eq!(ingested.digest, BestEffort::Ok(HELLO_WORLD_SHA256.to_string()));

        // The entry landed at the front of the catalog.
        assert_eq!(store.items()[0].id, ingested.entry.id);
    }

    #[tokio::test]
    async fn test_ingest_unreadable_file_degrades_but_still_adds() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = open_in(&temp_dir);
        let before = store.items().len();

        let ingested = store
            .ingest_local_file(&temp_dir.path().join("missing.jar"))
            .await
            .unwrap();

        assert!(ingested.digest.is_degraded());
        assert!(ingested.entry.digest.is_none());
        assert_eq!(ingested.entry.size, 0);
        assert_eq!(ingested.entry.name, "missing");
        assert_eq!(store.items().len(), before + 1);
    }

    #[tokio::test]
    async fn test_ingest_remote_reference_without_url_skips_probe() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = open_in(&temp_dir);

        let ingested = store
            .ingest_remote_reference(EntryDraft {
                name: "NoUrl".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();

        assert!(ingested.size_probe.is_none());
        assert_eq!(ingested.entry.size, 0);
    }

    #[tokio::test]
    async fn test_ingest_remote_reference_probe_failure_is_nonfatal() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = open_in(&temp_dir);
        let before = store.items().len();

        // Not a fetchable URL; the probe must degrade, not abort.
        let ingested = store
            .ingest_remote_reference(EntryDraft {
                name: "Unreachable".to_string(),
                url: Some("not a url at all".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        let probe = ingested.size_probe.expect("probe should be attempted");
        assert!(probe.is_degraded());
        assert!(probe.reason().is_some());
        assert_eq!(ingested.entry.size, 0);
        assert_eq!(store.items().len(), before + 1);
    }

    #[tokio::test]
    async fn test_ingest_remote_reference_keeps_supplied_size() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = open_in(&temp_dir);

        let ingested = store
            .ingest_remote_reference(EntryDraft {
                name: "Sized".to_string(),
                url: Some("https://example.com/sized.jar".to_string()),
                size: 4242,
                ..Default::default()
            })
            .await
            .unwrap();

        // A caller-supplied size short-circuits the probe entirely.
        assert!(ingested.size_probe.is_none());
        assert_eq!(ingested.entry.size, 4242);
    }
}
