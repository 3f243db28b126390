//! Content digest engine
//!
//! Computes SHA-256 digests over raw artifact bytes, used as a
//! tamper-evident fingerprint for locally ingested files.

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::path::Path;

/// Number of hex characters in a rendered SHA-256 digest.
pub const DIGEST_HEX_LEN: usize = 64;

/// Digest a byte slice using SHA-256.
///
/// Returns a lowercase hex string, always [`DIGEST_HEX_LEN`] characters.
pub fn digest_bytes(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Digest a file's contents using SHA-256.
///
/// Reads the whole file asynchronously. Byte-access failures are returned
/// to the caller; ingestion treats them as best-effort (digest left unset),
/// never as a reason to abort.
pub async fn digest_file(path: &Path) -> Result<String> {
    let contents = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read file for hashing: {}", path.display()))?;

    Ok(digest_bytes(&contents))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    // SHA-256 of the ASCII string "hello world"
    const HELLO_WORLD_SHA256: &str =
        "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9";

    #[test]
    fn test_digest_bytes_known_vector() {
        assert_eq!(digest_bytes(b"hello world"), HELLO_WORLD_SHA256);
    }

    #[test]
    fn test_digest_bytes_deterministic() {
        let a = digest_bytes(b"jarfolio test content");
        let b = digest_bytes(b"jarfolio test content");
        assert_eq!(a, b);
    }

    #[test]
    fn test_digest_bytes_differs_for_different_content() {
        assert_ne!(digest_bytes(b"content a"), digest_bytes(b"content b"));
    }

    #[test]
    fn test_digest_is_lowercase_hex() {
        let digest = digest_bytes(b"anything");
        assert_eq!(digest.len(), DIGEST_HEX_LEN);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[tokio::test]
    async fn test_digest_file_matches_digest_bytes() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        temp_file.write_all(b"hello world")?;

        let digest = digest_file(temp_file.path()).await?;
        assert_eq!(digest, HELLO_WORLD_SHA256);

        Ok(())
    }

    #[tokio::test]
    async fn test_digest_file_missing_is_error() {
        let result = digest_file(Path::new("/nonexistent/jarfolio-test-file")).await;
        assert!(result.is_err());
    }
}
