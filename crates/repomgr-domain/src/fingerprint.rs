use sha2::{Digest, Sha256};

/// Compute a stable SHA-256 fingerprint for a warning.
///
/// Identity fields:
/// - repository name (as written in the spec)
/// - warning text
pub fn fingerprint_for_warning(repo_name: &str, warning: &str) -> String {
    let canonical = [repo_name, warning].join("|");

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    let digest = hasher.finalize();
    hex::encode(digest)
}
