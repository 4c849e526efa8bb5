//! Prompt helpers for hashing and tracking prompt versions.

use sha2::{Digest, Sha256};

/// Compute a stable SHA-256 fingerprint for a prompt string.
pub fn prompt_fingerprint(prompt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(prompt.as_bytes());
    let digest = hasher.finalize();
    let mut hex = String::with_capacity(digest.len() * 2);
    for byte in digest {
        hex.push_str(&format!("{:02x}", byte));
    }
    hex
}

#[cfg(test)]
mod tests {
    use super::prompt_fingerprint;

    #[test]
    fn test_fingerprint_stable() {
        let first = prompt_fingerprint("detect the subject");
        let second = prompt_fingerprint("detect the subject");
        let different = prompt_fingerprint("solve the question");

        assert_eq!(first, second);
        assert_ne!(first, different);
    }
}
