//! Hash-based commitments.
//!
//! A commitment to a string `value` is the pair `(key, digest)` where `key`
//! is 256 fresh random bits rendered as lowercase hex and
//! `digest = hex(SHA-256(key || value))`.  Publishing the digest binds the
//! committer to `value` (a second opening would be a SHA-256 collision);
//! revealing the key opens it.  The random key is the only source of hiding.

use crate::graph::Color;
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Number of random bytes in a commitment key.
pub const KEY_BYTES: usize = 32;

/// A single commitment: the opening key and the published digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commitment {
    /// Hex-encoded random key, revealed when opening.
    pub key: String,
    /// Hex-encoded SHA-256 digest of `key || value`.
    pub digest: String,
}

fn digest_hex(key: &str, value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(key.as_bytes());
    hasher.update(value.as_bytes());
    hex::encode(hasher.finalize())
}

/// Commits to `value` using keys drawn from `rng`.
pub fn commit_with<R: RngCore + CryptoRng>(rng: &mut R, value: &str) -> Commitment {
    let mut key_bytes = [0u8; KEY_BYTES];
    rng.fill_bytes(&mut key_bytes);
    let key = hex::encode(key_bytes);
    let digest = digest_hex(&key, value);
    Commitment { key, digest }
}

/// Commits to `value` with a key from the operating system RNG.
pub fn commit(value: &str) -> Commitment {
    commit_with(&mut OsRng, value)
}

/// Returns `true` when `(key, value)` opens `digest`.
///
/// Any mismatch, including a malformed digest, yields `false`.
pub fn verify_commitment(digest: &str, key: &str, value: &str) -> bool {
    digest_hex(key, value) == digest
}

/// Commitments to every vertex color of one signing round, indexed by vertex id.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CommitmentTable {
    /// Opening keys, one per vertex.
    pub keys: Vec<String>,
    /// Published digests, one per vertex.
    pub digests: Vec<String>,
}

impl CommitmentTable {
    /// Commits to each color in order.
    pub fn commit_colors<R: RngCore + CryptoRng>(rng: &mut R, colors: &[Color]) -> Self {
        let mut keys = Vec::with_capacity(colors.len());
        let mut digests = Vec::with_capacity(colors.len());
        for color in colors {
            let Commitment { key, digest } = commit_with(rng, color.name());
            keys.push(key);
            digests.push(digest);
        }
        Self { keys, digests }
    }

    /// Number of committed vertices.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` if the table commits to no vertices.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Returns the `(key, digest)` pair for `vertex`, if present.
    ///
    /// Tables received from an untrusted prover may have misaligned arrays;
    /// such vertices have no opening.
    pub fn opening(&self, vertex: usize) -> Option<(&str, &str)> {
        let key = self.keys.get(vertex)?;
        let digest = self.digests.get(vertex)?;
        Some((key.as_str(), digest.as_str()))
    }

    /// Checks that `vertex` opens to `color`.
    pub fn opens_to(&self, vertex: usize, color: Color) -> bool {
        self.opening(vertex)
            .map(|(key, digest)| verify_commitment(digest, key, color.name()))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prng::SeededRng;
    use proptest::prelude::*;

    #[test]
    fn test_key_is_256_bit_hex() {
        let c = commit("blue");
        assert_eq!(c.key.len(), 2 * KEY_BYTES);
        assert!(c.key.chars().all(|ch| ch.is_ascii_hexdigit()));
        assert_eq!(c.digest.len(), 64);
    }

    #[test]
    fn test_known_digest() {
        // sha256("abc")
        assert_eq!(
            digest_hex("a", "bc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_fresh_keys_per_commitment() {
        let a = commit("red");
        let b = commit("red");
        assert_ne!(a.key, b.key);
        assert_ne!(a.digest, b.digest);
    }

    #[test]
    fn test_rejects_wrong_key_and_corrupted_digest() {
        let c = commit("yellow");
        let other = commit("yellow");
        assert!(!verify_commitment(&c.digest, &other.key, "yellow"));
        let mut corrupted = c.digest.clone();
        corrupted.replace_range(0..1, if corrupted.starts_with('0') { "1" } else { "0" });
        assert!(!verify_commitment(&corrupted, &c.key, "yellow"));
        assert!(!verify_commitment("", &c.key, "yellow"));
    }

    #[test]
    fn test_table_opening_bounds() {
        let mut rng = SeededRng::new(1);
        let table = CommitmentTable::commit_colors(&mut rng, &[Color::Blue, Color::Red]);
        assert_eq!(table.len(), 2);
        assert!(table.opens_to(0, Color::Blue));
        assert!(!table.opens_to(0, Color::Red));
        assert!(table.opens_to(1, Color::Red));
        assert!(table.opening(2).is_none());
        assert!(!table.opens_to(2, Color::Blue));
    }

    #[test]
    fn test_misaligned_table_has_no_opening() {
        let mut rng = SeededRng::new(2);
        let mut table = CommitmentTable::commit_colors(&mut rng, &[Color::Blue, Color::Red]);
        table.digests.pop();
        assert!(table.opening(1).is_none());
        assert!(table.opens_to(0, Color::Blue));
    }

    proptest! {
        #[test]
        fn prop_commitment_opens(value in ".*", seed in any::<u64>()) {
            let mut rng = SeededRng::new(seed);
            let c = commit_with(&mut rng, &value);
            prop_assert!(verify_commitment(&c.digest, &c.key, &value));
        }

        #[test]
        fn prop_commitment_binds_value(v1 in ".*", v2 in ".*", seed in any::<u64>()) {
            prop_assume!(v1 != v2);
            let mut rng = SeededRng::new(seed);
            let c = commit_with(&mut rng, &v1);
            prop_assert!(!verify_commitment(&c.digest, &c.key, &v2));
        }
    }
}
