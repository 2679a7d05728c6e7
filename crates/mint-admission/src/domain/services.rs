//! # Domain Services
//!
//! Pure hashing helpers shared by the allowlist and role identifiers.
//! Deterministic, no side effects.

use crate::domain::value_objects::{Address, Hash};
use sha3::{Digest, Keccak256};

/// Computes Keccak-256 of arbitrary bytes.
#[must_use]
pub fn keccak256(data: &[u8]) -> Hash {
    let digest = Keccak256::digest(data);
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest);
    Hash::new(out)
}

/// Allowlist leaf for an address: `keccak256(address)` over the raw 20 bytes.
#[must_use]
pub fn leaf_hash(address: &Address) -> Hash {
    keccak256(address.as_bytes())
}

/// Hashes two nodes in canonical order: `keccak256(min(a, b) || max(a, b))`.
///
/// Sorting the operands makes the parent independent of sibling position,
/// so proofs carry no left/right flags.
#[must_use]
pub fn hash_pair(a: &Hash, b: &Hash) -> Hash {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    let mut hasher = Keccak256::new();
    hasher.update(lo.as_bytes());
    hasher.update(hi.as_bytes());
    let mut out = [0u8; 32];
    out.copy_from_slice(&hasher.finalize());
    Hash::new(out)
}
