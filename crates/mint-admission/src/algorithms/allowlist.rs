//! # Allowlist Verifier
//!
//! Merkle inclusion proofs over Keccak-256 with sorted pairs.
//!
//! # Algorithm
//!
//! 1. leaf = keccak256(address)
//! 2. For each proof element: current = keccak256(min(current, e) || max(current, e))
//! 3. Accept iff current == root
//!
//! Sorted pairs mean a proof is just a list of siblings; there is no
//! left/right flag an attacker could flip. The leaf always comes from the
//! caller's own address, so a proof for B submitted by A hashes a different
//! leaf and fails.
//!
//! # Time Complexity: O(proof length)

use crate::domain::services::{hash_pair, leaf_hash};
use crate::domain::value_objects::{Address, Hash};

/// Verifies that `address` is committed to by `root`.
///
/// A zero `root` means no allowlist is configured and every address passes.
#[must_use]
pub fn verify_allowlist_proof(address: &Address, proof: &[Hash], root: &Hash) -> bool {
    if root.is_zero() {
        return true;
    }
    process_proof(leaf_hash(address), proof) == *root
}

/// Folds `proof` upward from `leaf` and returns the reconstructed root.
#[must_use]
pub fn process_proof(leaf: Hash, proof: &[Hash]) -> Hash {
    proof
        .iter()
        .fold(leaf, |current, sibling| hash_pair(&current, sibling))
}

/// Merkle tree over allowlisted addresses.
///
/// Built with the same sorted-pair rule the verifier uses. An odd node at the
/// end of a level moves up unchanged, it is never paired with itself.
#[derive(Clone, Debug)]
pub struct AllowlistTree {
    addresses: Vec<Address>,
    layers: Vec<Vec<Hash>>,
}

impl AllowlistTree {
    /// Builds the tree. Leaf order follows `addresses`.
    #[must_use]
    pub fn from_addresses(addresses: &[Address]) -> Self {
        let leaves: Vec<Hash> = addresses.iter().map(leaf_hash).collect();
        let mut layers = vec![leaves];

        while layers.last().is_some_and(|level| level.len() > 1) {
            let level = &layers[layers.len() - 1];
            let next: Vec<Hash> = level
                .chunks(2)
                .map(|chunk| match chunk.get(1) {
                    Some(right) => hash_pair(&chunk[0], right),
                    None => chunk[0],
                })
                .collect();
            layers.push(next);
        }

        Self {
            addresses: addresses.to_vec(),
            layers,
        }
    }

    /// Commitment to publish as a round's allowlist root.
    ///
    /// Empty tree: `Hash::ZERO`, which the verifier treats as unrestricted.
    #[must_use]
    pub fn root(&self) -> Hash {
        self.layers
            .last()
            .and_then(|top| top.first())
            .copied()
            .unwrap_or(Hash::ZERO)
    }

    /// Number of allowlisted addresses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    /// Returns true if no address is allowlisted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    /// Returns true if `address` is one of the leaves.
    #[must_use]
    pub fn contains(&self, address: &Address) -> bool {
        self.addresses.contains(address)
    }

    /// Sibling path for `address`, or `None` if it is not in the tree.
    #[must_use]
    pub fn proof_for(&self, address: &Address) -> Option<Vec<Hash>> {
        let mut index = self.addresses.iter().position(|a| a == address)?;
        let mut proof = Vec::with_capacity(self.layers.len());

        for level in &self.layers[..self.layers.len().saturating_sub(1)] {
            let sibling = index ^ 1;
            if let Some(hash) = level.get(sibling) {
                proof.push(*hash);
            }
            index /= 2;
        }

        Some(proof)
    }
}
