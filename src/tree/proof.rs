//! Inclusion proofs and standalone verification

use crate::core::{error::*, hash::hash_sorted_pair, types::Hash};
use serde::{Deserialize, Serialize};

/// An inclusion proof for one leaf: the ordered sibling hashes from the
/// leaf-adjacent level up to the root-adjacent level, plus the leaf and root
/// digests it was extracted against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerkleProof {
    /// The leaf hash the proof was extracted for
    pub leaf: Hash,
    /// The root the proof commits to
    pub root: Hash,
    /// Sibling hashes, leaf-adjacent first
    pub siblings: Vec<Hash>,
}

impl MerkleProof {
    /// Assemble a proof from its parts
    pub fn new(leaf: Hash, root: Hash, siblings: Vec<Hash>) -> Self {
        Self {
            leaf,
            root,
            siblings,
        }
    }

    /// Verify this proof against its own root and leaf
    pub fn verify(&self) -> bool {
        verify_proof(&self.siblings, self.root, self.leaf)
    }

    /// Serialize to JSON for handing to an external verifier
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(DistributorError::JsonSerialization)
    }

    /// Deserialize from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(DistributorError::JsonSerialization)
    }
}

/// Recompute a candidate root from `leaf` and the proof's sibling hashes and
/// compare it to `root`.
///
/// Standalone by design: a verifier holding only the published root, the
/// claimed leaf hash and the proof needs no tree instance. Each step hashes
/// the running digest with the next sibling in `(smaller, larger)` order, the
/// same pairwise ordering rule construction uses. A mismatched proof returns
/// `false`, never an error.
pub fn verify_proof(siblings: &[Hash], root: Hash, leaf: Hash) -> bool {
    let mut running = leaf;
    for sibling in siblings {
        running = hash_sorted_pair(&running, sibling);
    }
    running == root
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::hash::keccak;

    #[test]
    fn test_empty_proof_requires_leaf_equal_root() {
        let leaf = keccak(b"leaf");
        assert!(verify_proof(&[], leaf, leaf));
        assert!(!verify_proof(&[], keccak(b"other"), leaf));
    }

    #[test]
    fn test_single_step_proof() {
        let leaf = keccak(b"leaf");
        let sibling = keccak(b"sibling");
        let root = hash_sorted_pair(&leaf, &sibling);
        assert!(verify_proof(&[sibling], root, leaf));
        // the sibling proves inclusion against the same root
        assert!(verify_proof(&[leaf], root, sibling));
        // but not against a different one
        assert!(!verify_proof(&[sibling], keccak(b"bogus"), leaf));
    }

    #[test]
    fn test_malformed_hash_in_json_is_an_error() {
        let json = r#"{"leaf":"0x6a2c","root":"not hex","siblings":[]}"#;
        let err = MerkleProof::from_json(json).unwrap_err();
        assert!(matches!(err, DistributorError::JsonSerialization(_)));
    }

    #[test]
    fn test_json_roundtrip() {
        let proof = MerkleProof::new(
            keccak(b"leaf"),
            keccak(b"root"),
            vec![keccak(b"s0"), keccak(b"s1")],
        );
        let json = proof.to_json().unwrap();
        // hashes serialize as canonical 0x-prefixed hex
        assert!(json.contains(&proof.leaf.to_hex()));
        assert_eq!(MerkleProof::from_json(&json).unwrap(), proof);
    }
}
