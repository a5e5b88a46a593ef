//! Keccak-256 hashing primitives
//!
//! All digests in the engine come from these three functions, so construction
//! and verification cannot drift apart on the hashing scheme. The pairwise
//! functions concatenate two 32-byte digests and hash the 64 bytes, matching
//! Solidity's `keccak256(abi.encodePacked(bytes32, bytes32))`.

use crate::core::types::Hash;
use alloy_primitives::keccak256;

/// Compute the keccak-256 hash of arbitrary data
pub fn keccak(data: &[u8]) -> Hash {
    Hash::from_bytes(keccak256(data).0)
}

/// Hash two digests concatenated in the given order
pub fn hash_pair(left: &Hash, right: &Hash) -> Hash {
    let mut buf = [0u8; 64];
    buf[..32].copy_from_slice(left.as_bytes());
    buf[32..].copy_from_slice(right.as_bytes());
    keccak(&buf)
}

/// Hash two digests with the smaller one first.
///
/// This is the pairwise ordering rule shared by tree construction and proof
/// verification; equal digests hash as `(a, a)` either way.
pub fn hash_sorted_pair(a: &Hash, b: &Hash) -> Hash {
    if a <= b {
        hash_pair(a, b)
    } else {
        hash_pair(b, a)
    }
}
