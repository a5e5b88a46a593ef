//! Merkle Distributor - a keccak-256 merkle tree engine for reward distributions
//!
//! The engine commits to an ordered set of reward records (index, recipient,
//! amount) as a single root hash, extracts per-record inclusion proofs, and
//! verifies a proof against a published root without the tree. Deployment,
//! on-chain claim calls and data loading are external collaborators; this
//! crate is a pure, synchronous library with no I/O surface.
//!
//! # Core Features
//!
//! - **Two leaf encodings**: packed keccak-256 hashing of the record fields,
//!   or canonical ABI encoding against an explicit type signature
//! - **Sorted pairwise hashing**: sibling pairs hash smaller-first, so a
//!   verifier needs no left/right position bits
//! - **Three odd-node policies**: promote, self-pair or front-push a trailing
//!   unpaired node, reproducing the reference trees bit for bit
//! - **Standalone verification**: recompute a root from a leaf hash and its
//!   sibling path with no tree instance at hand
//!
//! # Example Usage
//!
//! ```rust
//! use merkle_distributor::{
//!     Claim, ClaimProof, Distribution, OddNodePolicy, verify_proof,
//! };
//! use alloy_primitives::U256;
//!
//! let distribution = Distribution::new(vec![
//!     Claim::new(0, "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266".parse()?, U256::from(100)),
//!     Claim::new(1, "0x70997970c51812dc3a010c7d01b50e0d17dc79c8".parse()?, U256::from(200)),
//! ]);
//!
//! // Build the tree and publish the root
//! let tree = distribution.build_tree(OddNodePolicy::Promote)?;
//! let root = tree.root_hash();
//!
//! // Extract a proof for one claim and verify it independently
//! let claim = &distribution.distribution[0];
//! let proof = tree.generate_proof(&claim.record())?;
//! assert!(verify_proof(&proof.siblings, root, proof.leaf));
//!
//! // The payload an on-chain verifier receives
//! let payload = ClaimProof::new(claim, &proof);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod core;
pub mod distribution;
pub mod tree;

// Re-export commonly used types
pub use crate::core::{
    error::{DistributorError, Result},
    hash::{hash_pair, hash_sorted_pair, keccak},
    types::Hash,
};

pub use tree::{
    encode::{EncodeMode, LeafEncoder, LeafRecord},
    merkle::{MerkleTree, Node, NodeId, OddNodePolicy, TreeOptions},
    proof::{verify_proof, MerkleProof},
};

pub use distribution::{Claim, ClaimProof, Distribution, CLAIM_TYPE_SIGNATURE};

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
