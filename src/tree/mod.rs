//! The merkle tree engine: leaf encoding, layered construction, proof
//! extraction and standalone proof verification

pub mod encode;
pub mod merkle;
pub mod proof;

// Re-export commonly used items
pub use encode::{EncodeMode, LeafEncoder, LeafRecord};
pub use merkle::{MerkleTree, Node, NodeId, OddNodePolicy, TreeOptions};
pub use proof::{verify_proof, MerkleProof};
