//! Reward-distribution records
//!
//! The claim schema the engine is used with in practice: one entitlement per
//! recipient, committed on-chain as `(uint256 index, address account,
//! uint256 amount)`. Loading distribution files and submitting claims are the
//! callers' concern; this module only models the records and the proof
//! payload handed to the claim verifier.

use crate::core::{error::*, types::Hash};
use crate::tree::encode::{EncodeMode, LeafRecord};
use crate::tree::merkle::{MerkleTree, OddNodePolicy, TreeOptions};
use crate::tree::proof::MerkleProof;
use alloy_dyn_abi::DynSolValue;
use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

/// ABI type signature of one claim, in field order
pub const CLAIM_TYPE_SIGNATURE: [&str; 3] = ["uint256", "address", "uint256"];

/// One claimable entitlement: index, recipient and amount
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    /// Position of the claim in the distribution
    pub index: u64,
    /// Recipient address
    #[serde(rename = "address")]
    pub account: Address,
    /// Token amount, rendered as a hex quantity in JSON
    pub amount: U256,
}

impl Claim {
    /// Create a new claim
    pub fn new(index: u64, account: Address, amount: U256) -> Self {
        Self {
            index,
            account,
            amount,
        }
    }

    /// The claim as an ordered leaf record, matching
    /// [`CLAIM_TYPE_SIGNATURE`]
    pub fn record(&self) -> LeafRecord {
        LeafRecord::new(vec![
            DynSolValue::Uint(U256::from(self.index), 256),
            DynSolValue::Address(self.account),
            DynSolValue::Uint(self.amount, 256),
        ])
    }
}

impl From<&Claim> for LeafRecord {
    fn from(claim: &Claim) -> Self {
        claim.record()
    }
}

/// An ordered reward distribution: the full claim set a tree commits to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Distribution {
    /// Claims in leaf order
    pub distribution: Vec<Claim>,
}

impl Distribution {
    /// Create a distribution from its ordered claims
    pub fn new(claims: Vec<Claim>) -> Self {
        Self {
            distribution: claims,
        }
    }

    /// The claims as ordered leaf records
    pub fn records(&self) -> Vec<LeafRecord> {
        self.distribution.iter().map(Claim::record).collect()
    }

    /// Construction options for a claim tree: ABI encoding under
    /// [`CLAIM_TYPE_SIGNATURE`] with the given odd-node policy
    pub fn tree_options(policy: OddNodePolicy) -> TreeOptions {
        TreeOptions {
            encoding: EncodeMode::AbiEncoded,
            type_signature: Some(CLAIM_TYPE_SIGNATURE.iter().map(|s| s.to_string()).collect()),
            policy,
        }
    }

    /// Build the merkle tree committing to this distribution
    pub fn build_tree(&self, policy: OddNodePolicy) -> Result<MerkleTree> {
        MerkleTree::build(&self.records(), &Self::tree_options(policy))
    }
}

/// The payload handed to the claim-verification collaborator: the original
/// claim fields plus the proof hashes and the root they verify against
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimProof {
    /// Position of the claim in the distribution
    pub index: u64,
    /// Recipient address
    pub account: Address,
    /// Token amount
    pub amount: U256,
    /// Sibling hashes, leaf-adjacent first
    pub proof: Vec<Hash>,
    /// The published root
    pub root: Hash,
}

impl ClaimProof {
    /// Assemble the payload for one claim from its extracted proof
    pub fn new(claim: &Claim, proof: &MerkleProof) -> Self {
        Self {
            index: claim.index,
            account: claim.account,
            amount: claim.amount,
            proof: proof.siblings.clone(),
            root: proof.root,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> Distribution {
        Distribution::new(vec![
            Claim::new(
                0,
                "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266".parse().unwrap(),
                U256::from(100),
            ),
            Claim::new(
                1,
                "0x70997970c51812dc3a010c7d01b50e0d17dc79c8".parse().unwrap(),
                U256::from(200),
            ),
            Claim::new(
                2,
                "0x3c44cdddb6a900fa2b585dd299e03d12fa4293bc".parse().unwrap(),
                U256::from(300),
            ),
        ])
    }

    #[test]
    fn test_claim_record_matches_signature_arity() {
        let claim = &fixture().distribution[0];
        assert_eq!(claim.record().fields().len(), CLAIM_TYPE_SIGNATURE.len());
    }

    #[test]
    fn test_distribution_json_roundtrip() {
        let dist = fixture();
        let json = serde_json::to_string(&dist).unwrap();
        // the claim schema keys the recipient as "address"
        assert!(json.contains("\"address\""));
        let back: Distribution = serde_json::from_str(&json).unwrap();
        assert_eq!(back, dist);
    }

    #[test]
    fn test_claim_proof_payload() {
        let dist = fixture();
        let tree = dist.build_tree(OddNodePolicy::SelfPair).unwrap();
        let claim = &dist.distribution[1];
        let proof = tree.generate_proof(&claim.record()).unwrap();
        let payload = ClaimProof::new(claim, &proof);

        assert_eq!(payload.index, 1);
        assert_eq!(payload.root, tree.root_hash());
        assert_eq!(payload.proof, proof.siblings);

        let json = serde_json::to_string(&payload).unwrap();
        let back: ClaimProof = serde_json::from_str(&json).unwrap();
        assert_eq!(back, payload);
    }
}
