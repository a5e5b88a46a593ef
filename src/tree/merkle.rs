//! Merkle tree construction and proof extraction
//!
//! The tree is built bottom-up from the leaf hashes and is immutable after
//! construction. Nodes live in an arena indexed by [`NodeId`]; children hold
//! arena indices and the parent link is a non-owning back index, set exactly
//! once when a node is paired.

use crate::core::{error::*, hash::hash_pair, types::Hash};
use crate::tree::encode::{EncodeMode, LeafEncoder, LeafRecord};
use crate::tree::proof::MerkleProof;
use std::collections::HashMap;
use std::fmt::Write as _;
use tracing::debug;

/// Index of a node in the tree's arena
pub type NodeId = usize;

/// One vertex of the tree.
///
/// `id` equals the node's arena slot and therefore its creation order: leaves
/// take 0..N-1 in input order, parents follow bottom-up. It exists for
/// diagnostics only and is not part of the cryptographic contract.
#[derive(Debug, Clone)]
pub struct Node {
    /// The node's digest
    pub hash: Hash,
    /// Creation-order id, unique across the tree
    pub id: NodeId,
    left: Option<NodeId>,
    right: Option<NodeId>,
    parent: Option<NodeId>,
}

impl Node {
    /// Left child, if any. The left child always carries the smaller hash.
    pub fn left(&self) -> Option<NodeId> {
        self.left
    }

    /// Right child, if any
    pub fn right(&self) -> Option<NodeId> {
        self.right
    }

    /// Parent link; `None` for the root and for nodes not yet paired
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Whether this node is a leaf
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// How a trailing unpaired node is handled when a layer has odd length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OddNodePolicy {
    /// Carry the node unchanged into the next layer
    #[default]
    Promote,
    /// Pair the node with itself
    SelfPair,
    /// Move the node, unmodified, to the front of the next layer
    FrontPush,
}

/// Construction options for [`MerkleTree::build`]
#[derive(Debug, Clone, Default)]
pub struct TreeOptions {
    /// How leaf records are hashed
    pub encoding: EncodeMode,
    /// Field type names for [`EncodeMode::AbiEncoded`], e.g.
    /// `["uint256", "address", "uint256"]`; must match the record arity
    pub type_signature: Option<Vec<String>>,
    /// Odd-node handling during layer construction
    pub policy: OddNodePolicy,
}

/// An immutable merkle tree over a fixed set of leaf records.
///
/// Owns all nodes, the layer structure (layer 0 = leaves, last layer = the
/// root alone) and a lookup from each original record to its leaf node.
#[derive(Debug)]
pub struct MerkleTree {
    nodes: Vec<Node>,
    layers: Vec<Vec<NodeId>>,
    leaf_lookup: HashMap<String, NodeId>,
    root: NodeId,
}

impl MerkleTree {
    /// Build a tree from leaf records, encoding each record per `options`.
    ///
    /// Fails with a configuration error for an invalid encoding setup and
    /// with [`DistributorError::EmptyInput`] for zero records. Construction
    /// either fully succeeds or fails before any tree is exposed.
    pub fn build(records: &[LeafRecord], options: &TreeOptions) -> Result<Self> {
        let encoder = LeafEncoder::from_options(options.encoding, options.type_signature.as_deref())?;
        let leaf_hashes = encoder.encode_all(records)?;

        let mut tree = Self::construct(&leaf_hashes, options.policy)?;
        // last occurrence wins for duplicate records, like the lookup the
        // records were keyed by originally
        for (position, record) in records.iter().enumerate() {
            tree.leaf_lookup.insert(record.key(), tree.layers[0][position]);
        }
        Ok(tree)
    }

    /// Build a tree directly from pre-computed leaf hashes.
    ///
    /// No record lookup is available on the result; proofs are extracted by
    /// leaf position instead.
    pub fn from_hashes(hashes: &[Hash], policy: OddNodePolicy) -> Result<Self> {
        Self::construct(hashes, policy)
    }

    fn construct(leaf_hashes: &[Hash], policy: OddNodePolicy) -> Result<Self> {
        if leaf_hashes.is_empty() {
            return Err(DistributorError::EmptyInput);
        }

        let mut nodes: Vec<Node> = leaf_hashes
            .iter()
            .enumerate()
            .map(|(id, &hash)| Node {
                hash,
                id,
                left: None,
                right: None,
                parent: None,
            })
            .collect();

        let mut current: Vec<NodeId> = (0..nodes.len()).collect();
        let mut layers = vec![current.clone()];

        while current.len() > 1 {
            let mut parents: Vec<NodeId> = Vec::with_capacity(current.len() / 2 + 1);
            let mut i = 0;
            while i < current.len() {
                let n1 = current[i];
                let n2 = if i + 1 < current.len() {
                    current[i + 1]
                } else {
                    // trailing unpaired node
                    match policy {
                        OddNodePolicy::Promote => {
                            parents.push(n1);
                            break;
                        }
                        OddNodePolicy::FrontPush => {
                            parents.insert(0, n1);
                            break;
                        }
                        OddNodePolicy::SelfPair => n1,
                    }
                };

                // smaller hash goes left; on a tie the scan-order left node stays left
                let (left, right) = if nodes[n1].hash > nodes[n2].hash {
                    (n2, n1)
                } else {
                    (n1, n2)
                };
                let hash = hash_pair(&nodes[left].hash, &nodes[right].hash);
                let id = nodes.len();
                nodes.push(Node {
                    hash,
                    id,
                    left: Some(left),
                    right: Some(right),
                    parent: None,
                });
                nodes[n1].parent = Some(id);
                nodes[n2].parent = Some(id);
                parents.push(id);
                i += 2;
            }
            layers.push(parents.clone());
            current = parents;
        }

        let root = current[0];
        debug!(
            leaves = leaf_hashes.len(),
            layers = layers.len(),
            nodes = nodes.len(),
            root = %nodes[root].hash,
            "merkle tree constructed"
        );

        Ok(Self {
            nodes,
            layers,
            leaf_lookup: HashMap::new(),
            root,
        })
    }

    /// The root digest committing to the entire leaf set
    pub fn root_hash(&self) -> Hash {
        self.nodes[self.root].hash
    }

    /// The root node
    pub fn root_node(&self) -> &Node {
        &self.nodes[self.root]
    }

    /// Look up a node by id
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Number of leaves the tree was built from
    pub fn leaf_count(&self) -> usize {
        self.layers[0].len()
    }

    /// Node ids per layer: layer 0 holds the leaves in input order, the last
    /// layer holds the root alone. A node promoted across layers appears in
    /// each layer it was carried through.
    pub fn layers(&self) -> &[Vec<NodeId>] {
        &self.layers
    }

    /// The leaf node for an original record
    pub fn leaf_for(&self, record: &LeafRecord) -> Result<&Node> {
        let key = record.key();
        let id = self
            .leaf_lookup
            .get(&key)
            .ok_or(DistributorError::RecordNotFound { key })?;
        Ok(&self.nodes[*id])
    }

    /// Extract the inclusion proof for an original record
    pub fn generate_proof(&self, record: &LeafRecord) -> Result<MerkleProof> {
        let leaf = self.leaf_for(record)?.id;
        Ok(self.proof_from(leaf))
    }

    /// Extract the inclusion proof for the leaf at the given input position
    pub fn proof_for_leaf(&self, position: usize) -> Result<MerkleProof> {
        let leaf = *self
            .layers[0]
            .get(position)
            .ok_or_else(|| DistributorError::record_not_found(format!("leaf position {position}")))?;
        Ok(self.proof_from(leaf))
    }

    /// Walk from `leaf` up to the root, collecting sibling hashes.
    ///
    /// A node carried upward without being paired has no parent at that
    /// level, so the walk skips it and the proof simply omits that layer.
    fn proof_from(&self, leaf: NodeId) -> MerkleProof {
        let mut siblings = Vec::new();
        let mut current = leaf;
        while let Some(parent_id) = self.nodes[current].parent {
            let parent = &self.nodes[parent_id];
            let sibling = if parent.left == Some(current) {
                parent.right
            } else {
                parent.left
            };
            if let Some(sibling) = sibling {
                siblings.push(self.nodes[sibling].hash);
            }
            current = parent_id;
        }
        MerkleProof::new(self.nodes[leaf].hash, self.root_hash(), siblings)
    }

    /// Render node ids per layer with child ids in brackets, for debugging.
    ///
    /// ```text
    /// layer 0:   0(,)  1(,)  2(,)
    /// layer 1:   3(0,1)  2(,)
    /// layer 2:   4(3,2)
    /// ```
    pub fn layer_diagram(&self) -> String {
        let mut out = String::new();
        for (i, layer) in self.layers.iter().enumerate() {
            let mut line = String::new();
            for id in layer {
                let node = &self.nodes[*id];
                let left = node.left.map(|l| l.to_string()).unwrap_or_default();
                let right = node.right.map(|r| r.to_string()).unwrap_or_default();
                let _ = write!(line, "  {}({},{})", node.id, left, right);
            }
            let _ = writeln!(out, "layer {i}:{line}");
        }
        out
    }
}
