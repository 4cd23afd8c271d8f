//! Fixed-height authenticated registry of eligible bidders.
//!
//! A binary Merkle tree with capacity `2^height` leaves. Empty leaves are
//! all-zero digests; occupied leaves hold raw nullifiers. The tree hands out
//! single-leaf membership witnesses (bottom-up sibling paths) that recompute
//! the root from a leaf value alone.
//!
//! The structure enforces no uniqueness or overwrite policy on leaves:
//! whoever assigns indices is responsible for choosing them sequentially.

use borsh::{BorshDeserialize, BorshSerialize};
use lowbid_types::Digest;
use serde::{Deserialize, Serialize};
use sha2::{Digest as _, Sha256};
use std::collections::HashMap;

use crate::error::CryptoError;

/// Domain-separation prefix for inner registry nodes.
const REGISTRY_NODE_DOMAIN: &[u8] = b"LOWBID_TREE_NODE_V1:";

fn hash_node(left: &Digest, right: &Digest) -> Digest {
    let mut hasher = Sha256::new();
    hasher.update(REGISTRY_NODE_DOMAIN);
    hasher.update(left);
    hasher.update(right);
    hasher.finalize().into()
}

/// Authenticated registry of admitted bidder nullifiers.
#[derive(Clone, Debug)]
pub struct BidderRegistry {
    height: u32,
    /// Populated nodes per level; level 0 holds leaves, level `height` the
    /// root. Absent entries stand for empty subtrees.
    nodes: Vec<HashMap<u64, Digest>>,
    /// `empty[lvl]` is the root of an empty subtree of height `lvl`.
    empty: Vec<Digest>,
}

impl BidderRegistry {
    /// Create an empty registry with capacity `2^height` leaves.
    pub fn new(height: u32) -> Result<Self, CryptoError> {
        if height == 0 || height > 32 {
            return Err(CryptoError::InvalidHeight { height });
        }
        let levels = height as usize + 1;
        let mut empty = Vec::with_capacity(levels);
        empty.push([0u8; 32]);
        for lvl in 0..height as usize {
            let child = empty[lvl];
            empty.push(hash_node(&child, &child));
        }
        Ok(Self {
            height,
            nodes: vec![HashMap::new(); levels],
            empty,
        })
    }

    /// Number of leaf slots.
    pub fn capacity(&self) -> u64 {
        1u64 << self.height
    }

    /// Tree height (witness path length).
    pub fn height(&self) -> u32 {
        self.height
    }

    fn node(&self, level: usize, index: u64) -> Digest {
        self.nodes[level]
            .get(&index)
            .copied()
            .unwrap_or(self.empty[level])
    }

    /// Write a leaf at `index`, recomputing the path to the root.
    ///
    /// Overwriting an occupied slot is not rejected here; index assignment
    /// policy belongs to the caller.
    pub fn set_leaf(&mut self, index: u64, leaf: Digest) -> Result<(), CryptoError> {
        if index >= self.capacity() {
            return Err(CryptoError::IndexOutOfRange {
                index,
                capacity: self.capacity(),
            });
        }
        self.nodes[0].insert(index, leaf);
        let mut idx = index;
        for level in 0..self.height as usize {
            let parent = idx >> 1;
            let left = self.node(level, parent << 1);
            let right = self.node(level, (parent << 1) | 1);
            self.nodes[level + 1].insert(parent, hash_node(&left, &right));
            idx = parent;
        }
        Ok(())
    }

    /// Current root summarizing the whole registry.
    pub fn root(&self) -> Digest {
        self.node(self.height as usize, 0)
    }

    /// Sibling path for the leaf at `index`, bottom-up.
    pub fn witness(&self, index: u64) -> Result<MembershipProof, CryptoError> {
        if index >= self.capacity() {
            return Err(CryptoError::IndexOutOfRange {
                index,
                capacity: self.capacity(),
            });
        }
        let mut siblings = Vec::with_capacity(self.height as usize);
        for level in 0..self.height as usize {
            let sibling = (index >> level) ^ 1;
            siblings.push(self.node(level, sibling));
        }
        Ok(MembershipProof { index, siblings })
    }
}

/// Single-leaf membership witness: the sibling path from leaf to root.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub struct MembershipProof {
    pub index: u64,
    /// Sibling digests, leaf level first.
    pub siblings: Vec<Digest>,
}

impl MembershipProof {
    /// Recompute the root this witness proves for the given leaf value.
    ///
    /// A witness for a different leaf or a tampered path yields a different
    /// root, so callers compare the result against a committed root.
    pub fn compute_root(&self, leaf: Digest) -> Digest {
        let mut acc = leaf;
        for (level, sibling) in self.siblings.iter().enumerate() {
            acc = if (self.index >> level) & 1 == 1 {
                hash_node(sibling, &acc)
            } else {
                hash_node(&acc, sibling)
            };
        }
        acc
    }
}
