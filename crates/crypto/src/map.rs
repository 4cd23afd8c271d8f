//! Authenticated sparse key-value map binding each nullifier to one bid.
//!
//! A sparse Merkle map of depth 256 whose position for a key is chosen by
//! the key's bits, MSB first. Unset keys read as value zero: the empty-leaf
//! digest is the digest of value zero, so absence and an explicit zero are
//! indistinguishable under the root.
//!
//! Witnesses are key-bound: [`MapWitness::compute_root_and_key`] reconstructs
//! both the root and the key from the recorded path directions, so a witness
//! generated for one key cannot be replayed to prove a different key.

use borsh::{BorshDeserialize, BorshSerialize};
use lowbid_types::{Digest, Nullifier};
use serde::{Deserialize, Serialize};
use sha2::{Digest as _, Sha256};
use std::collections::BTreeMap;

use crate::error::CryptoError;

/// Depth of the map: one level per key bit.
pub const KEY_BITS: usize = 256;

const MAP_NODE_DOMAIN: &[u8] = b"LOWBID_MAP_NODE_V1:";
const MAP_LEAF_DOMAIN: &[u8] = b"LOWBID_MAP_LEAF_V1:";

fn hash_node(left: &Digest, right: &Digest) -> Digest {
    let mut hasher = Sha256::new();
    hasher.update(MAP_NODE_DOMAIN);
    hasher.update(left);
    hasher.update(right);
    hasher.finalize().into()
}

fn leaf_digest(value: u64) -> Digest {
    let mut hasher = Sha256::new();
    hasher.update(MAP_LEAF_DOMAIN);
    hasher.update(value.to_le_bytes());
    hasher.finalize().into()
}

/// Bit of `key` at `depth`, MSB of byte 0 first.
fn bit(key: &Nullifier, depth: usize) -> u8 {
    (key[depth / 8] >> (7 - (depth % 8))) & 1
}

/// Authenticated map from nullifier to bid value.
#[derive(Clone, Debug)]
pub struct BidMap {
    /// Lexicographic key order matches MSB-first tree position order, so
    /// subtrees are contiguous ranges of this map.
    entries: BTreeMap<Nullifier, u64>,
    /// `empty[h]` is the root of an empty subtree of height `h`.
    empty: Vec<Digest>,
}

impl Default for BidMap {
    fn default() -> Self {
        Self::new()
    }
}

impl BidMap {
    pub fn new() -> Self {
        let mut empty = Vec::with_capacity(KEY_BITS + 1);
        empty.push(leaf_digest(0));
        for h in 0..KEY_BITS {
            let child = empty[h];
            empty.push(hash_node(&child, &child));
        }
        Self {
            entries: BTreeMap::new(),
            empty,
        }
    }

    /// Read the value for a key; unset keys read as zero.
    pub fn get(&self, key: &Nullifier) -> u64 {
        self.entries.get(key).copied().unwrap_or(0)
    }

    /// Upsert the bid for a nullifier and return the new root.
    pub fn set(&mut self, key: Nullifier, value: u64) -> Digest {
        self.entries.insert(key, value);
        self.root()
    }

    /// Number of occupied keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Current root summarizing the whole map.
    pub fn root(&self) -> Digest {
        let items: Vec<(&Nullifier, &u64)> = self.entries.iter().collect();
        self.subtree_root(&items, 0)
    }

    /// Key-bound inclusion witness for `key` (works for unset keys too,
    /// proving value zero).
    pub fn witness(&self, key: &Nullifier) -> MapWitness {
        let items: Vec<(&Nullifier, &u64)> = self.entries.iter().collect();
        let mut siblings = Vec::with_capacity(KEY_BITS);
        let (mut lo, mut hi) = (0usize, items.len());
        for depth in 0..KEY_BITS {
            let sub = &items[lo..hi];
            let split = sub.partition_point(|(k, _)| bit(k, depth) == 0);
            if bit(key, depth) == 0 {
                siblings.push(self.subtree_root(&sub[split..], depth + 1));
                hi = lo + split;
            } else {
                siblings.push(self.subtree_root(&sub[..split], depth + 1));
                lo += split;
            }
        }
        siblings.reverse();
        let mut path_bits: Vec<bool> = (0..KEY_BITS).map(|d| bit(key, d) == 1).collect();
        path_bits.reverse();
        MapWitness {
            siblings,
            path_bits,
        }
    }

    fn subtree_root(&self, items: &[(&Nullifier, &u64)], depth: usize) -> Digest {
        if items.is_empty() {
            return self.empty[KEY_BITS - depth];
        }
        if depth == KEY_BITS {
            return leaf_digest(*items[0].1);
        }
        let split = items.partition_point(|(k, _)| bit(k, depth) == 0);
        let left = self.subtree_root(&items[..split], depth + 1);
        let right = self.subtree_root(&items[split..], depth + 1);
        hash_node(&left, &right)
    }
}

/// Key-bound inclusion witness for one map entry.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub struct MapWitness {
    /// Sibling digests, leaf level first.
    pub siblings: Vec<Digest>,
    /// Path directions, leaf level first; `true` means the proven node is a
    /// right child. These bits are exactly the key's bits and are what makes
    /// the witness key-bound.
    pub path_bits: Vec<bool>,
}

impl MapWitness {
    /// Recompute the root this witness proves for `value`, together with the
    /// key it was generated for.
    ///
    /// Callers must check both outputs: the root against a committed root,
    /// and the key against the claimed nullifier.
    pub fn compute_root_and_key(&self, value: u64) -> Result<(Digest, Nullifier), CryptoError> {
        if self.siblings.len() != KEY_BITS {
            return Err(CryptoError::PathLengthMismatch {
                expected: KEY_BITS,
                got: self.siblings.len(),
            });
        }
        if self.path_bits.len() != KEY_BITS {
            return Err(CryptoError::PathLengthMismatch {
                expected: KEY_BITS,
                got: self.path_bits.len(),
            });
        }
        let mut acc = leaf_digest(value);
        let mut key = [0u8; 32];
        for (i, (sibling, is_right)) in self.siblings.iter().zip(&self.path_bits).enumerate() {
            let depth = KEY_BITS - 1 - i;
            if *is_right {
                key[depth / 8] |= 1 << (7 - (depth % 8));
                acc = hash_node(sibling, &acc);
            } else {
                acc = hash_node(&acc, sibling);
            }
        }
        Ok((acc, key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(byte: u8) -> Nullifier {
        [byte; 32]
    }

    #[test]
    fn test_unset_key_reads_zero_and_proves_it() {
        let map = BidMap::new();
        assert_eq!(map.get(&key(9)), 0);

        let witness = map.witness(&key(9));
        let (root, proven_key) = witness.compute_root_and_key(0).unwrap();
        assert_eq!(root, map.root());
        assert_eq!(proven_key, key(9));
    }

    #[test]
    fn test_set_then_witness_roundtrip() {
        let mut map = BidMap::new();
        map.set(key(1), 50);
        map.set(key(2), 20);
        let root = map.set(key(3), 80);
        assert_eq!(root, map.root());

        for (k, v) in [(key(1), 50u64), (key(2), 20), (key(3), 80)] {
            let witness = map.witness(&k);
            let (proven_root, proven_key) = witness.compute_root_and_key(v).unwrap();
            assert_eq!(proven_root, map.root());
            assert_eq!(proven_key, k);
        }
    }

    #[test]
    fn test_witness_is_key_bound() {
        let mut map = BidMap::new();
        map.set(key(1), 50);
        map.set(key(2), 20);

        // A witness generated for key 1 reconstructs key 1, never key 2.
        let witness = map.witness(&key(1));
        let (_, proven_key) = witness.compute_root_and_key(50).unwrap();
        assert_eq!(proven_key, key(1));
        assert_ne!(proven_key, key(2));
    }

    #[test]
    fn test_wrong_value_fails_root_check() {
        let mut map = BidMap::new();
        map.set(key(1), 50);

        let witness = map.witness(&key(1));
        let (root, _) = witness.compute_root_and_key(51).unwrap();
        assert_ne!(root, map.root());
    }

    #[test]
    fn test_overwrite_changes_root() {
        let mut map = BidMap::new();
        let first = map.set(key(1), 50);
        let second = map.set(key(1), 60);
        assert_ne!(first, second);
        assert_eq!(map.get(&key(1)), 60);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_truncated_witness_rejected() {
        let mut map = BidMap::new();
        map.set(key(1), 50);
        let mut witness = map.witness(&key(1));
        witness.siblings.pop();
        assert_eq!(
            witness.compute_root_and_key(50),
            Err(CryptoError::PathLengthMismatch {
                expected: KEY_BITS,
                got: KEY_BITS - 1,
            })
        );
    }
}
