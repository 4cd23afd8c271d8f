//! I/O types for the winner rollup's recursive fold.

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use crate::{Digest, Nullifier, MAX_BID_SENTINEL};

/// The rollup accumulator: the lowest bid seen so far and its owner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub struct Winner {
    pub nullifier: Nullifier,
    pub bid: u64,
}

impl Winner {
    /// The base-case accumulator: no owner, a bid above every real bid.
    pub fn sentinel() -> Self {
        Self {
            nullifier: [0u8; 32],
            bid: MAX_BID_SENTINEL,
        }
    }

    /// Select between the current accumulator and a challenger.
    ///
    /// Strict less-than: on an exact tie the current (earlier-seen)
    /// accumulator is kept.
    pub fn select(current: Winner, challenger: Winner) -> Winner {
        if challenger.bid < current.bid {
            challenger
        } else {
            current
        }
    }

    /// Canonical byte encoding used when binding the accumulator into an
    /// attestation digest.
    pub fn to_bytes(&self) -> [u8; 40] {
        let mut out = [0u8; 40];
        out[..32].copy_from_slice(&self.nullifier);
        out[32..].copy_from_slice(&self.bid.to_le_bytes());
        out
    }
}

/// One link in the winner rollup's proof chain.
///
/// `attestation` binds every other field with a domain-separated hash, and
/// `parent` is the previous link's attestation, so a link can be checked in
/// constant time while still anchoring transitively to the initial sentinel.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub struct RollupProof {
    /// Public output: the best (lowest) bid folded so far and its owner.
    pub winner: Winner,

    /// The challenger folded at this step (the sentinel at step zero).
    pub challenger: Winner,

    /// Number of challengers folded so far.
    pub steps: u64,

    /// Attestation of the previous link (all zero at step zero).
    pub parent: Digest,

    /// Attestation binding this link's fields.
    pub attestation: Digest,
}
