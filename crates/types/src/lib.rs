//! Core type definitions for the lowbid sealed-bid reverse auction.
//!
//! This crate provides the shared data structures used across the auction
//! system: pseudonymous bidder identifiers, the append-only action log's
//! event union, and the winner-rollup I/O types.

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

pub mod rollup_io;

// =========================
// IDENTIFIERS
// =========================

/// Pseudonymous bidder identifier, derived once from private key material
/// and stable for the auction's duration.
pub type Nullifier = [u8; 32];

/// Generic address type (32 bytes), used at the funds-transfer boundary.
pub type Address = [u8; 32];

/// SHA-256 digest; also the root type of the authenticated structures.
pub type Digest = [u8; 32];

// =========================
// CONSTANTS
// =========================

/// Entry fee each bidder deposits before bidding. Genesis may override the
/// fee per auction; this is the default.
pub const AUCTION_FEE: u64 = 3;

/// Sentinel bid carried by the rollup accumulator before any challenger has
/// been folded. Every real bid is strictly below it.
pub const MAX_BID_SENTINEL: u64 = u64::MAX;

// =========================
// ACTION LOG EVENTS
// =========================

/// An event in the auction's append-only action log.
///
/// The log is never pruned or compacted; payment checks fold over the full
/// recorded history.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub enum AuctionAction {
    /// A fee deposit from a bidder.
    Fee { nullifier: Nullifier, amount: u64 },

    /// A submitted bid.
    Bid { nullifier: Nullifier, bid: u64 },

    /// The winner assertion that closed the auction.
    Winner { nullifier: Nullifier, bid: u64 },
}

// =========================
// HELPER FUNCTIONS
// =========================

/// Compute SHA-256 hash
pub fn sha256(data: &[u8]) -> [u8; 32] {
    use sha2::{Digest, Sha256};
    Sha256::digest(data).into()
}
