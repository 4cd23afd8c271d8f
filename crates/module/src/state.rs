//! On-chain state for the auction module.

use borsh::{BorshDeserialize, BorshSerialize};
use lowbid_types::{Address, Digest, Nullifier};
use serde::{Deserialize, Serialize};

use crate::genesis::AuctionGenesisConfig;
use crate::ledger::ActionLog;

/// The auction contract's committed state.
///
/// This record is the single source of truth for the committed roots: the
/// full authenticated structures live with callers as working copies, and a
/// caller's witness must recompute to a committed root before it is trusted.
/// Every field starts at its zero value at genesis.
#[derive(Clone, Debug, Default, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub struct AuctionState {
    /// Committed root of the bid map.
    pub bids_root: Digest,

    /// Committed root of the bidder registry.
    pub bidders_root: Digest,

    /// Number of accepted bid submissions. Increments unconditionally per
    /// accepted call; nothing prevents a nullifier from bidding twice.
    pub bidder_count: u64,

    /// Total fees collected.
    pub pot: u64,

    /// Winner's nullifier; all-zero until the auction closes.
    pub winner_nullifier: Nullifier,

    /// Winning bid; zero until the auction closes.
    pub winning_bid: u64,

    /// Scheduled start, seconds UTC. Recorded but not enforced by any
    /// operation.
    pub starts_at: u64,

    /// Scheduled end, seconds UTC. Recorded but not enforced.
    pub ends_at: u64,

    /// Exact entry fee `has_paid` checks for.
    pub fee: u64,

    /// Address holding the pot at the funds-transfer boundary.
    pub address: Address,

    /// Append-only action log; never pruned.
    pub actions: ActionLog,
}

/// Lifecycle phase, inferred from field values rather than stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuctionPhase {
    /// All fields zero: nothing has happened yet.
    Created,
    /// Fees collected, no bids yet.
    Collecting,
    /// Bids present, winner unset.
    Bidding,
    /// Winner set.
    Closed,
}

impl AuctionState {
    /// Create a zeroed state with default genesis parameters.
    pub fn new() -> Self {
        Self::from_genesis(&AuctionGenesisConfig::default())
    }

    /// Create the initial state from a genesis configuration. This is the
    /// one-time bootstrap; every other mutation goes through the handlers.
    pub fn from_genesis(config: &AuctionGenesisConfig) -> Self {
        Self {
            fee: config.fee,
            address: config.auction_address,
            starts_at: config.starts_at,
            ends_at: config.ends_at,
            ..Default::default()
        }
    }

    /// Current lifecycle phase, derived from field values.
    pub fn phase(&self) -> AuctionPhase {
        if self.winner_nullifier != [0u8; 32] {
            AuctionPhase::Closed
        } else if self.bidder_count > 0 {
            AuctionPhase::Bidding
        } else if self.pot > 0 {
            AuctionPhase::Collecting
        } else {
            AuctionPhase::Created
        }
    }
}
