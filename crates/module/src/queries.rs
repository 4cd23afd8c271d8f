//! Query handlers for the auction module.
//!
//! These functions provide read-only access to auction state.

use lowbid_types::{Digest, Nullifier};
use serde::{Deserialize, Serialize};

use crate::state::{AuctionPhase, AuctionState};

/// Query request types.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum AuctionQuery {
    /// Total fees collected.
    GetPot,

    /// Number of accepted bid submissions.
    GetBidderCount,

    /// The committed roots of both authenticated structures.
    GetCommittedRoots,

    /// Winner fields (all-zero until the auction closes).
    GetWinner,

    /// Lifecycle phase derived from state fields.
    GetPhase,

    /// Fold the action log for an exact-fee deposit by this nullifier.
    HasPaid { nullifier: Nullifier },
}

/// Query response types.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum AuctionQueryResponse {
    /// Pot total.
    Pot(u64),

    /// Bidder count.
    BidderCount(u64),

    /// Committed roots.
    CommittedRoots {
        bids_root: Digest,
        bidders_root: Digest,
    },

    /// Winner fields.
    Winner { nullifier: Nullifier, bid: u64 },

    /// Derived phase.
    Phase(AuctionPhase),

    /// Payment-check result.
    HasPaid(bool),
}

/// Handle a query.
pub fn handle_query(state: &AuctionState, query: AuctionQuery) -> AuctionQueryResponse {
    match query {
        AuctionQuery::GetPot => AuctionQueryResponse::Pot(state.pot),

        AuctionQuery::GetBidderCount => AuctionQueryResponse::BidderCount(state.bidder_count),

        AuctionQuery::GetCommittedRoots => AuctionQueryResponse::CommittedRoots {
            bids_root: state.bids_root,
            bidders_root: state.bidders_root,
        },

        AuctionQuery::GetWinner => AuctionQueryResponse::Winner {
            nullifier: state.winner_nullifier,
            bid: state.winning_bid,
        },

        AuctionQuery::GetPhase => AuctionQueryResponse::Phase(state.phase()),

        AuctionQuery::HasPaid { nullifier } => {
            AuctionQueryResponse::HasPaid(state.actions.has_paid(&nullifier, state.fee))
        }
    }
}
