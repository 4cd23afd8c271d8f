//! Call message types for the auction module.

use borsh::{BorshDeserialize, BorshSerialize};
use lowbid_crypto::{MapWitness, MembershipProof};
use lowbid_types::{Address, Digest, Nullifier};

/// Call messages for the auction module.
#[derive(Clone, Debug, BorshSerialize, BorshDeserialize)]
pub enum AuctionCall {
    /// Deposit the entry fee on behalf of a nullifier. Repeat deposits are
    /// recorded as independent events.
    DepositFee { amount: u64, nullifier: Nullifier },

    /// Submit a bid, proving fee payment, registry membership, and
    /// key-bound inclusion in the bid map.
    MakeBid {
        bid: u64,
        nullifier: Nullifier,
        bidders_root: Digest,
        bidders_witness: MembershipProof,
        bids_root: Digest,
        bids_witness: MapWitness,
    },

    /// Assert the winner, close the auction, and pay out.
    SetWinner {
        nullifier: Nullifier,
        bid: u64,
        bidders_root: Digest,
        bidders_witness: MembershipProof,
        receiver: Address,
        amount: u64,
    },
}
