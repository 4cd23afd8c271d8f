//! Auction module error types.

use lowbid_crypto::CryptoError;
use lowbid_types::Nullifier;
use thiserror::Error;

use crate::transfer::TransferError;

/// Errors that can occur in the auction module.
///
/// Every failure is local and fatal to the single operation that raised it:
/// nothing is retried, nothing is partially applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuctionError {
    #[error("Fee of {required} not paid by nullifier {}", hex::encode(.nullifier))]
    FeeNotPaid {
        nullifier: Nullifier,
        required: u64,
    },

    #[error("Bidder witness does not recompute to the supplied registry root")]
    InvalidBidderWitness,

    #[error(
        "Bid witness was generated for a different key: expected {}, got {}",
        hex::encode(.expected),
        hex::encode(.got)
    )]
    BidKeyMismatch {
        expected: Nullifier,
        got: Nullifier,
    },

    #[error("Bid witness does not recompute to the supplied bid-map root")]
    InvalidBidWitness,

    #[error("Supplied registry root does not match the committed root")]
    RegistryRootMismatch,

    #[error("Transfer failed: {0}")]
    Transfer(#[from] TransferError),

    #[error("Malformed witness: {0}")]
    Crypto(#[from] CryptoError),
}
