//! Cryptographic primitives for the lowbid sealed-bid reverse auction.
//!
//! This crate provides the bid-authentication building blocks:
//!
//! 1. **Nullifier derivation**: a deterministic, one-way mapping from a
//!    bidder's private key bytes to a public pseudonymous identifier, used
//!    everywhere in place of an account identity.
//!
//! 2. **Bidder registry**: a fixed-height authenticated Merkle tree
//!    recording which nullifiers are admitted bidders; produces roots and
//!    single-leaf membership witnesses.
//!
//! 3. **Bid map**: an authenticated sparse key-value map from nullifier to
//!    bid; witnesses are key-bound, so a proof generated for one nullifier
//!    cannot be replayed against another.
//!
//! The state machine never stores these structures, only their roots; the
//! instances held by callers are local working copies whose witnesses must
//! recompute to a committed root before being trusted.

pub mod error;
pub mod map;
pub mod merkle;
pub mod nullifier;

pub use error::CryptoError;
pub use map::{BidMap, MapWitness};
pub use merkle::{BidderRegistry, MembershipProof};
pub use nullifier::derive_nullifier;
