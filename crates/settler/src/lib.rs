//! Off-chain winner determination for the lowbid auction.
//!
//! The settler:
//! 1. Reads the committed action log for accepted bids
//! 2. Folds the challenger sequence through the winner rollup
//! 3. Produces the final succinct proof of the minimum bid and its owner
//!
//! Anyone can run this step — the fold is permissionless, and only the
//! final proof needs to reach the state machine.

pub mod prover;

pub use prover::{collect_challengers, prove_winner};
