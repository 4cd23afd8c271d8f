//! Winner-rollup proof program for the lowbid auction.
//!
//! This crate proves that a stream of (nullifier, bid) challengers folds to
//! a single global minimum:
//!
//! 1. The base case accepts exactly the sentinel accumulator `{0, MAX}`.
//! 2. Each step verifies the previous link, guards against a degenerate
//!    accumulator, and requires the new accumulator to be the strict
//!    less-than selection between the previous accumulator and the
//!    challenger (first-seen wins on exact ties).
//! 3. The final link's public output is the lowest bid and its owner,
//!    checkable in constant time however many challengers were folded.
//!
//! # Public Output
//! - winner (nullifier, bid)
//! - steps folded
//!
//! # Private Inputs per step
//! - previous proof link
//! - challenger (nullifier, bid)

pub mod rollup;

pub use rollup::{initial, step, verify, RollupError};
