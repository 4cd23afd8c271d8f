//! The recursive winner-rollup fold.
//!
//! A chain of proof links over an append-only sequence of challengers. Each
//! link carries the running accumulator (lowest bid seen so far and its
//! owner), the challenger folded at that step, and an attestation binding
//! the link to its parent. Extending the chain verifies the previous link,
//! so the final link transitively anchors to [`initial`] and its public
//! output can be checked in constant time regardless of chain length.

use lowbid_types::rollup_io::{RollupProof, Winner};
use lowbid_types::Digest;
use sha2::{Digest as _, Sha256};
use thiserror::Error;

/// Domain-separation prefix for link attestations.
const ROLLUP_DOMAIN: &[u8] = b"LOWBID_WINNER_ROLLUP_V1:";

/// Errors raised while extending or verifying a rollup chain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RollupError {
    #[error("Attestation does not bind the proof's fields")]
    InvalidAttestation,

    #[error("Base-case proof must carry exactly the sentinel accumulator")]
    SentinelMismatch,

    #[error("Accumulator bid is zero")]
    ZeroBid,

    #[error("Accumulator nullifier is zero")]
    ZeroNullifier,

    #[error("Accumulator mismatch: expected {expected:?}, got {got:?}")]
    AccumulatorMismatch { expected: Winner, got: Winner },
}

fn attest(winner: &Winner, challenger: &Winner, steps: u64, parent: &Digest) -> Digest {
    let mut hasher = Sha256::new();
    hasher.update(ROLLUP_DOMAIN);
    hasher.update(parent);
    hasher.update(steps.to_le_bytes());
    hasher.update(challenger.to_bytes());
    hasher.update(winner.to_bytes());
    hasher.finalize().into()
}

/// Base case of the chain: the sentinel accumulator, zero steps folded.
pub fn initial() -> RollupProof {
    let sentinel = Winner::sentinel();
    let parent = [0u8; 32];
    let attestation = attest(&sentinel, &sentinel, 0, &parent);
    RollupProof {
        winner: sentinel,
        challenger: sentinel,
        steps: 0,
        parent,
        attestation,
    }
}

/// Check that a proof link is internally consistent.
///
/// Constant time: only this link's binding is recomputed; earlier links
/// were checked when the chain was extended.
pub fn verify(proof: &RollupProof) -> Result<(), RollupError> {
    let expected = attest(&proof.winner, &proof.challenger, proof.steps, &proof.parent);
    if proof.attestation != expected {
        return Err(RollupError::InvalidAttestation);
    }
    if proof.steps == 0 {
        let sentinel = Winner::sentinel();
        if proof.winner != sentinel || proof.challenger != sentinel || proof.parent != [0u8; 32] {
            return Err(RollupError::SentinelMismatch);
        }
    }
    Ok(())
}

/// Fold one challenger into the chain.
///
/// Verifies `previous`, guards the accumulator against the degenerate
/// zero state, and requires `new_accumulator` to equal the selection of
/// `previous`'s accumulator against the challenger by strict less-than
/// (first-seen wins on exact ties).
pub fn step(
    new_accumulator: Winner,
    previous: &RollupProof,
    challenger: Winner,
) -> Result<RollupProof, RollupError> {
    verify(previous)?;

    if new_accumulator.bid == 0 {
        return Err(RollupError::ZeroBid);
    }
    if new_accumulator.nullifier == [0u8; 32] {
        return Err(RollupError::ZeroNullifier);
    }

    let candidate = Winner::select(previous.winner, challenger);
    if new_accumulator != candidate {
        return Err(RollupError::AccumulatorMismatch {
            expected: candidate,
            got: new_accumulator,
        });
    }

    let steps = previous.steps + 1;
    let attestation = attest(&new_accumulator, &challenger, steps, &previous.attestation);
    Ok(RollupProof {
        winner: new_accumulator,
        challenger,
        steps,
        parent: previous.attestation,
        attestation,
    })
}
