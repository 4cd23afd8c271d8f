//! Winner-proof generation for auction settlement.

use anyhow::{bail, Result};
use lowbid_circuit::rollup;
use lowbid_module::ActionLog;
use lowbid_types::rollup_io::{RollupProof, Winner};
use lowbid_types::AuctionAction;
use tracing::{debug, info};

/// Extract the challenger sequence from a recorded action log, in the order
/// the bids were accepted.
pub fn collect_challengers(log: &ActionLog) -> Vec<Winner> {
    log.events()
        .iter()
        .filter_map(|event| match event {
            AuctionAction::Bid { nullifier, bid } => Some(Winner {
                nullifier: *nullifier,
                bid: *bid,
            }),
            AuctionAction::Fee { .. } | AuctionAction::Winner { .. } => None,
        })
        .collect()
}

/// Fold a challenger sequence into a final winner proof.
///
/// Drives the rollup left-to-right from the sentinel base case. The fold
/// order is the caller's choice; it changes intermediate proof shapes but
/// not the final attested minimum.
pub fn prove_winner(challengers: &[Winner]) -> Result<RollupProof> {
    if challengers.is_empty() {
        bail!("No bids to fold");
    }

    let mut proof = rollup::initial();
    for challenger in challengers {
        let candidate = Winner::select(proof.winner, *challenger);
        proof = rollup::step(candidate, &proof, *challenger)?;
        debug!(
            step = proof.steps,
            challenger_bid = challenger.bid,
            current_bid = proof.winner.bid,
            "folded challenger"
        );
    }

    info!(
        steps = proof.steps,
        winning_bid = proof.winner.bid,
        "winner fold complete"
    );
    Ok(proof)
}
