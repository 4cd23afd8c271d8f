//! The append-only action log and its payment-check fold.
//!
//! Every state-changing call records an event here. The log only ever
//! grows: no pruning, no compaction, no deduplication. Membership answers
//! are therefore monotonic — once a matching event exists it exists for the
//! lifetime of the structure.

use borsh::{BorshDeserialize, BorshSerialize};
use lowbid_types::{AuctionAction, Nullifier};
use serde::{Deserialize, Serialize};

/// Append-only, never-pruned log of auction events.
#[derive(Clone, Debug, Default, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub struct ActionLog {
    events: Vec<AuctionAction>,
}

impl ActionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event. Irreversible.
    pub fn record(&mut self, action: AuctionAction) {
        self.events.push(action);
    }

    /// Has this nullifier ever deposited exactly `required`?
    ///
    /// A single left-to-right pass over the entire history, OR-ing per
    /// event. The check is "any matching event ever recorded", not "the
    /// most recent event", and its cost grows with total history — the
    /// price of not keeping a separate mutable payment-status map.
    pub fn has_paid(&self, nullifier: &Nullifier, required: u64) -> bool {
        self.events.iter().fold(false, |paid, event| match event {
            AuctionAction::Fee {
                nullifier: payer,
                amount,
            } => paid || (payer == nullifier && *amount == required),
            AuctionAction::Bid { .. } | AuctionAction::Winner { .. } => paid,
        })
    }

    /// All recorded events, oldest first.
    pub fn events(&self) -> &[AuctionAction] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lowbid_types::AUCTION_FEE;

    fn nullifier(byte: u8) -> Nullifier {
        [byte; 32]
    }

    #[test]
    fn test_unpaid_nullifier_reads_false() {
        let log = ActionLog::new();
        assert!(!log.has_paid(&nullifier(1), AUCTION_FEE));
    }

    #[test]
    fn test_payment_is_monotonic() {
        let mut log = ActionLog::new();
        log.record(AuctionAction::Fee {
            nullifier: nullifier(1),
            amount: AUCTION_FEE,
        });
        assert!(log.has_paid(&nullifier(1), AUCTION_FEE));

        // Unrelated later events never revoke the answer.
        log.record(AuctionAction::Fee {
            nullifier: nullifier(2),
            amount: AUCTION_FEE,
        });
        log.record(AuctionAction::Bid {
            nullifier: nullifier(1),
            bid: 50,
        });
        assert!(log.has_paid(&nullifier(1), AUCTION_FEE));
    }

    #[test]
    fn test_exact_amount_required() {
        let mut log = ActionLog::new();
        log.record(AuctionAction::Fee {
            nullifier: nullifier(1),
            amount: AUCTION_FEE + 1,
        });
        assert!(!log.has_paid(&nullifier(1), AUCTION_FEE));
    }

    #[test]
    fn test_non_fee_events_never_satisfy_the_check() {
        let mut log = ActionLog::new();
        log.record(AuctionAction::Bid {
            nullifier: nullifier(1),
            bid: AUCTION_FEE,
        });
        log.record(AuctionAction::Winner {
            nullifier: nullifier(1),
            bid: AUCTION_FEE,
        });
        assert!(!log.has_paid(&nullifier(1), AUCTION_FEE));
    }

    #[test]
    fn test_repeat_deposits_are_independent_events() {
        let mut log = ActionLog::new();
        log.record(AuctionAction::Fee {
            nullifier: nullifier(1),
            amount: AUCTION_FEE,
        });
        log.record(AuctionAction::Fee {
            nullifier: nullifier(1),
            amount: AUCTION_FEE,
        });
        assert_eq!(log.len(), 2);
        assert!(log.has_paid(&nullifier(1), AUCTION_FEE));
    }
}
