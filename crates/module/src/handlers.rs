//! Call handlers for the auction module.
//!
//! These functions implement the business logic for each call type. Every
//! handler either fully applies or fully fails: all checks and the external
//! transfer happen before any state field is written.

use lowbid_crypto::{MapWitness, MembershipProof};
use lowbid_types::{Address, AuctionAction, Digest, Nullifier};

use crate::call::AuctionCall;
use crate::error::AuctionError;
use crate::state::AuctionState;
use crate::transfer::Transfer;

/// Context provided by the runtime for each call.
pub struct CallContext {
    /// Sender of the transaction (signs the debited account)
    pub sender: Address,
    /// Current timestamp
    pub timestamp: u64,
}

/// Result type for handlers.
pub type HandlerResult<T> = Result<T, AuctionError>;

/// Handle a DepositFee call.
///
/// Transfers `amount` from the sender to the auction's address, grows the
/// pot, and records a `Fee` event. Nothing deduplicates deposits: the same
/// nullifier may pay any number of times, each an independent ledger event.
pub fn handle_deposit_fee(
    state: &mut AuctionState,
    ctx: &CallContext,
    bank: &mut dyn Transfer,
    amount: u64,
    nullifier: Nullifier,
) -> HandlerResult<()> {
    bank.transfer(ctx.sender, state.address, amount)?;

    state.pot += amount;
    state.actions.record(AuctionAction::Fee { nullifier, amount });

    Ok(())
}

/// Handle a MakeBid call.
///
/// Preconditions, in order:
/// 1. the nullifier has a `Fee` event for exactly the configured fee;
/// 2. the registry witness recomputes to the caller-supplied registry root
///    for this nullifier;
/// 3. the bid-map witness key-binds to this nullifier and recomputes to the
///    caller-supplied bid-map root.
///
/// On success both supplied roots are adopted as the new committed roots.
/// The supplied roots are checked only for internal consistency with their
/// witnesses, not against the previously committed roots, so a root can
/// advance without the contract re-deriving the transition. The bidder
/// count increments unconditionally; a nullifier bidding again simply
/// re-asserts the roots.
pub fn handle_make_bid(
    state: &mut AuctionState,
    _ctx: &CallContext,
    bid: u64,
    nullifier: Nullifier,
    bidders_root: Digest,
    bidders_witness: &MembershipProof,
    bids_root: Digest,
    bids_witness: &MapWitness,
) -> HandlerResult<()> {
    if !state.actions.has_paid(&nullifier, state.fee) {
        return Err(AuctionError::FeeNotPaid {
            nullifier,
            required: state.fee,
        });
    }

    if bidders_witness.compute_root(nullifier) != bidders_root {
        return Err(AuctionError::InvalidBidderWitness);
    }

    let (map_root, key) = bids_witness.compute_root_and_key(bid)?;
    if key != nullifier {
        return Err(AuctionError::BidKeyMismatch {
            expected: nullifier,
            got: key,
        });
    }
    if map_root != bids_root {
        return Err(AuctionError::InvalidBidWitness);
    }

    state.bidders_root = bidders_root;
    state.bids_root = bids_root;
    state.bidder_count += 1;
    state.actions.record(AuctionAction::Bid { nullifier, bid });

    Ok(())
}

/// Handle a SetWinner call.
///
/// The registry witness must recompute to the supplied root AND the
/// supplied root must equal the stored committed root — strict, unlike
/// `make_bid`. Pays `amount` to `receiver` from the sender's account, then
/// marks the winner and closes the auction.
///
/// TODO: require a winner-rollup proof here and check the asserted
/// (nullifier, bid) pair against its public output; today the pair is
/// caller-asserted and never compared with the bid map.
pub fn handle_set_winner(
    state: &mut AuctionState,
    ctx: &CallContext,
    bank: &mut dyn Transfer,
    nullifier: Nullifier,
    bid: u64,
    bidders_root: Digest,
    bidders_witness: &MembershipProof,
    receiver: Address,
    amount: u64,
) -> HandlerResult<()> {
    if bidders_witness.compute_root(nullifier) != bidders_root {
        return Err(AuctionError::InvalidBidderWitness);
    }
    if bidders_root != state.bidders_root {
        return Err(AuctionError::RegistryRootMismatch);
    }

    bank.transfer(ctx.sender, receiver, amount)?;

    state.winner_nullifier = nullifier;
    state.winning_bid = bid;
    state.actions.record(AuctionAction::Winner { nullifier, bid });

    Ok(())
}

/// Dispatch a call message to its handler.
pub fn handle_call(
    state: &mut AuctionState,
    ctx: &CallContext,
    bank: &mut dyn Transfer,
    call: AuctionCall,
) -> HandlerResult<()> {
    match call {
        AuctionCall::DepositFee { amount, nullifier } => {
            handle_deposit_fee(state, ctx, bank, amount, nullifier)
        }
        AuctionCall::MakeBid {
            bid,
            nullifier,
            bidders_root,
            bidders_witness,
            bids_root,
            bids_witness,
        } => handle_make_bid(
            state,
            ctx,
            bid,
            nullifier,
            bidders_root,
            &bidders_witness,
            bids_root,
            &bids_witness,
        ),
        AuctionCall::SetWinner {
            nullifier,
            bid,
            bidders_root,
            bidders_witness,
            receiver,
            amount,
        } => handle_set_winner(
            state,
            ctx,
            bank,
            nullifier,
            bid,
            bidders_root,
            &bidders_witness,
            receiver,
            amount,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transfer::{MockBank, TransferError};
    use lowbid_crypto::{derive_nullifier, BidMap, BidderRegistry};
    use lowbid_types::AUCTION_FEE;

    fn address(byte: u8) -> Address {
        [byte; 32]
    }

    fn ctx(sender: Address) -> CallContext {
        CallContext {
            sender,
            timestamp: 0,
        }
    }

    /// A funded bidder with its working copies registered and bid in place.
    struct Fixture {
        state: AuctionState,
        bank: MockBank,
        registry: BidderRegistry,
        bid_map: BidMap,
        nullifier: Nullifier,
        wallet: Address,
    }

    fn paid_fixture() -> Fixture {
        let mut state = AuctionState::new();
        let mut bank = MockBank::new();
        let wallet = address(0x11);
        bank.fund(wallet, 100);

        let nullifier = derive_nullifier(b"bidder-a");
        handle_deposit_fee(&mut state, &ctx(wallet), &mut bank, AUCTION_FEE, nullifier).unwrap();

        let mut registry = BidderRegistry::new(4).unwrap();
        registry.set_leaf(0, nullifier).unwrap();

        Fixture {
            state,
            bank,
            registry,
            bid_map: BidMap::new(),
            nullifier,
            wallet,
        }
    }

    #[test]
    fn test_deposit_fee_moves_funds_and_records_event() {
        let mut state = AuctionState::new();
        let mut bank = MockBank::new();
        let wallet = address(0x11);
        bank.fund(wallet, 10);

        let nullifier = derive_nullifier(b"bidder-a");
        handle_deposit_fee(&mut state, &ctx(wallet), &mut bank, AUCTION_FEE, nullifier).unwrap();

        assert_eq!(state.pot, AUCTION_FEE);
        assert_eq!(bank.balance(&wallet), 10 - AUCTION_FEE);
        assert_eq!(bank.balance(&state.address), AUCTION_FEE);
        assert!(state.actions.has_paid(&nullifier, AUCTION_FEE));
    }

    #[test]
    fn test_deposit_fee_unauthorized_sender_leaves_state_untouched() {
        let mut state = AuctionState::new();
        let mut bank = MockBank::new();

        let nullifier = derive_nullifier(b"bidder-a");
        let err = handle_deposit_fee(
            &mut state,
            &ctx(address(0x11)),
            &mut bank,
            AUCTION_FEE,
            nullifier,
        )
        .unwrap_err();

        assert_eq!(
            err,
            AuctionError::Transfer(TransferError::Unauthorized(address(0x11)))
        );
        assert_eq!(state.pot, 0);
        assert!(state.actions.is_empty());
    }

    #[test]
    fn test_make_bid_accepts_valid_witnesses() {
        let mut fx = paid_fixture();

        fx.bid_map.set(fx.nullifier, 50);
        let call_ctx = ctx(fx.wallet);
        handle_make_bid(
            &mut fx.state,
            &call_ctx,
            50,
            fx.nullifier,
            fx.registry.root(),
            &fx.registry.witness(0).unwrap(),
            fx.bid_map.root(),
            &fx.bid_map.witness(&fx.nullifier),
        )
        .unwrap();

        assert_eq!(fx.state.bidder_count, 1);
        assert_eq!(fx.state.bidders_root, fx.registry.root());
        assert_eq!(fx.state.bids_root, fx.bid_map.root());
    }

    #[test]
    fn test_make_bid_without_fee_rejected() {
        let mut fx = paid_fixture();
        let stranger = derive_nullifier(b"stranger");
        fx.registry.set_leaf(1, stranger).unwrap();
        fx.bid_map.set(stranger, 40);

        let roots_before = (fx.state.bidders_root, fx.state.bids_root);
        let call_ctx = ctx(fx.wallet);
        let err = handle_make_bid(
            &mut fx.state,
            &call_ctx,
            40,
            stranger,
            fx.registry.root(),
            &fx.registry.witness(1).unwrap(),
            fx.bid_map.root(),
            &fx.bid_map.witness(&stranger),
        )
        .unwrap_err();

        assert!(matches!(err, AuctionError::FeeNotPaid { .. }));
        assert_eq!((fx.state.bidders_root, fx.state.bids_root), roots_before);
        assert_eq!(fx.state.bidder_count, 0);
    }

    #[test]
    fn test_make_bid_rejects_cross_key_witness() {
        let mut fx = paid_fixture();
        let other = derive_nullifier(b"bidder-b");
        fx.bid_map.set(other, 50);
        fx.bid_map.set(fx.nullifier, 50);

        // Witness generated for `other`, asserted against `fx.nullifier`.
        let call_ctx = ctx(fx.wallet);
        let err = handle_make_bid(
            &mut fx.state,
            &call_ctx,
            50,
            fx.nullifier,
            fx.registry.root(),
            &fx.registry.witness(0).unwrap(),
            fx.bid_map.root(),
            &fx.bid_map.witness(&other),
        )
        .unwrap_err();

        assert!(matches!(err, AuctionError::BidKeyMismatch { .. }));
        assert_eq!(fx.state.bidder_count, 0);
    }

    #[test]
    fn test_make_bid_rejects_wrong_registry_root() {
        let mut fx = paid_fixture();
        fx.bid_map.set(fx.nullifier, 50);

        let call_ctx = ctx(fx.wallet);
        let err = handle_make_bid(
            &mut fx.state,
            &call_ctx,
            50,
            fx.nullifier,
            [0xFFu8; 32],
            &fx.registry.witness(0).unwrap(),
            fx.bid_map.root(),
            &fx.bid_map.witness(&fx.nullifier),
        )
        .unwrap_err();

        assert_eq!(err, AuctionError::InvalidBidderWitness);
    }

    #[test]
    fn test_repeat_bid_increments_count_again() {
        let mut fx = paid_fixture();
        fx.bid_map.set(fx.nullifier, 50);

        let call_ctx = ctx(fx.wallet);
        for _ in 0..2 {
            handle_make_bid(
                &mut fx.state,
                &call_ctx,
                50,
                fx.nullifier,
                fx.registry.root(),
                &fx.registry.witness(0).unwrap(),
                fx.bid_map.root(),
                &fx.bid_map.witness(&fx.nullifier),
            )
            .unwrap();
        }

        // Nothing deduplicates bidders; each accepted call counts.
        assert_eq!(fx.state.bidder_count, 2);
    }

    #[test]
    fn test_set_winner_requires_committed_root() {
        let mut fx = paid_fixture();
        fx.bid_map.set(fx.nullifier, 50);

        // Close over a root the contract never committed.
        let mut fresh = BidderRegistry::new(4).unwrap();
        fresh.set_leaf(0, fx.nullifier).unwrap();
        fresh.set_leaf(1, derive_nullifier(b"uncommitted")).unwrap();

        let call_ctx = ctx(fx.wallet);
        let err = handle_set_winner(
            &mut fx.state,
            &call_ctx,
            &mut fx.bank,
            fx.nullifier,
            50,
            fresh.root(),
            &fresh.witness(0).unwrap(),
            address(0x22),
            1,
        )
        .unwrap_err();

        assert_eq!(err, AuctionError::RegistryRootMismatch);
        assert_eq!(fx.state.winner_nullifier, [0u8; 32]);
    }

    #[test]
    fn test_handle_call_dispatches() {
        let mut state = AuctionState::new();
        let mut bank = MockBank::new();
        let wallet = address(0x11);
        bank.fund(wallet, 10);

        let nullifier = derive_nullifier(b"bidder-a");
        handle_call(
            &mut state,
            &ctx(wallet),
            &mut bank,
            AuctionCall::DepositFee {
                amount: AUCTION_FEE,
                nullifier,
            },
        )
        .unwrap();

        assert_eq!(state.pot, AUCTION_FEE);
    }

    #[test]
    fn test_set_winner_closes_auction_and_pays() {
        let mut fx = paid_fixture();
        fx.bid_map.set(fx.nullifier, 50);

        let call_ctx = ctx(fx.wallet);
        handle_make_bid(
            &mut fx.state,
            &call_ctx,
            50,
            fx.nullifier,
            fx.registry.root(),
            &fx.registry.witness(0).unwrap(),
            fx.bid_map.root(),
            &fx.bid_map.witness(&fx.nullifier),
        )
        .unwrap();

        let receiver = address(0x22);
        handle_set_winner(
            &mut fx.state,
            &call_ctx,
            &mut fx.bank,
            fx.nullifier,
            50,
            fx.registry.root(),
            &fx.registry.witness(0).unwrap(),
            receiver,
            5,
        )
        .unwrap();

        assert_eq!(fx.state.winner_nullifier, fx.nullifier);
        assert_eq!(fx.state.winning_bid, 50);
        assert_eq!(fx.bank.balance(&receiver), 5);
    }
}
