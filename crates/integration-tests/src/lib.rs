//! End-to-end integration tests for the lowbid sealed-bid reverse auction.
//!
//! These tests exercise the full auction lifecycle:
//! 1. Genesis
//! 2. Fee deposits into the pot
//! 3. Bid submission with registry and bid-map witnesses
//! 4. Off-chain winner fold through the rollup
//! 5. Winner assertion and payout

use lowbid_circuit::rollup;
use lowbid_crypto::{derive_nullifier, BidMap, BidderRegistry};
use lowbid_module::{
    handlers, AuctionError, AuctionPhase, AuctionState, CallContext, MockBank,
};
use lowbid_settler::{collect_challengers, prove_winner};
use lowbid_types::{rollup_io::Winner, Address, Nullifier, AUCTION_FEE};

use rand::RngCore;

struct Bidder {
    wallet: Address,
    nullifier: Nullifier,
    bid: u64,
}

fn bidder(wallet_byte: u8, secret: &[u8], bid: u64) -> Bidder {
    Bidder {
        wallet: [wallet_byte; 32],
        nullifier: derive_nullifier(secret),
        bid,
    }
}

fn ctx(sender: Address) -> CallContext {
    CallContext {
        sender,
        timestamp: 0,
    }
}

/// Test the complete auction flow: three bidders, lowest bid wins.
#[test]
fn test_full_auction_flow() {
    // ========================================
    // Phase 1: Genesis
    // ========================================

    let mut state = AuctionState::new();
    let mut bank = MockBank::new();
    assert_eq!(state.phase(), AuctionPhase::Created);

    let bidders = [
        bidder(0xA1, b"bidder-a-secret", 50),
        bidder(0xB1, b"bidder-b-secret", 20),
        bidder(0xC1, b"bidder-c-secret", 80),
    ];
    for b in &bidders {
        bank.fund(b.wallet, 100);
    }

    println!("Genesis complete: 3 funded bidders");

    // ========================================
    // Phase 2: Fee deposits
    // ========================================

    for b in &bidders {
        handlers::handle_deposit_fee(&mut state, &ctx(b.wallet), &mut bank, AUCTION_FEE, b.nullifier)
            .expect("fee deposit failed");
    }

    assert_eq!(state.pot, 9);
    assert_eq!(bank.balance(&state.address), 9);
    assert_eq!(state.phase(), AuctionPhase::Collecting);

    println!("3 fees deposited, pot = {}", state.pot);

    // ========================================
    // Phase 3: Bid submission
    // ========================================

    // Local working copies of the authenticated structures; the contract
    // only ever sees their roots.
    let mut registry = BidderRegistry::new(4).unwrap();
    for (i, b) in bidders.iter().enumerate() {
        registry.set_leaf(i as u64, b.nullifier).unwrap();
    }

    let mut bid_map = BidMap::new();
    for (i, b) in bidders.iter().enumerate() {
        bid_map.set(b.nullifier, b.bid);
        handlers::handle_make_bid(
            &mut state,
            &ctx(b.wallet),
            b.bid,
            b.nullifier,
            registry.root(),
            &registry.witness(i as u64).unwrap(),
            bid_map.root(),
            &bid_map.witness(&b.nullifier),
        )
        .expect("bid rejected");
        println!("Bid {} submitted: {}", i, b.bid);
    }

    assert_eq!(state.bidder_count, 3);
    assert_eq!(state.bids_root, bid_map.root());
    assert_eq!(state.bidders_root, registry.root());
    assert_eq!(state.phase(), AuctionPhase::Bidding);

    // ========================================
    // Phase 4: Off-chain winner fold
    // ========================================

    let challengers = collect_challengers(&state.actions);
    assert_eq!(challengers.len(), 3);

    let proof = prove_winner(&challengers).expect("fold failed");
    rollup::verify(&proof).expect("final proof invalid");

    assert_eq!(proof.winner.nullifier, bidders[1].nullifier);
    assert_eq!(proof.winner.bid, 20);

    println!("Winner proof generated: lowest bid = {}", proof.winner.bid);

    // ========================================
    // Phase 5: Close and pay out
    // ========================================

    let operator = [0x0Fu8; 32];
    bank.fund(operator, 50);

    handlers::handle_set_winner(
        &mut state,
        &ctx(operator),
        &mut bank,
        proof.winner.nullifier,
        proof.winner.bid,
        registry.root(),
        &registry.witness(1).unwrap(),
        bidders[1].wallet,
        proof.winner.bid,
    )
    .expect("set_winner failed");

    assert_eq!(state.phase(), AuctionPhase::Closed);
    assert_eq!(state.winner_nullifier, bidders[1].nullifier);
    assert_eq!(state.winning_bid, 20);
    assert_eq!(bank.balance(&bidders[1].wallet), 100 - AUCTION_FEE + 20);

    println!("\nAuction settled successfully!");
    println!("  Winning bid: {}", state.winning_bid);
}

/// A bidder who never deposited the fee is rejected, with roots unchanged.
#[test]
fn test_unpaid_bidder_rejected() {
    let mut state = AuctionState::new();
    let mut bank = MockBank::new();

    // One honest bidder establishes committed roots.
    let honest = bidder(0xA1, b"honest", 50);
    bank.fund(honest.wallet, 10);
    handlers::handle_deposit_fee(
        &mut state,
        &ctx(honest.wallet),
        &mut bank,
        AUCTION_FEE,
        honest.nullifier,
    )
    .unwrap();

    let mut registry = BidderRegistry::new(4).unwrap();
    registry.set_leaf(0, honest.nullifier).unwrap();
    let mut bid_map = BidMap::new();
    bid_map.set(honest.nullifier, 50);
    handlers::handle_make_bid(
        &mut state,
        &ctx(honest.wallet),
        50,
        honest.nullifier,
        registry.root(),
        &registry.witness(0).unwrap(),
        bid_map.root(),
        &bid_map.witness(&honest.nullifier),
    )
    .unwrap();

    // The freeloader has perfectly valid witnesses but no fee event.
    let freeloader = bidder(0xB1, b"freeloader", 10);
    registry.set_leaf(1, freeloader.nullifier).unwrap();
    bid_map.set(freeloader.nullifier, 10);

    let roots_before = (state.bidders_root, state.bids_root);
    let err = handlers::handle_make_bid(
        &mut state,
        &ctx(freeloader.wallet),
        10,
        freeloader.nullifier,
        registry.root(),
        &registry.witness(1).unwrap(),
        bid_map.root(),
        &bid_map.witness(&freeloader.nullifier),
    )
    .unwrap_err();

    assert!(matches!(err, AuctionError::FeeNotPaid { .. }));
    assert_eq!((state.bidders_root, state.bids_root), roots_before);
    assert_eq!(state.bidder_count, 1);
}

/// A bid-map witness generated for one nullifier cannot prove another.
#[test]
fn test_cross_key_witness_rejected() {
    let mut state = AuctionState::new();
    let mut bank = MockBank::new();

    let alice = bidder(0xA1, b"alice", 50);
    let bob = bidder(0xB1, b"bob", 20);
    for b in [&alice, &bob] {
        bank.fund(b.wallet, 10);
        handlers::handle_deposit_fee(&mut state, &ctx(b.wallet), &mut bank, AUCTION_FEE, b.nullifier)
            .unwrap();
    }

    let mut registry = BidderRegistry::new(4).unwrap();
    registry.set_leaf(0, alice.nullifier).unwrap();
    registry.set_leaf(1, bob.nullifier).unwrap();

    let mut bid_map = BidMap::new();
    bid_map.set(alice.nullifier, 50);
    bid_map.set(bob.nullifier, 20);

    // Bob's witness, asserted against Alice's nullifier.
    let err = handlers::handle_make_bid(
        &mut state,
        &ctx(alice.wallet),
        20,
        alice.nullifier,
        registry.root(),
        &registry.witness(0).unwrap(),
        bid_map.root(),
        &bid_map.witness(&bob.nullifier),
    )
    .unwrap_err();

    assert!(matches!(err, AuctionError::BidKeyMismatch { .. }));
    assert_eq!(state.bidder_count, 0);
}

/// The rollup's final output does not depend on fold order, and random
/// bid values never break the minimum property.
#[test]
fn test_rollup_reorder_equivalence_with_random_bids() {
    let mut rng = rand::rngs::OsRng;

    let mut challengers = Vec::new();
    for i in 0..8u8 {
        let mut secret = [0u8; 32];
        rng.fill_bytes(&mut secret);
        // Nonzero and pairwise distinct, so neither the degenerate guard
        // nor a cross-order tie can fire.
        let bid = (rng.next_u64() % 1_000_000) * 8 + u64::from(i) + 1;
        challengers.push(Winner {
            nullifier: derive_nullifier(&secret),
            bid,
        });
    }

    let forward = prove_winner(&challengers).unwrap();

    let mut reversed = challengers.clone();
    reversed.reverse();
    let backward = prove_winner(&reversed).unwrap();

    let expected_min = challengers.iter().map(|c| c.bid).min().unwrap();
    assert_eq!(forward.winner.bid, expected_min);
    assert_eq!(forward.winner, backward.winner);
}
