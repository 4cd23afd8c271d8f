//! Auction state machine for the lowbid sealed-bid reverse auction.
//!
//! This module implements the on-chain logic of the auction:
//!
//! - Fee deposits recorded in an append-only action log
//! - Bid submission gated on a full-history payment check and on witnesses
//!   against both authenticated structures
//! - Winner assertion against the committed registry root, with payout
//! - Read-only queries over committed state
//!
//! # Architecture
//!
//! - `call`: Message types for state-changing operations
//! - `handlers`: Business logic for processing calls
//! - `queries`: Read-only state access
//! - `state`: The committed auction record and derived phase
//! - `ledger`: The append-only action log and its payment fold
//! - `transfer`: External value-transfer boundary
//! - `genesis`: Initial configuration
//! - `error`: Error types
//!
//! # Example
//!
//! ```ignore
//! use lowbid_module::{handlers, state::AuctionState, transfer::MockBank};
//!
//! let mut state = AuctionState::new();
//! let mut bank = MockBank::new();
//! let ctx = handlers::CallContext { sender, timestamp };
//!
//! handlers::handle_deposit_fee(&mut state, &ctx, &mut bank, fee, nullifier)?;
//! handlers::handle_make_bid(&mut state, &ctx, bid, nullifier, ...)?;
//! ```

pub mod call;
pub mod error;
pub mod genesis;
pub mod handlers;
pub mod ledger;
pub mod queries;
pub mod state;
pub mod transfer;

pub use call::AuctionCall;
pub use error::AuctionError;
pub use genesis::AuctionGenesisConfig;
pub use handlers::{CallContext, HandlerResult};
pub use ledger::ActionLog;
pub use queries::{AuctionQuery, AuctionQueryResponse};
pub use state::{AuctionPhase, AuctionState};
pub use transfer::{MockBank, Transfer, TransferError};
