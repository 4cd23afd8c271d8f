//! The external value-transfer boundary.
//!
//! Funds movement is not this module's business: handlers call a
//! [`Transfer`] implementation supplied by the runtime, and any failure
//! aborts the whole operation before state is touched.

use lowbid_types::Address;
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Errors surfaced by the funds-transfer collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransferError {
    #[error("Missing signature authorization for {}", hex::encode(.0))]
    Unauthorized(Address),

    #[error("Insufficient funds: need {required}, available {available}")]
    InsufficientFunds { required: u64, available: u64 },
}

/// Value-transfer primitive requiring caller-signature authorization for
/// the debited account.
pub trait Transfer {
    fn transfer(&mut self, from: Address, to: Address, amount: u64) -> Result<(), TransferError>;
}

/// In-memory bank standing in for the chain's ledger in tests and local
/// runs. Accounts added with [`MockBank::fund`] carry signature authority;
/// anything else can only receive.
#[derive(Debug, Default)]
pub struct MockBank {
    balances: HashMap<Address, u64>,
    signers: HashSet<Address>,
}

impl MockBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit an account and grant it signature authority.
    pub fn fund(&mut self, address: Address, amount: u64) {
        *self.balances.entry(address).or_insert(0) += amount;
        self.signers.insert(address);
    }

    /// Current balance; unknown accounts read zero.
    pub fn balance(&self, address: &Address) -> u64 {
        self.balances.get(address).copied().unwrap_or(0)
    }
}

impl Transfer for MockBank {
    fn transfer(&mut self, from: Address, to: Address, amount: u64) -> Result<(), TransferError> {
        if !self.signers.contains(&from) {
            return Err(TransferError::Unauthorized(from));
        }
        let available = self.balance(&from);
        if available < amount {
            return Err(TransferError::InsufficientFunds {
                required: amount,
                available,
            });
        }
        *self.balances.get_mut(&from).unwrap() -= amount;
        *self.balances.entry(to).or_insert(0) += amount;
        Ok(())
    }
}
