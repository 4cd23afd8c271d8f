//! Genesis configuration for the auction module.
//!
//! An external bootstrap applies this exactly once, before any other
//! operation is callable; every state field not set here starts at zero.

use lowbid_types::{Address, AUCTION_FEE};
use serde::{Deserialize, Serialize};

/// Genesis configuration for one auction.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AuctionGenesisConfig {
    /// Exact entry fee each bidder must deposit.
    pub fee: u64,

    /// Address that holds the pot at the funds-transfer boundary.
    pub auction_address: Address,

    /// Scheduled start, seconds UTC. Recorded but not enforced.
    pub starts_at: u64,

    /// Scheduled end, seconds UTC. Recorded but not enforced.
    pub ends_at: u64,
}

impl Default for AuctionGenesisConfig {
    fn default() -> Self {
        Self {
            fee: AUCTION_FEE,
            auction_address: [0u8; 32],
            starts_at: 0,
            ends_at: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_fee_matches_constant() {
        let config = AuctionGenesisConfig::default();
        assert_eq!(config.fee, AUCTION_FEE);
        assert_eq!(config.starts_at, 0);
        assert_eq!(config.ends_at, 0);
    }
}
