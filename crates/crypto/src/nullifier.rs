//! Nullifier derivation.
//!
//! A nullifier is a deterministic, one-way mapping from a bidder's private
//! key material to a public pseudonymous identifier. The same secret always
//! yields the same nullifier, so the fee ledger and bid map can address a
//! bidder consistently across calls without ever seeing the key itself.

use lowbid_types::Nullifier;
use sha2::{Digest, Sha256};

/// Domain-separation prefix for nullifier derivation.
const NULLIFIER_DOMAIN: &[u8] = b"LOWBID_NULLIFIER_V1:";

/// Derive a bidder's nullifier from its private key bytes.
///
/// Pure and deterministic; no randomness is involved.
pub fn derive_nullifier(secret_key: &[u8]) -> Nullifier {
    let mut hasher = Sha256::new();
    hasher.update(NULLIFIER_DOMAIN);
    hasher.update(secret_key);
    hasher.finalize().into()
}
