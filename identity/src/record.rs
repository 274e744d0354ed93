//! Per-address identity record.

use serde::{Deserialize, Serialize};
use womansplain_types::{AccountAddress, Nullifier, Timestamp};

/// The identity state of a single address.
///
/// Records are created implicitly: either by the address's first successful
/// proof verification, or by its first point award (any address may vote and
/// earn points before ever verifying). Records are never deleted, and only
/// `validation_points` and `badge_flags` mutate after the verification
/// fields are set.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IdentityRecord {
    /// The owning account, immutable.
    pub address: AccountAddress,
    /// Set true exactly once on successful verification; never reset.
    pub verified: bool,
    /// Gender attribute disclosed by the proof ("F", "M", ...); set once.
    pub disclosed_gender: Option<String>,
    /// Replay-protection nullifier from the proof, globally unique; set once.
    pub nullifier: Option<Nullifier>,
    /// When the proof was verified.
    pub verified_at: Option<Timestamp>,
    /// Monotonically non-decreasing contribution counter.
    pub validation_points: u64,
    /// Derived badge bitset — recomputed from `(verified, validation_points)`
    /// on every mutation, never patched incrementally.
    pub badge_flags: u32,
}

impl IdentityRecord {
    /// A fresh, unverified record with zero points.
    pub fn unverified(address: AccountAddress) -> Self {
        Self {
            address,
            verified: false,
            disclosed_gender: None,
            nullifier: None,
            verified_at: None,
            validation_points: 0,
            badge_flags: 0,
        }
    }
}
