//! Events emitted by the identity registry.

use serde::{Deserialize, Serialize};
use womansplain_types::{AccountAddress, Nullifier, Timestamp};

/// Emitted once per successful proof verification.
///
/// This is the only public record of the nullifier-to-address binding, so
/// hosts must surface it to their audit pipeline: offline sybil auditing
/// works by scanning these events for repeated nullifiers that the registry
/// would have rejected.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisclosureEvent {
    pub user: AccountAddress,
    pub gender: String,
    pub timestamp: Timestamp,
    pub nullifier: Nullifier,
}
