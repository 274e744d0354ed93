//! Identity registry for the Womansplain protocol.
//!
//! Verification is delegated to an external zero-knowledge identity hub: the
//! registry consumes an opaque proof, records the disclosed gender attribute
//! and the replay-protection nullifier, and from then on only accumulates
//! validation points and recomputes the badge bitset.
//!
//! Two invariants carry the sybil resistance of the whole system:
//! 1. An address verifies at most once, and never un-verifies.
//! 2. A nullifier binds to at most one address, ever.

pub mod badges;
pub mod error;
pub mod event;
pub mod hub;
pub mod record;
pub mod registry;

pub use error::IdentityError;
pub use event::DisclosureEvent;
pub use hub::{Disclosure, IdentityHub, StubHub, VerificationPolicy};
pub use record::IdentityRecord;
pub use registry::IdentityRegistry;
