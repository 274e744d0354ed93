//! Fundamental types for the Womansplain protocol.
//!
//! This crate defines the core types shared by both ledgers and the
//! transaction host: account addresses, nullifiers, timestamps, and the
//! protocol parameter set.

pub mod address;
pub mod nullifier;
pub mod params;
pub mod time;

pub use address::{AccountAddress, AddressParseError};
pub use nullifier::Nullifier;
pub use params::ProtocolParams;
pub use time::Timestamp;
