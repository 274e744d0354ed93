//! Transaction host for the Womansplain protocol.
//!
//! Wraps the identity registry and the question ledger in a single sequenced
//! surface: every submitted transaction is applied atomically against shared
//! state and answered with a receipt carrying either its outcome (plus any
//! disclosure events) or a decodable revert reason. The host also owns the
//! ambient concerns — TOML configuration, structured logging, and snapshot
//! persistence.

pub mod chain;
pub mod config;
pub mod error;
pub mod logging;

pub use chain::{Chain, ChainSnapshot, Receipt, Transaction, TxOutcome, TxStatus};
pub use config::{ChainConfig, PolicyConfig};
pub use error::ChainError;
pub use logging::{init_logging, LogFormat};
