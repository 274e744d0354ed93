//! Question ledger for the Womansplain protocol.
//!
//! Anyone may ask; only identities the registry reports as verified women may
//! answer; anyone may vote a red-flag severity score. Answering and voting
//! award validation points through the registry's points-authority
//! capability, so the two ledgers commit or revert together.

pub mod error;
pub mod ledger;
pub mod question;

pub use error::QuestionError;
pub use ledger::QuestionLedger;
pub use question::{Answer, Question};
