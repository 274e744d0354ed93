//! Question and answer records.

use serde::{Deserialize, Serialize};
use womansplain_types::{AccountAddress, Timestamp};

/// A submitted question. Ids are sequential from 1.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: u64,
    pub asker: AccountAddress,
    pub content: String,
    /// Opaque screenshot reference (data URI or external pointer); bounded
    /// in length, otherwise never validated.
    pub screenshot: String,
    pub timestamp: Timestamp,
    /// Flips false→true exactly once; a question has at most one answer.
    pub has_answer: bool,
    /// Running mean of red-flag votes in [0, 100]; meaningful only when
    /// `total_votes > 0`.
    pub red_flag_score: u64,
    pub total_votes: u64,
}

/// The single answer to a question, keyed by question id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub question_id: u64,
    /// Always persisted, even for anonymous answers — the anonymity flag is
    /// display policy, not access control.
    pub advisor: AccountAddress,
    pub content: String,
    pub timestamp: Timestamp,
    pub is_anonymous: bool,
}

impl Answer {
    /// The zero-valued answer returned for unanswered questions.
    pub fn empty() -> Self {
        Self {
            question_id: 0,
            advisor: AccountAddress::new(format!("0x{}", "0".repeat(40))),
            content: String::new(),
            timestamp: Timestamp::EPOCH,
            is_anonymous: false,
        }
    }
}
