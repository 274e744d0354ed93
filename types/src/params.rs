//! Protocol parameters — reward amounts, badge thresholds, and content bounds.

use serde::{Deserialize, Serialize};

/// All tunable parameters shared by the identity registry and the question
/// ledger.
///
/// The defaults reproduce the deployed application's constants; hosts may
/// override them at construction (e.g. shorter content bounds on a devnet).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProtocolParams {
    // ── Rewards ──────────────────────────────────────────────────────────
    /// Validation points credited to an advisor per accepted answer.
    pub answer_reward_points: u64,

    /// Validation points credited to a voter per accepted red-flag vote.
    pub vote_reward_points: u64,

    // ── Badge thresholds ─────────────────────────────────────────────────
    /// Points required for the ADVISOR badge.
    pub advisor_badge_points: u64,

    /// Points required for the EXPERT badge.
    pub expert_badge_points: u64,

    /// Points required for the LEGEND badge.
    pub legend_badge_points: u64,

    // ── Content bounds ───────────────────────────────────────────────────
    /// Maximum length in bytes of question and answer content.
    pub max_content_len: usize,

    /// Maximum length in bytes of a screenshot reference (data URI or
    /// external pointer — never validated beyond length).
    pub max_screenshot_len: usize,

    /// Maximum length in bytes of the application scope seed used to
    /// namespace identity proofs.
    pub max_scope_seed_len: usize,
}

impl ProtocolParams {
    /// The parameter set of the deployed application.
    pub fn womansplain_defaults() -> Self {
        Self {
            answer_reward_points: 10,
            vote_reward_points: 2,
            advisor_badge_points: 100,
            expert_badge_points: 300,
            legend_badge_points: 1050,
            max_content_len: 2_000,
            max_screenshot_len: 200_000,
            max_scope_seed_len: 31,
        }
    }
}

impl Default for ProtocolParams {
    fn default() -> Self {
        Self::womansplain_defaults()
    }
}
