//! The question ledger engine.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use womansplain_identity::IdentityRegistry;
use womansplain_types::{AccountAddress, ProtocolParams, Timestamp};

use crate::error::QuestionError;
use crate::question::{Answer, Question};

/// Highest red-flag severity a vote may carry.
pub const MAX_RED_FLAG_SCORE: u64 = 100;

/// The ledger of questions, answers, and red-flag votes.
///
/// Question ids are sequential from 1 and questions are never deleted, so
/// they live in a `Vec` indexed by `id - 1`. Mutations follow a
/// checks-then-effects discipline: every precondition (including the
/// registry's authority check inside `award_points`) is established before
/// the first local write, so a returned error means neither ledger changed.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct QuestionLedger {
    /// The address this ledger presents to the registry when awarding
    /// points — must match the registry's bound points authority.
    ledger_address: AccountAddress,
    questions: Vec<Question>,
    answers: HashMap<u64, Answer>,
    /// Addresses that have voted per question, for de-duplication.
    voters: HashMap<u64, HashSet<AccountAddress>>,
}

impl QuestionLedger {
    pub fn new(ledger_address: AccountAddress) -> Self {
        Self {
            ledger_address,
            questions: Vec::new(),
            answers: HashMap::new(),
            voters: HashMap::new(),
        }
    }

    pub fn ledger_address(&self) -> &AccountAddress {
        &self.ledger_address
    }

    /// Submit a question. No gating: any address may ask.
    ///
    /// Returns the new question's id.
    pub fn submit_question(
        &mut self,
        asker: &AccountAddress,
        content: &str,
        screenshot: &str,
        now: Timestamp,
        params: &ProtocolParams,
    ) -> Result<u64, QuestionError> {
        validate_content(content, params)?;
        if screenshot.len() > params.max_screenshot_len {
            return Err(QuestionError::ScreenshotTooLong {
                len: screenshot.len(),
                max: params.max_screenshot_len,
            });
        }

        let id = self.questions.len() as u64 + 1;
        self.questions.push(Question {
            id,
            asker: asker.clone(),
            content: content.to_string(),
            screenshot: screenshot.to_string(),
            timestamp: now,
            has_answer: false,
            red_flag_score: 0,
            total_votes: 0,
        });

        Ok(id)
    }

    /// Answer a question. Gated on the registry's verified-woman check and
    /// limited to one answer per question, ever.
    ///
    /// Awards `params.answer_reward_points` to the advisor through the
    /// registry capability. The award is the last fallible step, and the
    /// local writes after it cannot fail, so a registry revert leaves the
    /// question untouched.
    pub fn answer_question(
        &mut self,
        registry: &mut IdentityRegistry,
        advisor: &AccountAddress,
        question_id: u64,
        content: &str,
        is_anonymous: bool,
        now: Timestamp,
        params: &ProtocolParams,
    ) -> Result<(), QuestionError> {
        let question = self
            .questions
            .get((question_id as usize).wrapping_sub(1))
            .ok_or(QuestionError::QuestionNotFound(question_id))?;
        if question.has_answer {
            return Err(QuestionError::AlreadyAnswered(question_id));
        }

        validate_content(content, params)?;

        if !registry.is_verified_woman(advisor) {
            return Err(QuestionError::NotVerified(advisor.to_string()));
        }

        registry.award_points(
            &self.ledger_address,
            advisor,
            params.answer_reward_points,
            params,
        )?;

        self.answers.insert(
            question_id,
            Answer {
                question_id,
                advisor: advisor.clone(),
                content: content.to_string(),
                timestamp: now,
                is_anonymous,
            },
        );
        self.questions[question_id as usize - 1].has_answer = true;

        Ok(())
    }

    /// Vote a red-flag severity score on a question.
    ///
    /// Any address may vote, including the asker, but only once per
    /// question. The aggregate is an integer running mean,
    /// `floor((old·n + score) / (n + 1))`. Awards
    /// `params.vote_reward_points` to the voter. Returns the new aggregate
    /// score.
    pub fn vote_red_flag(
        &mut self,
        registry: &mut IdentityRegistry,
        voter: &AccountAddress,
        question_id: u64,
        score: u64,
        params: &ProtocolParams,
    ) -> Result<u64, QuestionError> {
        if self
            .questions
            .get((question_id as usize).wrapping_sub(1))
            .is_none()
        {
            return Err(QuestionError::QuestionNotFound(question_id));
        }
        if score > MAX_RED_FLAG_SCORE {
            return Err(QuestionError::ScoreOutOfRange(score));
        }
        if self
            .voters
            .get(&question_id)
            .is_some_and(|v| v.contains(voter))
        {
            return Err(QuestionError::DuplicateVote {
                question_id,
                voter: voter.to_string(),
            });
        }

        registry.award_points(
            &self.ledger_address,
            voter,
            params.vote_reward_points,
            params,
        )?;

        let question = &mut self.questions[question_id as usize - 1];
        // Widen to u128 so the weighted sum cannot overflow at high counts.
        let weighted = question.red_flag_score as u128 * question.total_votes as u128
            + score as u128;
        question.red_flag_score = (weighted / (question.total_votes as u128 + 1)) as u64;
        question.total_votes += 1;

        self.voters
            .entry(question_id)
            .or_default()
            .insert(voter.clone());

        Ok(question.red_flag_score)
    }

    /// Up to `limit` unanswered questions in ascending id order.
    ///
    /// A full scan bounded by `limit` — callers own the pagination cost.
    pub fn unanswered(&self, limit: usize) -> Vec<Question> {
        self.questions
            .iter()
            .filter(|q| !q.has_answer)
            .take(limit)
            .cloned()
            .collect()
    }

    /// A question by id.
    pub fn question(&self, question_id: u64) -> Result<&Question, QuestionError> {
        self.questions
            .get((question_id as usize).wrapping_sub(1))
            .ok_or(QuestionError::QuestionNotFound(question_id))
    }

    /// A question together with its answer.
    ///
    /// The answer slot is zero-valued and the flag false when the question
    /// has no answer yet.
    pub fn question_with_answer(
        &self,
        question_id: u64,
    ) -> Result<(Question, Answer, bool), QuestionError> {
        let question = self.question(question_id)?.clone();
        match self.answers.get(&question_id) {
            Some(answer) => Ok((question, answer.clone(), true)),
            None => Ok((question, Answer::empty(), false)),
        }
    }

    /// Total questions ever submitted (the next id minus one).
    pub fn question_count(&self) -> u64 {
        self.questions.len() as u64
    }
}

fn validate_content(content: &str, params: &ProtocolParams) -> Result<(), QuestionError> {
    if content.is_empty() {
        return Err(QuestionError::EmptyContent);
    }
    if content.len() > params.max_content_len {
        return Err(QuestionError::ContentTooLong {
            len: content.len(),
            max: params.max_content_len,
        });
    }
    Ok(())
}
