//! The sequenced transaction host over both ledgers.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use womansplain_identity::{DisclosureEvent, IdentityHub, IdentityRegistry, VerificationPolicy};
use womansplain_questions::{Answer, Question, QuestionError, QuestionLedger};
use womansplain_types::{AccountAddress, ProtocolParams, Timestamp};

use crate::config::ChainConfig;
use crate::error::ChainError;

/// A state-mutating operation submitted by a signer.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Transaction {
    /// Verify the signer's identity proof.
    VerifyProof { proof: Vec<u8>, context: Vec<u8> },
    /// Submit a new question.
    SubmitQuestion { content: String, screenshot: String },
    /// Answer an open question (signer must be a verified woman).
    AnswerQuestion {
        question_id: u64,
        content: String,
        is_anonymous: bool,
    },
    /// Vote a red-flag severity score on a question.
    VoteRedFlag { question_id: u64, score: u64 },
}

impl Transaction {
    fn kind(&self) -> &'static str {
        match self {
            Transaction::VerifyProof { .. } => "verify_proof",
            Transaction::SubmitQuestion { .. } => "submit_question",
            Transaction::AnswerQuestion { .. } => "answer_question",
            Transaction::VoteRedFlag { .. } => "vote_red_flag",
        }
    }
}

/// What a successfully applied transaction produced.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TxOutcome {
    /// Identity verified; points balance unchanged.
    Verified,
    /// Question stored under the returned id.
    QuestionSubmitted { question_id: u64 },
    /// Answer stored; the advisor's new point balance.
    Answered { question_id: u64, advisor_points: u64 },
    /// Vote aggregated; the question's new running score and the voter's
    /// new point balance.
    Voted {
        question_id: u64,
        red_flag_score: u64,
        voter_points: u64,
    },
}

/// Commit-or-revert status of one transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TxStatus {
    Applied(TxOutcome),
    /// No state changed; the reason string decodes the failed precondition.
    Reverted { reason: String },
}

/// The receipt returned for every submitted transaction.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Receipt {
    /// Position of this transaction in the sequenced history.
    pub sequence: u64,
    pub signer: AccountAddress,
    pub timestamp: Timestamp,
    pub status: TxStatus,
    /// Disclosure events emitted while applying (verification only).
    pub events: Vec<DisclosureEvent>,
}

impl Receipt {
    pub fn is_applied(&self) -> bool {
        matches!(self.status, TxStatus::Applied(_))
    }
}

/// Serializable ledger state for persistence across restarts.
///
/// The identity hub is an injected dependency and is not part of the
/// snapshot.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChainSnapshot {
    registry: IdentityRegistry,
    questions: QuestionLedger,
    params: ProtocolParams,
    sequence: u64,
}

/// The transaction host: both ledgers plus the injected identity hub.
///
/// `apply` is the single mutation entry point. Calls are serialized by the
/// `&mut self` receiver, and each one either fully commits or fully reverts
/// — the engines check every precondition (including the cross-ledger
/// points award) before their first write.
pub struct Chain {
    registry: IdentityRegistry,
    questions: QuestionLedger,
    params: ProtocolParams,
    hub: Box<dyn IdentityHub>,
    sequence: u64,
}

impl Chain {
    /// Build a host from explicit parts.
    pub fn new(
        scope_seed: &str,
        policy: VerificationPolicy,
        ledger_address: AccountAddress,
        params: ProtocolParams,
        hub: Box<dyn IdentityHub>,
    ) -> Result<Self, ChainError> {
        let mut registry = IdentityRegistry::new(scope_seed, policy, &params)?;
        let questions = QuestionLedger::new(ledger_address.clone());
        registry.bind_points_authority(ledger_address)?;

        Ok(Self {
            registry,
            questions,
            params,
            hub,
            sequence: 0,
        })
    }

    /// Build a host from a loaded [`ChainConfig`].
    pub fn from_config(config: &ChainConfig, hub: Box<dyn IdentityHub>) -> Result<Self, ChainError> {
        let ledger_address = AccountAddress::parse(&config.ledger_address)?;
        Self::new(
            &config.scope_seed,
            config.policy.clone().into(),
            ledger_address,
            config.params.clone(),
            hub,
        )
    }

    /// Apply one transaction at the current wall-clock time.
    pub fn apply(&mut self, signer: &AccountAddress, tx: Transaction) -> Receipt {
        self.apply_at(signer, tx, Timestamp::now())
    }

    /// Apply one transaction with an explicit sequencing timestamp.
    pub fn apply_at(&mut self, signer: &AccountAddress, tx: Transaction, now: Timestamp) -> Receipt {
        let sequence = self.sequence;
        self.sequence += 1;

        debug!(kind = tx.kind(), %signer, sequence, "applying transaction");

        let result = self.dispatch(signer, &tx, now);
        let events = self.registry.drain_events();

        let status = match result {
            Ok(outcome) => {
                info!(kind = tx.kind(), %signer, sequence, ?outcome, "transaction applied");
                TxStatus::Applied(outcome)
            }
            Err(reason) => {
                warn!(kind = tx.kind(), %signer, sequence, %reason, "transaction reverted");
                TxStatus::Reverted {
                    reason: reason.to_string(),
                }
            }
        };

        Receipt {
            sequence,
            signer: signer.clone(),
            timestamp: now,
            status,
            events,
        }
    }

    fn dispatch(
        &mut self,
        signer: &AccountAddress,
        tx: &Transaction,
        now: Timestamp,
    ) -> Result<TxOutcome, QuestionError> {
        match tx {
            Transaction::VerifyProof { proof, context } => {
                debug!(proof_len = proof.len(), head = %hex::encode(&proof[..proof.len().min(8)]));
                self.registry
                    .verify_proof(signer, proof, context, self.hub.as_ref(), now, &self.params)?;
                Ok(TxOutcome::Verified)
            }
            Transaction::SubmitQuestion {
                content,
                screenshot,
            } => {
                let question_id = self.questions.submit_question(
                    signer,
                    content,
                    screenshot,
                    now,
                    &self.params,
                )?;
                Ok(TxOutcome::QuestionSubmitted { question_id })
            }
            Transaction::AnswerQuestion {
                question_id,
                content,
                is_anonymous,
            } => {
                self.questions.answer_question(
                    &mut self.registry,
                    signer,
                    *question_id,
                    content,
                    *is_anonymous,
                    now,
                    &self.params,
                )?;
                Ok(TxOutcome::Answered {
                    question_id: *question_id,
                    advisor_points: self.registry.validation_points(signer),
                })
            }
            Transaction::VoteRedFlag { question_id, score } => {
                let red_flag_score = self.questions.vote_red_flag(
                    &mut self.registry,
                    signer,
                    *question_id,
                    *score,
                    &self.params,
                )?;
                Ok(TxOutcome::Voted {
                    question_id: *question_id,
                    red_flag_score,
                    voter_points: self.registry.validation_points(signer),
                })
            }
        }
    }

    // ── Read surface ────────────────────────────────────────────────────

    pub fn is_verified_woman(&self, address: &AccountAddress) -> bool {
        self.registry.is_verified_woman(address)
    }

    pub fn validation_points(&self, address: &AccountAddress) -> u64 {
        self.registry.validation_points(address)
    }

    pub fn user_badges(&self, address: &AccountAddress) -> u32 {
        self.registry.user_badges(address)
    }

    pub fn user_gender(&self, address: &AccountAddress) -> String {
        self.registry.user_gender(address)
    }

    pub fn has_disclosed_gender(&self, address: &AccountAddress) -> bool {
        self.registry.has_disclosed_gender(address)
    }

    pub fn unanswered_questions(&self, limit: usize) -> Vec<Question> {
        self.questions.unanswered(limit)
    }

    pub fn question_with_answer(
        &self,
        question_id: u64,
    ) -> Result<(Question, Answer, bool), QuestionError> {
        self.questions.question_with_answer(question_id)
    }

    pub fn question_count(&self) -> u64 {
        self.questions.question_count()
    }

    /// Number of transactions sequenced so far.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    // ── Persistence ─────────────────────────────────────────────────────

    /// Capture the full ledger state for persistence.
    pub fn snapshot(&self) -> ChainSnapshot {
        ChainSnapshot {
            registry: self.registry.clone(),
            questions: self.questions.clone(),
            params: self.params.clone(),
            sequence: self.sequence,
        }
    }

    /// Restore a host from a snapshot, re-injecting the hub.
    pub fn restore(snapshot: ChainSnapshot, hub: Box<dyn IdentityHub>) -> Self {
        Self {
            registry: snapshot.registry,
            questions: snapshot.questions,
            params: snapshot.params,
            hub,
            sequence: snapshot.sequence,
        }
    }

    /// Write a bincode snapshot to disk.
    pub fn save_snapshot(&self, path: &std::path::Path) -> Result<(), ChainError> {
        let bytes = bincode::serialize(&self.snapshot())
            .map_err(|e| ChainError::Snapshot(e.to_string()))?;
        std::fs::write(path, bytes).map_err(|e| ChainError::Snapshot(e.to_string()))?;
        info!(path = %path.display(), "snapshot saved");
        Ok(())
    }

    /// Load a bincode snapshot from disk and restore a host around it.
    pub fn load_snapshot(
        path: &std::path::Path,
        hub: Box<dyn IdentityHub>,
    ) -> Result<Self, ChainError> {
        let bytes = std::fs::read(path).map_err(|e| ChainError::Snapshot(e.to_string()))?;
        let snapshot: ChainSnapshot =
            bincode::deserialize(&bytes).map_err(|e| ChainError::Snapshot(e.to_string()))?;
        Ok(Self::restore(snapshot, hub))
    }
}
