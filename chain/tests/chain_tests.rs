//! End-to-end transaction flow tests for the chain host.

use womansplain_chain::{Chain, ChainConfig, Receipt, Transaction, TxOutcome, TxStatus};
use womansplain_identity::StubHub;
use womansplain_types::{AccountAddress, Timestamp};

fn addr(n: u8) -> AccountAddress {
    AccountAddress::new(format!("0x{:040x}", n))
}

fn hub() -> Box<StubHub> {
    Box::new(StubHub::new("proof-of-womanhood"))
}

fn chain() -> Chain {
    Chain::from_config(&ChainConfig::default(), hub()).unwrap()
}

fn now() -> Timestamp {
    Timestamp::new(1_700_000_000)
}

fn outcome(receipt: &Receipt) -> &TxOutcome {
    match &receipt.status {
        TxStatus::Applied(outcome) => outcome,
        TxStatus::Reverted { reason } => panic!("unexpected revert: {reason}"),
    }
}

fn revert_reason(receipt: &Receipt) -> &str {
    match &receipt.status {
        TxStatus::Reverted { reason } => reason,
        TxStatus::Applied(outcome) => panic!("expected revert, got {outcome:?}"),
    }
}

#[test]
fn full_flow_ask_verify_answer_vote() {
    let mut chain = chain();
    let asker = addr(1);
    let advisor = addr(2);

    // Anyone may ask, no verification needed.
    let receipt = chain.apply_at(
        &asker,
        Transaction::SubmitQuestion {
            content: "He ghosted me".into(),
            screenshot: String::new(),
        },
        now(),
    );
    assert_eq!(
        outcome(&receipt),
        &TxOutcome::QuestionSubmitted { question_id: 1 }
    );
    assert_eq!(chain.question_count(), 1);
    assert_eq!(chain.unanswered_questions(10).len(), 1);

    // The advisor verifies; the receipt carries the disclosure event.
    let receipt = chain.apply_at(
        &advisor,
        Transaction::VerifyProof {
            proof: StubHub::proof("F", "advisor"),
            context: Vec::new(),
        },
        now(),
    );
    assert_eq!(outcome(&receipt), &TxOutcome::Verified);
    assert_eq!(receipt.events.len(), 1);
    assert_eq!(receipt.events[0].user, advisor);
    assert_eq!(receipt.events[0].gender, "F");
    assert!(!receipt.events[0].nullifier.is_zero());
    assert!(chain.is_verified_woman(&advisor));

    // She answers anonymously and earns 10 points.
    let receipt = chain.apply_at(
        &advisor,
        Transaction::AnswerQuestion {
            question_id: 1,
            content: "Move on.".into(),
            is_anonymous: true,
        },
        now(),
    );
    assert_eq!(
        outcome(&receipt),
        &TxOutcome::Answered {
            question_id: 1,
            advisor_points: 10,
        }
    );

    let (question, answer, has_answer) = chain.question_with_answer(1).unwrap();
    assert!(has_answer);
    assert!(question.has_answer);
    assert_eq!(answer.advisor, advisor);
    assert!(answer.is_anonymous);
    assert_eq!(chain.validation_points(&advisor), 10);
    assert!(chain.unanswered_questions(10).is_empty());

    // Three community votes of 40, 60, 100 → running scores 40, 50, 66.
    for (i, (score, expected)) in [(40, 40), (60, 50), (100, 66)].iter().enumerate() {
        let voter = addr(10 + i as u8);
        let receipt = chain.apply_at(
            &voter,
            Transaction::VoteRedFlag {
                question_id: 1,
                score: *score,
            },
            now(),
        );
        assert_eq!(
            outcome(&receipt),
            &TxOutcome::Voted {
                question_id: 1,
                red_flag_score: *expected,
                voter_points: 2,
            }
        );
    }
    let (question, _, _) = chain.question_with_answer(1).unwrap();
    assert_eq!(question.total_votes, 3);
    assert_eq!(question.red_flag_score, 66);
}

#[test]
fn receipts_are_sequenced() {
    let mut chain = chain();
    let r0 = chain.apply_at(
        &addr(1),
        Transaction::SubmitQuestion {
            content: "Q".into(),
            screenshot: String::new(),
        },
        now(),
    );
    let r1 = chain.apply_at(
        &addr(1),
        Transaction::SubmitQuestion {
            content: "".into(),
            screenshot: String::new(),
        },
        now(),
    );
    assert_eq!(r0.sequence, 0);
    // Reverted transactions still consume a sequence slot.
    assert_eq!(r1.sequence, 1);
    assert_eq!(chain.sequence(), 2);
}

#[test]
fn unverified_answer_reverts_and_leaves_no_state() {
    let mut chain = chain();
    chain.apply_at(
        &addr(1),
        Transaction::SubmitQuestion {
            content: "Q".into(),
            screenshot: String::new(),
        },
        now(),
    );

    let receipt = chain.apply_at(
        &addr(3),
        Transaction::AnswerQuestion {
            question_id: 1,
            content: "...".into(),
            is_anonymous: false,
        },
        now(),
    );
    assert!(revert_reason(&receipt).contains("not a verified woman"));
    assert!(receipt.events.is_empty());

    let (question, _, has_answer) = chain.question_with_answer(1).unwrap();
    assert!(!question.has_answer);
    assert!(!has_answer);
    assert_eq!(chain.validation_points(&addr(3)), 0);
}

#[test]
fn second_verification_attempts_revert() {
    let mut chain = chain();
    let alice = addr(1);
    let mallory = addr(2);

    let tx = Transaction::VerifyProof {
        proof: StubHub::proof("F", "alice"),
        context: Vec::new(),
    };
    assert!(chain.apply_at(&alice, tx.clone(), now()).is_applied());

    // Same address again: already verified.
    let receipt = chain.apply_at(&alice, tx.clone(), now());
    assert!(revert_reason(&receipt).contains("already verified"));

    // Different address, same underlying identity: duplicate nullifier.
    let receipt = chain.apply_at(&mallory, tx, now());
    assert!(revert_reason(&receipt).contains("already bound"));
    assert!(!chain.is_verified_woman(&mallory));
}

#[test]
fn duplicate_vote_reverts() {
    let mut chain = chain();
    chain.apply_at(
        &addr(1),
        Transaction::SubmitQuestion {
            content: "Q".into(),
            screenshot: String::new(),
        },
        now(),
    );

    let vote = Transaction::VoteRedFlag {
        question_id: 1,
        score: 70,
    };
    assert!(chain.apply_at(&addr(5), vote.clone(), now()).is_applied());
    let receipt = chain.apply_at(&addr(5), vote, now());
    assert!(revert_reason(&receipt).contains("already voted"));
    assert_eq!(chain.validation_points(&addr(5)), 2);
}

#[test]
fn snapshot_roundtrip_on_disk() {
    let mut chain = chain();
    let advisor = addr(2);

    chain.apply_at(
        &addr(1),
        Transaction::SubmitQuestion {
            content: "He ghosted me".into(),
            screenshot: "data:image/png;base64,AAAA".into(),
        },
        now(),
    );
    chain.apply_at(
        &advisor,
        Transaction::VerifyProof {
            proof: StubHub::proof("F", "advisor"),
            context: Vec::new(),
        },
        now(),
    );
    chain.apply_at(
        &advisor,
        Transaction::AnswerQuestion {
            question_id: 1,
            content: "Move on.".into(),
            is_anonymous: true,
        },
        now(),
    );
    chain.apply_at(
        &addr(9),
        Transaction::VoteRedFlag {
            question_id: 1,
            score: 80,
        },
        now(),
    );

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("womansplain.snapshot");
    chain.save_snapshot(&path).unwrap();

    let restored = Chain::load_snapshot(&path, hub()).unwrap();

    // Every read in the public surface survives the round trip.
    assert_eq!(restored.question_count(), chain.question_count());
    assert_eq!(restored.sequence(), chain.sequence());
    assert_eq!(
        restored.validation_points(&advisor),
        chain.validation_points(&advisor)
    );
    assert_eq!(restored.user_badges(&advisor), chain.user_badges(&advisor));
    assert!(restored.is_verified_woman(&advisor));
    assert_eq!(restored.user_gender(&advisor), "F");
    let (q_a, a_a, h_a) = chain.question_with_answer(1).unwrap();
    let (q_b, a_b, h_b) = restored.question_with_answer(1).unwrap();
    assert_eq!(q_a, q_b);
    assert_eq!(a_a, a_b);
    assert_eq!(h_a, h_b);
}

#[test]
fn restored_chain_keeps_enforcing_invariants() {
    let mut chain = chain();
    let advisor = addr(2);
    chain.apply_at(
        &advisor,
        Transaction::VerifyProof {
            proof: StubHub::proof("F", "advisor"),
            context: Vec::new(),
        },
        now(),
    );

    let mut restored = Chain::restore(chain.snapshot(), hub());

    // The nullifier index survived: the same identity cannot re-register
    // from a new address after a restart.
    let receipt = restored.apply_at(
        &addr(3),
        Transaction::VerifyProof {
            proof: StubHub::proof("F", "advisor"),
            context: Vec::new(),
        },
        now(),
    );
    assert!(!receipt.is_applied());

    // The points authority binding survived: answering still works.
    let id = match outcome(&restored.apply_at(
        &addr(1),
        Transaction::SubmitQuestion {
            content: "Q".into(),
            screenshot: String::new(),
        },
        now(),
    )) {
        TxOutcome::QuestionSubmitted { question_id } => *question_id,
        other => panic!("unexpected outcome {other:?}"),
    };
    let receipt = restored.apply_at(
        &advisor,
        Transaction::AnswerQuestion {
            question_id: id,
            content: "A".into(),
            is_anonymous: false,
        },
        now(),
    );
    assert!(receipt.is_applied());
    assert_eq!(restored.validation_points(&advisor), 10);
}

#[test]
fn config_with_bad_ledger_address_fails() {
    let config = ChainConfig {
        ledger_address: "not-an-address".into(),
        ..ChainConfig::default()
    };
    assert!(Chain::from_config(&config, hub()).is_err());
}

#[test]
fn config_scope_seed_flows_into_registry() {
    let config = ChainConfig {
        scope_seed: "a".repeat(32),
        ..ChainConfig::default()
    };
    // 32 bytes exceeds the 31-byte scope bound.
    assert!(Chain::from_config(&config, hub()).is_err());
}
