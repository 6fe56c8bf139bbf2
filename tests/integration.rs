//! Integration tests: end-to-end voting scenarios through the public API.

use std::collections::HashSet;
use ballotchain::consensus::FALLBACK_VALIDATOR;
use ballotchain::ledger::{Block, VoteTransaction, GENESIS_PREVIOUS_HASH};
use ballotchain::{verify_chain, Delegate, IdentityHash, IntegrityViolation, Rejection, VotingSession};

fn h(s: &str) -> IdentityHash {
    IdentityHash::from_plaintext(s)
}

fn session(pop: &[(&str, u32)]) -> VotingSession {
    VotingSession::with_seed(pop.iter().map(|(s, a)| (h(s), *a)), 2024)
}

fn assert_linked(chain: &[Block]) {
    assert_eq!(chain[0].previous_hash(), GENESIS_PREVIOUS_HASH);
    for i in 1..chain.len() {
        assert_eq!(chain[i].index() as usize, i);
        assert_eq!(chain[i].previous_hash(), chain[i - 1].hash());
        assert_eq!(chain[i].compute_hash(), chain[i].hash());
    }
}

#[test]
fn test_genesis_only_chain() {
    let s = session(&[("h1", 25)]);
    assert_eq!(s.chain_len(), 1);
    assert!(s.tally().values().all(|n| *n == 0));
    assert!(s.verify().is_ok());
}

#[test]
fn test_accepted_then_double_vote() {
    let s = session(&[("h1", 25)]);
    s.submit_vote("h1", "D2").unwrap();
    assert_eq!(s.chain_len(), 2);
    assert_eq!(s.tally()[&Delegate::D2], 1);
    assert!(s.has_voted(&h("h1")));

    assert_eq!(s.submit_vote("h1", "D3").unwrap_err(), Rejection::AlreadyVoted);
    assert_eq!(s.chain_len(), 2);
    assert_eq!(s.tally()[&Delegate::D2], 1);
    assert_eq!(s.tally()[&Delegate::D3], 0);
}

#[test]
fn test_underage_rejected() {
    let s = session(&[("h2", 16)]);
    let err = s.submit_vote("h2", "D1").unwrap_err();
    assert!(matches!(err, Rejection::Underage { age: 16, min: 18 }));
    assert_eq!(s.chain_len(), 1);
}

#[test]
fn test_unknown_identity_and_invalid_delegate_rejected() {
    let s = session(&[("h1", 40)]);
    assert_eq!(s.submit_vote("stranger", "D1").unwrap_err(), Rejection::UnknownIdentity);
    assert!(matches!(s.submit_vote("h1", "D6"), Err(Rejection::InvalidDelegate(_))));
    assert!(!s.has_voted(&h("h1")));
    assert_eq!(s.chain_len(), 1);
}

#[test]
fn test_batch_atomicity() {
    let s = session(&[("ok", 30), ("young", 17)]);
    let batch = vec![VoteTransaction::new(h("ok"), "D1"), VoteTransaction::new(h("young"), "D2")];
    assert!(s.add_block(batch).is_err());
    assert_eq!(s.chain_len(), 1);
    assert_eq!(s.voted_count(), 0);
    assert!(s.can_vote(&h("ok"), "D1"));
}

#[test]
fn test_tamper_detection_on_validator_field() {
    let s = session(&[("h1", 25), ("h2", 33)]);
    s.submit_vote("h1", "D1").unwrap();
    let chain = s.chain();
    assert_eq!(chain.len(), 2);

    let mut value = serde_json::to_value(&chain).unwrap();
    value[1]["validator"] = serde_json::json!("someone-else");
    let tampered: Vec<Block> = serde_json::from_value(value).unwrap();

    let err = verify_chain(&tampered).unwrap_err();
    assert_eq!(err, IntegrityViolation::ContentHashMismatch { index: 1 });
    assert_eq!(err.index(), 1);
    // the live session is untouched
    assert!(s.verify().is_ok());
}

#[test]
fn test_tamper_detection_on_transactions() {
    let s = session(&[("a", 25), ("b", 33), ("c", 50)]);
    s.submit_vote("a", "D1").unwrap();
    s.submit_vote("b", "D1").unwrap();
    let mut value = serde_json::to_value(s.chain()).unwrap();
    value[2]["transactions"][0]["delegate"] = serde_json::json!("D5");
    let tampered: Vec<Block> = serde_json::from_value(value).unwrap();
    assert_eq!(
        verify_chain(&tampered),
        Err(IntegrityViolation::ContentHashMismatch { index: 2 })
    );
}

#[test]
fn test_exhausted_validator_pool() {
    let s = session(&[("a", 25), ("b", 40), ("kid", 10)]);
    s.submit_vote("a", "D4").unwrap();
    let last = s.submit_vote("b", "D5").unwrap();
    assert_eq!(s.remaining_validators(), 0);
    assert_eq!(last.validator, FALLBACK_VALIDATOR);

    assert!(matches!(s.submit_vote("kid", "D1"), Err(Rejection::Underage { .. })));
    assert_eq!(s.chain_len(), 3);
    assert!(s.verify().is_ok());
}

#[test]
fn test_validator_never_a_voter_of_its_own_block() {
    let pop: Vec<(String, u32)> = (1..=40).map(|i| (format!("U{:03}", i), 20 + i)).collect();
    let s = VotingSession::with_seed(pop.iter().map(|(u, a)| (h(u), *a)), 7);
    for (u, _) in &pop {
        s.submit_vote(u, "D3").unwrap();
    }
    for block in s.chain().iter().skip(1) {
        for tx in block.transactions() {
            assert_ne!(block.validator(), tx.voter_hash().as_str());
        }
        // validator had not voted when the block was sealed
        assert!(block
            .voted_snapshot()
            .iter()
            .all(|v| v.as_str() != block.validator()));
    }
}

#[test]
fn test_chain_linkage_and_no_double_voting_over_many_votes() {
    let pop: Vec<(String, u32)> = (1..=25).map(|i| (format!("U{:03}", i), 15 + i)).collect();
    let s = VotingSession::with_seed(pop.iter().map(|(u, a)| (h(u), *a)), 99);
    for round in 0..3 {
        for (i, (u, _)) in pop.iter().enumerate() {
            let d = Delegate::ALL[(i + round) % Delegate::ALL.len()];
            let _ = s.submit_vote(u, d.as_str());
        }
    }
    let chain = s.chain();
    assert_linked(&chain);

    let mut seen = HashSet::new();
    for block in &chain {
        for tx in block.transactions() {
            assert!(seen.insert(tx.voter_hash().clone()), "double vote on chain");
        }
    }
    // ages 16..=40: the 23 adults vote once each
    assert_eq!(seen.len(), 23);
    assert_eq!(s.tally().values().sum::<u64>(), 23);
}

#[test]
fn test_snapshot_tracks_voted_set() {
    let s = session(&[("a", 25), ("b", 33)]);
    s.submit_vote("a", "D1").unwrap();
    s.submit_vote("b", "D2").unwrap();
    let chain = s.chain();
    assert_eq!(chain[1].voted_snapshot().len(), 1);
    let mut expected = vec![h("a"), h("b")];
    expected.sort();
    assert_eq!(chain[2].voted_snapshot(), expected.as_slice());
}

#[test]
fn test_import_rejects_malformed_voter_hash() {
    let s = session(&[("a", 25)]);
    s.submit_vote("a", "D1").unwrap();
    let mut value = serde_json::to_value(s.chain()).unwrap();
    value[1]["transactions"][0]["voter_hash"] = serde_json::json!("é".repeat(32));
    assert!(serde_json::from_value::<Vec<Block>>(value.clone()).is_err());

    value[1]["transactions"][0]["voter_hash"] = serde_json::json!(h("b"));
    let tampered: Vec<Block> = serde_json::from_value(value).unwrap();
    assert_eq!(tampered[1].transactions()[0].voter_hash().short(8), &h("b").as_str()[..8]);
    assert_eq!(
        verify_chain(&tampered),
        Err(IntegrityViolation::ContentHashMismatch { index: 1 })
    );
}

#[test]
fn test_tampered_genesis_is_detected() {
    let s = session(&[("a", 25)]);
    s.submit_vote("a", "D1").unwrap();
    let mut value = serde_json::to_value(s.chain()).unwrap();
    value[0]["timestamp"] = serde_json::json!(1);
    let tampered: Vec<Block> = serde_json::from_value(value).unwrap();
    assert_eq!(verify_chain(&tampered).unwrap_err().index(), 0);
}
