//! Randomized submissions: never panic, and the ledger invariants always hold.

use std::collections::HashSet;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ballotchain::node::{Registry, SimulationConfig};
use ballotchain::{Delegate, IdentityHash, Rejection, VotingSession};

#[test]
fn fuzz_random_submissions() {
    for seed in 0..8u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let cfg = SimulationConfig { population: 40, seed: Some(seed), ..Default::default() };
        let registry = Registry::generate(&cfg, &mut rng).unwrap();
        let ages = registry.eligible();
        let session = VotingSession::with_seed(ages.clone(), seed);

        for _ in 0..300 {
            let id = match rng.gen_range(0..10) {
                0 => " ".repeat(rng.gen_range(0..3)),
                1 => (0..rng.gen_range(1..12)).map(|_| rng.gen::<char>()).collect(),
                _ => cfg.user_id(rng.gen_range(1..=50)),
            };
            let delegate = match rng.gen_range(0..8) {
                0 => format!("D{}", rng.gen_range(0..10)),
                _ => Delegate::ALL[rng.gen_range(0..5)].to_string(),
            };

            let before = session.chain_len();
            match session.submit_vote(&id, &delegate) {
                Ok(r) => {
                    assert_eq!(session.chain_len(), before + 1);
                    assert!(ages[&r.voter_hash] >= 18);
                }
                Err(e) => {
                    assert_eq!(session.chain_len(), before);
                    if let Rejection::Underage { age, .. } = e {
                        assert!(age < 18);
                    }
                }
            }
        }

        assert!(session.verify().is_ok());
        let mut voters = HashSet::new();
        for block in session.chain() {
            for tx in block.transactions() {
                assert!(voters.insert(tx.voter_hash().clone()));
                assert!(ages.get(tx.voter_hash()).copied().unwrap_or(0) >= 18);
            }
        }
        assert_eq!(voters.len(), session.voted_count());
        let adults = ages.values().filter(|a| **a >= 18).count();
        assert_eq!(session.remaining_validators(), adults - voters.len());
    }
}

#[test]
fn fuzz_hash_distinctness() {
    let mut rng = StdRng::seed_from_u64(77);
    let mut seen = HashSet::new();
    let mut digests = HashSet::new();
    for _ in 0..2000 {
        let len = rng.gen_range(0..24);
        let text: String = (0..len).map(|_| rng.gen_range(b' '..=b'~') as char).collect();
        let d = IdentityHash::from_plaintext(&text);
        assert_eq!(d, IdentityHash::from_plaintext(&text));
        if seen.insert(text) {
            assert!(digests.insert(d));
        }
    }
}
