//! Voting session: the policy and the ledger behind a single lock.
//!
//! Every write (`submit_vote`, `add_block`) holds the write lock across the whole
//! validate -> mark voted -> seal sequence, so two submissions for one identity
//! cannot both pass validation. Reads share the read lock.
//!
//! Sessions are plain values; several can live in one process.

use std::collections::BTreeMap;
use parking_lot::RwLock;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::{info, warn};
use crate::contract::{Delegate, EligibilityPolicy};
use crate::crypto::IdentityHash;
use crate::ledger::{Block, Ledger, VoteTransaction};
use crate::utils::errors::{IntegrityViolation, Rejection};
use crate::utils::metrics::{self, MetricsRegistry};

/// What a voter gets back for an accepted vote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoteReceipt {
    pub voter_hash: IdentityHash,
    pub delegate: Delegate,
    pub block_index: u64,
    pub block_hash: String,
    pub validator: String,
}

/// Summary for status displays.
#[derive(Debug, Clone, Serialize)]
pub struct ChainStatus {
    pub blocks: usize,
    pub votes_recorded: usize,
    pub validators_remaining: usize,
    pub tally: BTreeMap<Delegate, u64>,
    /// `None` when the chain verifies.
    pub integrity: Option<IntegrityViolation>,
}

struct SessionState {
    policy: EligibilityPolicy,
    ledger: Ledger,
}

pub struct VotingSession {
    state: RwLock<SessionState>,
    metrics: MetricsRegistry,
}

impl VotingSession {
    /// Start a session over `eligible` (identity hash -> age); the chain holds only genesis.
    pub fn new<I>(eligible: I) -> Self
    where
        I: IntoIterator<Item = (IdentityHash, u32)>,
    {
        Self::with_rng(eligible, StdRng::from_entropy())
    }

    pub fn with_seed<I>(eligible: I, seed: u64) -> Self
    where
        I: IntoIterator<Item = (IdentityHash, u32)>,
    {
        Self::with_rng(eligible, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng<I>(eligible: I, rng: StdRng) -> Self
    where
        I: IntoIterator<Item = (IdentityHash, u32)>,
    {
        let policy = EligibilityPolicy::new(eligible);
        let ledger = Ledger::with_rng(rng);
        info!("voting session started with {} registered identities", policy.eligible_len());
        let metrics = MetricsRegistry::new();
        metrics.set_gauge(metrics::VALIDATORS_REMAINING, policy.remaining_validators() as f64);
        Self {
            state: RwLock::new(SessionState { policy, ledger }),
            metrics,
        }
    }

    /// Boundary operation for the UI: hash the identifier and record a one-vote block.
    ///
    /// The identifier is trimmed first; an empty one is malformed and never reaches the policy.
    pub fn submit_vote(&self, identifier: &str, delegate: &str) -> Result<VoteReceipt, Rejection> {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            let r = Rejection::Malformed("identifier must not be empty".into());
            self.record_rejection(&r);
            return Err(r);
        }
        let voter_hash = IdentityHash::from_plaintext(identifier);
        let block = self.add_block(vec![VoteTransaction::new(voter_hash.clone(), delegate)])?;

        // add_block only seals delegates that parse
        let delegate = delegate.parse::<Delegate>()?;
        Ok(VoteReceipt {
            voter_hash,
            delegate,
            block_index: block.index(),
            block_hash: block.hash().to_string(),
            validator: block.validator().to_string(),
        })
    }

    /// Validate and seal a batch under the write lock. Returns a copy of the sealed block.
    pub fn add_block(&self, transactions: Vec<VoteTransaction>) -> Result<Block, Rejection> {
        let mut guard = self.state.write();
        let SessionState { policy, ledger } = &mut *guard;
        let outcome = ledger.add_block(policy, transactions).map(Block::clone);
        match &outcome {
            Ok(block) => {
                self.metrics.inc_counter(metrics::BLOCKS_SEALED);
                for _ in block.transactions() {
                    self.metrics.inc_counter(metrics::VOTES_ACCEPTED);
                }
                self.metrics.set_gauge(metrics::VALIDATORS_REMAINING, policy.remaining_validators() as f64);
            }
            Err(r) => self.record_rejection(r),
        }
        outcome
    }

    fn record_rejection(&self, r: &Rejection) {
        warn!("vote rejected: {}", r);
        self.metrics.inc_counter(metrics::VOTES_REJECTED);
    }

    pub fn can_vote(&self, voter: &IdentityHash, delegate: &str) -> bool {
        self.state.read().policy.can_vote(voter, delegate)
    }

    pub fn check_vote(&self, voter: &IdentityHash, delegate: &str) -> Result<(), Rejection> {
        self.state.read().policy.check_vote(voter, delegate)
    }

    pub fn has_voted(&self, voter: &IdentityHash) -> bool {
        self.state.read().policy.has_voted(voter)
    }

    /// Copy of every block, genesis first.
    pub fn chain(&self) -> Vec<Block> {
        self.state.read().ledger.blocks().to_vec()
    }

    pub fn chain_len(&self) -> usize {
        self.state.read().ledger.len()
    }

    pub fn tally(&self) -> BTreeMap<Delegate, u64> {
        self.state.read().ledger.tally()
    }

    pub fn remaining_validators(&self) -> usize {
        self.state.read().policy.remaining_validators()
    }

    pub fn voted_count(&self) -> usize {
        self.state.read().policy.voted_len()
    }

    pub fn verify(&self) -> Result<(), IntegrityViolation> {
        self.state.read().ledger.verify()
    }

    /// All status figures read under one lock, so they are mutually consistent.
    pub fn status(&self) -> ChainStatus {
        let st = self.state.read();
        ChainStatus {
            blocks: st.ledger.len(),
            votes_recorded: st.ledger.votes_recorded(),
            validators_remaining: st.policy.remaining_validators(),
            tally: st.ledger.tally(),
            integrity: st.ledger.verify().err(),
        }
    }

    pub fn metrics(&self) -> &MetricsRegistry {
        &self.metrics
    }
}
