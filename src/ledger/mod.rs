//! Ledger: the append-only, hash-linked chain of vote blocks.
//!
//! The ledger owns its blocks but only borrows the eligibility policy per call;
//! the caller keeps both behind one lock (see `node::session`).

pub mod block;
pub mod index;
pub mod verify;

use std::collections::{BTreeMap, HashSet};
use rand::rngs::StdRng;
use tracing::{debug, info};
use crate::consensus::pos;
use crate::contract::{Delegate, EligibilityPolicy};
use crate::crypto::IdentityHash;
use crate::utils::errors::{IntegrityViolation, Rejection};

pub use block::{Block, VoteTransaction, GENESIS_PREVIOUS_HASH, GENESIS_VALIDATOR};
pub use index::VoterIndex;
pub use verify::verify_chain;

/// Ledger service holding the chain and the validator RNG
#[derive(Debug)]
pub struct Ledger {
    chain: Vec<Block>,
    index: VoterIndex,
    rng: StdRng,
}

impl Ledger {
    /// Build a ledger whose validator picks come from `rng` (seed it for reproducible chains).
    pub fn with_rng(rng: StdRng) -> Self {
        let mut ledger = Self {
            chain: Vec::new(),
            index: VoterIndex::new(),
            rng,
        };
        ledger.create_genesis_block();
        ledger
    }

    fn create_genesis_block(&mut self) {
        debug_assert!(self.chain.is_empty());
        let genesis = Block::genesis(block::now_millis());
        debug!("genesis sealed with hash {}", genesis.hash());
        self.chain.push(genesis);
    }

    /// Pick the validator for the next block from the policy's current state.
    pub fn select_validator(&mut self, policy: &EligibilityPolicy) -> String {
        pos::select_validator(policy, &mut self.rng)
    }

    /// Validate, apply and seal one batch of votes.
    ///
    /// All-or-nothing: if any transaction fails, neither the policy nor the chain
    /// changes and the first failure is returned. An empty batch is malformed.
    pub fn add_block(
        &mut self,
        policy: &mut EligibilityPolicy,
        transactions: Vec<VoteTransaction>,
    ) -> Result<&Block, Rejection> {
        if transactions.is_empty() {
            return Err(Rejection::Malformed("empty transaction batch".into()));
        }

        let mut in_batch: HashSet<&IdentityHash> = HashSet::with_capacity(transactions.len());
        for tx in &transactions {
            policy.check_vote(tx.voter_hash(), tx.delegate())?;
            // two votes from one identity in the same batch
            if !in_batch.insert(tx.voter_hash()) {
                return Err(Rejection::AlreadyVoted);
            }
        }

        for tx in &transactions {
            policy.mark_voted(tx.voter_hash());
        }

        // post-mutation: this batch's voters are already out of the pool
        let validator = self.select_validator(policy);

        let block = Block::seal(
            self.chain.len() as u64,
            block::now_millis(),
            transactions,
            self.tip_hash().to_string(),
            validator,
            policy.voted_snapshot(),
        );
        info!(
            "sealed block {} ({} tx, validator {}, hash {})",
            block.index(),
            block.transactions().len(),
            block.validator(),
            block.hash()
        );
        self.index.add(&block);
        self.chain.push(block);
        Ok(&self.chain[self.chain.len() - 1])
    }

    pub fn blocks(&self) -> &[Block] {
        &self.chain
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    /// Never true: the genesis block is always present.
    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    /// Hash of the most recent block.
    pub fn tip_hash(&self) -> &str {
        self.chain.last().map(Block::hash).unwrap_or(GENESIS_PREVIOUS_HASH)
    }

    /// Index of the block that recorded `voter`'s vote, if any.
    pub fn block_of(&self, voter: &IdentityHash) -> Option<u64> {
        self.index.block_of(voter)
    }

    /// Number of transactions across all blocks.
    pub fn votes_recorded(&self) -> usize {
        self.chain.iter().map(|b| b.transactions().len()).sum()
    }

    /// Votes per delegate over every non-genesis block; every delegate is present.
    pub fn tally(&self) -> BTreeMap<Delegate, u64> {
        let mut tally: BTreeMap<Delegate, u64> = Delegate::ALL.iter().map(|d| (*d, 0)).collect();
        for block in self.chain.iter().skip(1) {
            for tx in block.transactions() {
                if let Ok(d) = tx.delegate().parse::<Delegate>() {
                    *tally.entry(d).or_insert(0) += 1;
                }
            }
        }
        tally
    }

    pub fn verify(&self) -> Result<(), IntegrityViolation> {
        verify_chain(&self.chain)
    }
}
