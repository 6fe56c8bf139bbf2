use std::collections::HashMap;
use crate::crypto::IdentityHash;
use crate::ledger::block::Block;

/// Voter hash -> index of the block holding that voter's transaction.
#[derive(Debug, Default)]
pub struct VoterIndex {
    by_voter: HashMap<IdentityHash, u64>,
}

impl VoterIndex {
    pub fn new() -> Self {
        Self { by_voter: HashMap::new() }
    }

    pub fn add(&mut self, block: &Block) {
        for tx in block.transactions() {
            self.by_voter.insert(tx.voter_hash().clone(), block.index());
        }
    }

    pub fn block_of(&self, voter: &IdentityHash) -> Option<u64> {
        self.by_voter.get(voter).copied()
    }
}
