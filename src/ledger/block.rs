//! Vote transactions and sealed blocks.
//!
//! Canonical hash encoding, version 1. Changing any of this breaks verification of
//! chains sealed earlier.
//!
//! - transaction: compact JSON, keys sorted: `{"delegate":..,"timestamp":..,"voter_hash":..}`
//! - voted snapshot: compact JSON array of the sorted voted hashes
//! - block payload: `index ++ timestamp ++ tx_1 ++ .. ++ tx_n ++ previous_hash ++ validator ++ snapshot`
//!   with integers in decimal, no separators, hashed with SHA-256 (hex)

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::{SystemTime, UNIX_EPOCH};
use crate::crypto::{sha256_hex, IdentityHash};

/// Previous-hash sentinel of the genesis block.
pub const GENESIS_PREVIOUS_HASH: &str = "0";

/// Validator label of the genesis block.
pub const GENESIS_VALIDATOR: &str = "genesis";

/// Wall-clock unix time in milliseconds. A clock before 1970 reads as 0.
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// A single vote. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteTransaction {
    voter_hash: IdentityHash,
    delegate: String,
    timestamp: u64,
}

impl VoteTransaction {
    pub fn new(voter_hash: IdentityHash, delegate: impl Into<String>) -> Self {
        Self::with_timestamp(voter_hash, delegate, now_millis())
    }

    pub fn with_timestamp(voter_hash: IdentityHash, delegate: impl Into<String>, timestamp: u64) -> Self {
        Self {
            voter_hash,
            delegate: delegate.into(),
            timestamp,
        }
    }

    pub fn voter_hash(&self) -> &IdentityHash {
        &self.voter_hash
    }

    pub fn delegate(&self) -> &str {
        &self.delegate
    }

    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    pub fn canonical_json(&self) -> String {
        format!(
            "{{\"delegate\":{},\"timestamp\":{},\"voter_hash\":{}}}",
            Value::from(self.delegate.as_str()),
            self.timestamp,
            Value::from(self.voter_hash.as_str()),
        )
    }
}

/// A sealed block. Fields are private; the only way to obtain a `Block` with a
/// matching hash is `Block::seal` (or `genesis`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    index: u64,
    timestamp: u64,
    transactions: Vec<VoteTransaction>,
    previous_hash: String,
    validator: String,
    voted_snapshot: Vec<IdentityHash>,
    hash: String,
}

impl Block {
    pub fn seal(
        index: u64,
        timestamp: u64,
        transactions: Vec<VoteTransaction>,
        previous_hash: String,
        validator: String,
        voted_snapshot: Vec<IdentityHash>,
    ) -> Self {
        let mut block = Self {
            index,
            timestamp,
            transactions,
            previous_hash,
            validator,
            voted_snapshot,
            hash: String::new(),
        };
        block.hash = block.compute_hash();
        block
    }

    pub fn genesis(timestamp: u64) -> Self {
        Self::seal(
            0,
            timestamp,
            vec![],
            GENESIS_PREVIOUS_HASH.to_string(),
            GENESIS_VALIDATOR.to_string(),
            vec![],
        )
    }

    /// The exact string fed to the hash function.
    pub fn canonical_payload(&self) -> String {
        let txs: String = self.transactions.iter().map(VoteTransaction::canonical_json).collect();
        let snapshot = Value::from(
            self.voted_snapshot
                .iter()
                .map(|h| h.as_str().to_string())
                .collect::<Vec<_>>(),
        );
        format!(
            "{}{}{}{}{}{}",
            self.index, self.timestamp, txs, self.previous_hash, self.validator, snapshot
        )
    }

    /// Recompute the content hash from the stored fields. Does not touch `hash`.
    pub fn compute_hash(&self) -> String {
        sha256_hex(&self.canonical_payload())
    }

    pub fn index(&self) -> u64 {
        self.index
    }

    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    pub fn transactions(&self) -> &[VoteTransaction] {
        &self.transactions
    }

    pub fn previous_hash(&self) -> &str {
        &self.previous_hash
    }

    pub fn validator(&self) -> &str {
        &self.validator
    }

    pub fn voted_snapshot(&self) -> &[IdentityHash] {
        &self.voted_snapshot
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }

    pub fn is_genesis(&self) -> bool {
        self.index == 0
    }
}
