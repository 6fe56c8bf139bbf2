//! Eligibility policy: the contract state gating every vote.
//!
//! - `eligible`: identity hash -> age, fixed at bootstrap
//! - `voted`: identities that have cast an accepted vote, grows monotonically
//!
//! `check_vote` / `can_vote` are pure reads. `mark_voted` is the only mutation and
//! performs no validation of its own; the ledger calls it only after a batch passed.

use std::collections::{BTreeMap, BTreeSet};
use crate::contract::delegate::Delegate;
use crate::crypto::IdentityHash;
use crate::utils::errors::Rejection;

/// Minimum age to vote or to be picked as a validator.
pub const VOTING_AGE: u32 = 18;

#[derive(Debug, Clone, Default)]
pub struct EligibilityPolicy {
    eligible: BTreeMap<IdentityHash, u32>,
    voted: BTreeSet<IdentityHash>,
}

impl EligibilityPolicy {
    pub fn new<I>(eligible: I) -> Self
    where
        I: IntoIterator<Item = (IdentityHash, u32)>,
    {
        Self {
            eligible: eligible.into_iter().collect(),
            voted: BTreeSet::new(),
        }
    }

    /// Explain why `voter` may not vote for `delegate`, or Ok if it may.
    ///
    /// Checks run in a fixed order: registry/age, then prior vote, then delegate.
    pub fn check_vote(&self, voter: &IdentityHash, delegate: &str) -> Result<(), Rejection> {
        let age = match self.eligible.get(voter) {
            Some(age) => *age,
            None => return Err(Rejection::UnknownIdentity),
        };
        if age < VOTING_AGE {
            return Err(Rejection::Underage { age, min: VOTING_AGE });
        }
        if self.voted.contains(voter) {
            return Err(Rejection::AlreadyVoted);
        }
        delegate.parse::<Delegate>()?;
        Ok(())
    }

    pub fn can_vote(&self, voter: &IdentityHash, delegate: &str) -> bool {
        self.check_vote(voter, delegate).is_ok()
    }

    pub fn mark_voted(&mut self, voter: &IdentityHash) {
        self.voted.insert(voter.clone());
    }

    /// Age on record; absent identities read as 0.
    pub fn age_of(&self, voter: &IdentityHash) -> u32 {
        self.eligible.get(voter).copied().unwrap_or(0)
    }

    pub fn is_registered(&self, voter: &IdentityHash) -> bool {
        self.eligible.contains_key(voter)
    }

    pub fn has_voted(&self, voter: &IdentityHash) -> bool {
        self.voted.contains(voter)
    }

    pub fn eligible_len(&self) -> usize {
        self.eligible.len()
    }

    pub fn voted_len(&self) -> usize {
        self.voted.len()
    }

    /// Adults who have not voted yet, in ascending hash order.
    pub fn validator_pool(&self) -> impl Iterator<Item = &IdentityHash> + '_ {
        self.eligible
            .iter()
            .filter(move |(id, age)| **age >= VOTING_AGE && !self.voted.contains(*id))
            .map(|(id, _)| id)
    }

    pub fn remaining_validators(&self) -> usize {
        self.validator_pool().count()
    }

    /// Sorted copy of the voted set, as sealed into each block.
    pub fn voted_snapshot(&self) -> Vec<IdentityHash> {
        self.voted.iter().cloned().collect()
    }
}
