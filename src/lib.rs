//! Ballotchain: a single-process proof-of-stake vote ledger.
//!
//! - crypto: SHA-256 identity hashing
//! - contract: eligibility policy and the delegate set
//! - consensus: validator selection
//! - ledger: sealed blocks, the chain, integrity verification
//! - node: the locked voting session, bootstrap and CLI

pub mod consensus;
pub mod contract;
pub mod crypto;
pub mod ledger;
pub mod node;
pub mod utils;

pub use contract::{Delegate, EligibilityPolicy};
pub use crypto::IdentityHash;
pub use ledger::{verify_chain, Block, Ledger, VoteTransaction};
pub use node::{VoteReceipt, VotingSession};
pub use utils::{BallotError, IntegrityViolation, Rejection};
