use serde::Serialize;
use thiserror::Error;

/// Why the eligibility policy (or the submission boundary) refused a vote.
///
/// This is a closed set: every refused submission maps to exactly one of these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("identity is not in the eligible registry")]
    UnknownIdentity,

    #[error("voter is under the minimum voting age ({age} < {min})")]
    Underage { age: u32, min: u32 },

    #[error("identity has already voted")]
    AlreadyVoted,

    #[error("invalid delegate: {0}")]
    InvalidDelegate(String),

    #[error("malformed input: {0}")]
    Malformed(String),
}

/// Category of the first linkage or content mismatch found by the verifier.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IntegrityViolation {
    #[error("previous-hash mismatch at block {index}")]
    PreviousHashMismatch { index: u64 },

    #[error("content-hash mismatch at block {index}")]
    ContentHashMismatch { index: u64 },
}

impl IntegrityViolation {
    pub fn index(&self) -> u64 {
        match self {
            IntegrityViolation::PreviousHashMismatch { index }
            | IntegrityViolation::ContentHashMismatch { index } => *index,
        }
    }
}

/// Unified error type for the ledger core
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BallotError {
    #[error("vote rejected: {0}")]
    Rejected(#[from] Rejection),

    #[error("chain integrity failed: {0}")]
    Integrity(#[from] IntegrityViolation),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Convenience alias
pub type Result<T> = std::result::Result<T, BallotError>;
