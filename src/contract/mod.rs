//! Contract module: the eligibility rules every vote must pass.
//!
//! - delegate: the fixed delegate set
//! - policy: eligible registry + voted set

pub mod delegate;
pub mod policy;

pub use delegate::Delegate;
pub use policy::{EligibilityPolicy, VOTING_AGE};
