//! Consensus module (simplified PoS validator rotation)
//!
//! Public surface:
//! - pos: uniform validator selection over eligible, not-yet-voted identities

pub mod pos;

pub use pos::{pick_validator, select_validator, FALLBACK_VALIDATOR};
