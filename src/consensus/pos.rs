//! Validator selection for the simplified PoS model.
//!
//! Every adult who has not voted yet carries equal weight; there is no stake.
//! The pool is walked in ascending hash order so a seeded RNG picks reproducibly.

use rand::seq::IteratorRandom;
use rand::Rng;
use tracing::debug;
use crate::contract::EligibilityPolicy;

/// Label sealed into a block when nobody is left to notarize it.
pub const FALLBACK_VALIDATOR: &str = "default_validator";

/// Pick one validator uniformly from the policy's current pool.
///
/// Returns `None` when the pool is empty.
pub fn pick_validator<R: Rng + ?Sized>(policy: &EligibilityPolicy, rng: &mut R) -> Option<String> {
    policy
        .validator_pool()
        .choose(rng)
        .map(|id| id.as_str().to_string())
}

/// Same as `pick_validator`, falling back to `FALLBACK_VALIDATOR` on an empty pool.
pub fn select_validator<R: Rng + ?Sized>(policy: &EligibilityPolicy, rng: &mut R) -> String {
    match pick_validator(policy, rng) {
        Some(v) => v,
        None => {
            debug!("validator pool exhausted, sealing with {}", FALLBACK_VALIDATOR);
            FALLBACK_VALIDATOR.to_string()
        }
    }
}
