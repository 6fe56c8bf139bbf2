//! Read-only chain integrity check.
//!
//! Works on any slice of blocks, so it can audit a chain that was exported,
//! edited, and read back, not just the live ledger.

use tracing::error;
use crate::ledger::block::Block;
use crate::utils::errors::IntegrityViolation;

/// Check the genesis content hash, then linkage and content hash of every later block.
///
/// Violations name the block's position in `blocks`, not its stored `index` field.
/// Linkage is checked before content for each block; the first failure wins.
pub fn verify_chain(blocks: &[Block]) -> Result<(), IntegrityViolation> {
    for (pos, block) in blocks.iter().enumerate() {
        let index = pos as u64;
        if pos > 0 && block.previous_hash() != blocks[pos - 1].hash() {
            let v = IntegrityViolation::PreviousHashMismatch { index };
            error!("{}", v);
            return Err(v);
        }
        if block.compute_hash() != block.hash() {
            let v = IntegrityViolation::ContentHashMismatch { index };
            error!("{}", v);
            return Err(v);
        }
    }
    Ok(())
}
