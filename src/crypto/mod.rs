//! Crypto module: deterministic digests used for identities and block sealing.
//!
//! - Hash: SHA-256 hex digests, `IdentityHash` newtype

pub mod hash;

pub use hash::{hash_bytes, sha256_hex, IdentityHash};
