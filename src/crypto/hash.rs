use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use crate::utils::errors::Rejection;

/// Length of a hex-encoded SHA-256 digest.
pub const HEX_DIGEST_LEN: usize = 64;

/// utility: hash bytes to a Vec<u8>
pub fn hash_bytes(bytes: &[u8]) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hasher.finalize().to_vec()
}

/// SHA-256 of `text` (UTF-8), lowercase hex.
pub fn sha256_hex(text: &str) -> String {
    hex::encode(hash_bytes(text.as_bytes()))
}

/// Anonymized on-chain key for a voter: the hex SHA-256 of the plaintext identifier.
///
/// Deserialization accepts only 64 hex chars, so a hash read back from an exported
/// chain has the same shape as one computed here.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct IdentityHash(String);

impl IdentityHash {
    pub fn from_plaintext(identifier: &str) -> Self {
        Self(sha256_hex(identifier))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First `n` hex chars, for display.
    pub fn short(&self, n: usize) -> &str {
        self.0.get(..n).unwrap_or(&self.0)
    }
}

impl TryFrom<String> for IdentityHash {
    type Error = Rejection;

    fn try_from(digest: String) -> Result<Self, Self::Error> {
        if digest.len() != HEX_DIGEST_LEN || !digest.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(Rejection::Malformed(format!("not a hex SHA-256 digest: {:?}", digest)));
        }
        Ok(Self(digest.to_ascii_lowercase()))
    }
}

impl From<IdentityHash> for String {
    fn from(id: IdentityHash) -> Self {
        id.0
    }
}

impl fmt::Display for IdentityHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for IdentityHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
