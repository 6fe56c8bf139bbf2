use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use crate::utils::errors::Rejection;

/// The fixed set of delegates a vote may name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Delegate {
    D1,
    D2,
    D3,
    D4,
    D5,
}

impl Delegate {
    pub const ALL: [Delegate; 5] = [Delegate::D1, Delegate::D2, Delegate::D3, Delegate::D4, Delegate::D5];

    pub fn as_str(&self) -> &'static str {
        match self {
            Delegate::D1 => "D1",
            Delegate::D2 => "D2",
            Delegate::D3 => "D3",
            Delegate::D4 => "D4",
            Delegate::D5 => "D5",
        }
    }
}

impl fmt::Display for Delegate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exact, case-sensitive match on the label.
impl FromStr for Delegate {
    type Err = Rejection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Delegate::ALL
            .iter()
            .copied()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| Rejection::InvalidDelegate(s.to_string()))
    }
}
