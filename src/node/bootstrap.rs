use anyhow::Result;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use crate::crypto::IdentityHash;
use crate::utils::errors::BallotError;

/// Simulation parameters, loadable from TOML. Every field has a default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// number of registered identities
    pub population: u32,
    pub min_age: u32,
    pub max_age: u32,
    /// identifiers are `{id_prefix}{n:03}`
    pub id_prefix: String,
    /// RNG seed for ages, validators and simulated votes
    pub seed: Option<u64>,
    /// submissions cast by `simulate`
    pub votes: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            population: 100,
            min_age: 16,
            max_age: 60,
            id_prefix: "U".into(),
            seed: None,
            votes: 60,
        }
    }
}

impl SimulationConfig {
    /// Load config from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        let cfg: SimulationConfig = toml::from_str(&data)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> std::result::Result<(), BallotError> {
        if self.population == 0 {
            return Err(BallotError::Config("population must be at least 1".into()));
        }
        if self.min_age > self.max_age {
            return Err(BallotError::Config(format!(
                "min_age ({}) exceeds max_age ({})",
                self.min_age, self.max_age
            )));
        }
        if self.id_prefix.trim().is_empty() {
            return Err(BallotError::Config("id_prefix must not be empty".into()));
        }
        Ok(())
    }

    pub fn user_id(&self, n: u32) -> String {
        format!("{}{:03}", self.id_prefix, n)
    }
}

/// One plaintext registry row. Only for demos; never stored on chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistryEntry {
    pub user_id: String,
    pub age: u32,
}

/// Generated population of identities with ages.
#[derive(Debug, Clone)]
pub struct Registry {
    entries: Vec<RegistryEntry>,
}

impl Registry {
    /// Identities `1..=population` with uniform ages in `[min_age, max_age]`.
    /// Fails on a config that does not pass [`SimulationConfig::validate`].
    pub fn generate<R: Rng + ?Sized>(
        cfg: &SimulationConfig,
        rng: &mut R,
    ) -> std::result::Result<Self, BallotError> {
        cfg.validate()?;
        let entries = (1..=cfg.population)
            .map(|n| RegistryEntry {
                user_id: cfg.user_id(n),
                age: rng.gen_range(cfg.min_age..=cfg.max_age),
            })
            .collect();
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[RegistryEntry] {
        &self.entries
    }

    /// Hashed view handed to the eligibility policy.
    pub fn eligible(&self) -> BTreeMap<IdentityHash, u32> {
        self.entries
            .iter()
            .map(|e| (IdentityHash::from_plaintext(&e.user_id), e.age))
            .collect()
    }
}
