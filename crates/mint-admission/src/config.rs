//! # Sale Configuration
//!
//! Deployment-time settings: who administers the sale, the controller's own
//! identity on the collection, proof limits and an optional round schedule.
//!
//! Loaded from JSON (`from_json_str`) or, for the scalar knobs, from the
//! environment (`from_env`). Addresses, hashes and prices are 0x-prefixed
//! hex strings in JSON.

use crate::domain::entities::RoundInfo;
use crate::domain::value_objects::{Address, RoundId};
use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::env;

/// Default bound on allowlist proof length. 32 levels cover 2^32 members.
pub const DEFAULT_MAX_PROOF_LEN: usize = 32;

/// A round to configure at construction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSeed {
    /// Round id (>= 1).
    pub id: RoundId,
    /// Round parameters.
    #[serde(flatten)]
    pub info: RoundInfo,
}

/// Sale controller configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaleConfig {
    /// Receives `Admin` at construction (the deployer).
    pub admin: Address,

    /// The controller's own identity. This is the principal that must hold
    /// `MINTER` on the collection.
    pub contract_address: Address,

    /// Longest allowlist proof accepted before hashing.
    pub max_proof_len: usize,

    /// Rounds written at construction, in order.
    pub initial_rounds: Vec<RoundSeed>,

    /// Round activated at construction. `RoundId::NONE` keeps the sale closed.
    pub initial_active_round: RoundId,
}

impl Default for SaleConfig {
    fn default() -> Self {
        Self {
            admin: Address::ZERO,
            contract_address: Address::ZERO,
            max_proof_len: DEFAULT_MAX_PROOF_LEN,
            initial_rounds: Vec::new(),
            initial_active_round: RoundId::NONE,
        }
    }
}

impl SaleConfig {
    /// Configuration administered by `admin`, everything else default.
    #[must_use]
    pub fn new(admin: Address, contract_address: Address) -> Self {
        Self {
            admin,
            contract_address,
            ..Self::default()
        }
    }

    /// Create a config for testing (fixed, recognisable identities).
    #[must_use]
    pub fn for_testing() -> Self {
        Self::new(Address::repeat_byte(0xAD), Address::repeat_byte(0xC0))
    }

    /// Parses a JSON document. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads scalar settings from the environment.
    ///
    /// # Environment Variables
    ///
    /// - `MINT_ADMIN`: admin address (default: zero address)
    /// - `MINT_CONTRACT_ADDRESS`: controller identity (default: zero address)
    /// - `MINT_MAX_PROOF_LEN`: proof length bound (default: 32)
    ///
    /// Rounds are not read from the environment; configure them through
    /// `from_json_str` or the admin API.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(value) = env::var("MINT_ADMIN") {
            config.admin = value.parse().map_err(|source| ConfigError::InvalidHex {
                key: "MINT_ADMIN",
                source,
            })?;
        }

        if let Ok(value) = env::var("MINT_CONTRACT_ADDRESS") {
            config.contract_address =
                value.parse().map_err(|source| ConfigError::InvalidHex {
                    key: "MINT_CONTRACT_ADDRESS",
                    source,
                })?;
        }

        if let Ok(value) = env::var("MINT_MAX_PROOF_LEN") {
            config.max_proof_len = value.parse().map_err(|_| ConfigError::InvalidValue {
                key: "MINT_MAX_PROOF_LEN",
                value,
            })?;
        }

        Ok(config)
    }
}
