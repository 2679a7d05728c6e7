//! # Sale Events
//!
//! Append-only record of state changes, one entry per committed operation.
//! Rejected calls record nothing.

use crate::domain::entities::{Role, RoundInfo};
use crate::domain::value_objects::{Address, Hash, RoundId, TokenId, U256};
use serde::{Deserialize, Serialize};

/// A committed state change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SaleEvent {
    /// A round configuration was written.
    RoundConfigured { round: RoundId, info: RoundInfo },
    /// The active round pointer moved.
    RoundActivated { previous: RoundId, round: RoundId },
    /// The active round's allowlist root was patched.
    MerkleRootUpdated { round: RoundId, root: Hash },
    /// Issuance now goes to a different collection.
    BridgeUpdated { bridge: Address },
    /// Units were admitted and issued.
    Minted {
        round: RoundId,
        minter: Address,
        quantity: u64,
        paid: U256,
        token_ids: Vec<TokenId>,
    },
    /// Treasury funds were paid out.
    Withdrawn { to: Address, amount: U256 },
    /// A role was granted.
    RoleGranted {
        role: Role,
        account: Address,
        sender: Address,
    },
    /// A role was revoked or renounced.
    RoleRevoked {
        role: Role,
        account: Address,
        sender: Address,
    },
}

impl SaleEvent {
    /// Short name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::RoundConfigured { .. } => "RoundConfigured",
            Self::RoundActivated { .. } => "RoundActivated",
            Self::MerkleRootUpdated { .. } => "MerkleRootUpdated",
            Self::BridgeUpdated { .. } => "BridgeUpdated",
            Self::Minted { .. } => "Minted",
            Self::Withdrawn { .. } => "Withdrawn",
            Self::RoleGranted { .. } => "RoleGranted",
            Self::RoleRevoked { .. } => "RoleRevoked",
        }
    }
}
