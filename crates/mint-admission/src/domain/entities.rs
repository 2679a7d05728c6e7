//! # Domain Entities
//!
//! Round configuration, call context and admission results.

use crate::domain::services::keccak256;
use crate::domain::value_objects::{Address, Hash, RoundId, TokenId, U256};
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// ROUND INFO
// =============================================================================

/// Sale parameters of a single round.
///
/// `total_cap` is cumulative: it bounds the units sold across *all* rounds by
/// the end of this one, so round 2 with `total_cap = 10` after a round 1 with
/// `total_cap = 3` offers 7 new units.
///
/// An unconfigured round reads as `RoundInfo::default()`: every cap is zero,
/// so it admits nothing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundInfo {
    /// Price per unit in the smallest currency denomination.
    pub price: U256,
    /// Cumulative units sellable by the end of this round.
    pub total_cap: u64,
    /// Maximum units per single mint call.
    pub per_call_cap: u64,
    /// Maximum units one address may acquire in this round.
    pub per_address_cap: u64,
    /// First block height at which this round admits purchases.
    pub start_block: u64,
    /// Allowlist commitment. `Hash::ZERO` means unrestricted.
    pub allowlist_root: Hash,
}

impl RoundInfo {
    /// Returns true if the round is gated by an allowlist.
    #[must_use]
    pub fn is_restricted(&self) -> bool {
        !self.allowlist_root.is_zero()
    }

    /// Exact payment required for `quantity` units, `None` on overflow.
    #[must_use]
    pub fn cost_of(&self, quantity: u64) -> Option<U256> {
        self.price.checked_mul(U256::from(quantity))
    }
}

// =============================================================================
// ROUND STATE
// =============================================================================

/// Lifecycle state of a round as seen by the admission controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundState {
    /// Not the active round.
    Inactive,
    /// Active and has remaining supply.
    Open,
    /// Active and the cumulative cap has been reached.
    SoldOut,
}

// =============================================================================
// ROLES
// =============================================================================

/// Capabilities held by principals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Configure and activate rounds, withdraw, manage roles.
    Admin,
    /// Trigger issuance. Held by the controller's own identity only.
    Minter,
}

impl Role {
    /// On-chain role identifier: the zero hash for the default admin role,
    /// `keccak256("MINTER_ROLE")` for the minter.
    #[must_use]
    pub fn id(&self) -> Hash {
        match self {
            Self::Admin => Hash::ZERO,
            Self::Minter => keccak256(b"MINTER_ROLE"),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Admin => write!(f, "ADMIN"),
            Self::Minter => write!(f, "MINTER"),
        }
    }
}

// =============================================================================
// CALL CONTEXT
// =============================================================================

/// Who is calling, what they attached, and at which ledger height.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CallContext {
    /// Caller identity. Allowlist leaves and per-address counters use this.
    pub caller: Address,
    /// Payment attached to the call.
    pub value: U256,
    /// Current ledger height.
    pub block_number: u64,
}

impl CallContext {
    /// A call carrying no payment.
    #[must_use]
    pub fn new(caller: Address, block_number: u64) -> Self {
        Self {
            caller,
            value: U256::zero(),
            block_number,
        }
    }

    /// A call carrying `value`.
    #[must_use]
    pub fn paying(caller: Address, value: impl Into<U256>, block_number: u64) -> Self {
        Self {
            caller,
            value: value.into(),
            block_number,
        }
    }
}

// =============================================================================
// MINT RECEIPT
// =============================================================================

/// Result of a successful admission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintReceipt {
    /// Round the units were sold in.
    pub round: RoundId,
    /// Buyer.
    pub minter: Address,
    /// Units admitted.
    pub quantity: u64,
    /// Payment credited to the treasury.
    pub paid: U256,
    /// Identifiers returned by the issuance bridge.
    pub token_ids: Vec<TokenId>,
}
