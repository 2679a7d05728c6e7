//! # Error Types
//!
//! All error types for sale admission, administration and the outbound ports.
//! Every `SaleError` is an atomic rejection: the call left no state change.

use crate::domain::entities::Role;
use crate::domain::value_objects::{Address, RoundId, U256};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// SALE ERRORS
// =============================================================================

/// Reasons a caller-facing operation is rejected.
#[derive(Debug, Error)]
pub enum SaleError {
    /// Mint referenced a round other than the active one.
    #[error("wrong round: requested {requested}, active {active}")]
    WrongRound { requested: RoundId, active: RoundId },

    /// Ledger height is below the round's start block.
    #[error("round not started: block {current} < start block {start}")]
    TooEarly { current: u64, start: u64 },

    /// Quantity of zero.
    #[error("quantity must be at least 1")]
    ZeroQuantity,

    /// Quantity above the per-call cap.
    #[error("quantity {quantity} exceeds per-call cap {cap}")]
    QuantityExceedsPerCallCap { quantity: u64, cap: u64 },

    /// Attached value differs from `price * quantity`.
    #[error("incorrect payment: expected {expected:?}, got {got}")]
    IncorrectPayment { expected: Option<U256>, got: U256 },

    /// Per-address cap for this round would be exceeded.
    #[error("address cap exceeded: holds {held}, requested {quantity}, cap {cap}")]
    AddressCapExceeded { held: u64, quantity: u64, cap: u64 },

    /// Cumulative supply cap would be exceeded.
    #[error("supply exhausted: {remaining} remaining, requested {quantity}")]
    SupplyExhausted { remaining: u64, quantity: u64 },

    /// Allowlist proof did not verify for the caller.
    #[error("caller {0:?} is not allowlisted")]
    NotAllowlisted(Address),

    /// Caller lacks the required role.
    #[error("unauthorized: {account:?} lacks role {role}")]
    Unauthorized { account: Address, role: Role },

    /// Withdrawal larger than the pooled balance.
    #[error("insufficient treasury balance: requested {requested}, available {available}")]
    InsufficientTreasuryBalance { requested: U256, available: U256 },

    /// Round 0 cannot carry a configuration.
    #[error("invalid round id: {0}")]
    InvalidRoundId(RoundId),

    /// No issuance bridge configured.
    #[error("issuance bridge not set")]
    BridgeNotSet,

    /// Issuance bridge refused; admission effects were rolled back.
    #[error("issuance failed: {0}")]
    Issuance(#[from] IssuanceError),

    /// Payout transfer failed; the treasury balance was restored.
    #[error("payout failed: {0}")]
    Payout(#[from] PayoutError),
}

impl SaleError {
    /// Stable tag for statistics and logs.
    #[must_use]
    pub fn reason(&self) -> RejectReason {
        match self {
            Self::WrongRound { .. } => RejectReason::WrongRound,
            Self::TooEarly { .. } => RejectReason::TooEarly,
            Self::ZeroQuantity | Self::QuantityExceedsPerCallCap { .. } => {
                RejectReason::QuantityExceedsPerCallCap
            }
            Self::IncorrectPayment { .. } => RejectReason::IncorrectPayment,
            Self::AddressCapExceeded { .. } => RejectReason::AddressCapExceeded,
            Self::SupplyExhausted { .. } => RejectReason::SupplyExhausted,
            Self::NotAllowlisted(_) => RejectReason::NotAllowlisted,
            Self::Unauthorized { .. } => RejectReason::Unauthorized,
            Self::InsufficientTreasuryBalance { .. } => RejectReason::InsufficientTreasuryBalance,
            Self::InvalidRoundId(_) => RejectReason::InvalidRoundId,
            Self::BridgeNotSet | Self::Issuance(_) => RejectReason::IssuanceUnavailable,
            Self::Payout(_) => RejectReason::PayoutFailed,
        }
    }
}

/// Coarse rejection categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RejectReason {
    WrongRound,
    TooEarly,
    QuantityExceedsPerCallCap,
    IncorrectPayment,
    AddressCapExceeded,
    SupplyExhausted,
    NotAllowlisted,
    Unauthorized,
    InsufficientTreasuryBalance,
    InvalidRoundId,
    IssuanceUnavailable,
    PayoutFailed,
}

// =============================================================================
// PORT ERRORS
// =============================================================================

/// Errors raised by an issuance bridge.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IssuanceError {
    /// The calling principal does not hold MINTER on the collection.
    #[error("minter {0:?} lacks MINTER role")]
    MissingMinterRole(Address),

    /// The collection's own ceiling was hit.
    #[error("collection supply ceiling reached")]
    SupplyCeilingReached,

    /// Bridge unreachable or failed internally.
    #[error("bridge unavailable: {0}")]
    Unavailable(String),
}

/// Errors raised by a payout port.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PayoutError {
    /// Recipient refused the transfer.
    #[error("transfer rejected by recipient {0:?}")]
    Rejected(Address),

    /// Payment rail unavailable.
    #[error("payout rail unavailable: {0}")]
    Unavailable(String),
}

// =============================================================================
// CONFIG ERRORS
// =============================================================================

/// Errors loading a `SaleConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Malformed JSON.
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed hex string.
    #[error("invalid hex in {key}: {source}")]
    InvalidHex {
        key: &'static str,
        #[source]
        source: hex::FromHexError,
    },

    /// Value present but unusable.
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

// =============================================================================
// TESTS
// =============================================================================
