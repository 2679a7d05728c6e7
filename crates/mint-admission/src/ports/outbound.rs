//! # Driven Ports (SPI - Outbound)
//!
//! Interfaces the sale controller depends on:
//! - Issuance of purchased units (the collection contract)
//! - Payout of treasury withdrawals
//!
//! Both are called strictly AFTER the controller has committed its own
//! effects and released its state lock. An implementation may call back
//! into the controller; it will observe post-update state.

use crate::domain::value_objects::{Address, TokenId, U256};
use crate::errors::{IssuanceError, PayoutError};

// =============================================================================
// ISSUANCE BRIDGE
// =============================================================================

/// Materializes units after admission succeeds.
///
/// Implementations must refuse callers that do not hold `MINTER` on the
/// collection. The controller passes its own identity as `minter`; end users
/// never hold `MINTER`, so admission checks cannot be bypassed.
pub trait IssuanceBridge: Send + Sync {
    /// Identity of the collection, for logs and events.
    fn address(&self) -> Address;

    /// Mints `quantity` units to `to`.
    ///
    /// # Returns
    ///
    /// * `Ok(ids)` - one identifier per unit
    /// * `Err(_)` - nothing was minted
    fn mint_to(
        &self,
        minter: Address,
        to: Address,
        quantity: u64,
    ) -> Result<Vec<TokenId>, IssuanceError>;
}

// =============================================================================
// PAYOUT
// =============================================================================

/// Moves withdrawn treasury funds to a recipient.
pub trait Payout: Send + Sync {
    /// Transfers `amount` to `to`. On error nothing was transferred.
    fn transfer(&self, to: Address, amount: U256) -> Result<(), PayoutError>;
}
