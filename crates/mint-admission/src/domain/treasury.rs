//! # Treasury
//!
//! Single pooled balance of mint payments. Not partitioned per round.

use crate::domain::value_objects::U256;
use crate::errors::SaleError;

/// Pooled payment balance.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Treasury {
    balance: U256,
}

impl Treasury {
    /// Current balance.
    #[must_use]
    pub fn balance(&self) -> U256 {
        self.balance
    }

    /// Adds received payment.
    pub fn credit(&mut self, amount: U256) {
        self.balance = self.balance.saturating_add(amount);
    }

    /// Removes `amount`, failing without change if the balance is short.
    pub fn debit(&mut self, amount: U256) -> Result<(), SaleError> {
        self.balance = self.balance.checked_sub(amount).ok_or(
            SaleError::InsufficientTreasuryBalance {
                requested: amount,
                available: self.balance,
            },
        )?;
        Ok(())
    }
}
