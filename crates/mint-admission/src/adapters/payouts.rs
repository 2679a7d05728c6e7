//! # Payout Adapter
//!
//! In-memory payment rail crediting withdrawn funds per recipient.

use crate::domain::value_objects::{Address, U256};
use crate::errors::PayoutError;
use crate::ports::outbound::Payout;
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};

/// In-memory payout rail.
#[derive(Debug, Default)]
pub struct InMemoryPayouts {
    balances: RwLock<HashMap<Address, U256>>,
    rejecting: RwLock<HashSet<Address>>,
    unavailable: AtomicBool,
}

impl InMemoryPayouts {
    /// Creates an empty rail.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Funds received by `account`.
    #[must_use]
    pub fn balance_of(&self, account: &Address) -> U256 {
        self.balances
            .read()
            .get(account)
            .copied()
            .unwrap_or_default()
    }

    /// Makes `account` refuse incoming transfers.
    pub fn reject_transfers_to(&self, account: Address) {
        self.rejecting.write().insert(account);
    }

    /// Simulates an unreachable rail.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }
}

impl Payout for InMemoryPayouts {
    fn transfer(&self, to: Address, amount: U256) -> Result<(), PayoutError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(PayoutError::Unavailable("rail offline".to_string()));
        }
        if self.rejecting.read().contains(&to) {
            return Err(PayoutError::Rejected(to));
        }
        let mut balances = self.balances.write();
        let balance = balances.entry(to).or_default();
        *balance = balance.saturating_add(amount);
        Ok(())
    }
}
