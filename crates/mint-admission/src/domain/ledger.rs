//! # Supply Ledger
//!
//! Units consumed globally and per `(round, address)`.
//!
//! Both counters only grow on the admission path. `release` exists solely to
//! undo an admission whose issuance call failed within the same call.

use crate::domain::value_objects::{Address, RoundId};
use crate::errors::SaleError;
use std::collections::HashMap;

/// Global and per-address sold counters.
#[derive(Clone, Debug, Default)]
pub struct SupplyLedger {
    sold: u64,
    per_address: HashMap<RoundId, HashMap<Address, u64>>,
}

impl SupplyLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total units admitted across all rounds.
    #[must_use]
    pub fn total_sold(&self) -> u64 {
        self.sold
    }

    /// Units `account` acquired in `round`.
    #[must_use]
    pub fn minted(&self, round: RoundId, account: &Address) -> u64 {
        self.per_address
            .get(&round)
            .and_then(|accounts| accounts.get(account))
            .copied()
            .unwrap_or(0)
    }

    /// `max(0, total_cap - sold)`.
    #[must_use]
    pub fn remaining(&self, total_cap: u64) -> u64 {
        total_cap.saturating_sub(self.sold)
    }

    /// Fails unless `account` can take `quantity` more units in `round`.
    pub fn check_address_quota(
        &self,
        round: RoundId,
        account: &Address,
        quantity: u64,
        cap: u64,
    ) -> Result<(), SaleError> {
        let held = self.minted(round, account);
        match held.checked_add(quantity) {
            Some(total) if total <= cap => Ok(()),
            _ => Err(SaleError::AddressCapExceeded {
                held,
                quantity,
                cap,
            }),
        }
    }

    /// Fails unless `quantity` more units fit under `total_cap`.
    pub fn check_supply(&self, quantity: u64, total_cap: u64) -> Result<(), SaleError> {
        match self.sold.checked_add(quantity) {
            Some(total) if total <= total_cap => Ok(()),
            _ => Err(SaleError::SupplyExhausted {
                remaining: self.remaining(total_cap),
                quantity,
            }),
        }
    }

    /// Records an admission. Callers must have run both checks first.
    pub fn record(&mut self, round: RoundId, account: Address, quantity: u64) {
        self.sold = self.sold.saturating_add(quantity);
        let held = self
            .per_address
            .entry(round)
            .or_default()
            .entry(account)
            .or_insert(0);
        *held = held.saturating_add(quantity);
    }

    /// Reverses a `record` of the same arguments.
    pub(crate) fn release(&mut self, round: RoundId, account: Address, quantity: u64) {
        self.sold = self.sold.saturating_sub(quantity);
        if let Some(held) = self
            .per_address
            .get_mut(&round)
            .and_then(|accounts| accounts.get_mut(&account))
        {
            *held = held.saturating_sub(quantity);
        }
    }

    /// Iterates `(round, address, units)` entries. Order is unspecified.
    pub fn entries(&self) -> impl Iterator<Item = (RoundId, Address, u64)> + '_ {
        self.per_address.iter().flat_map(|(round, accounts)| {
            accounts
                .iter()
                .map(move |(account, units)| (*round, *account, *units))
        })
    }
}
