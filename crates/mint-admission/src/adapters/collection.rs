//! # Collection Adapter
//!
//! In-memory issuance bridge standing in for the collectible contract.
//! Production deployments point the controller at the real collection; this
//! adapter keeps the same MINTER discipline so tests exercise it.

use crate::domain::access::AccessControl;
use crate::domain::entities::Role;
use crate::domain::value_objects::{Address, TokenId};
use crate::errors::{IssuanceError, SaleError};
use crate::ports::outbound::IssuanceBridge;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;

#[derive(Debug)]
struct CollectionState {
    roles: AccessControl,
    owners: BTreeMap<TokenId, Address>,
    next_id: TokenId,
}

/// In-memory collection with sequential token ids starting at 1.
#[derive(Debug)]
pub struct InMemoryCollection {
    address: Address,
    max_supply: Option<u64>,
    state: RwLock<CollectionState>,
    unavailable: AtomicBool,
}

impl InMemoryCollection {
    /// Creates a collection administered by `admin`.
    #[must_use]
    pub fn new(address: Address, admin: Address) -> Self {
        Self {
            address,
            max_supply: None,
            state: RwLock::new(CollectionState {
                roles: AccessControl::with_admin(admin),
                owners: BTreeMap::new(),
                next_id: 1,
            }),
            unavailable: AtomicBool::new(false),
        }
    }

    /// Caps the number of units this collection will ever mint.
    #[must_use]
    pub fn with_max_supply(mut self, max_supply: u64) -> Self {
        self.max_supply = Some(max_supply);
        self
    }

    /// Grants `role` on the collection. Requires `caller` to be a collection admin.
    pub fn grant_role(&self, caller: &Address, role: Role, account: Address) -> Result<(), SaleError> {
        self.state.write().roles.grant(caller, role, account).map(|_| ())
    }

    /// Revokes `role` on the collection. Requires `caller` to be a collection admin.
    pub fn revoke_role(&self, caller: &Address, role: Role, account: Address) -> Result<(), SaleError> {
        self.state.write().roles.revoke(caller, role, account).map(|_| ())
    }

    /// Returns true if `account` holds `role` on the collection.
    #[must_use]
    pub fn has_role(&self, role: Role, account: &Address) -> bool {
        self.state.read().roles.has_role(role, account)
    }

    /// Simulates an unreachable collection.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Units minted so far.
    #[must_use]
    pub fn total_supply(&self) -> u64 {
        self.state.read().owners.len() as u64
    }

    /// Units owned by `owner`.
    #[must_use]
    pub fn balance_of(&self, owner: &Address) -> u64 {
        self.state
            .read()
            .owners
            .values()
            .filter(|o| *o == owner)
            .count() as u64
    }

    /// Owner of `token`.
    #[must_use]
    pub fn owner_of(&self, token: TokenId) -> Option<Address> {
        self.state.read().owners.get(&token).copied()
    }
}

impl IssuanceBridge for InMemoryCollection {
    fn address(&self) -> Address {
        self.address
    }

    fn mint_to(
        &self,
        minter: Address,
        to: Address,
        quantity: u64,
    ) -> Result<Vec<TokenId>, IssuanceError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(IssuanceError::Unavailable("collection offline".to_string()));
        }

        let mut state = self.state.write();
        if !state.roles.has_role(Role::Minter, &minter) {
            return Err(IssuanceError::MissingMinterRole(minter));
        }

        let minted = state.owners.len() as u64;
        if let Some(max) = self.max_supply {
            if minted.saturating_add(quantity) > max {
                return Err(IssuanceError::SupplyCeilingReached);
            }
        }

        let first = state.next_id;
        let next = first
            .checked_add(quantity)
            .ok_or(IssuanceError::SupplyCeilingReached)?;
        let mut ids: Vec<TokenId> = Vec::new();
        usize::try_from(quantity)
            .ok()
            .and_then(|n| ids.try_reserve_exact(n).ok())
            .ok_or_else(|| IssuanceError::Unavailable(format!("cannot allocate {quantity} ids")))?;
        ids.extend(first..next);
        for id in &ids {
            state.owners.insert(*id, to);
        }
        state.next_id = next;

        debug!(to = ?to, quantity, first_id = first, "Collection minted units");
        Ok(ids)
    }
}
