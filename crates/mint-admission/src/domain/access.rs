//! # Access Control Gate
//!
//! Explicit set of `(principal, role)` grants. No role hierarchy: `Admin`
//! administers every role, including itself.
//!
//! Revoking the last `Admin` is allowed and permanent. Nothing in this
//! module can re-create an admin once none is left.

use crate::domain::entities::Role;
use crate::domain::value_objects::Address;
use crate::errors::SaleError;
use std::collections::BTreeSet;

/// Role grants held by principals.
#[derive(Clone, Debug, Default)]
pub struct AccessControl {
    grants: BTreeSet<(Role, Address)>,
}

impl AccessControl {
    /// Creates a gate with `admin` holding `Admin`.
    #[must_use]
    pub fn with_admin(admin: Address) -> Self {
        let mut gate = Self::default();
        gate.grants.insert((Role::Admin, admin));
        gate
    }

    /// Returns true if `account` holds `role`.
    #[must_use]
    pub fn has_role(&self, role: Role, account: &Address) -> bool {
        self.grants.contains(&(role, *account))
    }

    /// Fails with `Unauthorized` unless `account` holds `role`.
    pub fn require(&self, role: Role, account: &Address) -> Result<(), SaleError> {
        if self.has_role(role, account) {
            Ok(())
        } else {
            Err(SaleError::Unauthorized {
                account: *account,
                role,
            })
        }
    }

    /// Grants `role` to `account`. Requires `caller` to hold `Admin`.
    ///
    /// Returns true if the grant was new.
    pub fn grant(
        &mut self,
        caller: &Address,
        role: Role,
        account: Address,
    ) -> Result<bool, SaleError> {
        self.require(Role::Admin, caller)?;
        Ok(self.grants.insert((role, account)))
    }

    /// Revokes `role` from `account`. Requires `caller` to hold `Admin`.
    ///
    /// Returns true if the role was held.
    pub fn revoke(
        &mut self,
        caller: &Address,
        role: Role,
        account: Address,
    ) -> Result<bool, SaleError> {
        self.require(Role::Admin, caller)?;
        Ok(self.grants.remove(&(role, account)))
    }

    /// Drops `role` from the caller itself. No admin needed.
    pub fn renounce(&mut self, caller: Address, role: Role) -> bool {
        self.grants.remove(&(role, caller))
    }

    /// All holders of `role`, in address order.
    #[must_use]
    pub fn members(&self, role: Role) -> Vec<Address> {
        self.grants
            .iter()
            .filter(|(r, _)| *r == role)
            .map(|(_, account)| *account)
            .collect()
    }

    /// Number of `Admin` holders. Zero means administration is bricked.
    #[must_use]
    pub fn admin_count(&self) -> usize {
        self.grants.iter().filter(|(r, _)| *r == Role::Admin).count()
    }
}
