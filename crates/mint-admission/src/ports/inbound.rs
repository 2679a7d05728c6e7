//! # Driving Ports (API - Inbound)
//!
//! The caller-facing surface of the sale. Every mutating operation takes a
//! `CallContext` carrying the caller identity, attached value and ledger
//! height; admin operations check `Role::Admin` against `ctx.caller`.

use crate::domain::entities::{CallContext, MintReceipt, Role, RoundInfo};
use crate::domain::value_objects::{Address, Hash, RoundId, U256};
use crate::errors::SaleError;
use crate::ports::outbound::IssuanceBridge;
use std::sync::Arc;

/// Sale admission API.
pub trait SaleApi: Send + Sync {
    // ---- Round registry ----------------------------------------------------

    /// Upserts the configuration of round `id`. Requires `Admin`.
    fn set_round_info(
        &self,
        ctx: &CallContext,
        id: RoundId,
        info: RoundInfo,
    ) -> Result<(), SaleError>;

    /// Activates round `id`, configured or not. Requires `Admin`.
    fn set_round(&self, ctx: &CallContext, id: RoundId) -> Result<(), SaleError>;

    /// Replaces the active round's allowlist root. Requires `Admin`.
    fn set_merkle_root(&self, ctx: &CallContext, root: Hash) -> Result<(), SaleError>;

    /// Points issuance at `bridge`. Requires `Admin`.
    fn set_bridge(
        &self,
        ctx: &CallContext,
        bridge: Arc<dyn IssuanceBridge>,
    ) -> Result<(), SaleError>;

    /// `max(0, total_cap(active) - sold)`.
    fn remain_count(&self) -> u64;

    // ---- Admission ---------------------------------------------------------

    /// Buys `quantity` units in `round`, paying `ctx.value`.
    ///
    /// All-or-nothing: on error no counter, balance or unit changed.
    fn mint(
        &self,
        ctx: &CallContext,
        round: RoundId,
        quantity: u64,
        proof: &[Hash],
    ) -> Result<MintReceipt, SaleError>;

    // ---- Treasury ----------------------------------------------------------

    /// Sends `amount` of the pooled balance to `to`. Requires `Admin`.
    fn withdraw(&self, ctx: &CallContext, to: Address, amount: U256) -> Result<(), SaleError>;

    // ---- Access control ----------------------------------------------------

    /// Grants `role` to `account`. Requires `Admin`.
    fn grant_role(&self, ctx: &CallContext, role: Role, account: Address)
        -> Result<(), SaleError>;

    /// Revokes `role` from `account`. Requires `Admin`. Self-revocation allowed.
    fn revoke_role(
        &self,
        ctx: &CallContext,
        role: Role,
        account: Address,
    ) -> Result<(), SaleError>;

    /// Returns true if `account` holds `role`.
    fn has_role(&self, role: Role, account: &Address) -> bool;
}
