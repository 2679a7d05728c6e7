//! # Domain Invariants
//!
//! Conditions that must hold after every committed call. The controller
//! checks them in debug builds after each admission; tests check them after
//! every step of a scenario.
//!
//! | Invariant | Check |
//! |-----------|-------|
//! | Remaining supply never negative | `check_remaining_invariant` |
//! | Address counter within its round cap | `check_address_cap_invariant` |
//! | Sold within the active cumulative cap after admission | `check_supply_cap_invariant` |

use crate::domain::ledger::SupplyLedger;
use crate::domain::registry::RoundRegistry;

/// `remaining == max(0, total_cap(active) - sold)`.
#[must_use]
pub fn check_remaining_invariant(registry: &RoundRegistry, ledger: &SupplyLedger, remaining: u64) -> bool {
    remaining == registry.active_info().total_cap.saturating_sub(ledger.total_sold())
}

/// Every `(round, address)` counter is at most that round's per-address cap.
///
/// Checked against the live registry. An admin lowering a round's
/// per-address cap below counters already recorded is tolerated, and this
/// check then reports `false` for that round.
#[must_use]
pub fn check_address_cap_invariant(registry: &RoundRegistry, ledger: &SupplyLedger) -> bool {
    ledger
        .entries()
        .all(|(round, _, units)| units <= registry.info(round).per_address_cap)
}

/// `sold <= total_cap(active)`. Holds right after a successful admission.
#[must_use]
pub fn check_supply_cap_invariant(registry: &RoundRegistry, ledger: &SupplyLedger) -> bool {
    ledger.total_sold() <= registry.active_info().total_cap
}
