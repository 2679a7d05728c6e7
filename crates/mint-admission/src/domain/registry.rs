//! # Round Registry
//!
//! Per-round sale configuration and the active-round pointer.
//!
//! The registry stores what the admin writes. It does not reject
//! non-monotonic caps or an unconfigured active round; `lint()` reports
//! those instead.

use crate::domain::entities::RoundInfo;
use crate::domain::value_objects::{Hash, RoundId};
use crate::errors::SaleError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Tolerated misconfiguration surfaced to operators.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigWarning {
    /// A later round has a smaller cumulative cap than an earlier one.
    NonMonotonicTotalCap {
        earlier: RoundId,
        earlier_cap: u64,
        later: RoundId,
        later_cap: u64,
    },
    /// One address may buy more than the whole cumulative supply.
    AddressCapExceedsTotalCap { round: RoundId },
    /// Per-call cap can never be used in full.
    PerCallCapExceedsAddressCap { round: RoundId },
    /// The active round has no configuration (sale effectively paused).
    ActiveRoundUnconfigured { round: RoundId },
}

/// Round configuration store.
#[derive(Clone, Debug, Default)]
pub struct RoundRegistry {
    rounds: BTreeMap<RoundId, RoundInfo>,
    active: RoundId,
}

impl RoundRegistry {
    /// Creates an empty registry with no active round.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Upserts the configuration of round `id`.
    ///
    /// Overwriting the active round takes effect for the next admission check.
    pub fn set_round_info(&mut self, id: RoundId, info: RoundInfo) -> Result<(), SaleError> {
        if !id.is_configurable() {
            return Err(SaleError::InvalidRoundId(id));
        }
        self.rounds.insert(id, info);
        Ok(())
    }

    /// Points the sale at `id`, configured or not.
    pub fn set_active(&mut self, id: RoundId) {
        self.active = id;
    }

    /// Patches the allowlist root of the active round.
    ///
    /// An unconfigured active round is created with default values.
    pub fn set_active_root(&mut self, root: Hash) -> Result<(), SaleError> {
        if !self.active.is_configurable() {
            return Err(SaleError::InvalidRoundId(self.active));
        }
        self.rounds.entry(self.active).or_default().allowlist_root = root;
        Ok(())
    }

    /// Currently active round id.
    #[must_use]
    pub fn active(&self) -> RoundId {
        self.active
    }

    /// Configuration of `id`, or the all-zero default when unconfigured.
    #[must_use]
    pub fn info(&self, id: RoundId) -> RoundInfo {
        self.rounds.get(&id).cloned().unwrap_or_default()
    }

    /// Configuration of the active round.
    #[must_use]
    pub fn active_info(&self) -> RoundInfo {
        self.info(self.active)
    }

    /// Returns true if `id` has been configured.
    #[must_use]
    pub fn is_configured(&self, id: RoundId) -> bool {
        self.rounds.contains_key(&id)
    }

    /// Configured round ids in ascending order.
    #[must_use]
    pub fn configured_rounds(&self) -> Vec<RoundId> {
        self.rounds.keys().copied().collect()
    }

    /// Reports tolerated misconfiguration.
    #[must_use]
    pub fn lint(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        for pair in self.rounds.iter().collect::<Vec<_>>().windows(2) {
            let (earlier, e) = pair[0];
            let (later, l) = pair[1];
            if l.total_cap < e.total_cap {
                warnings.push(ConfigWarning::NonMonotonicTotalCap {
                    earlier: *earlier,
                    earlier_cap: e.total_cap,
                    later: *later,
                    later_cap: l.total_cap,
                });
            }
        }

        for (id, info) in &self.rounds {
            if info.per_address_cap > info.total_cap {
                warnings.push(ConfigWarning::AddressCapExceedsTotalCap { round: *id });
            }
            if info.per_call_cap > info.per_address_cap {
                warnings.push(ConfigWarning::PerCallCapExceedsAddressCap { round: *id });
            }
        }

        if self.active.is_configurable() && !self.is_configured(self.active) {
            warnings.push(ConfigWarning::ActiveRoundUnconfigured {
                round: self.active,
            });
        }

        warnings
    }
}
