//! # Sale Controller
//!
//! The admission state machine composing the access gate, round registry,
//! supply ledger, allowlist verifier and treasury behind one lock.
//!
//! ## Call discipline
//!
//! 1. Take the operation lock. It is held for the whole call, port included.
//! 2. Take the state write lock, run every precondition against that one snapshot.
//! 3. Record the ledger counters, then release the state lock.
//! 4. Call the outbound port (bridge / payout).
//! 5. On success credit the treasury; on failure release this call's counters.
//!
//! The operation lock is re-entrant. Other threads, readers included, queue
//! behind an in-flight call and never see its intermediate state. A port that
//! calls back into the controller on the same thread proceeds and sees the
//! post-update ledger, so the last units cannot be sold twice.

use crate::algorithms::verify_allowlist_proof;
use crate::config::SaleConfig;
use crate::domain::access::AccessControl;
use crate::domain::entities::{CallContext, MintReceipt, Role, RoundInfo, RoundState};
use crate::domain::invariants::{check_remaining_invariant, check_supply_cap_invariant};
use crate::domain::ledger::SupplyLedger;
use crate::domain::registry::{ConfigWarning, RoundRegistry};
use crate::domain::treasury::Treasury;
use crate::domain::value_objects::{Address, Hash, RoundId, U256};
use crate::errors::{RejectReason, SaleError};
use crate::events::SaleEvent;
use crate::ports::inbound::SaleApi;
use crate::ports::outbound::{IssuanceBridge, Payout};

use parking_lot::{ReentrantMutex, RwLock};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// Statistics for the sale controller.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SaleStats {
    /// Successful mint calls.
    pub mints_accepted: u64,
    /// Rejected mint calls.
    pub mints_rejected: u64,
    /// Units admitted.
    pub units_sold: u64,
    /// Successful withdrawals.
    pub withdrawals: u64,
    /// Rejections of any operation, by reason.
    pub rejected_by_reason: BTreeMap<RejectReason, u64>,
}

struct SaleState {
    roles: AccessControl,
    registry: RoundRegistry,
    ledger: SupplyLedger,
    treasury: Treasury,
    bridge: Option<Arc<dyn IssuanceBridge>>,
    events: Vec<SaleEvent>,
    stats: SaleStats,
}

impl SaleState {
    fn require_admin(&self, caller: &Address) -> Result<(), SaleError> {
        self.roles.require(Role::Admin, caller)
    }

    fn remain_count(&self) -> u64 {
        self.ledger
            .remaining(self.registry.active_info().total_cap)
    }

    fn warn_misconfiguration(&self) {
        for warning in self.registry.lint() {
            warn!(?warning, "Tolerated sale misconfiguration");
        }
    }
}

/// Sale admission controller.
pub struct SaleController {
    config: SaleConfig,
    payout: Arc<dyn Payout>,
    /// Serializes whole operations across port calls.
    serial: ReentrantMutex<()>,
    state: RwLock<SaleState>,
}

impl SaleController {
    /// Creates a controller, granting `Admin` to `config.admin` and writing
    /// the configured round schedule.
    pub fn new(config: SaleConfig, payout: Arc<dyn Payout>) -> Result<Self, SaleError> {
        let mut registry = RoundRegistry::new();
        for seed in &config.initial_rounds {
            registry.set_round_info(seed.id, seed.info.clone())?;
        }
        registry.set_active(config.initial_active_round);

        let state = SaleState {
            roles: AccessControl::with_admin(config.admin),
            registry,
            ledger: SupplyLedger::new(),
            treasury: Treasury::default(),
            bridge: None,
            events: Vec::new(),
            stats: SaleStats::default(),
        };
        state.warn_misconfiguration();

        info!(
            admin = %config.admin,
            contract = %config.contract_address,
            rounds = config.initial_rounds.len(),
            active = %config.initial_active_round,
            "Sale controller initialized"
        );

        Ok(Self {
            config,
            payout,
            serial: ReentrantMutex::new(()),
            state: RwLock::new(state),
        })
    }

    /// The controller's own identity (the MINTER principal on the collection).
    #[must_use]
    pub fn address(&self) -> Address {
        self.config.contract_address
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &SaleConfig {
        &self.config
    }

    /// Currently active round.
    #[must_use]
    pub fn active_round(&self) -> RoundId {
        self.view(|s| s.registry.active())
    }

    /// Configuration of `id` (all-zero default when unconfigured).
    #[must_use]
    pub fn round_info(&self, id: RoundId) -> RoundInfo {
        self.view(|s| s.registry.info(id))
    }

    /// Configured round ids in ascending order.
    #[must_use]
    pub fn configured_rounds(&self) -> Vec<RoundId> {
        self.view(|s| s.registry.configured_rounds())
    }

    /// Lifecycle state of `id`.
    #[must_use]
    pub fn round_state(&self, id: RoundId) -> RoundState {
        self.view(|s| {
            if id == RoundId::NONE || id != s.registry.active() {
                RoundState::Inactive
            } else if s.remain_count() == 0 {
                RoundState::SoldOut
            } else {
                RoundState::Open
            }
        })
    }

    /// Units `account` bought in `round`.
    #[must_use]
    pub fn minted(&self, round: RoundId, account: &Address) -> u64 {
        self.view(|s| s.ledger.minted(round, account))
    }

    /// Units admitted across all rounds.
    #[must_use]
    pub fn total_sold(&self) -> u64 {
        self.view(|s| s.ledger.total_sold())
    }

    /// Pooled payment balance.
    #[must_use]
    pub fn treasury_balance(&self) -> U256 {
        self.view(|s| s.treasury.balance())
    }

    /// Address of the configured issuance bridge.
    #[must_use]
    pub fn bridge_address(&self) -> Option<Address> {
        self.view(|s| s.bridge.as_ref().map(|b| b.address()))
    }

    /// Holders of `role`.
    #[must_use]
    pub fn role_members(&self, role: Role) -> Vec<Address> {
        self.view(|s| s.roles.members(role))
    }

    /// Tolerated misconfiguration of the current schedule.
    #[must_use]
    pub fn lint(&self) -> Vec<ConfigWarning> {
        self.view(|s| s.registry.lint())
    }

    /// Snapshot of statistics.
    #[must_use]
    pub fn stats(&self) -> SaleStats {
        self.view(|s| s.stats.clone())
    }

    /// Snapshot of the event log.
    #[must_use]
    pub fn events(&self) -> Vec<SaleEvent> {
        self.view(|s| s.events.clone())
    }

    /// Drains the event log.
    pub fn take_events(&self) -> Vec<SaleEvent> {
        let _serial = self.serial.lock();
        std::mem::take(&mut self.state.write().events)
    }

    /// Drops `role` from the caller itself. No admin needed.
    #[instrument(skip(self, ctx), fields(caller = %ctx.caller))]
    pub fn renounce_role(&self, ctx: &CallContext, role: Role) {
        let _serial = self.serial.lock();
        let mut state = self.state.write();
        if state.roles.renounce(ctx.caller, role) {
            state.events.push(SaleEvent::RoleRevoked {
                role,
                account: ctx.caller,
                sender: ctx.caller,
            });
            if state.roles.admin_count() == 0 {
                warn!("Last admin renounced; administration is permanently disabled");
            }
            info!(%role, "Role renounced");
        }
    }

    /// Reads state once no other thread has an operation in flight.
    fn view<R>(&self, read: impl FnOnce(&SaleState) -> R) -> R {
        let _serial = self.serial.lock();
        read(&self.state.read())
    }

    /// Counts and logs a rejection, then hands the error back.
    fn reject<T>(&self, op: &'static str, err: SaleError) -> Result<T, SaleError> {
        let reason = err.reason();
        {
            let mut state = self.state.write();
            if op == "mint" {
                state.stats.mints_rejected += 1;
            }
            *state.stats.rejected_by_reason.entry(reason).or_insert(0) += 1;
        }
        warn!(op, ?reason, error = %err, "Call rejected");
        Err(err)
    }

    /// Checks every mint precondition and records the ledger counters.
    ///
    /// Returns the bridge to call once the state lock is released. The
    /// payment is credited only after issuance succeeds.
    fn admit(
        &self,
        ctx: &CallContext,
        round: RoundId,
        quantity: u64,
        proof: &[Hash],
    ) -> Result<Arc<dyn IssuanceBridge>, SaleError> {
        let mut state = self.state.write();

        let active = state.registry.active();
        if round != active {
            return Err(SaleError::WrongRound {
                requested: round,
                active,
            });
        }

        let info = state.registry.info(round);
        if ctx.block_number < info.start_block {
            return Err(SaleError::TooEarly {
                current: ctx.block_number,
                start: info.start_block,
            });
        }

        if quantity == 0 {
            return Err(SaleError::ZeroQuantity);
        }
        if quantity > info.per_call_cap {
            return Err(SaleError::QuantityExceedsPerCallCap {
                quantity,
                cap: info.per_call_cap,
            });
        }

        let expected = info.cost_of(quantity);
        if expected != Some(ctx.value) {
            return Err(SaleError::IncorrectPayment {
                expected,
                got: ctx.value,
            });
        }

        state
            .ledger
            .check_address_quota(round, &ctx.caller, quantity, info.per_address_cap)?;
        state.ledger.check_supply(quantity, info.total_cap)?;

        if info.is_restricted()
            && (proof.len() > self.config.max_proof_len
                || !verify_allowlist_proof(&ctx.caller, proof, &info.allowlist_root))
        {
            return Err(SaleError::NotAllowlisted(ctx.caller));
        }

        let bridge = state.bridge.clone().ok_or(SaleError::BridgeNotSet)?;

        // Counters before interaction
        state.ledger.record(round, ctx.caller, quantity);

        debug_assert!(check_supply_cap_invariant(&state.registry, &state.ledger));
        debug_assert!(check_remaining_invariant(
            &state.registry,
            &state.ledger,
            state.remain_count()
        ));

        debug!(remaining = state.remain_count(), "Admission committed");
        Ok(bridge)
    }

    /// Releases the counters of an admission whose issuance failed.
    fn roll_back_admission(&self, ctx: &CallContext, round: RoundId, quantity: u64) {
        self.state.write().ledger.release(round, ctx.caller, quantity);
    }
}

impl SaleApi for SaleController {
    #[instrument(skip(self, ctx, info), fields(caller = %ctx.caller, round = %id))]
    fn set_round_info(
        &self,
        ctx: &CallContext,
        id: RoundId,
        info: RoundInfo,
    ) -> Result<(), SaleError> {
        let _serial = self.serial.lock();
        let result = {
            let mut state = self.state.write();
            state
                .require_admin(&ctx.caller)
                .and_then(|()| state.registry.set_round_info(id, info.clone()))
                .map(|()| {
                    state.events.push(SaleEvent::RoundConfigured {
                        round: id,
                        info: info.clone(),
                    });
                    state.warn_misconfiguration();
                })
        };

        match result {
            Ok(()) => {
                info!(
                    price = %info.price,
                    total_cap = info.total_cap,
                    per_call_cap = info.per_call_cap,
                    per_address_cap = info.per_address_cap,
                    start_block = info.start_block,
                    restricted = info.is_restricted(),
                    "Round configured"
                );
                Ok(())
            }
            Err(err) => self.reject("set_round_info", err),
        }
    }

    #[instrument(skip(self, ctx), fields(caller = %ctx.caller, round = %id))]
    fn set_round(&self, ctx: &CallContext, id: RoundId) -> Result<(), SaleError> {
        let _serial = self.serial.lock();
        let result = {
            let mut state = self.state.write();
            state.require_admin(&ctx.caller).map(|()| {
                let previous = state.registry.active();
                state.registry.set_active(id);
                state.events.push(SaleEvent::RoundActivated {
                    previous,
                    round: id,
                });
                state.warn_misconfiguration();
                previous
            })
        };

        match result {
            Ok(previous) => {
                info!(%previous, "Round activated");
                Ok(())
            }
            Err(err) => self.reject("set_round", err),
        }
    }

    #[instrument(skip(self, ctx), fields(caller = %ctx.caller, root = %root))]
    fn set_merkle_root(&self, ctx: &CallContext, root: Hash) -> Result<(), SaleError> {
        let _serial = self.serial.lock();
        let result = {
            let mut state = self.state.write();
            state.require_admin(&ctx.caller).and_then(|()| {
                let round = state.registry.active();
                state.registry.set_active_root(root)?;
                state.events.push(SaleEvent::MerkleRootUpdated { round, root });
                Ok(round)
            })
        };

        match result {
            Ok(round) => {
                info!(%round, "Allowlist root updated");
                Ok(())
            }
            Err(err) => self.reject("set_merkle_root", err),
        }
    }

    #[instrument(skip(self, ctx, bridge), fields(caller = %ctx.caller, bridge = %bridge.address()))]
    fn set_bridge(
        &self,
        ctx: &CallContext,
        bridge: Arc<dyn IssuanceBridge>,
    ) -> Result<(), SaleError> {
        let _serial = self.serial.lock();
        let result = {
            let mut state = self.state.write();
            state.require_admin(&ctx.caller).map(|()| {
                let address = bridge.address();
                state.bridge = Some(bridge);
                state.events.push(SaleEvent::BridgeUpdated { bridge: address });
            })
        };

        match result {
            Ok(()) => {
                info!("Issuance bridge updated");
                Ok(())
            }
            Err(err) => self.reject("set_bridge", err),
        }
    }

    fn remain_count(&self) -> u64 {
        self.view(SaleState::remain_count)
    }

    #[instrument(skip(self, ctx, proof), fields(caller = %ctx.caller, round = %round))]
    fn mint(
        &self,
        ctx: &CallContext,
        round: RoundId,
        quantity: u64,
        proof: &[Hash],
    ) -> Result<MintReceipt, SaleError> {
        let _serial = self.serial.lock();
        let bridge = match self.admit(ctx, round, quantity, proof) {
            Ok(bridge) => bridge,
            Err(err) => return self.reject("mint", err),
        };

        // State lock released: a re-entrant bridge sees the updated counters.
        match bridge.mint_to(self.address(), ctx.caller, quantity) {
            Ok(token_ids) => {
                let receipt = MintReceipt {
                    round,
                    minter: ctx.caller,
                    quantity,
                    paid: ctx.value,
                    token_ids,
                };
                let remaining = {
                    let mut state = self.state.write();
                    state.treasury.credit(ctx.value);
                    state.stats.mints_accepted += 1;
                    state.stats.units_sold += quantity;
                    state.events.push(SaleEvent::Minted {
                        round,
                        minter: ctx.caller,
                        quantity,
                        paid: ctx.value,
                        token_ids: receipt.token_ids.clone(),
                    });
                    state.remain_count()
                };
                info!(paid = %ctx.value, remaining, "Mint admitted");
                Ok(receipt)
            }
            Err(err) => {
                error!(error = %err, "Issuance failed, reverting admission");
                self.roll_back_admission(ctx, round, quantity);
                self.reject("mint", err.into())
            }
        }
    }

    #[instrument(skip(self, ctx), fields(caller = %ctx.caller, to = %to, amount = %amount))]
    fn withdraw(&self, ctx: &CallContext, to: Address, amount: U256) -> Result<(), SaleError> {
        let _serial = self.serial.lock();
        let debited = {
            let mut state = self.state.write();
            state
                .require_admin(&ctx.caller)
                .and_then(|()| state.treasury.debit(amount))
        };
        if let Err(err) = debited {
            return self.reject("withdraw", err);
        }

        // Balance already reduced: a re-entrant withdraw sees the new balance.
        match self.payout.transfer(to, amount) {
            Ok(()) => {
                let mut state = self.state.write();
                state.stats.withdrawals += 1;
                state.events.push(SaleEvent::Withdrawn { to, amount });
                info!(balance = %state.treasury.balance(), "Treasury withdrawal sent");
                Ok(())
            }
            Err(err) => {
                self.state.write().treasury.credit(amount);
                self.reject("withdraw", err.into())
            }
        }
    }

    #[instrument(skip(self, ctx), fields(caller = %ctx.caller, account = %account))]
    fn grant_role(&self, ctx: &CallContext, role: Role, account: Address) -> Result<(), SaleError> {
        let _serial = self.serial.lock();
        let result = {
            let mut state = self.state.write();
            let granted = state.roles.grant(&ctx.caller, role, account);
            if let Ok(true) = granted {
                state.events.push(SaleEvent::RoleGranted {
                    role,
                    account,
                    sender: ctx.caller,
                });
            }
            granted
        };

        match result {
            Ok(granted) => {
                if granted {
                    info!(%role, "Role granted");
                }
                Ok(())
            }
            Err(err) => self.reject("grant_role", err),
        }
    }

    #[instrument(skip(self, ctx), fields(caller = %ctx.caller, account = %account))]
    fn revoke_role(
        &self,
        ctx: &CallContext,
        role: Role,
        account: Address,
    ) -> Result<(), SaleError> {
        let _serial = self.serial.lock();
        let result = {
            let mut state = self.state.write();
            let revoked = state.roles.revoke(&ctx.caller, role, account);
            if let Ok(true) = revoked {
                state.events.push(SaleEvent::RoleRevoked {
                    role,
                    account,
                    sender: ctx.caller,
                });
                if state.roles.admin_count() == 0 {
                    warn!("Last admin revoked; administration is permanently disabled");
                }
            }
            revoked
        };

        match result {
            Ok(revoked) => {
                if revoked {
                    info!(%role, "Role revoked");
                }
                Ok(())
            }
            Err(err) => self.reject("revoke_role", err),
        }
    }

    fn has_role(&self, role: Role, account: &Address) -> bool {
        self.view(|s| s.roles.has_role(role, account))
    }
}

/// Wired controller for tests: in-memory collection (controller holds
/// MINTER on it, bridge already set) and in-memory payouts.
pub fn create_test_controller() -> Result<
    (
        Arc<SaleController>,
        Arc<crate::adapters::InMemoryCollection>,
        Arc<crate::adapters::InMemoryPayouts>,
    ),
    SaleError,
> {
    use crate::adapters::{InMemoryCollection, InMemoryPayouts};

    let config = SaleConfig::for_testing();
    let admin = config.admin;
    let payouts = Arc::new(InMemoryPayouts::new());
    let controller = Arc::new(SaleController::new(config, payouts.clone())?);

    let collection = Arc::new(InMemoryCollection::new(Address::repeat_byte(0xC1), admin));
    collection.grant_role(&admin, Role::Minter, controller.address())?;
    controller.set_bridge(&CallContext::new(admin, 0), collection.clone())?;

    Ok((controller, collection, payouts))
}

// =============================================================================
// TESTS
// =============================================================================
