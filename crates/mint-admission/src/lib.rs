//! # Mint Admission - Phased Sale Controller
//!
//! Decides whether a purchase request against a capped, multi-round
//! collectible sale is admitted. On admission it records the sale, pools the
//! payment and asks the collection (through the issuance bridge) to issue
//! the units.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | Units sold never exceed the active round's cumulative cap | `domain/ledger.rs` - `check_supply()` |
//! | Per-address units in a round never exceed its address cap | `domain/ledger.rs` - `check_address_quota()` |
//! | `remain_count() == total_cap - total_sold` (saturating) | `domain/invariants.rs` - `check_remaining_invariant()` |
//! | Rejected calls change nothing | `service.rs` - `admit()` / `roll_back_admission()` |
//! | Counters move before the bridge is called | `service.rs` - `mint()` |
//! | Other threads never see a call in flight | `service.rs` - operation lock |
//!
//! ## Mint Precondition Order
//!
//! | # | Check | Error |
//! |---|-------|-------|
//! | 1 | Requested round is the active round | `WrongRound` |
//! | 2 | Block height reached the round start | `TooEarly` |
//! | 3 | Quantity within the per-call cap | `QuantityExceedsPerCallCap` |
//! | 4 | Payment equals `price * quantity` | `IncorrectPayment` |
//! | 5 | Caller stays within the per-address cap | `AddressCapExceeded` |
//! | 6 | Cumulative cap not exceeded | `SupplyExhausted` |
//! | 7 | Allowlist proof verifies (if the round is restricted) | `NotAllowlisted` |
//!
//! ## Outbound Dependencies
//!
//! | Port | Purpose |
//! |------|---------|
//! | `IssuanceBridge` | Issue units on the collection (controller holds `MINTER`) |
//! | `Payout` | Move treasury funds to a recipient |
//!
//! ## Usage Example
//!
//! ```ignore
//! use mint_admission::prelude::*;
//!
//! let (sale, collection, _payouts) = create_test_controller()?;
//! let admin = CallContext::new(sale.config().admin, 0);
//! sale.set_round_info(&admin, RoundId(1), info)?;
//! sale.set_round(&admin, RoundId(1))?;
//!
//! let receipt = sale.mint(&CallContext::paying(buyer, 7u64, 10), RoundId(1), 1, &proof)?;
//! println!("Issued: {:?}", receipt.token_ids);
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod algorithms;
pub mod config;
pub mod domain;
pub mod errors;
pub mod events;
pub mod ports;
pub mod service;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    // Domain entities
    pub use crate::domain::entities::{
        CallContext, MintReceipt, Role, RoundInfo, RoundState,
    };

    // Value objects
    pub use crate::domain::value_objects::{Address, Hash, RoundId, TokenId, U256};

    // Domain services
    pub use crate::domain::services::{hash_pair, keccak256, leaf_hash};
    pub use crate::domain::registry::ConfigWarning;

    // Allowlist
    pub use crate::algorithms::{verify_allowlist_proof, AllowlistTree};

    // Ports
    pub use crate::ports::inbound::SaleApi;
    pub use crate::ports::outbound::{IssuanceBridge, Payout};

    // Events
    pub use crate::events::SaleEvent;

    // Errors
    pub use crate::errors::{ConfigError, IssuanceError, PayoutError, RejectReason, SaleError};

    // Adapters
    pub use crate::adapters::{InMemoryCollection, InMemoryPayouts};

    // Service
    pub use crate::config::{RoundSeed, SaleConfig};
    pub use crate::service::{create_test_controller, SaleController, SaleStats};
}

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// TESTS
// =============================================================================
