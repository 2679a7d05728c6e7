//! # Domain Layer (Inner Hexagon)
//!
//! Pure business logic for sale admission.
//! NO I/O, NO locking, NO port calls.
//!
//! - Dependencies point INWARD only (the service and adapters depend on this).
//! - Every component here is a leaf: the controller in `service.rs` composes them.

pub mod access;
pub mod entities;
pub mod invariants;
pub mod ledger;
pub mod registry;
pub mod services;
pub mod treasury;
pub mod value_objects;

pub use access::AccessControl;
pub use entities::*;
pub use invariants::*;
pub use ledger::SupplyLedger;
pub use registry::{ConfigWarning, RoundRegistry};
pub use services::*;
pub use treasury::Treasury;
pub use value_objects::*;
