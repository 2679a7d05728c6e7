//! # Algorithms Module
//!
//! Allowlist membership proofs.

pub mod allowlist;

pub use allowlist::{process_proof, verify_allowlist_proof, AllowlistTree};
