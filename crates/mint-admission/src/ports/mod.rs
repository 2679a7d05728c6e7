//! # Ports Layer (Middle Hexagon)
//!
//! - **Driving Port (Inbound)**: `SaleApi`
//! - **Driven Ports (Outbound)**: `IssuanceBridge`, `Payout`
//! - No concrete implementations in this module

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
