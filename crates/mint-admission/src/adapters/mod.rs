//! # Adapters Layer (Outer Hexagon)
//!
//! In-memory implementations of the outbound ports, used by tests and by
//! embedders that simulate the collection and the payment rail.

pub mod collection;
pub mod payouts;

pub use collection::InMemoryCollection;
pub use payouts::InMemoryPayouts;
