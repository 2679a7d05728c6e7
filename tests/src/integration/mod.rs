//! # Integration Tests
//!
//! Full sale lifecycles driven through the public API only.

pub mod schedule;
pub mod three_round_sale;
