//! Pure domain types for the tmwire blockchain client.
//!
//! This crate provides:
//! - Fixed-point coin amounts (`amount` module)
//! - Shared primitive aliases (`types` module)
//!
//! No I/O or async code lives here; everything is pure and immutable.

pub mod amount;
pub mod types;

pub use amount::{AmountError, Coin, DECIMALS, UPPER_BOUND};
pub use types::*;
