//! # Domain Module
//!
//! Business rules of the prize wheel, independent of rendering and storage
//! backends.
//!
//! ## Module Organization
//!
//! - **selection**: bonus reservation, lot policies and the prize selector
//! - **ledger**: award counting, day rollover, reset and the stock view
//! - **angle_mapping**: sector layout and the rotation that lands on a winner
//! - **prize_wheel_service**: one scenario's wheel, tying selection, ledger and
//!   persistence together with two-phase spins
//!
//! ## Business Rules
//!
//! - A lot is never awarded past its daily quota
//! - The bonus segment holds a constant share of the probability mass while
//!   any lot has stock, and certainty once every lot is exhausted
//! - Lots under quota are equally likely under the default policy
//! - The ledger changes once per completed spin, never speculatively
//! - Changing the day clears today's counts and keeps the totals

pub mod selection;
pub mod ledger;
pub mod angle_mapping;
pub mod prize_wheel_service;

pub use selection::*;
pub use angle_mapping::*;
pub use prize_wheel_service::*;
