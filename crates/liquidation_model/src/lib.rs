//! Liquidation Model - Pure close-factor and collateral payout math
//!
//! Estimates what a liquidation call would do to a borrower's position
//! without executing it: how much debt gets repaid and how much collateral
//! the liquidator walks away with.
//!
//! The crate consumes already-resolved snapshots (prices, decimals, bonus,
//! balances) and never touches the network, storage or a logger. All math is
//! integer-only with truncating division.

#![forbid(unsafe_code)]

use core::fmt;

pub mod calculator;
pub mod fixed_point;
pub mod planner;
pub mod types;

pub use calculator::{convert, CollateralConversion};
pub use planner::{max_liquidatable_debt, plan};
pub use primitive_types::{U256, U512};
pub use types::*;

/// Basis points scale (10,000 bps = 100%)
pub const PERCENTAGE_FACTOR: u16 = 10_000;

/// Share of total debt a single liquidation may repay (5,000 bps = 50%)
pub const CLOSE_FACTOR_BPS: u16 = 5_000;

/// Largest token precision accepted for a reserve
pub const MAX_DECIMALS: u8 = 76;

/// Error types for liquidation estimates
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LiquidationError {
    /// An intermediate sum or product left the representable range
    #[error("arithmetic overflow")]
    ArithmeticOverflow,
    /// Reserve terms are malformed or stale (zero price, bad decimals, ...)
    #[error("invalid reserve terms: {0}")]
    InvalidReserveTerms(TermsViolation),
}

/// Reason a set of reserve terms was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermsViolation {
    /// Oracle price is zero
    ZeroPrice,
    /// Token precision above [`MAX_DECIMALS`]
    DecimalsTooLarge(u8),
    /// Liquidation bonus below 100%
    BonusBelowPar(u16),
    /// A divisor derived from the terms collapsed to zero
    ZeroDivisor,
}

impl fmt::Display for TermsViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TermsViolation::ZeroPrice => write!(f, "price is zero"),
            TermsViolation::DecimalsTooLarge(decimals) => {
                write!(f, "decimals {} exceed {}", decimals, MAX_DECIMALS)
            }
            TermsViolation::BonusBelowPar(bonus) => {
                write!(f, "liquidation bonus {} bps is below {}", bonus, PERCENTAGE_FACTOR)
            }
            TermsViolation::ZeroDivisor => write!(f, "divisor is zero"),
        }
    }
}
