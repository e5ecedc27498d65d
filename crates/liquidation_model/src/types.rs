//! Snapshot inputs and plan outputs

use core::fmt;
use core::str::FromStr;

use primitive_types::U256;

use crate::{LiquidationError, TermsViolation, MAX_DECIMALS, PERCENTAGE_FACTOR};

/// A user's balances in one reserve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AssetPosition {
    /// Balance of the reserve's collateral (receipt) token
    pub collateral_balance: U256,

    /// Stable-rate debt
    pub stable_debt: U256,

    /// Variable-rate debt
    pub variable_debt: U256,
}

impl AssetPosition {
    /// Stable plus variable debt
    pub fn total_debt(&self) -> Result<U256, LiquidationError> {
        self.stable_debt
            .checked_add(self.variable_debt)
            .ok_or(LiquidationError::ArithmeticOverflow)
    }

    pub fn has_debt(&self) -> bool {
        !self.stable_debt.is_zero() || !self.variable_debt.is_zero()
    }
}

/// Per-reserve parameters needed to price a liquidation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReserveTerms {
    /// Oracle price in the common quote unit
    pub price: U256,

    /// Token precision
    pub decimals: u8,

    /// Liquidation bonus in bps (10_500 = 105%)
    pub liquidation_bonus: u16,
}

impl ReserveTerms {
    /// Build terms, rejecting zero prices, oversized decimals and sub-par bonuses
    pub fn new(price: U256, decimals: u8, liquidation_bonus: u16) -> Result<Self, LiquidationError> {
        let terms = Self {
            price,
            decimals,
            liquidation_bonus,
        };
        terms.validate()?;
        Ok(terms)
    }

    pub fn validate(&self) -> Result<(), LiquidationError> {
        let violation = if self.price.is_zero() {
            TermsViolation::ZeroPrice
        } else if self.decimals > MAX_DECIMALS {
            TermsViolation::DecimalsTooLarge(self.decimals)
        } else if self.liquidation_bonus < PERCENTAGE_FACTOR {
            TermsViolation::BonusBelowPar(self.liquidation_bonus)
        } else {
            return Ok(());
        };
        Err(LiquidationError::InvalidReserveTerms(violation))
    }
}

/// How much debt the liquidator asks to repay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebtToCover {
    /// As much as the close factor allows
    Max,
    /// An explicit amount in debt-token units
    Amount(U256),
}

impl DebtToCover {
    /// Clamp the request to `limit`
    pub fn cap(self, limit: U256) -> U256 {
        match self {
            DebtToCover::Max => limit,
            DebtToCover::Amount(amount) => amount.min(limit),
        }
    }
}

/// `uint256(-1)` is the protocol's "cover everything" marker
impl From<U256> for DebtToCover {
    fn from(raw: U256) -> Self {
        if raw == U256::MAX {
            DebtToCover::Max
        } else {
            DebtToCover::Amount(raw)
        }
    }
}

impl fmt::Display for DebtToCover {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DebtToCover::Max => write!(f, "max"),
            DebtToCover::Amount(amount) => write!(f, "{}", amount),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid debt amount '{0}': expected a base-unit integer or 'max'")]
pub struct ParseDebtToCoverError(String);

impl FromStr for DebtToCover {
    type Err = ParseDebtToCoverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseDebtToCoverError(s.to_string()));
        }
        if s.eq_ignore_ascii_case("max") {
            return Ok(DebtToCover::Max);
        }
        U256::from_dec_str(s)
            .map(DebtToCover::from)
            .map_err(|_| ParseDebtToCoverError(s.to_string()))
    }
}

/// Everything one estimate needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiquidationRequest {
    pub collateral: ReserveTerms,
    pub collateral_position: AssetPosition,
    pub debt: ReserveTerms,
    pub debt_position: AssetPosition,
    pub debt_to_cover: DebtToCover,
    /// Liquidator takes the receipt token instead of the underlying
    pub receive_collateral_token: bool,
    /// Underlying liquidity held by the collateral reserve
    pub collateral_available_liquidity: U256,
}

/// Advisory flag on a successful plan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanOutcome {
    Ok,
    /// Reserve cannot pay out the underlying; the real call would revert
    InsufficientLiquidity,
}

impl fmt::Display for PlanOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanOutcome::Ok => write!(f, "ok"),
            PlanOutcome::InsufficientLiquidity => write!(f, "insufficient_liquidity"),
        }
    }
}

/// Estimated result of a liquidation call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiquidationPlan {
    pub actual_debt_to_liquidate: U256,
    pub max_collateral_to_liquidate: U256,
    pub outcome: PlanOutcome,
}

impl LiquidationPlan {
    pub fn is_executable(&self) -> bool {
        self.outcome == PlanOutcome::Ok
    }
}
