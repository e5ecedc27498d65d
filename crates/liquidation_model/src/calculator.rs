//! Collateral calculator - debt amount to bonus-adjusted collateral payout
//!
//! Forward direction (debt -> collateral):
//! - quote = debt_price * debt_to_cover
//! - collateral = quote * 10^coll_dec * bonus / 10_000 / (coll_price * 10^debt_dec)
//!
//! When the user holds less collateral than that, the whole balance is paid
//! out and the debt that balance justifies is recomputed:
//! - debt = coll_price * balance * 10^debt_dec / (debt_price * 10^coll_dec)
//! - debt = debt * 10_000 / bonus
//!
//! The reverse path percentage-divides by the bonus instead of inverting
//! the forward percentage-multiply. The two truncations do not cancel and
//! the protocol's numbers depend on exactly this order.

use primitive_types::U256;

use crate::fixed_point::{div_floor, mul, narrow, percent_div, percent_mul, pow10, widen};
use crate::{LiquidationError, ReserveTerms};

/// Collateral payout and the debt it covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollateralConversion {
    /// Collateral the liquidator receives, never above the user's balance
    pub collateral_amount: U256,

    /// Debt that must be repaid to receive `collateral_amount`
    pub debt_amount_needed: U256,
}

/// Convert `debt_to_cover` into collateral, capped by `user_collateral_balance`
///
/// # Arguments
/// * `collateral` - Terms of the reserve being seized
/// * `debt` - Terms of the reserve being repaid
/// * `debt_to_cover` - Debt amount in debt-token units
/// * `user_collateral_balance` - Collateral held by the borrower
///
/// # Returns
/// * `CollateralConversion` with the payout and the debt it requires
/// * `LiquidationError::InvalidReserveTerms` if either side's terms are malformed
/// * `LiquidationError::ArithmeticOverflow` if a 512-bit intermediate overflows
pub fn convert(
    collateral: &ReserveTerms,
    debt: &ReserveTerms,
    debt_to_cover: U256,
    user_collateral_balance: U256,
) -> Result<CollateralConversion, LiquidationError> {
    collateral.validate()?;
    debt.validate()?;

    // Nothing to seize, nothing repaid
    if user_collateral_balance.is_zero() {
        return Ok(CollateralConversion {
            collateral_amount: U256::zero(),
            debt_amount_needed: U256::zero(),
        });
    }

    let collateral_unit = pow10(collateral.decimals)?;
    let debt_unit = pow10(debt.decimals)?;

    let max_collateral = {
        let quote = mul(widen(debt.price), widen(debt_to_cover))?;
        let scaled = mul(quote, collateral_unit)?;
        let with_bonus = percent_mul(scaled, collateral.liquidation_bonus)?;
        div_floor(with_bonus, mul(widen(collateral.price), debt_unit)?)?
    };

    if max_collateral <= widen(user_collateral_balance) {
        return Ok(CollateralConversion {
            collateral_amount: narrow(max_collateral)?,
            debt_amount_needed: debt_to_cover,
        });
    }

    let collateral_amount = user_collateral_balance;
    let debt_amount_needed = {
        let quote = mul(widen(collateral.price), widen(collateral_amount))?;
        let scaled = mul(quote, debt_unit)?;
        let base = div_floor(scaled, mul(widen(debt.price), collateral_unit)?)?;
        narrow(percent_div(base, collateral.liquidation_bonus)?)?
    };

    Ok(CollateralConversion {
        collateral_amount,
        debt_amount_needed,
    })
}
