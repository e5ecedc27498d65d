//! Liquidation planner - close factor, collateral cap and liquidity check

use primitive_types::U256;

use crate::calculator::convert;
use crate::fixed_point::{narrow, percent_mul, widen};
use crate::{
    LiquidationError, LiquidationPlan, LiquidationRequest, PlanOutcome, CLOSE_FACTOR_BPS,
};

/// Largest debt a single call may repay: total_debt * 50%, rounded down
pub fn max_liquidatable_debt(total_debt: U256) -> Result<U256, LiquidationError> {
    narrow(percent_mul(widen(total_debt), CLOSE_FACTOR_BPS)?)
}

/// Estimate a liquidation call against a snapshot
///
/// 1. Cap the requested debt at the close factor
/// 2. Convert it to collateral at the bonus rate
/// 3. If the user's collateral runs out first, repay only what it justifies
/// 4. Flag `InsufficientLiquidity` when the underlying would be withdrawn
///    and the reserve cannot cover it
pub fn plan(req: &LiquidationRequest) -> Result<LiquidationPlan, LiquidationError> {
    let total_debt = req.debt_position.total_debt()?;
    let debt_cap = max_liquidatable_debt(total_debt)?;
    let requested = req.debt_to_cover.cap(debt_cap);

    let conversion = convert(
        &req.collateral,
        &req.debt,
        requested,
        req.collateral_position.collateral_balance,
    )?;

    let actual_debt_to_liquidate = conversion.debt_amount_needed.min(requested);
    let max_collateral_to_liquidate = conversion.collateral_amount;

    let outcome = if !req.receive_collateral_token
        && req.collateral_available_liquidity < max_collateral_to_liquidate
    {
        PlanOutcome::InsufficientLiquidity
    } else {
        PlanOutcome::Ok
    };

    Ok(LiquidationPlan {
        actual_debt_to_liquidate,
        max_collateral_to_liquidate,
        outcome,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AssetPosition, DebtToCover, ReserveTerms};

    const WAD: u128 = 1_000_000_000_000_000_000;

    fn request(stable_debt: u64, collateral_balance: u64) -> LiquidationRequest {
        let terms = ReserveTerms::new(U256::from(WAD), 18, 10_500).unwrap();
        LiquidationRequest {
            collateral: terms,
            collateral_position: AssetPosition {
                collateral_balance: U256::from(collateral_balance),
                ..Default::default()
            },
            debt: terms,
            debt_position: AssetPosition {
                stable_debt: U256::from(stable_debt),
                ..Default::default()
            },
            debt_to_cover: DebtToCover::Max,
            receive_collateral_token: true,
            collateral_available_liquidity: U256::zero(),
        }
    }

    #[test]
    fn test_close_factor() {
        assert_eq!(max_liquidatable_debt(U256::from(1000u64)).unwrap(), U256::from(500u64));
        assert_eq!(max_liquidatable_debt(U256::from(1001u64)).unwrap(), U256::from(500u64));
        assert_eq!(max_liquidatable_debt(U256::one()).unwrap(), U256::zero());
        assert_eq!(max_liquidatable_debt(U256::MAX).unwrap(), U256::MAX / 2);
    }

    #[test]
    fn test_max_cover_with_ample_collateral() {
        let plan = plan(&request(1000, 1000)).unwrap();

        assert_eq!(plan.actual_debt_to_liquidate, U256::from(500u64));
        assert_eq!(plan.max_collateral_to_liquidate, U256::from(525u64));
        assert_eq!(plan.outcome, PlanOutcome::Ok);
    }

    #[test]
    fn test_collateral_is_binding_constraint() {
        let plan = plan(&request(1000, 200)).unwrap();

        assert_eq!(plan.max_collateral_to_liquidate, U256::from(200u64));
        assert_eq!(plan.actual_debt_to_liquidate, U256::from(190u64));
    }

    #[test]
    fn test_shortfall_can_repay_nothing() {
        let mut req = request(200, 5);
        req.collateral = ReserveTerms::new(U256::one(), 0, 10_500).unwrap();
        req.debt = ReserveTerms::new(U256::from(3u64), 0, 10_500).unwrap();

        // Cap is 100; its payout of 315 exceeds the 5 held, and the
        // back-computed debt truncates to zero.
        let capped = plan(&req).unwrap();
        assert_eq!(capped.max_collateral_to_liquidate, U256::from(5u64));
        assert_eq!(capped.actual_debt_to_liquidate, U256::zero());

        req.debt_to_cover = DebtToCover::Amount(U256::from(100u64));
        assert_eq!(plan(&req).unwrap(), capped);
    }

    #[test]
    fn test_explicit_amount_below_close_factor() {
        let mut req = request(1000, 1000);
        req.debt_to_cover = DebtToCover::Amount(U256::from(100u64));

        let plan = plan(&req).unwrap();
        assert_eq!(plan.actual_debt_to_liquidate, U256::from(100u64));
        assert_eq!(plan.max_collateral_to_liquidate, U256::from(105u64));
    }

    #[test]
    fn test_explicit_amount_above_close_factor() {
        let mut req = request(1000, 1000);
        req.debt_to_cover = DebtToCover::Amount(U256::from(900u64));

        let plan = plan(&req).unwrap();
        assert_eq!(plan.actual_debt_to_liquidate, U256::from(500u64));
    }

    #[test]
    fn test_stable_and_variable_debt_combine() {
        let mut req = request(600, 1000);
        req.debt_position.variable_debt = U256::from(400u64);

        let plan = plan(&req).unwrap();
        assert_eq!(plan.actual_debt_to_liquidate, U256::from(500u64));
    }

    #[test]
    fn test_zero_collateral_degenerates() {
        let plan = plan(&request(1000, 0)).unwrap();

        assert_eq!(plan.actual_debt_to_liquidate, U256::zero());
        assert_eq!(plan.max_collateral_to_liquidate, U256::zero());
        assert_eq!(plan.outcome, PlanOutcome::Ok);
    }

    #[test]
    fn test_liquidity_check_only_when_withdrawing_underlying() {
        let mut req = request(1000, 1000);
        req.collateral_available_liquidity = U256::from(500u64);

        req.receive_collateral_token = false;
        let plan_underlying = plan(&req).unwrap();
        assert_eq!(plan_underlying.outcome, PlanOutcome::InsufficientLiquidity);
        assert!(!plan_underlying.is_executable());

        req.receive_collateral_token = true;
        let plan_token = plan(&req).unwrap();
        assert_eq!(plan_token.outcome, PlanOutcome::Ok);

        // Amounts don't depend on the flag
        assert_eq!(plan_underlying.actual_debt_to_liquidate, plan_token.actual_debt_to_liquidate);
        assert_eq!(
            plan_underlying.max_collateral_to_liquidate,
            plan_token.max_collateral_to_liquidate
        );
    }

    #[test]
    fn test_liquidity_exactly_sufficient() {
        let mut req = request(1000, 1000);
        req.receive_collateral_token = false;
        req.collateral_available_liquidity = U256::from(525u64);

        assert_eq!(plan(&req).unwrap().outcome, PlanOutcome::Ok);
    }

    #[test]
    fn test_total_debt_overflow() {
        let mut req = request(0, 1000);
        req.debt_position.stable_debt = U256::MAX;
        req.debt_position.variable_debt = U256::one();

        assert_eq!(plan(&req), Err(LiquidationError::ArithmeticOverflow));
    }

    #[test]
    fn test_idempotent() {
        let req = request(1000, 200);
        assert_eq!(plan(&req).unwrap(), plan(&req).unwrap());
    }
}
