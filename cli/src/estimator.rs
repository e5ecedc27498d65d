//! Liquidation estimator - resolves protocol state and runs the planner

use liquidation_model::{
    max_liquidatable_debt, plan, DebtToCover, LiquidationPlan, LiquidationRequest, PlanOutcome,
    ReserveTerms, U256,
};
use log::{debug, info, warn};
use serde::Serialize;

use crate::error::EstimateError;
use crate::provider::{PriceOracle, ReserveDataProvider};
use crate::snapshot::amount::serialize_display;

/// What to liquidate
#[derive(Debug, Clone)]
pub struct EstimateParams {
    pub collateral_asset: String,
    pub debt_asset: String,
    pub user: String,
    pub debt_to_cover: DebtToCover,
    pub receive_a_token: bool,
}

/// Plan plus the resolved inputs it was computed from
#[derive(Debug, Clone, Serialize)]
pub struct Estimate {
    pub user: String,
    pub collateral_asset: String,
    pub debt_asset: String,
    #[serde(serialize_with = "serialize_display")]
    pub debt_to_cover: DebtToCover,
    pub receive_a_token: bool,
    #[serde(serialize_with = "serialize_display")]
    pub total_debt: U256,
    #[serde(serialize_with = "serialize_display")]
    pub max_liquidatable_debt: U256,
    #[serde(serialize_with = "serialize_display")]
    pub user_collateral_balance: U256,
    #[serde(serialize_with = "serialize_display")]
    pub collateral_available_liquidity: U256,
    #[serde(serialize_with = "serialize_display")]
    pub actual_debt_to_liquidate: U256,
    #[serde(serialize_with = "serialize_display")]
    pub max_collateral_to_liquidate: U256,
    #[serde(serialize_with = "serialize_display")]
    pub outcome: PlanOutcome,
}

impl Estimate {
    pub fn plan(&self) -> LiquidationPlan {
        LiquidationPlan {
            actual_debt_to_liquidate: self.actual_debt_to_liquidate,
            max_collateral_to_liquidate: self.max_collateral_to_liquidate,
            outcome: self.outcome,
        }
    }
}

/// Estimator over an injected price oracle and reserve data provider
pub struct LiquidationEstimator<O, D> {
    oracle: O,
    data: D,
}

impl<O: PriceOracle, D: ReserveDataProvider> LiquidationEstimator<O, D> {
    pub fn new(oracle: O, data: D) -> Self {
        Self { oracle, data }
    }

    /// Build the request from current state and plan it
    pub fn estimate(&self, params: &EstimateParams) -> Result<Estimate, EstimateError> {
        let request = self.build_request(params)?;

        let plan = plan(&request)?;
        let total_debt = request.debt_position.total_debt()?;

        info!(
            "{} {}/{}: repay {} for {} ({})",
            params.user,
            params.debt_asset,
            params.collateral_asset,
            plan.actual_debt_to_liquidate,
            plan.max_collateral_to_liquidate,
            plan.outcome
        );
        if plan.outcome == PlanOutcome::InsufficientLiquidity {
            warn!(
                "{} reserve holds {} but the payout is {}",
                params.collateral_asset,
                request.collateral_available_liquidity,
                plan.max_collateral_to_liquidate
            );
        }

        Ok(Estimate {
            user: params.user.clone(),
            collateral_asset: params.collateral_asset.clone(),
            debt_asset: params.debt_asset.clone(),
            debt_to_cover: params.debt_to_cover,
            receive_a_token: params.receive_a_token,
            total_debt,
            max_liquidatable_debt: max_liquidatable_debt(total_debt)?,
            user_collateral_balance: request.collateral_position.collateral_balance,
            collateral_available_liquidity: request.collateral_available_liquidity,
            actual_debt_to_liquidate: plan.actual_debt_to_liquidate,
            max_collateral_to_liquidate: plan.max_collateral_to_liquidate,
            outcome: plan.outcome,
        })
    }

    /// Resolve terms and positions for both legs
    pub fn build_request(&self, params: &EstimateParams) -> Result<LiquidationRequest, EstimateError> {
        let collateral_reserve = self.data.reserve(&params.collateral_asset)?;
        let debt_reserve = self.data.reserve(&params.debt_asset)?;

        if !collateral_reserve.can_be_liquidated() {
            return Err(EstimateError::CollateralCannotBeLiquidated(
                params.collateral_asset.clone(),
            ));
        }

        let collateral = ReserveTerms::new(
            self.oracle.asset_price(&params.collateral_asset)?,
            collateral_reserve.decimals,
            collateral_reserve.liquidation_bonus,
        )?;
        let debt = ReserveTerms::new(
            self.oracle.asset_price(&params.debt_asset)?,
            debt_reserve.decimals,
            debt_reserve.liquidation_bonus,
        )?;
        debug!("collateral terms {:?}", collateral);
        debug!("debt terms {:?}", debt);

        let collateral_position = self
            .data
            .user_reserve(&params.collateral_asset, &params.user)?;
        let debt_position = self.data.user_reserve(&params.debt_asset, &params.user)?;

        if !debt_position.has_debt() {
            return Err(EstimateError::CurrencyNotBorrowed {
                user: params.user.clone(),
                asset: params.debt_asset.clone(),
            });
        }
        debug!(
            "positions: collateral {:?}, debt {:?}",
            collateral_position, debt_position
        );

        Ok(LiquidationRequest {
            collateral,
            collateral_position,
            debt,
            debt_position,
            debt_to_cover: params.debt_to_cover,
            receive_collateral_token: params.receive_a_token,
            collateral_available_liquidity: collateral_reserve.available_liquidity,
        })
    }
}
