//! Data sources the estimator is built on
//!
//! Prices and reserve/user state come from outside (an oracle, a data
//! provider contract, a snapshot file). The estimator only sees these traits.

use liquidation_model::{AssetPosition, U256};

use crate::error::EstimateError;

/// Reserve configuration and liquidity as reported by the data provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReserveSnapshot {
    pub decimals: u8,
    /// Liquidation bonus in bps (10_500 = 105%)
    pub liquidation_bonus: u16,
    /// Liquidation threshold in bps; zero disables the asset as collateral
    pub liquidation_threshold: u16,
    pub usage_as_collateral_enabled: bool,
    /// Underlying held by the reserve and available for withdrawal
    pub available_liquidity: U256,
}

impl ReserveSnapshot {
    pub fn can_be_liquidated(&self) -> bool {
        self.usage_as_collateral_enabled && self.liquidation_threshold > 0
    }
}

pub trait PriceOracle {
    /// Asset price in the oracle's quote unit
    fn asset_price(&self, asset: &str) -> Result<U256, EstimateError>;
}

pub trait ReserveDataProvider {
    fn reserve(&self, asset: &str) -> Result<ReserveSnapshot, EstimateError>;

    /// A user's balances in `asset`; users with no position get zeros
    fn user_reserve(&self, asset: &str, user: &str) -> Result<AssetPosition, EstimateError>;
}

impl<T: PriceOracle + ?Sized> PriceOracle for &T {
    fn asset_price(&self, asset: &str) -> Result<U256, EstimateError> {
        (**self).asset_price(asset)
    }
}

impl<T: ReserveDataProvider + ?Sized> ReserveDataProvider for &T {
    fn reserve(&self, asset: &str) -> Result<ReserveSnapshot, EstimateError> {
        (**self).reserve(asset)
    }

    fn user_reserve(&self, asset: &str, user: &str) -> Result<AssetPosition, EstimateError> {
        (**self).user_reserve(asset, user)
    }
}
