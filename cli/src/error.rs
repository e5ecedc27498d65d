//! Estimator errors

use liquidation_model::LiquidationError;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum EstimateError {
    #[error("reserve not found: {0}")]
    UnknownReserve(String),

    #[error("no price available for {0}")]
    PriceUnavailable(String),

    /// Reserve has no liquidation threshold or is not usable as collateral
    #[error("{0} cannot be liquidated as collateral")]
    CollateralCannotBeLiquidated(String),

    #[error("user {user} has not borrowed {asset}")]
    CurrencyNotBorrowed { user: String, asset: String },

    #[error("failed to load snapshot {path}: {reason}")]
    Snapshot { path: PathBuf, reason: String },

    #[error(transparent)]
    Liquidation(#[from] LiquidationError),
}
