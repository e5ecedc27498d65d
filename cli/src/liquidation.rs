//! Liquidation estimate command

use anyhow::{Context, Result};
use colored::Colorize;

use crate::estimator::{EstimateParams, LiquidationEstimator};
use crate::provider::{PriceOracle, ReserveDataProvider};

pub fn estimate_liquidation<O: PriceOracle, D: ReserveDataProvider>(
    estimator: &LiquidationEstimator<O, D>,
    params: EstimateParams,
    json: bool,
) -> Result<()> {
    let estimate = estimator.estimate(&params).with_context(|| {
        format!(
            "Failed to estimate {} / {} liquidation for {}",
            params.debt_asset, params.collateral_asset, params.user
        )
    })?;

    if json {
        println!("{}", serde_json::to_string_pretty(&estimate)?);
        return Ok(());
    }

    println!("{}", "=== Liquidation Estimate ===".bright_green().bold());
    println!("{} {}", "User:".bright_cyan(), estimate.user);
    println!("{} {}", "Debt Asset:".bright_cyan(), estimate.debt_asset);
    println!("{} {}", "Collateral Asset:".bright_cyan(), estimate.collateral_asset);
    println!("{} {}", "Debt To Cover:".bright_cyan(), estimate.debt_to_cover);
    println!(
        "{} {}",
        "Receive aToken:".bright_cyan(),
        if estimate.receive_a_token { "Yes" } else { "No" }
    );

    println!("\n{}", "Position:".bright_yellow());
    println!("  {} {}", "Total Debt:".bright_cyan(), estimate.total_debt);
    println!(
        "  {} {}",
        "Close Factor Cap:".bright_cyan(),
        estimate.max_liquidatable_debt
    );
    println!(
        "  {} {}",
        "Collateral Balance:".bright_cyan(),
        estimate.user_collateral_balance
    );
    println!(
        "  {} {}",
        "Reserve Liquidity:".bright_cyan(),
        estimate.collateral_available_liquidity
    );

    println!("\n{}", "Plan:".bright_yellow());
    println!(
        "  {} {}",
        "Debt To Liquidate:".bright_cyan(),
        estimate.actual_debt_to_liquidate
    );
    println!(
        "  {} {}",
        "Collateral Received:".bright_cyan(),
        estimate.max_collateral_to_liquidate
    );

    if estimate.plan().is_executable() {
        println!("\n{} {}", "✓".bright_green(), "Liquidation can be executed".bright_green());
    } else {
        println!(
            "\n{} {}",
            "⚠".yellow(),
            "Not enough underlying liquidity in the collateral reserve".yellow()
        );
        println!(
            "  {} {}",
            "└─".dimmed(),
            "Retry with --receive-a-token to take the collateral token instead".dimmed()
        );
    }

    Ok(())
}
