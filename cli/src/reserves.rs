//! Snapshot inspection: reserves and user positions

use anyhow::Result;
use colored::Colorize;

use crate::snapshot::Snapshot;

pub fn list_reserves(snapshot: &Snapshot) -> Result<()> {
    println!("{}", "=== Reserves ===".bright_green().bold());
    if let Some(block) = snapshot.block {
        println!("{} {}", "Block:".bright_cyan(), block);
    }

    if snapshot.reserves.is_empty() {
        println!("\n{}", "No reserves in snapshot".dimmed());
        return Ok(());
    }

    for reserve in &snapshot.reserves {
        println!("\n{}", reserve.symbol.bright_yellow());
        println!("  {} {}", "Decimals:".bright_cyan(), reserve.decimals);
        match reserve.price {
            Some(price) => println!("  {} {}", "Price:".bright_cyan(), price),
            None => println!("  {} {}", "Price:".bright_cyan(), "unavailable".red()),
        }
        println!(
            "  {} {} bps",
            "Liquidation Bonus:".bright_cyan(),
            reserve.liquidation_bonus
        );
        println!(
            "  {} {} bps",
            "Liquidation Threshold:".bright_cyan(),
            reserve.liquidation_threshold
        );
        println!(
            "  {} {}",
            "Collateral Enabled:".bright_cyan(),
            if reserve.usage_as_collateral_enabled { "Yes" } else { "No" }
        );
        println!(
            "  {} {}",
            "Available Liquidity:".bright_cyan(),
            reserve.available_liquidity
        );
    }

    Ok(())
}

pub fn list_positions(snapshot: &Snapshot, user: &str) -> Result<()> {
    println!("{}", "=== Positions ===".bright_green().bold());
    println!("{} {}", "User:".bright_cyan(), user);

    let mut found = false;
    for position in snapshot.positions_of(user) {
        found = true;
        println!("\n{}", position.asset.bright_yellow());
        println!(
            "  {} {}",
            "Collateral Balance:".bright_cyan(),
            position.collateral_balance
        );
        println!("  {} {}", "Stable Debt:".bright_cyan(), position.stable_debt);
        println!("  {} {}", "Variable Debt:".bright_cyan(), position.variable_debt);
    }

    if !found {
        println!("\n{}", "No positions for this user".dimmed());
    }

    Ok(())
}
