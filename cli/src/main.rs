//! Liquidation estimator CLI
//!
//! Estimates how much debt a liquidation call would repay and how much
//! collateral it would pay out, against a snapshot of reserve and user state.
//! Nothing is signed or sent.

use clap::{Parser, Subcommand};
use colored::Colorize;
use liquidation_model::DebtToCover;
use std::path::PathBuf;

mod config;
mod error;
mod estimator;
mod liquidation;
mod provider;
mod reserves;
mod snapshot;

use config::EstimatorConfig;
use estimator::{EstimateParams, LiquidationEstimator};

#[derive(Parser)]
#[command(name = "liq-estimate")]
#[command(about = "Estimate lending-protocol liquidations from a state snapshot", long_about = None)]
#[command(version)]
struct Cli {
    /// Snapshot file with reserves, prices and positions (.toml or .json)
    #[arg(short, long, env = "LIQ_SNAPSHOT")]
    snapshot: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate a liquidation call
    Estimate {
        /// Collateral asset to seize (e.g., WETH)
        #[arg(long)]
        collateral: String,

        /// Debt asset to repay (e.g., USDC)
        #[arg(long)]
        debt: String,

        /// Borrower being liquidated
        #[arg(long)]
        user: String,

        /// Debt to cover in base units, or "max" for the close-factor limit
        #[arg(long, default_value = "max")]
        debt_to_cover: DebtToCover,

        /// Take the collateral token instead of withdrawing the underlying
        #[arg(long)]
        receive_a_token: bool,

        /// Print the estimate as JSON
        #[arg(long)]
        json: bool,
    },

    /// List reserves in the snapshot
    Reserves,

    /// Show a user's positions
    Positions {
        /// Borrower address
        #[arg(long)]
        user: String,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let config = EstimatorConfig::new(cli.snapshot.clone())?;

    if cli.verbose {
        println!("{} {}", "Snapshot:".bright_cyan(), config.snapshot_path.display());
        println!("{} {:?}", "Format:".bright_cyan(), config.format);
    }

    let snapshot = config.load_snapshot()?;

    match cli.command {
        Commands::Estimate {
            collateral,
            debt,
            user,
            debt_to_cover,
            receive_a_token,
            json,
        } => {
            let estimator = LiquidationEstimator::new(&snapshot, &snapshot);
            let params = EstimateParams {
                collateral_asset: collateral,
                debt_asset: debt,
                user,
                debt_to_cover,
                receive_a_token,
            };
            liquidation::estimate_liquidation(&estimator, params, json)?;
        }
        Commands::Reserves => {
            reserves::list_reserves(&snapshot)?;
        }
        Commands::Positions { user } => {
            reserves::list_positions(&snapshot, &user)?;
        }
    }

    Ok(())
}
