//! CLI argument definitions using clap
//!
//! The clap structs and enums for parsing CLI arguments; the command
//! implementations live in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Nivesh - personal finance analytics over a transaction ledger
#[derive(Parser)]
#[command(name = "nivesh")]
#[command(about = "Expense, tax, and investment analytics for a transaction ledger", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze expenses: insights, savings rate, budgets, anomalies
    Analyze {
        /// Ledger file (.csv or .json)
        ledger: PathBuf,

        /// Category policy override file (TOML)
        #[arg(long)]
        policy: Option<PathBuf>,
    },

    /// Suggest an investment allocation for a profile
    Invest {
        /// Ledger file (.csv or .json)
        ledger: PathBuf,

        /// Investor profile (JSON)
        #[arg(short, long)]
        profile: PathBuf,
    },

    /// Project tax savings from maxing out Section 80C
    Tax {
        /// Ledger file (.csv or .json)
        ledger: PathBuf,

        /// Annual income
        #[arg(short, long)]
        income: f64,
    },

    /// Report spending patterns and recurring expenses
    Pattern {
        /// Ledger file (.csv or .json)
        ledger: PathBuf,
    },

    /// Report portfolio diversification and health
    Performance {
        /// Ledger file (.csv or .json)
        ledger: PathBuf,
    },
}
