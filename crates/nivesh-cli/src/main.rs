//! Nivesh CLI - ledger analytics from the command line
//!
//! Usage:
//!   nivesh analyze ledger.csv            Expense insights and anomalies
//!   nivesh invest ledger.csv -p me.json  Investment allocation
//!   nivesh tax ledger.csv --income N     Tax savings projection
//!   nivesh pattern ledger.csv            Spending patterns
//!   nivesh performance ledger.csv        Portfolio health

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    // Logs go to stderr so piped stdout stays clean JSON.
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    match cli.command {
        Commands::Analyze { ledger, policy } => {
            commands::cmd_analyze(&ledger, policy.as_deref())
        }
        Commands::Invest { ledger, profile } => commands::cmd_invest(&ledger, &profile),
        Commands::Tax { ledger, income } => commands::cmd_tax(&ledger, income),
        Commands::Pattern { ledger } => commands::cmd_pattern(&ledger),
        Commands::Performance { ledger } => commands::cmd_performance(&ledger),
    }
}
