//! Command implementations
//!
//! Each command loads its inputs from files, runs one core operation,
//! and prints the full report as pretty JSON on stdout. A one-line
//! human summary goes to stderr via the logger so piped output stays
//! clean JSON.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use nivesh_core::{
    analyze_investment_performance, analyze_spending_pattern, import, predict_tax_savings,
    CategoryPolicy, ExpenseAnalyzer, InvestmentAdvisor, InvestmentProfile, Transaction,
};

fn load_ledger(path: &Path) -> Result<Vec<Transaction>> {
    let transactions = import::load_ledger(path)
        .with_context(|| format!("Failed to load ledger {}", path.display()))?;
    info!(rows = transactions.len(), "Loaded ledger");
    Ok(transactions)
}

fn print_report<T: serde::Serialize>(report: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

pub fn cmd_analyze(ledger: &Path, policy: Option<&Path>) -> Result<()> {
    let transactions = load_ledger(ledger)?;

    let analyzer = match policy {
        Some(path) => {
            let policy = CategoryPolicy::load(path)
                .with_context(|| format!("Failed to load category policy {}", path.display()))?;
            ExpenseAnalyzer::with_policy(policy)
        }
        None => ExpenseAnalyzer::new(),
    };

    let analysis = analyzer.analyze(&transactions)?;
    info!(
        categories = analysis.insights.len(),
        anomalies = analysis.anomalies.len(),
        savings_rate = analysis.savings_rate,
        "Expense analysis complete"
    );
    print_report(&analysis)
}

pub fn cmd_invest(ledger: &Path, profile_path: &Path) -> Result<()> {
    let transactions = load_ledger(ledger)?;

    let file = File::open(profile_path)
        .with_context(|| format!("Failed to open profile {}", profile_path.display()))?;
    let profile: InvestmentProfile = serde_json::from_reader(file)
        .with_context(|| format!("Invalid profile {}", profile_path.display()))?;

    let plan = InvestmentAdvisor::new().suggest(&profile, &transactions)?;
    info!(
        suggestions = plan.suggestions.len(),
        expected_return = plan.expected_annual_return,
        "Investment plan built"
    );
    print_report(&plan)
}

pub fn cmd_tax(ledger: &Path, income: f64) -> Result<()> {
    let transactions = load_ledger(ledger)?;
    let report = predict_tax_savings(&transactions, income)?;
    info!(
        current_tax = report.current_tax_liability,
        potential_savings = report.potential_tax_savings,
        "Tax projection complete"
    );
    print_report(&report)
}

pub fn cmd_pattern(ledger: &Path) -> Result<()> {
    let transactions = load_ledger(ledger)?;
    let report = analyze_spending_pattern(&transactions)?;
    info!(
        categories = report.patterns.len(),
        insights = report.insights.len(),
        "Spending pattern analysis complete"
    );
    print_report(&report)
}

pub fn cmd_performance(ledger: &Path) -> Result<()> {
    let transactions = load_ledger(ledger)?;
    let report = analyze_investment_performance(&transactions)?;
    info!(
        total_invested = report.total_invested,
        health = ?report.portfolio_health,
        "Investment performance analysis complete"
    );
    print_report(&report)
}
