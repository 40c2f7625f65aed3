//! Spending-pattern and investment-performance reports
//!
//! Secondary read-only aggregations: category frequency and share,
//! top-spend concentration, recurring-expense detection, and a portfolio
//! health score. Thin compositions over the shared aggregation
//! primitives; no algorithmic weight of their own.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aggregate::{expense_stats_by_category, total_for_kind};
use crate::expense::Trend;
use crate::models::{validate_ledger, Transaction, TransactionKind};
use crate::Result;

/// Categories with at least this many rows count as recurring
const RECURRING_MIN_OCCURRENCES: usize = 3;

/// A top category claims "actionable" attention above this share of spend
const CONCENTRATION_ACTIONABLE_SHARE: f64 = 30.0;

/// Category labels matching any of these keywords count as investments
const INVESTMENT_KEYWORDS: [&str; 5] = ["investment", "mutual fund", "sip", "equity", "debt"];

/// Per-category spending pattern
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPattern {
    pub category: String,
    pub average_amount: f64,
    /// Share of expense rows in this category, percent
    pub frequency: f64,
    pub total_spent: f64,
    pub trend: Trend,
}

/// A noteworthy observation about spending behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PatternInsight {
    /// One of the top-3 spend categories and its share of the total
    #[serde(rename = "HIGH_SPENDING", rename_all = "camelCase")]
    HighSpending {
        category: String,
        message: String,
        amount: f64,
        share_of_total: f64,
        actionable: bool,
    },
    /// A category charged often enough to look recurring
    #[serde(rename = "RECURRING_EXPENSE", rename_all = "camelCase")]
    RecurringExpense {
        category: String,
        message: String,
        average_amount: f64,
        occurrences: usize,
        suggestion: String,
    },
}

/// Spending-pattern report for one ledger
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendingPatternReport {
    pub patterns: Vec<CategoryPattern>,
    /// Next-month spend prediction per category (currently the mean)
    pub predictions: BTreeMap<String, f64>,
    pub insights: Vec<PatternInsight>,
    pub total_transactions: usize,
}

impl SpendingPatternReport {
    fn empty() -> Self {
        Self {
            patterns: Vec::new(),
            predictions: BTreeMap::new(),
            insights: Vec::new(),
            total_transactions: 0,
        }
    }
}

/// Summarize spending behavior per category and surface concentration
/// and recurring-expense observations
pub fn analyze_spending_pattern(transactions: &[Transaction]) -> Result<SpendingPatternReport> {
    validate_ledger(transactions)?;

    let expense_rows = transactions
        .iter()
        .filter(|t| t.kind == TransactionKind::Expense)
        .count();
    if expense_rows == 0 {
        return Ok(SpendingPatternReport::empty());
    }

    let stats = expense_stats_by_category(transactions);
    let total_spending = total_for_kind(transactions, TransactionKind::Expense);

    let patterns: Vec<CategoryPattern> = stats
        .iter()
        .map(|(category, s)| CategoryPattern {
            category: category.clone(),
            average_amount: s.mean,
            frequency: s.count as f64 / expense_rows as f64 * 100.0,
            total_spent: s.total,
            trend: Trend::Stable,
        })
        .collect();

    let predictions: BTreeMap<String, f64> = stats
        .iter()
        .map(|(category, s)| (category.clone(), s.mean))
        .collect();

    let mut insights = Vec::new();

    // Top-3 spend concentration, largest first (name breaks ties)
    let mut by_total: Vec<_> = stats.iter().collect();
    by_total.sort_by(|a, b| {
        b.1.total
            .partial_cmp(&a.1.total)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(b.0))
    });
    for (category, s) in by_total.iter().take(3) {
        let share = if total_spending > 0.0 {
            s.total / total_spending * 100.0
        } else {
            0.0
        };
        insights.push(PatternInsight::HighSpending {
            category: (*category).clone(),
            message: format!(
                "{} accounts for {:.1}% of your total expenses",
                category, share
            ),
            amount: s.total,
            share_of_total: share,
            actionable: share > CONCENTRATION_ACTIONABLE_SHARE,
        });
    }

    // Recurring expenses: the five most frequent categories, if charged
    // often enough
    let mut by_count: Vec<_> = stats.iter().collect();
    by_count.sort_by(|a, b| b.1.count.cmp(&a.1.count).then_with(|| a.0.cmp(b.0)));
    for (category, s) in by_count.iter().take(5) {
        if s.count < RECURRING_MIN_OCCURRENCES {
            continue;
        }
        insights.push(PatternInsight::RecurringExpense {
            category: (*category).clone(),
            message: format!(
                "You spend an average of ₹{:.0} on {} regularly",
                s.mean, category
            ),
            average_amount: s.mean,
            occurrences: s.count,
            suggestion: "Consider setting up automatic investments for this recurring expense"
                .to_string(),
        });
    }

    debug!(
        categories = patterns.len(),
        insights = insights.len(),
        "Spending pattern analysis complete"
    );

    Ok(SpendingPatternReport {
        patterns,
        predictions,
        insights,
        total_transactions: expense_rows,
    })
}

/// Four-tier portfolio health label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PortfolioHealth {
    Excellent,
    Good,
    Average,
    NeedsImprovement,
    NoInvestments,
}

/// Investment-performance report for one ledger
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentPerformanceReport {
    pub total_invested: f64,
    pub portfolio_health: PortfolioHealth,
    /// min(distinct investment categories x 20, 100)
    pub diversification_score: f64,
    /// Category -> percent of total invested
    pub diversification: BTreeMap<String, f64>,
    /// Investment rows as a percentage of all ledger rows
    pub investment_frequency: f64,
    pub recommendations: Vec<String>,
    /// Invested amount per investment row
    pub monthly_average: f64,
}

fn is_investment_category(category: &str) -> bool {
    let lowered = category.to_lowercase();
    INVESTMENT_KEYWORDS.iter().any(|k| lowered.contains(k))
}

/// Score portfolio diversification and investment habit from the ledger
pub fn analyze_investment_performance(
    transactions: &[Transaction],
) -> Result<InvestmentPerformanceReport> {
    validate_ledger(transactions)?;

    let investment_rows: Vec<&Transaction> = transactions
        .iter()
        .filter(|t| t.kind == TransactionKind::Expense && is_investment_category(&t.category))
        .collect();

    if investment_rows.is_empty() {
        return Ok(InvestmentPerformanceReport {
            total_invested: 0.0,
            portfolio_health: PortfolioHealth::NoInvestments,
            diversification_score: 0.0,
            diversification: BTreeMap::new(),
            investment_frequency: 0.0,
            recommendations: vec![
                "Start investing in ELSS for tax benefits".to_string(),
                "Consider SIP in large-cap mutual funds".to_string(),
                "Build emergency fund before investing".to_string(),
            ],
            monthly_average: 0.0,
        });
    }

    let total_invested: f64 = investment_rows.iter().map(|t| t.amount).sum();

    let mut by_category: BTreeMap<String, f64> = BTreeMap::new();
    for tx in &investment_rows {
        *by_category.entry(tx.category.clone()).or_insert(0.0) += tx.amount;
    }

    let diversification_score = (by_category.len() as f64 * 20.0).min(100.0);
    let investment_frequency =
        investment_rows.len() as f64 / transactions.len().max(1) as f64 * 100.0;

    let portfolio_health = if diversification_score >= 80.0 && investment_frequency >= 15.0 {
        PortfolioHealth::Excellent
    } else if diversification_score >= 60.0 && investment_frequency >= 10.0 {
        PortfolioHealth::Good
    } else if diversification_score >= 40.0 && investment_frequency >= 5.0 {
        PortfolioHealth::Average
    } else {
        PortfolioHealth::NeedsImprovement
    };

    let mut recommendations = Vec::new();
    if by_category.len() < 3 {
        recommendations.push("Diversify your portfolio across more asset classes".to_string());
    }
    if investment_frequency < 10.0 {
        recommendations.push("Increase your investment frequency with SIP".to_string());
    }

    let diversification: BTreeMap<String, f64> = if total_invested > 0.0 {
        by_category
            .into_iter()
            .map(|(category, amount)| (category, amount / total_invested * 100.0))
            .collect()
    } else {
        by_category.into_keys().map(|c| (c, 0.0)).collect()
    };

    let monthly_average = total_invested / investment_rows.len() as f64;

    debug!(
        total_invested,
        diversification_score, investment_frequency, "Investment performance analysis complete"
    );

    Ok(InvestmentPerformanceReport {
        total_invested,
        portfolio_health,
        diversification_score,
        diversification,
        investment_frequency,
        recommendations,
        monthly_average,
    })
}
