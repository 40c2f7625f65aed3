//! Nivesh Core Library
//!
//! Stateless personal-finance analytics over a transaction ledger and an
//! investor profile:
//! - Expense insights: per-category spend, savings rate, budget targets
//! - Anomaly detection: median-baseline outlier flagging
//! - Tax engine: progressive slab calculator and 80C savings optimizer
//! - Investment allocation: rule-based instrument suggestions
//! - Pattern reports: spend concentration, recurring expenses, portfolio health
//! - Ledger ingestion from CSV/JSON files
//!
//! Every operation is a pure, synchronous function of its inputs: no
//! shared state, no I/O beyond the explicit file readers, identical
//! inputs always produce identical outputs.

pub mod aggregate;
pub mod anomaly;
pub mod category;
pub mod error;
pub mod expense;
pub mod import;
pub mod invest;
pub mod models;
pub mod patterns;
pub mod tax;

pub use anomaly::{Anomaly, AnomalyConfig, AnomalyDetector, AnomalySeverity};
pub use category::{CategoryClass, CategoryPolicy};
pub use error::{Error, Result};
pub use expense::{ExpenseAnalysis, ExpenseAnalyzer, ExpenseInsight, Trend};
pub use invest::{InvestmentAdvisor, InvestmentPlan, InvestmentSuggestion, RiskLevel};
pub use models::{InvestmentProfile, RiskTolerance, Transaction, TransactionKind};
pub use patterns::{
    analyze_investment_performance, analyze_spending_pattern, InvestmentPerformanceReport,
    PatternInsight, PortfolioHealth, SpendingPatternReport,
};
pub use tax::{calculate_tax, predict_tax_savings, TaxRecommendation, TaxSavingsReport};
