//! Domain models for Nivesh
//!
//! Input vocabulary shared by every analytics module: the transaction
//! ledger entry and the investor profile used for allocation sizing.
//! All amounts are non-negative; direction is carried by the transaction
//! kind, never by a negative amount.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Direction of a ledger entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "INCOME",
            Self::Expense => "EXPENSE",
        }
    }
}

impl std::str::FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "INCOME" => Ok(Self::Income),
            "EXPENSE" => Ok(Self::Expense),
            _ => Err(format!("Unknown transaction type: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A dated financial transaction supplied by the caller
///
/// Constructed fresh for each request; never mutated or persisted by the
/// engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Non-negative currency value
    pub amount: f64,
    /// Free-form label, stable across a user's history
    pub category: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub description: String,
    pub date: NaiveDate,
    /// Counts toward the Section 80C deduction total when true
    #[serde(default)]
    pub is_tax_deductible: bool,
    /// Optional statutory section label, e.g. "80C"
    #[serde(default)]
    pub tax_section: Option<String>,
}

impl Transaction {
    /// Check the ledger-entry invariants
    ///
    /// `amount` must be finite and non-negative, and `category` must be
    /// non-empty. Fails fast so a malformed entry never reaches an
    /// aggregation.
    pub fn validate(&self) -> Result<()> {
        if !self.amount.is_finite() || self.amount < 0.0 {
            return Err(Error::InvalidData(format!(
                "Transaction amount must be a non-negative number, got {} ({})",
                self.amount, self.description
            )));
        }
        if self.category.trim().is_empty() {
            return Err(Error::InvalidData(format!(
                "Transaction category must not be empty ({})",
                self.description
            )));
        }
        Ok(())
    }
}

/// Validate a whole ledger before any computation touches it
pub fn validate_ledger(transactions: &[Transaction]) -> Result<()> {
    for tx in transactions {
        tx.validate()?;
    }
    Ok(())
}

/// Investor risk appetite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskTolerance {
    Low,
    Medium,
    High,
}

impl RiskTolerance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }
}

impl std::str::FromStr for RiskTolerance {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "LOW" => Ok(Self::Low),
            "MEDIUM" => Ok(Self::Medium),
            "HIGH" => Ok(Self::High),
            _ => Err(format!("Unknown risk tolerance: {}", s)),
        }
    }
}

impl std::fmt::Display for RiskTolerance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Financial profile used to size an investment allocation
///
/// Supplied fresh per request alongside the ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentProfile {
    /// Age in years
    pub age: u32,
    /// Annual income
    pub income: f64,
    pub risk_tolerance: RiskTolerance,
    /// Free-form goal tags, informational only
    #[serde(default)]
    pub investment_goals: Vec<String>,
    /// Investment horizon in years
    pub time_horizon: u32,
    pub current_savings: f64,
    /// Monthly amount available to invest; must be positive for any
    /// allocation to be produced
    pub monthly_investment_capacity: f64,
}

impl InvestmentProfile {
    pub fn validate(&self) -> Result<()> {
        if self.age == 0 {
            return Err(Error::InvalidData("Profile age must be positive".into()));
        }
        if !self.income.is_finite() || self.income < 0.0 {
            return Err(Error::InvalidData(format!(
                "Profile income must be a non-negative number, got {}",
                self.income
            )));
        }
        if !self.monthly_investment_capacity.is_finite() || self.monthly_investment_capacity <= 0.0
        {
            return Err(Error::InvalidData(format!(
                "Monthly investment capacity must be positive, got {}",
                self.monthly_investment_capacity
            )));
        }
        Ok(())
    }
}
