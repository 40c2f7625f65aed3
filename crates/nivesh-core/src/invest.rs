//! Investment allocation engine
//!
//! Rule-based eligibility and sizing of capital across instruments.
//! Rules fire independently: the allocation percentages may overlap or
//! leave gaps, so the portfolio map is not required to sum to 100.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{
    validate_ledger, InvestmentProfile, RiskTolerance, Transaction, TransactionKind,
};
use crate::tax::{SECTION_80C_CAP, TOP_BRACKET_RATE};
use crate::Result;

/// Monthly slice of the annual 80C cap, used to size 80C instruments
const MONTHLY_80C_BUDGET: f64 = SECTION_80C_CAP / 12.0;

/// Risk level of a suggested instrument
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// One instrument recommendation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentSuggestion {
    pub instrument: String,
    /// Percentage of the monthly investment capacity
    pub allocation: f64,
    /// Instrument-fixed expected annual return, percent
    pub expected_return: f64,
    pub risk_level: RiskLevel,
    pub tax_benefits: String,
    pub reason: String,
    /// Counts toward the Section 80C tax-saving estimate
    #[serde(rename = "section80C")]
    pub section_80c: bool,
}

/// Full allocation produced for one profile
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentPlan {
    pub suggestions: Vec<InvestmentSuggestion>,
    /// Instrument -> allocation percentage; not required to sum to 100
    pub portfolio_allocation: BTreeMap<String, f64>,
    /// Allocation-weighted mean of fired instrument returns; 0 when no
    /// rule fired
    pub expected_annual_return: f64,
    /// Estimated annual tax saved via 80C-eligible suggestions
    pub tax_savings: f64,
}

/// Rule-driven investment advisor
pub struct InvestmentAdvisor;

impl Default for InvestmentAdvisor {
    fn default() -> Self {
        Self::new()
    }
}

impl InvestmentAdvisor {
    pub fn new() -> Self {
        Self
    }

    /// Build an allocation for a profile
    ///
    /// The ledger is used only to estimate the average expense per
    /// transaction, which is logged but feeds no rule (kept from the
    /// upstream behavior; see DESIGN.md).
    pub fn suggest(
        &self,
        profile: &InvestmentProfile,
        transactions: &[Transaction],
    ) -> Result<InvestmentPlan> {
        profile.validate()?;
        validate_ledger(transactions)?;

        let expense_rows = transactions
            .iter()
            .filter(|t| t.kind == TransactionKind::Expense)
            .count();
        let avg_monthly_expense = transactions
            .iter()
            .filter(|t| t.kind == TransactionKind::Expense)
            .map(|t| t.amount)
            .sum::<f64>()
            / expense_rows.max(1) as f64;
        debug!(avg_monthly_expense, "Estimated average expense per transaction");

        let capacity = profile.monthly_investment_capacity;
        let mut suggestions = Vec::new();
        let mut portfolio_allocation = BTreeMap::new();

        // Tax-saving equity (Section 80C), above the ELSS entry minimum
        if capacity > 5_000.0 {
            let allocation = (MONTHLY_80C_BUDGET / capacity * 100.0).min(30.0);
            suggestions.push(InvestmentSuggestion {
                instrument: "ELSS Mutual Fund".to_string(),
                allocation,
                expected_return: 12.0,
                risk_level: RiskLevel::Medium,
                tax_benefits: "Section 80C - Up to ₹1.5L deduction".to_string(),
                reason: "Tax-saving equity mutual fund with 3-year lock-in".to_string(),
                section_80c: true,
            });
            portfolio_allocation.insert("ELSS".to_string(), allocation);
        }

        // PPF for conservative and moderate investors
        if matches!(
            profile.risk_tolerance,
            RiskTolerance::Low | RiskTolerance::Medium
        ) {
            let allocation = (MONTHLY_80C_BUDGET / capacity * 100.0).min(20.0);
            suggestions.push(InvestmentSuggestion {
                instrument: "Public Provident Fund (PPF)".to_string(),
                allocation,
                expected_return: 7.5,
                risk_level: RiskLevel::Low,
                tax_benefits: "Section 80C + Tax-free returns".to_string(),
                reason: "Conservative long-term wealth building with tax benefits".to_string(),
                section_80c: true,
            });
            portfolio_allocation.insert("PPF".to_string(), allocation);
        }

        // Equity exposure: large-cap for aggressive investors under 50,
        // otherwise hybrid for moderate ones (mutually exclusive pair)
        if profile.risk_tolerance == RiskTolerance::High && profile.age < 50 {
            let allocation = 50.0;
            suggestions.push(InvestmentSuggestion {
                instrument: "Large Cap Mutual Fund".to_string(),
                allocation,
                expected_return: 13.0,
                risk_level: RiskLevel::Medium,
                tax_benefits: "LTCG tax benefits after 1 year".to_string(),
                reason: "Stable large-cap equity exposure for long-term growth".to_string(),
                section_80c: false,
            });
            portfolio_allocation.insert("Equity".to_string(), allocation);
        } else if profile.risk_tolerance == RiskTolerance::Medium {
            let allocation = 30.0;
            suggestions.push(InvestmentSuggestion {
                instrument: "Hybrid Mutual Fund".to_string(),
                allocation,
                expected_return: 10.5,
                risk_level: RiskLevel::Medium,
                tax_benefits: "Balanced taxation".to_string(),
                reason: "Balanced equity-debt mix for moderate risk".to_string(),
                section_80c: false,
            });
            portfolio_allocation.insert("Hybrid".to_string(), allocation);
        }

        // Debt for older or conservative investors
        if profile.age > 35 || profile.risk_tolerance == RiskTolerance::Low {
            let allocation = 25.0;
            suggestions.push(InvestmentSuggestion {
                instrument: "Debt Mutual Fund".to_string(),
                allocation,
                expected_return: 7.0,
                risk_level: RiskLevel::Low,
                tax_benefits: "Indexation benefits after 3 years".to_string(),
                reason: "Capital preservation with inflation beating returns".to_string(),
                section_80c: false,
            });
            portfolio_allocation.insert("Debt".to_string(), allocation);
        }

        // Gold for diversification at higher capacities
        if capacity > 10_000.0 {
            let allocation = 10.0;
            suggestions.push(InvestmentSuggestion {
                instrument: "Gold ETF".to_string(),
                allocation,
                expected_return: 8.0,
                risk_level: RiskLevel::Medium,
                tax_benefits: "LTCG after 3 years".to_string(),
                reason: "Portfolio diversification and inflation hedge".to_string(),
                section_80c: false,
            });
            portfolio_allocation.insert("Gold".to_string(), allocation);
        }

        let total_allocation: f64 = suggestions.iter().map(|s| s.allocation).sum();
        let expected_annual_return = if total_allocation > 0.0 {
            suggestions
                .iter()
                .map(|s| s.allocation * s.expected_return)
                .sum::<f64>()
                / total_allocation
        } else {
            0.0
        };

        let tax_savings: f64 = suggestions
            .iter()
            .filter(|s| s.section_80c)
            .map(|s| (capacity * s.allocation / 100.0).min(SECTION_80C_CAP) * TOP_BRACKET_RATE)
            .sum();

        debug!(
            rules_fired = suggestions.len(),
            expected_annual_return, tax_savings, "Investment plan built"
        );

        Ok(InvestmentPlan {
            suggestions,
            portfolio_allocation,
            expected_annual_return,
            tax_savings,
        })
    }
}
