//! Progressive tax engine
//!
//! Slab tax calculator and Section 80C savings optimizer. The slab table
//! and its cumulative bases are fixed upstream constants; results must
//! match them exactly, so the tiers are written out rather than derived.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{validate_ledger, Transaction, TransactionKind};

/// Flat standard deduction applied before the slabs
pub const STANDARD_DEDUCTION: f64 = 50_000.0;

/// Annual Section 80C deduction cap
pub const SECTION_80C_CAP: f64 = 150_000.0;

/// Flat rate used for tax-saving estimates (top-bracket assumption, a
/// documented simplification rather than a per-user marginal rate)
pub const TOP_BRACKET_RATE: f64 = 0.30;

/// Tax liability for an income after deductions
///
/// Each slab taxes only the portion of taxable income falling inside it;
/// the constants ahead of each marginal term are the cumulative tax at
/// that slab's lower bound.
pub fn calculate_tax(income: f64, deductions: f64) -> f64 {
    let taxable = (income - deductions - STANDARD_DEDUCTION).max(0.0);

    if taxable <= 250_000.0 {
        0.0
    } else if taxable <= 500_000.0 {
        (taxable - 250_000.0) * 0.05
    } else if taxable <= 750_000.0 {
        12_500.0 + (taxable - 500_000.0) * 0.10
    } else if taxable <= 1_000_000.0 {
        37_500.0 + (taxable - 750_000.0) * 0.15
    } else if taxable <= 1_250_000.0 {
        75_000.0 + (taxable - 1_000_000.0) * 0.20
    } else if taxable <= 1_500_000.0 {
        125_000.0 + (taxable - 1_250_000.0) * 0.25
    } else {
        187_500.0 + (taxable - 1_500_000.0) * 0.30
    }
}

/// Display-only bracket label for an annual income
pub fn tax_bracket_label(annual_income: f64) -> &'static str {
    if annual_income > 1_500_000.0 {
        "30%"
    } else if annual_income > 1_000_000.0 {
        "20%"
    } else if annual_income > 500_000.0 {
        "10%"
    } else {
        "5%"
    }
}

/// One tax-saving instrument recommendation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxRecommendation {
    pub instrument: String,
    /// Amount to invest, capped by remaining 80C capacity and the
    /// instrument's own cap
    pub amount: f64,
    /// amount x flat top-bracket rate
    pub tax_saving: f64,
    pub expected_return: f64,
    pub lock_in: String,
}

/// Tax-savings projection for one ledger and income
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxSavingsReport {
    pub current_tax_liability: f64,
    pub optimized_tax_liability: f64,
    /// May be <= 0 when deductions already sit at the cap
    pub potential_tax_savings: f64,
    pub current_deductions: f64,
    #[serde(rename = "remaining80CCapacity")]
    pub remaining_80c_capacity: f64,
    pub recommendations: Vec<TaxRecommendation>,
    pub tax_bracket: String,
}

/// Project tax savings from maxing out the Section 80C cap
///
/// Current deductions are the sum of expense transactions flagged
/// tax-deductible. The optimized liability assumes the full cap is used.
pub fn predict_tax_savings(
    transactions: &[Transaction],
    annual_income: f64,
) -> Result<TaxSavingsReport> {
    validate_ledger(transactions)?;
    if !annual_income.is_finite() || annual_income < 0.0 {
        return Err(Error::InvalidData(format!(
            "Annual income must be a non-negative number, got {}",
            annual_income
        )));
    }

    let current_deductions: f64 = transactions
        .iter()
        .filter(|t| t.is_tax_deductible && t.kind == TransactionKind::Expense)
        .map(|t| t.amount)
        .sum();

    let current_tax = calculate_tax(annual_income, current_deductions);
    let optimized_tax = calculate_tax(annual_income, SECTION_80C_CAP);
    let remaining_capacity = (SECTION_80C_CAP - current_deductions).max(0.0);

    let mut recommendations = Vec::new();
    if remaining_capacity > 0.0 {
        for (instrument, cap, expected_return, lock_in) in [
            ("ELSS Mutual Fund", 50_000.0, 12.0, "3 years"),
            ("PPF", 150_000.0, 7.5, "15 years"),
            ("Tax Saver FD", 100_000.0, 6.5, "5 years"),
        ] {
            let amount = remaining_capacity.min(cap);
            recommendations.push(TaxRecommendation {
                instrument: instrument.to_string(),
                amount,
                tax_saving: amount * TOP_BRACKET_RATE,
                expected_return,
                lock_in: lock_in.to_string(),
            });
        }
    }

    debug!(
        current_tax,
        optimized_tax, remaining_capacity, "Tax savings projection complete"
    );

    Ok(TaxSavingsReport {
        current_tax_liability: current_tax,
        optimized_tax_liability: optimized_tax,
        potential_tax_savings: current_tax - optimized_tax,
        current_deductions,
        remaining_80c_capacity: remaining_capacity,
        recommendations,
        tax_bracket: tax_bracket_label(annual_income).to_string(),
    })
}
