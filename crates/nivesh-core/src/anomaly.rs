//! Spend anomaly detection
//!
//! Flags expense transactions that dwarf the typical amount for their
//! category, using the category median as the baseline. The median is a
//! crude baseline: it is computed over whatever history the ledger
//! carries, so a category with only a handful of rows has a noisy one.
//! `AnomalyConfig::min_category_samples` (default 3) keeps thin
//! categories from producing spurious flags; set it to 1 to flag against
//! any prior history at all.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aggregate::{expense_amounts_by_category, median};
use crate::models::{validate_ledger, Transaction, TransactionKind};
use crate::Result;

/// Detection thresholds
#[derive(Debug, Clone)]
pub struct AnomalyConfig {
    /// Multiple of the category median above which a transaction is flagged
    pub median_multiplier: f64,
    /// Ratio over the median above which a flag is High rather than Medium
    pub high_severity_multiplier: f64,
    /// Minimum expense rows a category needs before it can be flagged
    pub min_category_samples: usize,
}

impl Default for AnomalyConfig {
    fn default() -> Self {
        Self {
            median_multiplier: 3.0,
            high_severity_multiplier: 5.0,
            min_category_samples: 3,
        }
    }
}

/// How far outside the baseline a flagged transaction sits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AnomalySeverity {
    Medium,
    High,
}

impl AnomalySeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }
}

impl std::fmt::Display for AnomalySeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A flagged transaction with its baseline context
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Anomaly {
    pub amount: f64,
    pub category: String,
    pub description: String,
    pub date: chrono::NaiveDate,
    /// Category median the amount was compared against
    pub category_median: f64,
    /// amount / median
    pub ratio: f64,
    /// Human-readable explanation of the ratio
    pub reason: String,
    pub severity: AnomalySeverity,
}

/// Median-baseline outlier detector
pub struct AnomalyDetector {
    config: AnomalyConfig,
}

impl Default for AnomalyDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl AnomalyDetector {
    pub fn new() -> Self {
        Self {
            config: AnomalyConfig::default(),
        }
    }

    pub fn with_config(config: AnomalyConfig) -> Self {
        Self { config }
    }

    /// Flag expense transactions that exceed the configured multiple of
    /// their category median
    ///
    /// Categories with a zero median or fewer than
    /// `min_category_samples` rows are skipped: no baseline, no flags.
    pub fn detect(&self, transactions: &[Transaction]) -> Result<Vec<Anomaly>> {
        validate_ledger(transactions)?;
        Ok(self.detect_validated(transactions))
    }

    /// Detection over a ledger the caller has already validated
    pub(crate) fn detect_validated(&self, transactions: &[Transaction]) -> Vec<Anomaly> {
        let grouped = expense_amounts_by_category(transactions);
        let mut medians = std::collections::BTreeMap::new();
        for (category, amounts) in &grouped {
            if amounts.len() < self.config.min_category_samples {
                debug!(
                    category = category.as_str(),
                    samples = amounts.len(),
                    "Skipping category with too little history"
                );
                continue;
            }
            let m = median(amounts);
            if m > 0.0 {
                medians.insert(category.clone(), m);
            }
        }

        let mut anomalies = Vec::new();
        for tx in transactions {
            if tx.kind != TransactionKind::Expense {
                continue;
            }
            let Some(&category_median) = medians.get(&tx.category) else {
                continue;
            };
            if tx.amount > category_median * self.config.median_multiplier {
                let ratio = tx.amount / category_median;
                let severity = if ratio > self.config.high_severity_multiplier {
                    AnomalySeverity::High
                } else {
                    AnomalySeverity::Medium
                };
                anomalies.push(Anomaly {
                    amount: tx.amount,
                    category: tx.category.clone(),
                    description: tx.description.clone(),
                    date: tx.date,
                    category_median,
                    ratio,
                    reason: format!(
                        "Amount is {:.1}x higher than usual for this category",
                        ratio
                    ),
                    severity,
                });
            }
        }
        anomalies
    }
}
