//! Expense insight engine
//!
//! Per-category spend aggregation, savings rate, budget targets, and
//! policy-driven recommendations, with anomaly flags folded into the
//! same report. The trend field is always `Stable`: no historical
//! baseline is modeled yet, so reporting anything else would be noise.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aggregate::{expense_stats_by_category, total_for_kind};
use crate::anomaly::{Anomaly, AnomalyConfig, AnomalyDetector};
use crate::category::{CategoryClass, CategoryPolicy};
use crate::models::{validate_ledger, Transaction, TransactionKind};
use crate::Result;

/// Direction of a category's spend over time
///
/// Only `Stable` is produced today; the variants exist so the wire
/// contract doesn't change when a historical window is added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Trend {
    Increasing,
    Decreasing,
    Stable,
}

/// Per-category insight
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseInsight {
    pub category: String,
    /// Behavior class the policy assigned to this category
    pub class: CategoryClass,
    pub average_spending: f64,
    pub total_spending: f64,
    pub transaction_count: usize,
    pub trend: Trend,
    pub recommendation: String,
    /// Estimated reclaimable spend: policy fraction x category total
    pub potential_savings: f64,
}

/// Full expense analysis for one ledger
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseAnalysis {
    pub insights: Vec<ExpenseInsight>,
    pub total_monthly_spending: f64,
    /// Percentage of income retained, clamped to [0, 100]; 0 when there
    /// is no income
    pub savings_rate: f64,
    /// Per-category budget target: mean spend x headroom factor
    pub budget_recommendations: BTreeMap<String, f64>,
    pub anomalies: Vec<Anomaly>,
}

impl ExpenseAnalysis {
    fn empty() -> Self {
        Self {
            insights: Vec::new(),
            total_monthly_spending: 0.0,
            savings_rate: 0.0,
            budget_recommendations: BTreeMap::new(),
            anomalies: Vec::new(),
        }
    }
}

/// Expense analyzer driven by a category policy
pub struct ExpenseAnalyzer {
    policy: CategoryPolicy,
    detector: AnomalyDetector,
}

impl Default for ExpenseAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpenseAnalyzer {
    pub fn new() -> Self {
        Self {
            policy: CategoryPolicy::default(),
            detector: AnomalyDetector::new(),
        }
    }

    pub fn with_policy(policy: CategoryPolicy) -> Self {
        Self {
            policy,
            detector: AnomalyDetector::new(),
        }
    }

    pub fn with_policy_and_config(policy: CategoryPolicy, anomaly_config: AnomalyConfig) -> Self {
        Self {
            policy,
            detector: AnomalyDetector::with_config(anomaly_config),
        }
    }

    /// Analyze a ledger: savings rate, per-category insights and budget
    /// targets, and anomaly flags
    ///
    /// An empty ledger yields an all-zero report, not an error.
    pub fn analyze(&self, transactions: &[Transaction]) -> Result<ExpenseAnalysis> {
        validate_ledger(transactions)?;

        if transactions.is_empty() {
            return Ok(ExpenseAnalysis::empty());
        }

        let total_expenses = total_for_kind(transactions, TransactionKind::Expense);
        let total_income = total_for_kind(transactions, TransactionKind::Income);
        let savings_rate = if total_income > 0.0 {
            ((total_income - total_expenses) / total_income * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        };

        let mut insights = Vec::new();
        let mut budget_recommendations = BTreeMap::new();

        for (category, stats) in expense_stats_by_category(transactions) {
            let class = self.policy.classify(&category);
            let potential_savings = stats.total * self.policy.savings_fraction(class);

            insights.push(ExpenseInsight {
                recommendation: recommendation_text(&category, class),
                category: category.clone(),
                class,
                average_spending: stats.mean,
                total_spending: stats.total,
                transaction_count: stats.count,
                trend: Trend::Stable,
                potential_savings,
            });

            budget_recommendations.insert(category, stats.mean * self.policy.budget_headroom);
        }

        let anomalies = self.detector.detect_validated(transactions);

        debug!(
            categories = insights.len(),
            anomalies = anomalies.len(),
            savings_rate,
            "Expense analysis complete"
        );

        Ok(ExpenseAnalysis {
            insights,
            total_monthly_spending: total_expenses,
            savings_rate,
            budget_recommendations,
            anomalies,
        })
    }
}

/// Recommendation copy per behavior class
///
/// Presentation only; the structured class and amounts travel alongside
/// it so a front end can localize instead.
fn recommendation_text(category: &str, class: CategoryClass) -> String {
    match class {
        CategoryClass::Discretionary => format!(
            "Consider reducing {} spending by 15-20% to optimize savings",
            category
        ),
        CategoryClass::Essential => {
            "Essential category. Look for energy-efficient alternatives".to_string()
        }
        CategoryClass::TaxAdvantaged => {
            format!("Great! Keep investing in {} for tax benefits", category)
        }
        CategoryClass::Other => format!(
            "Monitor {} spending and look for optimization opportunities",
            category
        ),
    }
}
