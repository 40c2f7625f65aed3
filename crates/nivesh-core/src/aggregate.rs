//! Shared aggregation primitives
//!
//! Per-category grouping, totals, and robust statistics reused by the
//! expense, anomaly, and pattern modules. Grouping uses `BTreeMap` so
//! every report iterates categories in a stable order.

use std::collections::BTreeMap;

use crate::models::{Transaction, TransactionKind};

/// Sum / mean / count of a category's expense amounts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryStats {
    pub total: f64,
    pub mean: f64,
    pub count: usize,
}

/// Sum of amounts for one transaction kind
pub fn total_for_kind(transactions: &[Transaction], kind: TransactionKind) -> f64 {
    transactions
        .iter()
        .filter(|t| t.kind == kind)
        .map(|t| t.amount)
        .sum()
}

/// Group expense amounts by category label
pub fn expense_amounts_by_category(transactions: &[Transaction]) -> BTreeMap<String, Vec<f64>> {
    let mut groups: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for tx in transactions {
        if tx.kind == TransactionKind::Expense {
            groups.entry(tx.category.clone()).or_default().push(tx.amount);
        }
    }
    groups
}

/// Per-category sum, mean, and count over expense transactions
pub fn expense_stats_by_category(transactions: &[Transaction]) -> BTreeMap<String, CategoryStats> {
    expense_amounts_by_category(transactions)
        .into_iter()
        .map(|(category, amounts)| {
            let total: f64 = amounts.iter().sum();
            let count = amounts.len();
            let mean = if count > 0 { total / count as f64 } else { 0.0 };
            (category, CategoryStats { total, mean, count })
        })
        .collect()
}

/// Median of a sample; 0 for an empty sample
///
/// Even-length samples take the mean of the two middle values.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}
