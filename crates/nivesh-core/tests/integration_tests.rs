//! End-to-end tests exercising every analytics operation over one
//! realistic ledger, including the wire shape of the JSON payloads.

use chrono::NaiveDate;

use nivesh_core::{
    analyze_investment_performance, analyze_spending_pattern, calculate_tax, predict_tax_savings,
    AnomalySeverity, ExpenseAnalyzer, InvestmentAdvisor, InvestmentProfile, RiskTolerance,
    Transaction, TransactionKind,
};

fn tx(
    day: u32,
    amount: f64,
    category: &str,
    kind: TransactionKind,
    deductible: bool,
) -> Transaction {
    Transaction {
        amount,
        category: category.to_string(),
        kind,
        description: format!("{} on day {}", category, day),
        date: NaiveDate::from_ymd_opt(2024, 6, day).unwrap(),
        is_tax_deductible: deductible,
        tax_section: deductible.then(|| "80C".to_string()),
    }
}

/// A month of activity: salary, rent, groceries with one blowout,
/// entertainment, and a deductible ELSS SIP.
fn sample_ledger() -> Vec<Transaction> {
    vec![
        tx(1, 100_000.0, "Salary", TransactionKind::Income, false),
        tx(2, 25_000.0, "Housing & Rent", TransactionKind::Expense, false),
        tx(3, 1_000.0, "Food & Dining", TransactionKind::Expense, false),
        tx(8, 1_200.0, "Food & Dining", TransactionKind::Expense, false),
        tx(15, 900.0, "Food & Dining", TransactionKind::Expense, false),
        tx(22, 6_000.0, "Food & Dining", TransactionKind::Expense, false),
        tx(10, 1_500.0, "Entertainment", TransactionKind::Expense, false),
        tx(11, 1_400.0, "Entertainment", TransactionKind::Expense, false),
        tx(12, 1_600.0, "Entertainment", TransactionKind::Expense, false),
        tx(5, 12_500.0, "Investments", TransactionKind::Expense, true),
    ]
}

#[test]
fn expense_analysis_end_to_end() {
    let ledger = sample_ledger();
    let analysis = ExpenseAnalyzer::new().analyze(&ledger).unwrap();

    // 51,100 spent out of 100,000 earned
    assert_eq!(analysis.total_monthly_spending, 51_100.0);
    assert!((analysis.savings_rate - 48.9).abs() < 1e-9);
    assert!(analysis.savings_rate >= 0.0 && analysis.savings_rate <= 100.0);

    // Category totals conserve the ledger
    let insight_total: f64 = analysis.insights.iter().map(|i| i.total_spending).sum();
    assert!((insight_total - analysis.total_monthly_spending).abs() < 1e-9);

    // The 6,000 grocery run is ~5.7x the 1,100 food median
    assert_eq!(analysis.anomalies.len(), 1);
    let anomaly = &analysis.anomalies[0];
    assert_eq!(anomaly.amount, 6_000.0);
    assert_eq!(anomaly.category, "Food & Dining");
    assert_eq!(anomaly.severity, AnomalySeverity::High);

    // Budget targets cover every expense category
    for insight in &analysis.insights {
        let budget = analysis.budget_recommendations[&insight.category];
        assert!((budget - insight.average_spending * 1.2).abs() < 1e-9);
    }
}

#[test]
fn expense_analysis_wire_shape() {
    let analysis = ExpenseAnalyzer::new().analyze(&sample_ledger()).unwrap();
    let value = serde_json::to_value(&analysis).unwrap();

    assert!(value.get("totalMonthlySpending").is_some());
    assert!(value.get("savingsRate").is_some());
    assert!(value.get("budgetRecommendations").is_some());
    let insight = &value["insights"][0];
    assert!(insight.get("averageSpending").is_some());
    assert!(insight.get("potentialSavings").is_some());
    assert_eq!(value["anomalies"][0]["severity"], "HIGH");
}

#[test]
fn tax_prediction_end_to_end() {
    let ledger = sample_ledger();
    let report = predict_tax_savings(&ledger, 1_200_000.0).unwrap();

    assert_eq!(report.current_deductions, 12_500.0);
    assert_eq!(report.remaining_80c_capacity, 137_500.0);
    assert_eq!(
        report.current_tax_liability,
        calculate_tax(1_200_000.0, 12_500.0)
    );
    assert_eq!(
        report.potential_tax_savings,
        report.current_tax_liability - report.optimized_tax_liability
    );
    assert!(report.potential_tax_savings > 0.0);
    assert_eq!(report.recommendations.len(), 3);

    let value = serde_json::to_value(&report).unwrap();
    assert!(value.get("currentTaxLiability").is_some());
    assert!(value.get("remaining80CCapacity").is_some());
    assert!(value["recommendations"][0].get("lockIn").is_some());
}

#[test]
fn reference_tax_constants() {
    // Cumulative bases at each slab boundary, via the standard deduction
    for (income, expected) in [
        (300_000.0, 0.0),
        (550_000.0, 12_500.0),
        (700_000.0, 27_500.0),
        (800_000.0, 37_500.0),
        (1_050_000.0, 75_000.0),
        (1_300_000.0, 125_000.0),
        (1_550_000.0, 187_500.0),
    ] {
        assert_eq!(calculate_tax(income, 0.0), expected, "income {}", income);
    }
}

#[test]
fn investment_plan_end_to_end() {
    let profile = InvestmentProfile {
        age: 30,
        income: 1_800_000.0,
        risk_tolerance: RiskTolerance::High,
        investment_goals: vec!["wealth".to_string()],
        time_horizon: 20,
        current_savings: 400_000.0,
        monthly_investment_capacity: 20_000.0,
    };
    let plan = InvestmentAdvisor::new()
        .suggest(&profile, &sample_ledger())
        .unwrap();

    assert!(plan.portfolio_allocation.contains_key("ELSS"));
    assert!(plan.portfolio_allocation.contains_key("Equity"));
    assert!(plan.portfolio_allocation.contains_key("Gold"));
    assert!(!plan.portfolio_allocation.contains_key("PPF"));
    assert!(!plan.portfolio_allocation.contains_key("Debt"));

    // Weighted return stays inside the fired instruments' range
    assert!(plan.expected_annual_return >= 8.0);
    assert!(plan.expected_annual_return <= 13.0);

    let value = serde_json::to_value(&plan).unwrap();
    assert!(value.get("portfolioAllocation").is_some());
    assert!(value.get("expectedAnnualReturn").is_some());
    assert!(value["suggestions"][0].get("taxBenefits").is_some());
}

#[test]
fn pattern_reports_end_to_end() {
    let ledger = sample_ledger();

    let pattern = analyze_spending_pattern(&ledger).unwrap();
    assert_eq!(pattern.total_transactions, 9);
    let shares: f64 = pattern.patterns.iter().map(|p| p.frequency).sum();
    assert!((shares - 100.0).abs() < 1e-9);

    let performance = analyze_investment_performance(&ledger).unwrap();
    assert_eq!(performance.total_invested, 12_500.0);
    assert_eq!(performance.diversification_score, 20.0);
    assert!((performance.diversification["Investments"] - 100.0).abs() < 1e-9);
}

#[test]
fn empty_ledger_never_errors() {
    let empty: Vec<Transaction> = Vec::new();

    let analysis = ExpenseAnalyzer::new().analyze(&empty).unwrap();
    assert_eq!(analysis.savings_rate, 0.0);
    assert!(analysis.insights.is_empty());

    assert!(analyze_spending_pattern(&empty).unwrap().patterns.is_empty());
    assert_eq!(
        analyze_investment_performance(&empty)
            .unwrap()
            .total_invested,
        0.0
    );
    assert!(predict_tax_savings(&empty, 900_000.0).is_ok());
}

#[test]
fn operations_are_idempotent() {
    let ledger = sample_ledger();
    let analyzer = ExpenseAnalyzer::new();

    let a = serde_json::to_string(&analyzer.analyze(&ledger).unwrap()).unwrap();
    let b = serde_json::to_string(&analyzer.analyze(&ledger).unwrap()).unwrap();
    assert_eq!(a, b);

    let t1 = serde_json::to_string(&predict_tax_savings(&ledger, 950_000.0).unwrap()).unwrap();
    let t2 = serde_json::to_string(&predict_tax_savings(&ledger, 950_000.0).unwrap()).unwrap();
    assert_eq!(t1, t2);

    let p1 = serde_json::to_string(&analyze_spending_pattern(&ledger).unwrap()).unwrap();
    let p2 = serde_json::to_string(&analyze_spending_pattern(&ledger).unwrap()).unwrap();
    assert_eq!(p1, p2);
}
