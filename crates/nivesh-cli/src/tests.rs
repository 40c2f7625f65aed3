//! CLI command tests
//!
//! Commands are exercised against scratch ledger and profile files;
//! report contents are covered by nivesh-core's own tests.

use std::io::Write;
use std::path::PathBuf;

use crate::commands;

const LEDGER_CSV: &str = "\
date,type,category,amount,description,tax_deductible,tax_section
2024-04-01,INCOME,Salary,100000,April salary,,
2024-04-05,EXPENSE,Investments,12500,ELSS SIP,true,80C
2024-04-09,EXPENSE,Food & Dining,850,Dinner out,,
2024-04-12,EXPENSE,Food & Dining,900,Groceries,,
2024-04-20,EXPENSE,Food & Dining,4000,Party,,
";

const PROFILE_JSON: &str = r#"{
    "age": 32,
    "income": 1500000,
    "riskTolerance": "MEDIUM",
    "investmentGoals": ["retirement"],
    "timeHorizon": 18,
    "currentSavings": 250000,
    "monthlyInvestmentCapacity": 15000
}"#;

fn write_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    path
}

#[test]
fn test_cmd_analyze() {
    let dir = tempfile::tempdir().unwrap();
    let ledger = write_file(&dir, "ledger.csv", LEDGER_CSV);
    assert!(commands::cmd_analyze(&ledger, None).is_ok());
}

#[test]
fn test_cmd_analyze_with_policy() {
    let dir = tempfile::tempdir().unwrap();
    let ledger = write_file(&dir, "ledger.csv", LEDGER_CSV);
    let policy = write_file(
        &dir,
        "policy.toml",
        "[overrides]\n\"Food & Dining\" = \"essential\"\n",
    );
    assert!(commands::cmd_analyze(&ledger, Some(&policy)).is_ok());
}

#[test]
fn test_cmd_analyze_bad_policy() {
    let dir = tempfile::tempdir().unwrap();
    let ledger = write_file(&dir, "ledger.csv", LEDGER_CSV);
    let policy = write_file(&dir, "policy.toml", "budget_headroom = 0.2\n");
    assert!(commands::cmd_analyze(&ledger, Some(&policy)).is_err());
}

#[test]
fn test_cmd_invest() {
    let dir = tempfile::tempdir().unwrap();
    let ledger = write_file(&dir, "ledger.csv", LEDGER_CSV);
    let profile = write_file(&dir, "profile.json", PROFILE_JSON);
    assert!(commands::cmd_invest(&ledger, &profile).is_ok());
}

#[test]
fn test_cmd_invest_invalid_profile() {
    let dir = tempfile::tempdir().unwrap();
    let ledger = write_file(&dir, "ledger.csv", LEDGER_CSV);
    let profile = write_file(&dir, "profile.json", r#"{"age": 32}"#);
    assert!(commands::cmd_invest(&ledger, &profile).is_err());
}

#[test]
fn test_cmd_tax() {
    let dir = tempfile::tempdir().unwrap();
    let ledger = write_file(&dir, "ledger.csv", LEDGER_CSV);
    assert!(commands::cmd_tax(&ledger, 1_200_000.0).is_ok());
    assert!(commands::cmd_tax(&ledger, -1.0).is_err());
}

#[test]
fn test_cmd_pattern_and_performance() {
    let dir = tempfile::tempdir().unwrap();
    let ledger = write_file(&dir, "ledger.csv", LEDGER_CSV);
    assert!(commands::cmd_pattern(&ledger).is_ok());
    assert!(commands::cmd_performance(&ledger).is_ok());
}

#[test]
fn test_missing_ledger_fails() {
    let missing = PathBuf::from("/nonexistent/ledger.csv");
    assert!(commands::cmd_pattern(&missing).is_err());
}
