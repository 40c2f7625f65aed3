//! Ledger file ingestion
//!
//! Reads transaction ledgers from CSV or JSON files. The CSV format is
//! the tool's own:
//!
//! ```text
//! date,type,category,amount,description,tax_deductible,tax_section
//! 2024-04-05,EXPENSE,Investments,12500,ELSS SIP,true,80C
//! ```
//!
//! The last two columns may be left empty. JSON ledgers are arrays of
//! wire-format transactions. Every parsed transaction is validated
//! before being returned.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use csv::ReaderBuilder;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{Transaction, TransactionKind};

/// Load a ledger file, picking the format from the extension
pub fn load_ledger(path: &Path) -> Result<Vec<Transaction>> {
    let file = File::open(path)?;
    match path.extension().and_then(|e| e.to_str()) {
        Some("csv") => read_csv(file),
        Some("json") => read_json(file),
        other => Err(Error::Import(format!(
            "Unsupported ledger format: {} (expected .csv or .json)",
            other.unwrap_or("<none>")
        ))),
    }
}

/// Parse a JSON array of transactions
pub fn read_json<R: Read>(reader: R) -> Result<Vec<Transaction>> {
    let transactions: Vec<Transaction> = serde_json::from_reader(reader)?;
    for tx in &transactions {
        tx.validate()?;
    }
    debug!(rows = transactions.len(), "Parsed JSON ledger");
    Ok(transactions)
}

/// Parse CSV ledger data
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<Transaction>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut transactions = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let record = result?;
        let row = i + 2; // 1-based, after the header

        let date_str = record
            .get(0)
            .ok_or_else(|| Error::Import(format!("Row {}: missing date", row)))?;
        let date = parse_date(date_str, row)?;

        let kind: TransactionKind = record
            .get(1)
            .ok_or_else(|| Error::Import(format!("Row {}: missing type", row)))?
            .parse()
            .map_err(|e: String| Error::Import(format!("Row {}: {}", row, e)))?;

        let category = record
            .get(2)
            .ok_or_else(|| Error::Import(format!("Row {}: missing category", row)))?
            .to_string();

        let amount_str = record
            .get(3)
            .ok_or_else(|| Error::Import(format!("Row {}: missing amount", row)))?;
        let amount: f64 = amount_str
            .trim()
            .parse()
            .map_err(|_| Error::Import(format!("Row {}: invalid amount '{}'", row, amount_str)))?;

        let description = record.get(4).unwrap_or("").to_string();

        let is_tax_deductible = record
            .get(5)
            .map(parse_bool)
            .transpose()
            .map_err(|e| Error::Import(format!("Row {}: {}", row, e)))?
            .unwrap_or(false);

        let tax_section = record
            .get(6)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        let tx = Transaction {
            amount,
            category,
            kind,
            description,
            date,
            is_tax_deductible,
            tax_section,
        };
        tx.validate()?;
        transactions.push(tx);
    }

    debug!(rows = transactions.len(), "Parsed CSV ledger");
    Ok(transactions)
}

fn parse_date(s: &str, row: usize) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| Error::Import(format!("Row {}: invalid date '{}' (use YYYY-MM-DD)", row, s)))
}

fn parse_bool(s: &str) -> std::result::Result<bool, String> {
    match s.trim().to_lowercase().as_str() {
        "" | "false" | "0" | "no" => Ok(false),
        "true" | "1" | "yes" => Ok(true),
        other => Err(format!("invalid boolean '{}'", other)),
    }
}
