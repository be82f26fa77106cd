//! Write canonical records as Monarch import CSVs.
//!
//! Transactions: Date,Merchant,Category,Account,Original Statement,Notes,Amount,Tags
//! Balances:     Date,Amount

use anyhow::{Context, Result};
use log::info;
use regex::Regex;
use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use wsmonarch_core::{CanonicalBalance, CanonicalTransaction, format_amount, format_date};

pub const TRANSACTION_HEADERS: [&str; 8] = [
    "Date",
    "Merchant",
    "Category",
    "Account",
    "Original Statement",
    "Notes",
    "Amount",
    "Tags",
];

pub const BALANCE_HEADERS: [&str; 2] = ["Date", "Amount"];

static UNSAFE_FILENAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[<>:"/\\|?*]"#).expect("static regex"));

#[derive(Debug, Serialize)]
struct TransactionRow<'a> {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Merchant")]
    merchant: &'a str,
    #[serde(rename = "Category")]
    category: &'a str,
    #[serde(rename = "Account")]
    account: &'a str,
    #[serde(rename = "Original Statement")]
    original_statement: &'a str,
    #[serde(rename = "Notes")]
    notes: &'a str,
    #[serde(rename = "Amount")]
    amount: String,
    #[serde(rename = "Tags")]
    tags: &'a str,
}

impl<'a> From<&'a CanonicalTransaction> for TransactionRow<'a> {
    fn from(txn: &'a CanonicalTransaction) -> Self {
        Self {
            date: format_date(txn.date),
            merchant: &txn.merchant,
            category: &txn.category,
            account: &txn.account,
            original_statement: &txn.original_statement,
            notes: &txn.notes,
            amount: format_amount(txn.amount),
            tags: &txn.tags,
        }
    }
}

#[derive(Debug, Serialize)]
struct BalanceRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Amount")]
    amount: String,
}

impl From<&CanonicalBalance> for BalanceRow {
    fn from(bal: &CanonicalBalance) -> Self {
        Self {
            date: format_date(bal.date),
            amount: format_amount(bal.amount),
        }
    }
}

/// Header row is always written, even for an empty slice.
pub fn write_transactions<W: Write>(out: W, txns: &[CanonicalTransaction]) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(out);
    wtr.write_record(TRANSACTION_HEADERS)?;
    for txn in txns {
        wtr.serialize(TransactionRow::from(txn))?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_balances<W: Write>(out: W, balances: &[CanonicalBalance]) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(out);
    wtr.write_record(BALANCE_HEADERS)?;
    for bal in balances {
        wtr.serialize(BalanceRow::from(bal))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Make an account number safe to use in a file name.
pub fn sanitize_filename(name: &str) -> String {
    let replaced = UNSAFE_FILENAME_CHARS.replace_all(name, "_");
    let trimmed = replaced.trim_matches(|c: char| c == ' ' || c == '.');
    if trimmed.is_empty() {
        "account".to_string()
    } else {
        trimmed.to_string()
    }
}

pub fn transactions_path(output_dir: &Path, account_number: &str) -> PathBuf {
    output_dir.join(format!("{}_transactions.csv", sanitize_filename(account_number)))
}

pub fn balances_path(output_dir: &Path, account_number: &str) -> PathBuf {
    output_dir.join(format!("{}_balances.csv", sanitize_filename(account_number)))
}

fn create_file(path: &Path) -> Result<File> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    }
    File::create(path).with_context(|| format!("create {}", path.display()))
}

/// Write `<account>_transactions.csv`. Returns `None` and writes nothing
/// when there are no transactions.
pub fn export_transactions_csv(
    txns: &[CanonicalTransaction],
    account_number: &str,
    output_dir: &Path,
) -> Result<Option<PathBuf>> {
    if txns.is_empty() {
        info!("no transactions for account {}", account_number);
        return Ok(None);
    }
    let path = transactions_path(output_dir, account_number);
    let file = create_file(&path)?;
    write_transactions(file, txns).with_context(|| format!("write {}", path.display()))?;
    info!("exported {} transactions to {}", txns.len(), path.display());
    Ok(Some(path))
}

pub fn export_balances_csv(
    balances: &[CanonicalBalance],
    account_number: &str,
    output_dir: &Path,
) -> Result<Option<PathBuf>> {
    if balances.is_empty() {
        info!("no balance history for account {}", account_number);
        return Ok(None);
    }
    let path = balances_path(output_dir, account_number);
    let file = create_file(&path)?;
    write_balances(file, balances).with_context(|| format!("write {}", path.display()))?;
    info!("exported {} balances to {}", balances.len(), path.display());
    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn txn() -> CanonicalTransaction {
        CanonicalTransaction {
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            merchant: "BROKER FEE".into(),
            category: String::new(),
            account: "RRSP123".into(),
            original_statement: "BROKER FEE".into(),
            notes: "DIY_BUY".into(),
            amount: dec!(-9.99),
            tags: String::new(),
        }
    }

    #[test]
    fn test_write_transactions_layout() {
        let mut buf = Vec::new();
        write_transactions(&mut buf, &[txn()]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("Date,Merchant,Category,Account,Original Statement,Notes,Amount,Tags")
        );
        assert_eq!(lines.next(), Some("03/01/2024,BROKER FEE,,RRSP123,BROKER FEE,DIY_BUY,-9.99,"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_fields_with_commas_are_quoted() {
        let mut t = txn();
        t.merchant = "SHOP, INC".into();
        t.notes = "CREDIT_CARD | PURCHASE".into();
        let mut buf = Vec::new();
        write_transactions(&mut buf, &[t]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("\"SHOP, INC\""));
    }

    #[test]
    fn test_write_balances_layout() {
        let bal = CanonicalBalance {
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            amount: dec!(-250),
        };
        let mut buf = Vec::new();
        write_balances(&mut buf, &[bal]).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "Date,Amount\n03/01/2024,-250.00\n");
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("HQ1234/CAD"), "HQ1234_CAD");
        assert_eq!(sanitize_filename(r#"a<b>c:d"e\f|g?h*i"#), "a_b_c_d_e_f_g_h_i");
        assert_eq!(sanitize_filename("  .acct. "), "acct");
        assert_eq!(sanitize_filename(" . "), "account");
    }

    #[test]
    fn test_export_skips_empty_and_writes_files() {
        let dir = std::env::temp_dir().join(format!("wsmonarch-export-{}", std::process::id()));
        assert_eq!(export_transactions_csv(&[], "X", &dir).unwrap(), None);
        assert_eq!(export_balances_csv(&[], "X", &dir).unwrap(), None);

        let path = export_transactions_csv(&[txn()], "RRSP/123", &dir).unwrap().unwrap();
        assert_eq!(path, dir.join("RRSP_123_transactions.csv"));
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.ends_with("-9.99,\n"));
        fs::remove_dir_all(&dir).unwrap();
    }
}
