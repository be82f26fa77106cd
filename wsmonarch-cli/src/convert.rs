//! `wsmonarch convert`: JSON dumps in, Monarch CSVs out.

use anyhow::{Result, bail};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

use wsmonarch_core::{DateRange, RecordFailure};
use wsmonarch_finance::{
    MissingSignPolicy, RecordConverter, convert_balances, export_balances_csv,
    export_transactions_csv, load_rules,
};
use wsmonarch_ingest::{read_activities, read_balances};

#[derive(Debug, Clone)]
pub struct ConvertArgs {
    pub activities: Option<PathBuf>,
    pub balances: Option<PathBuf>,
    pub account: String,
    pub account_number: Option<String>,
    pub oldest_first: bool,
    pub dates: DateRange,
    pub rules: PathBuf,
    pub output: PathBuf,
    pub missing_sign: MissingSignPolicy,
}

impl ConvertArgs {
    /// Used in output file names; falls back to the account label.
    pub fn account_number(&self) -> &str {
        self.account_number.as_deref().unwrap_or(&self.account)
    }

    fn validate(&self) -> Result<()> {
        if self.activities.is_none() && self.balances.is_none() {
            bail!("nothing to convert (pass --activities and/or --balances)");
        }
        if self.dates.is_inverted() {
            bail!("--start-date is after --end-date ({})", self.dates);
        }
        Ok(())
    }
}

/// What one `convert` run produced
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConvertSummary {
    pub transactions_file: Option<PathBuf>,
    pub balances_file: Option<PathBuf>,
    pub transactions: usize,
    pub balances: usize,
    pub uncategorized: usize,
    pub out_of_range: usize,
    pub failed: usize,
}

pub fn run_convert(args: &ConvertArgs) -> Result<ConvertSummary> {
    args.validate()?;
    let account_number = args.account_number();
    let mut summary = ConvertSummary::default();

    println!("Processing account: {} ({})", args.account, account_number);
    if !args.dates.is_unbounded() {
        info!("keeping records dated {}", args.dates);
    }

    if let Some(path) = &args.activities {
        let rules = load_rules(&args.rules);
        debug!("missing-sign policy: {}", args.missing_sign);

        let mut ingested = read_activities(path, &args.account)?;
        summary.out_of_range += ingested.retain(|txn| args.dates.contains(txn.date));
        if args.oldest_first {
            ingested = ingested.reversed();
        }
        let report = RecordConverter::new(&rules)
            .with_missing_sign(args.missing_sign)
            .convert_ingested(ingested);

        summary.uncategorized = report.values().filter(|t| t.is_uncategorized()).count();
        summary.failed += report_failures("transactions", path, &report.failures);
        let txns = report.into_values();
        summary.transactions = txns.len();
        summary.transactions_file = export_transactions_csv(&txns, account_number, &args.output)?;

        match &summary.transactions_file {
            Some(out) => println!(
                "  Exported {} transactions to {} ({} uncategorized)",
                summary.transactions,
                out.display(),
                summary.uncategorized
            ),
            None => println!("  No transactions found for account {}", account_number),
        }
    }

    if let Some(path) = &args.balances {
        let mut ingested = read_balances(path, &args.account)?;
        summary.out_of_range += ingested.retain(|bal| args.dates.contains(bal.date));
        summary.failed += report_failures("balances", path, &ingested.failures);
        let balances = convert_balances(&ingested.into_values()).into_values();
        summary.balances = balances.len();
        summary.balances_file = export_balances_csv(&balances, account_number, &args.output)?;

        match &summary.balances_file {
            Some(out) => println!("  Exported {} balances to {}", summary.balances, out.display()),
            None => println!("  No balance history found for account {}", account_number),
        }
    }

    if summary.out_of_range > 0 {
        info!("{} record(s) outside {} left out", summary.out_of_range, args.dates);
    }
    if summary.failed > 0 {
        warn!("{} record(s) skipped; see the list above", summary.failed);
    }
    Ok(summary)
}

fn report_failures(what: &str, path: &Path, failures: &[RecordFailure]) -> usize {
    if failures.is_empty() {
        return 0;
    }
    eprintln!("  Skipped {} {} from {}:", failures.len(), what, path.display());
    for failure in failures {
        eprintln!("    - {}", failure);
    }
    failures.len()
}
