//! Raw provider records -> canonical Monarch records.
//!
//! Transactions go through the description cleaner, the sign resolver and
//! the categorizer. Balances are copied as-is apart from the date.

use log::debug;

use wsmonarch_core::{
    Batch, CanonicalBalance, CanonicalTransaction, RawBalance, RawTransaction, RecordError,
};

use crate::category_rules::{RuleSet, categorize};
use crate::description::PrefixTable;
use crate::sign::{MissingSignPolicy, resolve_amount};

/// Converted records plus the ones that were skipped
pub type ConversionReport<T> = Batch<T>;

/// Holds the run-wide inputs so each record conversion stays a plain call.
#[derive(Debug, Clone)]
pub struct RecordConverter<'a> {
    rules: &'a RuleSet,
    prefixes: PrefixTable,
    missing_sign: MissingSignPolicy,
}

impl<'a> RecordConverter<'a> {
    pub fn new(rules: &'a RuleSet) -> Self {
        Self {
            rules,
            prefixes: PrefixTable::default(),
            missing_sign: MissingSignPolicy::default(),
        }
    }

    pub fn with_prefixes(mut self, prefixes: PrefixTable) -> Self {
        self.prefixes = prefixes;
        self
    }

    pub fn with_missing_sign(mut self, policy: MissingSignPolicy) -> Self {
        self.missing_sign = policy;
        self
    }

    pub fn convert_transaction(&self, raw: &RawTransaction) -> Result<CanonicalTransaction, RecordError> {
        let statement = self.prefixes.clean(&raw.description);
        let merchant = if statement.is_empty() {
            // no description: the type is the best merchant name we have
            self.prefixes.clean(&raw.kind)
        } else {
            statement.clone()
        };

        let amount = resolve_amount(&raw.kind, raw.amount_sign, raw.amount, self.missing_sign)?;
        let category = categorize(&raw.kind, raw.sub_type.as_deref(), &merchant, self.rules);

        debug!(
            "{} {} {:?} -> {:?} {} {:?}",
            raw.date, raw.kind, raw.description, merchant, amount, category
        );

        Ok(CanonicalTransaction {
            date: raw.date,
            merchant,
            category: category.to_string(),
            account: raw.account.clone(),
            original_statement: statement,
            notes: notes(&raw.kind, raw.sub_type.as_deref()),
            amount,
            tags: String::new(),
        })
    }

    /// Convert in input order; failures are indexed by input position.
    pub fn convert_transactions(&self, raws: &[RawTransaction]) -> ConversionReport<CanonicalTransaction> {
        Batch::from_results(raws.iter().map(|raw| self.convert_transaction(raw)))
    }

    /// Convert records that came out of ingest, keeping their document indices.
    pub fn convert_ingested(&self, ingested: Batch<RawTransaction>) -> ConversionReport<CanonicalTransaction> {
        ingested.and_then(|raw| self.convert_transaction(raw))
    }
}

/// `TYPE` or `TYPE | SUBTYPE`
pub fn notes(kind: &str, sub_type: Option<&str>) -> String {
    match sub_type {
        Some(sub) if !sub.is_empty() => format!("{} | {}", kind, sub),
        _ => kind.to_string(),
    }
}

/// Balances keep their sign: positive is an asset, negative a liability.
pub fn convert_balance(raw: &RawBalance) -> CanonicalBalance {
    CanonicalBalance {
        date: raw.date,
        amount: raw.amount,
    }
}

pub fn convert_balances(raws: &[RawBalance]) -> ConversionReport<CanonicalBalance> {
    Batch::from_results(raws.iter().map(|raw| Ok(convert_balance(raw))))
}
