//! Wealthsimple historical-financials parser
//!
//! Expected element shape:
//!   {"date": "2024-03-01", "netLiquidationValueV2": {"cents": -25000, "currency": "CAD"}}
//! or with a decimal `amount` in place of `cents`.

use anyhow::{Context, Result};
use log::debug;
use rust_decimal::Decimal;
use serde_json::Value;
use std::fs;
use std::path::Path;

use wsmonarch_core::{Batch, RawBalance, RecordError};

use super::{json_elements, parse_date, parse_decimal};
use crate::types::{BalanceJson, MoneyJson};

impl MoneyJson {
    /// Amount in currency units. Cents win when both are present.
    pub fn to_decimal(&self) -> Result<Option<Decimal>, RecordError> {
        if let Some(cents) = &self.cents {
            return match cents {
                Value::Null => self.amount_value(),
                Value::Number(n) => n
                    .as_i64()
                    .map(|c| Some(Decimal::new(c, 2)))
                    .ok_or_else(|| RecordError::invalid("cents", n.to_string())),
                Value::String(s) => s
                    .trim()
                    .parse::<i64>()
                    .map(|c| Some(Decimal::new(c, 2)))
                    .map_err(|_| RecordError::invalid("cents", s.as_str())),
                other => Err(RecordError::invalid("cents", other.to_string())),
            };
        }
        self.amount_value()
    }

    fn amount_value(&self) -> Result<Option<Decimal>, RecordError> {
        match &self.amount {
            Some(value) => parse_decimal("amount", value),
            None => Ok(None),
        }
    }
}

impl BalanceJson {
    pub fn to_raw(&self, account: &str) -> Result<RawBalance, RecordError> {
        let date = match self.date.as_deref() {
            Some(s) => parse_date("date", s)?,
            None => return Err(RecordError::MissingField("date")),
        };
        let amount = match &self.net_liquidation_value {
            Some(money) => money.to_decimal()?,
            None => None,
        }
        .ok_or(RecordError::MissingField("netLiquidationValueV2"))?;

        Ok(RawBalance::new(date, amount, account))
    }
}

fn decode_balance(value: Value, account: &str) -> Result<RawBalance, RecordError> {
    let balance: BalanceJson =
        serde_json::from_value(value).map_err(|e| RecordError::Malformed(e.to_string()))?;
    balance.to_raw(account)
}

/// Parse a historical-financials document into balance snapshots.
pub fn parse_balances_json(text: &str, account: &str) -> Result<Batch<RawBalance>> {
    let elements = json_elements(text, "balances")?;
    let batch = Batch::from_results(
        elements
            .into_iter()
            .map(|value| decode_balance(value, account)),
    );
    debug!(
        "decoded {} balances ({} rejected) for {}",
        batch.records.len(),
        batch.failures.len(),
        account
    );
    Ok(batch)
}

pub fn read_balances(path: impl AsRef<Path>, account: &str) -> Result<Batch<RawBalance>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    parse_balances_json(&text, account).with_context(|| format!("parsing {}", path.display()))
}
