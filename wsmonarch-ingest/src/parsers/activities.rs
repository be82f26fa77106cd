//! Wealthsimple activity feed parser
//!
//! Expected element shape (unknown keys ignored):
//!   {"type": "DIY_BUY", "subType": null, "description": "Credit card purchase: BROKER FEE",
//!    "amount": "9.99", "amountSign": "negative", "occurredAt": "2024-03-01T15:04:05Z"}

use anyhow::{Context, Result};
use log::{debug, warn};
use serde_json::Value;
use std::fs;
use std::path::Path;

use wsmonarch_core::{AmountSign, Batch, RawTransaction, RecordError};

use super::{json_elements, optional_text, parse_date, parse_decimal, required_text};
use crate::types::ActivityJson;

impl ActivityJson {
    /// Check required fields and decode the typed ones.
    pub fn to_raw(&self, account: &str) -> Result<RawTransaction, RecordError> {
        let kind = required_text("type", self.kind.as_deref())?;

        let amount = match &self.amount {
            Some(value) => parse_decimal("amount", value)?,
            None => None,
        }
        .ok_or(RecordError::MissingField("amount"))?;

        let date = match self.occurred_at.as_deref() {
            Some(s) => parse_date("occurredAt", s)?,
            None => return Err(RecordError::MissingField("occurredAt")),
        };

        let amount_sign = match self.amount_sign.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(s) => {
                let sign = AmountSign::parse(s);
                if sign.is_none() {
                    warn!("ignoring unrecognized amountSign {:?} on {} activity", s, kind);
                }
                sign
            }
        };

        Ok(RawTransaction {
            kind,
            sub_type: optional_text(self.sub_type.as_deref()),
            description: self.description.clone().unwrap_or_default(),
            amount,
            amount_sign,
            date,
            account: account.to_string(),
        })
    }
}

fn decode_activity(value: Value, account: &str) -> Result<RawTransaction, RecordError> {
    let activity: ActivityJson =
        serde_json::from_value(value).map_err(|e| RecordError::Malformed(e.to_string()))?;
    activity.to_raw(account)
}

/// Parse an activity feed document. Elements that fail are reported in
/// `failures` by their array position; the rest keep document order.
pub fn parse_activities_json(text: &str, account: &str) -> Result<Batch<RawTransaction>> {
    let elements = json_elements(text, "activities")?;
    let batch = Batch::from_results(
        elements
            .into_iter()
            .map(|value| decode_activity(value, account)),
    );
    debug!(
        "decoded {} activities ({} rejected) for {}",
        batch.records.len(),
        batch.failures.len(),
        account
    );
    Ok(batch)
}

pub fn read_activities(path: impl AsRef<Path>, account: &str) -> Result<Batch<RawTransaction>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    parse_activities_json(&text, account).with_context(|| format!("parsing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    const FEED: &str = r#"[
        {"type": "DIY_BUY", "subType": null, "description": "Credit card purchase: BROKER FEE",
         "amount": "9.99", "occurredAt": "2024-03-01T15:04:05.000Z", "id": "act-1"},
        {"type": "INTEREST", "subType": "FOREIGN", "description": "Interest",
         "amount": 1.5, "amountSign": "positive", "occurredAt": "2024-03-02"},
        {"subType": "PURCHASE", "amount": "3.00", "occurredAt": "2024-03-03"},
        {"type": "DIVIDEND", "amount": "abc", "occurredAt": "2024-03-04"},
        {"type": "DEPOSIT", "amount": "100", "amountSign": "sideways", "occurredAt": "2024-03-05"},
        "not an object"
    ]"#;

    #[test]
    fn test_parses_feed_with_partial_failures() {
        let batch = parse_activities_json(FEED, "RRSP123").unwrap();
        assert_eq!(batch.records.len(), 3);

        let (index, first) = &batch.records[0];
        assert_eq!(*index, 0);
        assert_eq!(first.kind, "DIY_BUY");
        assert_eq!(first.sub_type, None);
        assert_eq!(first.amount, dec!(9.99));
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(first.account, "RRSP123");

        let (_, interest) = &batch.records[1];
        assert_eq!(interest.sub_type.as_deref(), Some("FOREIGN"));
        assert_eq!(interest.amount_sign, Some(AmountSign::Positive));
        assert_eq!(interest.amount, dec!(1.5));

        // Unknown sign is dropped, not fatal
        let (index, deposit) = &batch.records[2];
        assert_eq!(*index, 4);
        assert_eq!(deposit.amount_sign, None);
        assert_eq!(deposit.description, "");

        let failed: Vec<_> = batch.failures.iter().map(|f| f.index).collect();
        assert_eq!(failed, vec![2, 3, 5]);
        assert_eq!(batch.failures[0].reason, RecordError::MissingField("type"));
        assert!(matches!(
            batch.failures[1].reason,
            RecordError::InvalidField { field: "amount", .. }
        ));
        assert!(matches!(batch.failures[2].reason, RecordError::Malformed(_)));
    }

    #[test]
    fn test_missing_amount_and_date() {
        let no_amount = ActivityJson {
            kind: Some("INTEREST".into()),
            occurred_at: Some("2024-03-01".into()),
            ..Default::default()
        };
        assert_eq!(no_amount.to_raw("A"), Err(RecordError::MissingField("amount")));

        let no_date = ActivityJson {
            kind: Some("INTEREST".into()),
            amount: Some(Value::String("1.00".into())),
            ..Default::default()
        };
        assert_eq!(no_date.to_raw("A"), Err(RecordError::MissingField("occurredAt")));
    }

    #[test]
    fn test_blank_subtype_is_absent() {
        let activity = ActivityJson {
            kind: Some("INTEREST".into()),
            sub_type: Some("  ".into()),
            amount: Some(Value::String("1.00".into())),
            occurred_at: Some("2024-03-01".into()),
            ..Default::default()
        };
        assert_eq!(activity.to_raw("A").unwrap().sub_type, None);
    }

    #[test]
    fn test_rejects_non_array_document() {
        assert!(parse_activities_json(r#"{"type": "INTEREST"}"#, "A").is_err());
    }
}
