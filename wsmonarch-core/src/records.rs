//! Raw provider records and the canonical records written for Monarch

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Self-directed purchase. Always a debit, whatever the sign indicator says.
pub const DIY_BUY: &str = "DIY_BUY";

/// Sign hint the provider sends next to an unsigned amount
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AmountSign {
    #[serde(rename = "positive")]
    Positive,
    #[serde(rename = "negative")]
    Negative,
}

impl AmountSign {
    /// Parse the provider's `amountSign` value. Anything else is `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "positive" => Some(AmountSign::Positive),
            "negative" => Some(AmountSign::Negative),
            _ => None,
        }
    }
}

/// A provider transaction after ingest: required fields are present and typed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTransaction {
    /// Provider transaction type (INTEREST, DIVIDEND, DIY_BUY, CREDIT_CARD, ...)
    pub kind: String,
    pub sub_type: Option<String>,
    /// Description as sent, prefixes included. Empty when the provider sent none.
    pub description: String,
    /// Magnitude as sent; the sign is decided later
    pub amount: Decimal,
    pub amount_sign: Option<AmountSign>,
    pub date: NaiveDate,
    /// Account label written to the Account column
    pub account: String,
}

impl RawTransaction {
    pub fn new(
        kind: impl Into<String>,
        date: NaiveDate,
        amount: Decimal,
        account: impl Into<String>,
    ) -> Self {
        Self {
            kind: kind.into(),
            sub_type: None,
            description: String::new(),
            amount,
            amount_sign: None,
            date,
            account: account.into(),
        }
    }

    pub fn with_sub_type(mut self, sub_type: impl Into<String>) -> Self {
        self.sub_type = Some(sub_type.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_sign(mut self, sign: AmountSign) -> Self {
        self.amount_sign = Some(sign);
        self
    }
}

/// One row of the Monarch transaction import
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalTransaction {
    pub date: NaiveDate,
    pub merchant: String,
    /// Empty when no rule matched
    pub category: String,
    pub account: String,
    pub original_statement: String,
    pub notes: String,
    /// Negative = debit, positive = credit. Two decimal places.
    pub amount: Decimal,
    /// Always empty
    pub tags: String,
}

impl CanonicalTransaction {
    pub fn is_uncategorized(&self) -> bool {
        self.category.is_empty()
    }
}

/// A balance snapshot after ingest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawBalance {
    pub date: NaiveDate,
    /// Positive = asset, negative = liability
    pub amount: Decimal,
    pub account: String,
}

impl RawBalance {
    pub fn new(date: NaiveDate, amount: Decimal, account: impl Into<String>) -> Self {
        Self {
            date,
            amount,
            account: account.into(),
        }
    }
}

/// One row of the Monarch balance-history import
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalBalance {
    pub date: NaiveDate,
    pub amount: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_amount_sign_parse() {
        assert_eq!(AmountSign::parse("negative"), Some(AmountSign::Negative));
        assert_eq!(AmountSign::parse(" positive "), Some(AmountSign::Positive));
        assert_eq!(AmountSign::parse("NEGATIVE"), None);
        assert_eq!(AmountSign::parse(""), None);
    }

    #[test]
    fn test_raw_transaction_builder() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let raw = RawTransaction::new("INTEREST", date, dec!(1.23), "TFSA")
            .with_sub_type("FOREIGN")
            .with_description("Interest")
            .with_sign(AmountSign::Positive);
        assert_eq!(raw.kind, "INTEREST");
        assert_eq!(raw.sub_type.as_deref(), Some("FOREIGN"));
        assert_eq!(raw.amount_sign, Some(AmountSign::Positive));
        assert_eq!(raw.account, "TFSA");
    }

    #[test]
    fn test_uncategorized() {
        let mut txn = CanonicalTransaction {
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            merchant: "X".into(),
            category: String::new(),
            account: "A".into(),
            original_statement: "X".into(),
            notes: "DIY_BUY".into(),
            amount: dec!(-9.99),
            tags: String::new(),
        };
        assert!(txn.is_uncategorized());
        txn.category = "Fees".into();
        assert!(!txn.is_uncategorized());
    }
}
