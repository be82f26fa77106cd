//! Decide whether an unsigned provider amount is a debit or a credit.
//!
//! Priority: DIY_BUY is always a debit > the provider's sign indicator >
//! the missing-sign policy.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use wsmonarch_core::{AmountSign, DIY_BUY, RecordError, round_currency};

/// What to do when the provider sent no sign and the type does not force one
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MissingSignPolicy {
    /// Treat as a credit
    #[default]
    AssumePositive,
    /// Fail the record with `RecordError::MissingSign`
    Reject,
}

impl FromStr for MissingSignPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "assume-positive" => Ok(MissingSignPolicy::AssumePositive),
            "reject" => Ok(MissingSignPolicy::Reject),
            other => Err(format!(
                "unknown missing-sign policy {:?} (expected assume-positive or reject)",
                other
            )),
        }
    }
}

impl fmt::Display for MissingSignPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MissingSignPolicy::AssumePositive => "assume-positive",
            MissingSignPolicy::Reject => "reject",
        })
    }
}

/// Signed amount in cents precision. The input's own sign is ignored.
pub fn resolve_amount(
    kind: &str,
    sign: Option<AmountSign>,
    amount: Decimal,
    policy: MissingSignPolicy,
) -> Result<Decimal, RecordError> {
    let magnitude = round_currency(amount.abs());

    let negative = if kind == DIY_BUY {
        true
    } else {
        match (sign, policy) {
            (Some(AmountSign::Negative), _) => true,
            (Some(AmountSign::Positive), _) => false,
            (None, MissingSignPolicy::AssumePositive) => false,
            (None, MissingSignPolicy::Reject) => {
                return Err(RecordError::MissingSign {
                    kind: kind.to_string(),
                });
            }
        }
    };

    if negative && !magnitude.is_zero() {
        Ok(-magnitude)
    } else {
        Ok(magnitude)
    }
}
