use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One element of the activity feed as the provider API returns it.
///
/// Everything is optional here; required fields are checked when the
/// record is turned into a `RawTransaction`, so one bad element does not
/// sink the whole document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityJson {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub sub_type: Option<String>,
    pub description: Option<String>,
    /// Decimal string ("9.99") or JSON number
    pub amount: Option<Value>,
    pub amount_sign: Option<String>,
    /// RFC 3339 timestamp or bare YYYY-MM-DD
    pub occurred_at: Option<String>,
}

/// One element of the historical-financials feed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BalanceJson {
    pub date: Option<String>,
    #[serde(rename = "netLiquidationValueV2")]
    pub net_liquidation_value: Option<MoneyJson>,
}

/// Money as the provider sends it: integer cents, or a decimal amount
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MoneyJson {
    pub cents: Option<Value>,
    pub amount: Option<Value>,
}
