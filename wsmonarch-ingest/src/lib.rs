//! wsmonarch-ingest: decode already-fetched Wealthsimple JSON dumps into raw records.

pub mod types;
pub mod parsers;

pub use types::{ActivityJson, BalanceJson, MoneyJson};
pub use parsers::activities::{parse_activities_json, read_activities};
pub use parsers::balances::{parse_balances_json, read_balances};
