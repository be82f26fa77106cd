//! wsmonarch-finance: description cleaning, sign resolution, rule-based
//! categorization, record conversion and Monarch CSV export

pub mod category_rules;
pub mod converter;
pub mod description;
pub mod export;
pub mod sign;

pub use category_rules::{MerchantRule, RuleMatch, RuleSet, TypeRule, categorize, load_rules};
pub use converter::{ConversionReport, RecordConverter, convert_balance, convert_balances};
pub use description::{PrefixTable, clean_description, stripped_prefix};
pub use export::{export_balances_csv, export_transactions_csv};
pub use sign::{MissingSignPolicy, resolve_amount};
