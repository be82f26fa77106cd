//! wsmonarch-core: record types, per-record errors and CSV text formatting
//! shared by the ingest, finance and CLI crates.

pub mod error;
pub mod format;
pub mod range;
pub mod records;

pub use error::{Batch, RecordError, RecordFailure};
pub use format::{format_amount, format_date, round_currency};
pub use range::DateRange;
pub use records::{
    AmountSign, CanonicalBalance, CanonicalTransaction, DIY_BUY, RawBalance, RawTransaction,
};
