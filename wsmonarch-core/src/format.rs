//! Text formatting for the Monarch CSV columns

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

/// Monarch only accepts MM/DD/YYYY
pub const DATE_FORMAT: &str = "%m/%d/%Y";

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Round to cents, half away from zero. A zero result is never negative.
pub fn round_currency(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    rounded
}

/// Two decimals, leading `-` for negatives only, no thousands separators.
pub fn format_amount(amount: Decimal) -> String {
    let mut rounded = round_currency(amount);
    rounded.rescale(2);
    rounded.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_date() {
        let d = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(format_date(d), "03/01/2024");
        let d = NaiveDate::from_ymd_opt(1999, 12, 31).unwrap();
        assert_eq!(format_date(d), "12/31/1999");
    }

    #[test]
    fn test_format_amount_pads_and_signs() {
        assert_eq!(format_amount(dec!(-250)), "-250.00");
        assert_eq!(format_amount(dec!(9.9)), "9.90");
        assert_eq!(format_amount(dec!(1234567.5)), "1234567.50");
        assert_eq!(format_amount(dec!(0)), "0.00");
    }

    #[test]
    fn test_format_amount_rounds_half_up() {
        assert_eq!(format_amount(dec!(1.005)), "1.01");
        assert_eq!(format_amount(dec!(-1.005)), "-1.01");
        assert_eq!(format_amount(dec!(2.004)), "2.00");
        assert_eq!(format_amount(dec!(9.999)), "10.00");
    }

    #[test]
    fn test_negative_zero_prints_unsigned() {
        assert_eq!(format_amount(dec!(-0.001)), "0.00");
        assert_eq!(format_amount(-Decimal::ZERO), "0.00");
        assert!(!round_currency(dec!(-0.004)).is_sign_negative());
    }
}
