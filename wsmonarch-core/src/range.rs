//! Inclusive date window used to narrow a feed before conversion.

use chrono::NaiveDate;
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Start after end: nothing can match.
    pub fn is_inverted(&self) -> bool {
        matches!((self.start, self.end), (Some(start), Some(end)) if start > end)
    }

    /// Both ends inclusive; a missing end is open.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.is_none_or(|start| date >= start) && self.end.is_none_or(|end| date <= end)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.start, self.end) {
            (Some(start), Some(end)) => write!(f, "{} to {}", start, end),
            (Some(start), None) => write!(f, "from {}", start),
            (None, Some(end)) => write!(f, "until {}", end),
            (None, None) => write!(f, "all dates"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let range = DateRange::new(Some(d(2)), Some(d(4)));
        assert!(!range.contains(d(1)));
        assert!(range.contains(d(2)));
        assert!(range.contains(d(4)));
        assert!(!range.contains(d(5)));
        assert_eq!(range.to_string(), "2024-03-02 to 2024-03-04");
    }

    #[test]
    fn test_open_ends() {
        assert!(DateRange::default().is_unbounded());
        assert!(DateRange::default().contains(d(1)));
        assert!(DateRange::new(Some(d(3)), None).contains(d(31)));
        assert!(!DateRange::new(None, Some(d(3))).contains(d(4)));
    }

    #[test]
    fn test_inverted() {
        assert!(DateRange::new(Some(d(5)), Some(d(1))).is_inverted());
        assert!(!DateRange::new(Some(d(1)), Some(d(1))).is_inverted());
        assert!(!DateRange::new(Some(d(5)), None).is_inverted());
    }
}
