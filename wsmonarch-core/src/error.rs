//! Per-record failures. A bad record is skipped and reported, the batch goes on.

use std::fmt;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("invalid value {value:?} for field `{field}`")]
    InvalidField { field: &'static str, value: String },

    #[error("malformed record: {0}")]
    Malformed(String),

    #[error("no amount sign on {kind} transaction (missing-sign policy is reject)")]
    MissingSign { kind: String },
}

impl RecordError {
    pub fn invalid(field: &'static str, value: impl Into<String>) -> Self {
        RecordError::InvalidField {
            field,
            value: value.into(),
        }
    }
}

/// A skipped record and why. `index` is its position in the input document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFailure {
    pub index: usize,
    pub reason: RecordError,
}

impl fmt::Display for RecordFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "record #{}: {}", self.index, self.reason)
    }
}

/// Records that made it through a stage, each tagged with its original
/// input position, plus the ones that did not.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch<T> {
    pub records: Vec<(usize, T)>,
    pub failures: Vec<RecordFailure>,
}

impl<T> Default for Batch<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            failures: Vec::new(),
        }
    }
}

impl<T> Batch<T> {
    /// Collect per-record results, indexing them by position.
    pub fn from_results<I>(results: I) -> Self
    where
        I: IntoIterator<Item = Result<T, RecordError>>,
    {
        let mut batch = Batch::default();
        for (index, result) in results.into_iter().enumerate() {
            match result {
                Ok(record) => batch.records.push((index, record)),
                Err(reason) => batch.failures.push(RecordFailure { index, reason }),
            }
        }
        batch
    }

    /// Run the next stage over every surviving record. Indices carry over and
    /// failures from both stages end up in one list, ordered by index.
    pub fn and_then<U, F>(self, mut f: F) -> Batch<U>
    where
        F: FnMut(&T) -> Result<U, RecordError>,
    {
        let mut out = Batch {
            records: Vec::with_capacity(self.records.len()),
            failures: self.failures,
        };
        for (index, record) in self.records {
            match f(&record) {
                Ok(next) => out.records.push((index, next)),
                Err(reason) => out.failures.push(RecordFailure { index, reason }),
            }
        }
        out.failures.sort_by_key(|failure| failure.index);
        out
    }

    /// Reverse record order. Failure indices still point into the input document.
    pub fn reversed(mut self) -> Self {
        self.records.reverse();
        self
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.records.iter().map(|(_, record)| record)
    }

    pub fn into_values(self) -> Vec<T> {
        self.records.into_iter().map(|(_, record)| record).collect()
    }

    /// Drop surviving records that fail `keep`. Dropped records are not
    /// failures; returns how many were dropped.
    pub fn retain<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        let before = self.records.len();
        self.records.retain(|(_, record)| keep(record));
        before - self.records.len()
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Result<i32, RecordError> {
        s.parse().map_err(|_| RecordError::invalid("n", s))
    }

    #[test]
    fn test_from_results_keeps_positions() {
        let batch = Batch::from_results(["1", "x", "3"].iter().map(|s| parse(s)));
        assert_eq!(batch.records, vec![(0, 1), (2, 3)]);
        assert_eq!(batch.failures.len(), 1);
        assert_eq!(batch.failures[0].index, 1);
        assert!(!batch.is_clean());
    }

    #[test]
    fn test_and_then_merges_failures_in_order() {
        let batch = Batch::from_results(["1", "2", "x", "4"].iter().map(|s| parse(s)));
        let next = batch.and_then(|n| {
            if n % 2 == 0 {
                Ok(n * 10)
            } else {
                Err(RecordError::MissingField("even"))
            }
        });
        assert_eq!(next.into_values(), vec![20, 40]);

        let batch = Batch::from_results(["1", "2", "x", "4"].iter().map(|s| parse(s)));
        let next = batch.and_then(|n| if *n == 4 { Err(RecordError::MissingField("n")) } else { Ok(*n) });
        let indices: Vec<_> = next.failures.iter().map(|f| f.index).collect();
        assert_eq!(indices, vec![2, 3]);
    }

    #[test]
    fn test_failure_display() {
        let failure = RecordFailure {
            index: 4,
            reason: RecordError::MissingField("occurredAt"),
        };
        assert_eq!(failure.to_string(), "record #4: missing required field `occurredAt`");
    }

    #[test]
    fn test_retain_drops_without_failing() {
        let mut batch = Batch::from_results(["1", "x", "3", "4"].iter().map(|s| parse(s)));
        assert_eq!(batch.retain(|n| *n != 3), 1);
        assert_eq!(batch.records, vec![(0, 1), (3, 4)]);
        let indices: Vec<_> = batch.failures.iter().map(|f| f.index).collect();
        assert_eq!(indices, vec![1]);
    }

    #[test]
    fn test_reversed_keeps_indices() {
        let batch = Batch::from_results(["1", "2"].iter().map(|s| parse(s))).reversed();
        assert_eq!(batch.records, vec![(1, 2), (0, 1)]);
    }
}
