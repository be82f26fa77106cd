//! Strip the labels the provider puts in front of merchant names.
//!
//! First matching prefix wins and only one is removed. A prefix that extends
//! a shorter one must come before it, otherwise the shorter one matches first
//! and leaves part of the label behind.

use std::sync::LazyLock;

pub const DEFAULT_PREFIXES: &[&str] = &[
    "(Pending) Credit card purchase: ",
    "(Pending) Credit card refund: ",
    "Credit card purchase: ",
    "Credit card refund: ",
    "Deposit: ",
    "Withdrawal: ",
    "(Pending) ",
];

static DEFAULT_TABLE: LazyLock<PrefixTable> = LazyLock::new(PrefixTable::default);

/// Ordered, case-sensitive prefix list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixTable {
    prefixes: Vec<String>,
}

impl Default for PrefixTable {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIXES.iter().copied())
    }
}

impl PrefixTable {
    /// Keeps the given order as-is.
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prefixes: prefixes
                .into_iter()
                .map(Into::into)
                .filter(|p: &String| !p.is_empty())
                .collect(),
        }
    }

    pub fn prefixes(&self) -> impl Iterator<Item = &str> {
        self.prefixes.iter().map(String::as_str)
    }

    /// The prefix that `clean` would remove from `text`, if any.
    /// Leading whitespace is ignored.
    pub fn matching(&self, text: &str) -> Option<&str> {
        let text = text.trim_start();
        self.prefixes().find(|p| text.starts_with(*p))
    }

    pub fn clean(&self, text: &str) -> String {
        let text = text.trim_start();
        self.prefixes()
            .find_map(|p| text.strip_prefix(p))
            .unwrap_or(text)
            .trim()
            .to_string()
    }

    /// `(earlier, later)` index pairs where `later` starts with `earlier`,
    /// so `later` can never be the one removed. Empty for a well-ordered table.
    pub fn shadowed(&self) -> Vec<(usize, usize)> {
        let mut out = Vec::new();
        for (i, earlier) in self.prefixes.iter().enumerate() {
            for (j, later) in self.prefixes.iter().enumerate().skip(i + 1) {
                if later.starts_with(earlier.as_str()) {
                    out.push((i, j));
                }
            }
        }
        out
    }
}

/// Clean with the built-in provider table.
pub fn clean_description(text: &str) -> String {
    DEFAULT_TABLE.clean(text)
}

/// The built-in prefix `clean_description` removes from `text`, if any.
pub fn stripped_prefix(text: &str) -> Option<&'static str> {
    DEFAULT_TABLE.matching(text)
}
