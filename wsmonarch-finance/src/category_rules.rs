//! User-defined category rules and the first-match categorizer.
//!
//! Type rules are scanned first, then merchant keyword rules, each in file
//! order. The first rule that matches decides; no match means an empty
//! category, left for the user to fill in inside Monarch.

use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Matches on transaction type, and on subtype when the rule names one
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRule {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
    pub category: String,
}

impl TypeRule {
    pub fn new(kind: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            subtype: None,
            category: category.into(),
        }
    }

    pub fn with_subtype(mut self, subtype: impl Into<String>) -> Self {
        self.subtype = Some(subtype.into());
        self
    }

    pub fn matches(&self, kind: &str, sub_type: Option<&str>) -> bool {
        self.kind == kind
            && match &self.subtype {
                None => true,
                Some(want) => sub_type == Some(want.as_str()),
            }
    }
}

/// Case-insensitive keyword anywhere in the cleaned merchant name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerchantRule {
    pub keyword: String,
    pub category: String,
}

impl MerchantRule {
    pub fn new(keyword: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            category: category.into(),
        }
    }

    /// `merchant_lower` must already be lowercased.
    fn matches_lowered(&self, merchant_lower: &str) -> bool {
        merchant_lower.contains(&self.keyword.to_lowercase())
    }
}

/// Which rule decided a category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleMatch {
    Type(usize),
    Merchant(usize),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    #[serde(default)]
    pub type_rules: Vec<TypeRule>,
    #[serde(default)]
    pub merchant_rules: Vec<MerchantRule>,
}

impl RuleSet {
    pub fn new(type_rules: Vec<TypeRule>, merchant_rules: Vec<MerchantRule>) -> Self {
        Self {
            type_rules,
            merchant_rules,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.type_rules.is_empty() && self.merchant_rules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.type_rules.len() + self.merchant_rules.len()
    }

    /// Parse a TOML rules document. Blank keywords would match every
    /// merchant, so those rules are dropped.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let mut rules: RuleSet = toml::from_str(s).context("parse category rules")?;
        rules.merchant_rules.retain(|rule| {
            let keep = !rule.keyword.trim().is_empty();
            if !keep {
                warn!("dropping merchant rule with empty keyword (category {:?})", rule.category);
            }
            keep
        });
        Ok(rules)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        Self::from_toml_str(&s).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("serialize category rules")
    }

    /// First matching rule and its category.
    pub fn classify(&self, kind: &str, sub_type: Option<&str>, merchant: &str) -> Option<(RuleMatch, &str)> {
        if let Some((i, rule)) = self
            .type_rules
            .iter()
            .enumerate()
            .find(|(_, rule)| rule.matches(kind, sub_type))
        {
            return Some((RuleMatch::Type(i), rule.category.as_str()));
        }

        let merchant_lower = merchant.to_lowercase();
        self.merchant_rules
            .iter()
            .enumerate()
            .find(|(_, rule)| rule.matches_lowered(&merchant_lower))
            .map(|(i, rule)| (RuleMatch::Merchant(i), rule.category.as_str()))
    }
}

/// Category for a transaction, or `""` when no rule matches.
pub fn categorize<'r>(kind: &str, sub_type: Option<&str>, merchant: &str, rules: &'r RuleSet) -> &'r str {
    rules
        .classify(kind, sub_type, merchant)
        .map(|(_, category)| category)
        .unwrap_or("")
}

/// Load the rules file for a run. Any problem leaves the run uncategorized
/// instead of failing it.
pub fn load_rules(path: &Path) -> RuleSet {
    if !path.exists() {
        warn!(
            "category rules file not found: {}; transactions will not be categorized",
            path.display()
        );
        return RuleSet::default();
    }
    match RuleSet::load(path) {
        Ok(rules) => {
            info!(
                "loaded {} type rules and {} merchant rules from {}",
                rules.type_rules.len(),
                rules.merchant_rules.len(),
                path.display()
            );
            rules
        }
        Err(e) => {
            warn!("ignoring category rules: {:#}", e);
            RuleSet::default()
        }
    }
}
