//! `wsmonarch rules ...`: inspect the category rules a run would use.

use anyhow::Result;
use std::path::Path;

use wsmonarch_finance::{RuleMatch, RuleSet, clean_description, load_rules, stripped_prefix};

pub fn show_rules(path: &Path) -> Result<()> {
    let rules = load_rules(path);
    println!("Rules file: {}\n", path.display());
    if rules.is_empty() {
        println!("(no rules; every transaction stays uncategorized)");
        return Ok(());
    }
    print!("{}", render_rules(&rules));
    Ok(())
}

/// Rules in the order they are evaluated
pub fn render_rules(rules: &RuleSet) -> String {
    let mut out = String::new();
    out.push_str("## Type rules\n");
    for (i, rule) in rules.type_rules.iter().enumerate() {
        match &rule.subtype {
            Some(sub) => out.push_str(&format!("{:>3}. {} / {} -> {}\n", i + 1, rule.kind, sub, rule.category)),
            None => out.push_str(&format!("{:>3}. {} -> {}\n", i + 1, rule.kind, rule.category)),
        }
    }
    out.push_str("\n## Merchant rules\n");
    for (i, rule) in rules.merchant_rules.iter().enumerate() {
        out.push_str(&format!("{:>3}. {:?} -> {}\n", i + 1, rule.keyword, rule.category));
    }
    out
}

pub fn test_rules(path: &Path, kind: &str, subtype: Option<&str>, description: Option<&str>) -> Result<()> {
    let rules = load_rules(path);
    print!("{}", explain(&rules, kind, subtype, description));
    Ok(())
}

/// Prefix stripped, merchant the rules see, and the category they give.
fn explain(
    rules: &RuleSet,
    kind: &str,
    subtype: Option<&str>,
    description: Option<&str>,
) -> String {
    let mut out = String::new();
    if let Some(prefix) = description.and_then(stripped_prefix) {
        out.push_str(&format!("stripped: {:?}\n", prefix));
    }
    let merchant = match description.map(clean_description) {
        Some(m) if !m.is_empty() => m,
        _ => kind.to_string(),
    };
    out.push_str(&format!("merchant: {}\n", merchant));
    out.push_str(&describe_match(rules, kind, subtype, &merchant));
    out.push('\n');
    out
}

fn describe_match(rules: &RuleSet, kind: &str, subtype: Option<&str>, merchant: &str) -> String {
    match rules.classify(kind, subtype, merchant) {
        Some((RuleMatch::Type(i), category)) => format!("category: {} (type rule #{})", category, i + 1),
        Some((RuleMatch::Merchant(i), category)) => {
            format!("category: {} (merchant rule #{})", category, i + 1)
        }
        None => "category: (none)".to_string(),
    }
}
