use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use wsmonarch_finance::MissingSignPolicy;

use crate::state::{config_path, default_rules_path, ensure_wsmonarch_home};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub rules: RulesSection,
    pub output: OutputSection,
    pub amounts: AmountsSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesSection {
    /// Category rules file (default: ~/.wsmonarch/category_rules.toml)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    pub dir: PathBuf,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("output"),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AmountsSection {
    pub missing_sign: MissingSignPolicy,
}

impl Config {
    /// `--rules` beats the config file, which beats the default location.
    pub fn rules_path(&self, flag: Option<PathBuf>) -> Result<PathBuf> {
        match flag.or_else(|| self.rules.path.clone()) {
            Some(p) => Ok(p),
            None => default_rules_path(),
        }
    }
}

pub fn load_config() -> Result<Config> {
    let p = config_path()?;
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    parse_config(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn parse_config(s: &str) -> Result<Config> {
    Ok(toml::from_str(s)?)
}

pub fn save_config(cfg: &Config) -> Result<()> {
    ensure_wsmonarch_home()?;
    let p = config_path()?;
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    let cfg = Config {
        rules: RulesSection {
            path: Some(default_rules_path()?),
        },
        ..Config::default()
    };
    save_config(&cfg)?;
    println!("Wrote {}", p.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_default() {
        let cfg = parse_config("").unwrap();
        assert_eq!(cfg.output.dir, PathBuf::from("output"));
        assert_eq!(cfg.amounts.missing_sign, MissingSignPolicy::AssumePositive);
        assert!(cfg.rules.path.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let cfg = parse_config(
            r#"
[rules]
path = "/tmp/rules.toml"

[output]
dir = "csv"

[amounts]
missing_sign = "reject"
"#,
        )
        .unwrap();
        assert_eq!(cfg.rules.path, Some(PathBuf::from("/tmp/rules.toml")));
        assert_eq!(cfg.output.dir, PathBuf::from("csv"));
        assert_eq!(cfg.amounts.missing_sign, MissingSignPolicy::Reject);
    }

    #[test]
    fn test_rules_flag_overrides_config() {
        let cfg = parse_config("[rules]\npath = \"/from/config.toml\"\n").unwrap();
        assert_eq!(
            cfg.rules_path(Some(PathBuf::from("/from/flag.toml"))).unwrap(),
            PathBuf::from("/from/flag.toml")
        );
        assert_eq!(cfg.rules_path(None).unwrap(), PathBuf::from("/from/config.toml"));
    }

    #[test]
    fn test_unknown_policy_is_rejected() {
        assert!(parse_config("[amounts]\nmissing_sign = \"guess\"\n").is_err());
    }

    #[test]
    fn test_config_round_trip() {
        let cfg = Config::default();
        let text = toml::to_string_pretty(&cfg).unwrap();
        let back = parse_config(&text).unwrap();
        assert_eq!(back.output.dir, cfg.output.dir);
        assert_eq!(back.amounts.missing_sign, cfg.amounts.missing_sign);
    }
}
