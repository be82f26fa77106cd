use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

pub fn wsmonarch_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".wsmonarch"))
}

pub fn ensure_wsmonarch_home() -> Result<PathBuf> {
    let dir = wsmonarch_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

pub fn config_path() -> Result<PathBuf> {
    Ok(wsmonarch_home()?.join("config.toml"))
}

/// Where rules live when neither the config nor `--rules` says otherwise
pub fn default_rules_path() -> Result<PathBuf> {
    Ok(wsmonarch_home()?.join("category_rules.toml"))
}
