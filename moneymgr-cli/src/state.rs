use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// `$MONEYMGR_HOME`, or `~/.moneymgr`.
pub fn moneymgr_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("MONEYMGR_HOME") {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".moneymgr"))
}

pub fn ensure_moneymgr_home() -> Result<PathBuf> {
    let dir = moneymgr_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}
