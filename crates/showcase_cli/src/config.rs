//! Page configuration file handling
//!
//! The runtime reads its knobs from `showcase.toml` in the site directory.
//! A missing file means the stock configuration.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use showcase_core::ShowcaseConfig;

pub const CONFIG_FILE: &str = "showcase.toml";

/// Load `showcase.toml` from `dir`, or the defaults when it is absent
pub fn load_from_dir(dir: &Path) -> Result<ShowcaseConfig> {
    let config_path = dir.join(CONFIG_FILE);

    if !config_path.exists() {
        tracing::debug!("no {} in {}; using defaults", CONFIG_FILE, dir.display());
        return Ok(ShowcaseConfig::default());
    }

    let content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read {}", config_path.display()))?;

    let config = ShowcaseConfig::from_toml_str(&content)
        .with_context(|| format!("Failed to parse {}", config_path.display()))?;

    Ok(config)
}
