//! Config file loading.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context};
use diffm_types::ReconciliationConfig;
use serde::Deserialize;

use crate::cli::ConfigOverrides;

/// On-disk shape: the config itself plus the legacy single alias group.
#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(flatten)]
    config: ReconciliationConfig,
    #[serde(default, rename = "fileAlias", alias = "file_alias")]
    file_alias: Vec<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    pub fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::Toml,
            _ => Self::Json,
        }
    }
}

pub fn parse(text: &str, format: ConfigFormat) -> anyhow::Result<ReconciliationConfig> {
    let file: ConfigFile = match format {
        ConfigFormat::Json => serde_json::from_str(text).context("invalid JSON config")?,
        ConfigFormat::Toml => toml::from_str(text).context("invalid TOML config")?,
    };
    let mut config = file.config;
    if !file.file_alias.is_empty() {
        config.alias_groups.push(file.file_alias);
    }
    Ok(config)
}

pub fn load(path: &Path) -> anyhow::Result<ReconciliationConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    parse(&text, ConfigFormat::for_path(path))
        .with_context(|| format!("failed to load config {}", path.display()))
}

/// Load the config file (if present) and apply command-line overrides.
///
/// Without a config file both `--old` and `--new` are required.
pub fn resolve(path: &Path, overrides: &ConfigOverrides) -> anyhow::Result<ReconciliationConfig> {
    let mut config = if path.exists() {
        load(path)?
    } else if overrides.old.is_some() && overrides.new.is_some() {
        ReconciliationConfig::default()
    } else {
        bail!(
            "config file {} not found; pass --old and --new or --config",
            path.display()
        );
    };

    if overrides.old.is_some() || overrides.new.is_some() {
        let old = overrides.old.clone().or_else(|| config.roots.first().cloned());
        let new = overrides.new.clone().or_else(|| config.roots.last().cloned());
        config.roots = old.into_iter().chain(new).collect();
    }
    if let Some(inline) = overrides.inline {
        config.inline = inline.into();
    }
    config
        .validate()
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(config)
}
