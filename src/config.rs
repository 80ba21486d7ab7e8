// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Configuration management

use crate::builder::BuildOptions;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Graph construction options
    pub build: BuildOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            build: BuildOptions::default(),
        }
    }
}

impl Config {
    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Render configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }

    fn validate(&self) -> Result<()> {
        let t = self.build.threshold;
        if !t.is_finite() || !(0.0..=100.0).contains(&t) {
            anyhow::bail!("build.threshold must be within 0..=100, got {}", t);
        }
        Ok(())
    }
}

/// Default location of the configuration file
#[must_use]
pub fn default_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("org", "hyperpolymath", "cobidder")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Load configuration from disk or use defaults.
///
/// An explicit path must exist; the default location is optional.
pub fn load(path: Option<&Path>) -> Result<Config> {
    if let Some(path) = path {
        return load_file(path);
    }

    match default_path() {
        Some(path) if path.exists() => load_file(&path),
        _ => {
            debug!("No configuration file found, using defaults");
            Ok(Config::default())
        }
    }
}

fn load_file(path: &Path) -> Result<Config> {
    debug!(path = %path.display(), "loading configuration");
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Config::from_toml(&content)
        .with_context(|| format!("Invalid configuration in {}", path.display()))
}
