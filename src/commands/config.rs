// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Config command - prints the effective configuration

use crate::config::{self, Config};
use anyhow::Result;

/// Run the config command
pub fn run(config: &Config) -> Result<()> {
    if let Some(path) = config::default_path() {
        tracing::debug!("Default configuration path: {}", path.display());
    }
    print!("{}", config.to_toml()?);
    Ok(())
}
