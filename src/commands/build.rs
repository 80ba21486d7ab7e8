// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Build command - ingests a bid table and writes the co-bidder graph

use crate::builder::BuildOptions;
use crate::ingest::InputFormat;
use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{info, warn};

/// Supported output encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmitFormat {
    /// `{ "companies": [...], "edges": [...] }`
    Json,
    /// `comp1,comp2,count` table
    Csv,
}

impl FromStr for EmitFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" | "edges" => Ok(Self::Csv),
            other => anyhow::bail!("Unknown output format: {}. Supported: json, csv", other),
        }
    }
}

/// Run the build command
pub fn run(
    input: &Path,
    format: Option<InputFormat>,
    emit: EmitFormat,
    output: Option<PathBuf>,
    options: &BuildOptions,
) -> Result<()> {
    info!("Building co-bidder graph from {}", input.display());

    let graph = super::load_graph(input, format, options)?;
    if graph.is_empty() {
        warn!("No companies co-bid below {}%", options.threshold);
    }

    let content = match emit {
        EmitFormat::Json => graph.to_json()?,
        EmitFormat::Csv => graph.to_edge_list_csv()?,
    };

    match output {
        Some(path) => {
            fs::write(&path, &content)
                .with_context(|| format!("Failed to write to {}", path.display()))?;
            println!(
                "Wrote {} companies and {} edges to {}",
                graph.node_count(),
                graph.edge_count(),
                path.display()
            );
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            if !content.ends_with('\n') {
                stdout.write_all(b"\n")?;
            }
        }
    }

    Ok(())
}
