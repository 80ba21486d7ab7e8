// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Top command - strongest co-bidding pairs

use crate::builder::BuildOptions;
use crate::ingest::InputFormat;
use anyhow::Result;
use std::path::Path;

/// Run the top command
pub fn run(
    input: &Path,
    format: Option<InputFormat>,
    limit: usize,
    options: &BuildOptions,
) -> Result<()> {
    if limit == 0 {
        anyhow::bail!("Number of pairs to show must be at least 1");
    }

    let graph = super::load_graph(input, format, options)?;

    let top = graph.strongest_pairs(limit);
    if top.is_empty() {
        println!("No co-bidding pairs found.");
        return Ok(());
    }

    println!("Top {} co-bidding pairs:", top.len());
    for (rank, edge) in top.iter().enumerate() {
        println!("  {:>3}. {:<40} {}", rank + 1, edge.pair.to_string(), edge.count);
    }

    Ok(())
}
