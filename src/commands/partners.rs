// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Partners command - lists the co-bidders of one company

use crate::builder::BuildOptions;
use crate::ingest::InputFormat;
use anyhow::Result;
use std::path::Path;

/// Run the partners command
pub fn run(
    input: &Path,
    format: Option<InputFormat>,
    company: &str,
    options: &BuildOptions,
) -> Result<()> {
    let graph = super::load_graph(input, format, options)?;

    let partners = graph.co_bidders(company);
    if partners.is_empty() {
        println!("{} has no co-bidders below {}%", company, options.threshold);
        return Ok(());
    }

    println!("Co-bidders of {} ({}):", company, partners.len());
    for (partner, count) in partners {
        let blocks = if count == 1 { "block" } else { "blocks" };
        println!("  {:<24} {} {}", partner, count, blocks);
    }

    Ok(())
}
