// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Command implementations

pub mod build;
pub mod config;
pub mod partners;
pub mod top;

use crate::builder::{build_graph, BuildOptions};
use crate::graph::CobidGraph;
use crate::ingest::{self, InputFormat};
use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

/// Read a bid table and build its co-bidder graph
pub fn load_graph(
    input: &Path,
    format: Option<InputFormat>,
    options: &BuildOptions,
) -> Result<CobidGraph> {
    let bids = ingest::read_path(input, format)
        .with_context(|| format!("Failed to read bids from {}", input.display()))?;

    let graph = build_graph(&bids, options);
    info!(
        bids = bids.len(),
        companies = graph.node_count(),
        edges = graph.edge_count(),
        "built co-bidder graph"
    );

    Ok(graph)
}
