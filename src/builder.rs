// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Co-bidder graph construction
//!
//! filter -> group by block -> enumerate pairs -> count -> graph

use crate::graph::CobidGraph;
use crate::types::{Bid, BlockGroup, CompanyPair, PairCount};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, instrument};

/// Bids at or above this percentage never qualify
pub const DEFAULT_THRESHOLD: f64 = 100.0;

/// Options for building a co-bidder graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildOptions {
    /// Exclusive upper bound on `percentage_bid` for a bid to count
    pub threshold: f64,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl BuildOptions {
    /// Whether a bid passes the percentage filter
    #[must_use]
    pub fn qualifies(&self, bid: &Bid) -> bool {
        bid.percentage_bid < self.threshold
    }
}

/// Bids strictly below the threshold
pub fn qualifying_bids<'a>(
    bids: &'a [Bid],
    options: &'a BuildOptions,
) -> impl Iterator<Item = &'a Bid> + 'a {
    bids.iter().filter(move |bid| options.qualifies(bid))
}

/// Partition bids by block code, collapsing repeat bids from one company.
///
/// Groups come back ordered by block code.
pub fn group_by_block<'a, I>(bids: I) -> Vec<BlockGroup>
where
    I: IntoIterator<Item = &'a Bid>,
{
    let mut blocks: BTreeMap<&str, BTreeSet<String>> = BTreeMap::new();
    for bid in bids {
        blocks
            .entry(bid.block_code.as_str())
            .or_default()
            .insert(bid.company.clone());
    }

    blocks
        .into_iter()
        .map(|(block_code, companies)| BlockGroup {
            block_code: block_code.to_string(),
            companies,
        })
        .collect()
}

/// Count in how many blocks each company pair co-bid.
///
/// The result is ordered by pair and every count is at least 1.
#[instrument(skip_all, fields(bids = bids.len()))]
pub fn count_pairs(bids: &[Bid], options: &BuildOptions) -> Vec<PairCount> {
    let groups = group_by_block(qualifying_bids(bids, options));

    let mut counts: BTreeMap<CompanyPair, usize> = BTreeMap::new();
    let mut contributing = 0usize;
    for group in &groups {
        let pairs = group.pairs();
        if !pairs.is_empty() {
            contributing += 1;
        }
        for pair in pairs {
            *counts.entry(pair).or_insert(0) += 1;
        }
    }

    debug!(
        blocks = groups.len(),
        contributing,
        pairs = counts.len(),
        "counted co-bidding pairs"
    );

    counts
        .into_iter()
        .map(|(pair, count)| PairCount { pair, count })
        .collect()
}

/// Build the undirected co-bidder graph for a bid table
pub fn build_graph(bids: &[Bid], options: &BuildOptions) -> CobidGraph {
    CobidGraph::from_pair_counts(count_pairs(bids, options))
}
