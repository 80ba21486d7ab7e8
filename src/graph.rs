// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! The co-bidder graph with petgraph backing for algorithms

use crate::types::{CompanyPair, PairCount};
use anyhow::{Context, Result};
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Undirected graph of companies weighted by co-bid count
#[derive(Debug, Clone)]
pub struct CobidGraph {
    /// Company names on nodes, co-bid counts on edges
    graph: UnGraph<String, usize>,
    /// Map from company to node index
    node_indices: HashMap<String, NodeIndex>,
}

/// Serialised form: node list plus `comp1`/`comp2`/`count` edge rows
#[derive(Serialize)]
struct GraphDocument<'a> {
    companies: Vec<&'a str>,
    edges: Vec<PairCount>,
}

impl Default for CobidGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl CobidGraph {
    /// Create a new empty graph
    #[must_use]
    pub fn new() -> Self {
        Self {
            graph: UnGraph::new_undirected(),
            node_indices: HashMap::new(),
        }
    }

    /// Build a graph from counted pairs.
    ///
    /// Nodes are inserted in sorted company order and edges in sorted pair
    /// order, so equal inputs give identical graphs. Pairs with a zero count
    /// are skipped; a pair listed twice has its counts summed.
    #[must_use]
    pub fn from_pair_counts<I>(counts: I) -> Self
    where
        I: IntoIterator<Item = PairCount>,
    {
        let mut merged: BTreeMap<CompanyPair, usize> = BTreeMap::new();
        for pc in counts {
            if pc.count > 0 {
                *merged.entry(pc.pair).or_insert(0) += pc.count;
            }
        }

        let companies: BTreeSet<&str> = merged
            .keys()
            .flat_map(|pair| [pair.first(), pair.second()])
            .collect();

        let mut graph = UnGraph::with_capacity(companies.len(), merged.len());
        let mut node_indices = HashMap::with_capacity(companies.len());
        for company in companies {
            let idx = graph.add_node(company.to_string());
            node_indices.insert(company.to_string(), idx);
        }

        for (pair, count) in &merged {
            let a = node_indices[pair.first()];
            let b = node_indices[pair.second()];
            graph.add_edge(a, b, *count);
        }

        Self { graph, node_indices }
    }

    /// Get node count
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Get edge count
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Check if the graph is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// All companies, sorted
    #[must_use]
    pub fn companies(&self) -> Vec<&str> {
        self.graph
            .node_indices()
            .map(|idx| self.graph[idx].as_str())
            .collect()
    }

    /// Whether a company has at least one co-bidder
    #[must_use]
    pub fn contains_company(&self, company: &str) -> bool {
        self.node_indices.contains_key(company)
    }

    /// All edges with their weights, sorted by pair
    #[must_use]
    pub fn edges(&self) -> Vec<PairCount> {
        self.graph
            .edge_references()
            .filter_map(|e| {
                let pair = CompanyPair::new(
                    self.graph[e.source()].as_str(),
                    self.graph[e.target()].as_str(),
                )?;
                Some(PairCount {
                    pair,
                    count: *e.weight(),
                })
            })
            .collect()
    }

    /// Co-bid count for two companies, in either order
    #[must_use]
    pub fn weight(&self, a: &str, b: &str) -> Option<usize> {
        let a = self.node_indices.get(a)?;
        let b = self.node_indices.get(b)?;
        self.graph.find_edge(*a, *b).map(|e| self.graph[e])
    }

    /// Number of distinct co-bidders of a company (0 if unknown)
    #[must_use]
    pub fn degree(&self, company: &str) -> usize {
        self.node_indices
            .get(company)
            .map_or(0, |idx| self.graph.edges(*idx).count())
    }

    /// Co-bidders of a company, heaviest first, then by name
    #[must_use]
    pub fn co_bidders(&self, company: &str) -> Vec<(&str, usize)> {
        let Some(&idx) = self.node_indices.get(company) else {
            return vec![];
        };

        let mut partners: Vec<(&str, usize)> = self
            .graph
            .edges(idx)
            .map(|e| {
                let other = if e.source() == idx { e.target() } else { e.source() };
                (self.graph[other].as_str(), *e.weight())
            })
            .collect();
        partners.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        partners
    }

    /// The `n` heaviest edges, ties broken by pair order
    #[must_use]
    pub fn strongest_pairs(&self, n: usize) -> Vec<PairCount> {
        let mut edges = self.edges();
        edges.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.pair.cmp(&b.pair)));
        edges.truncate(n);
        edges
    }

    /// Borrow the underlying petgraph for external algorithms
    #[must_use]
    pub fn as_petgraph(&self) -> &UnGraph<String, usize> {
        &self.graph
    }

    /// Export to JSON
    pub fn to_json(&self) -> Result<String> {
        let doc = GraphDocument {
            companies: self.companies(),
            edges: self.edges(),
        };
        serde_json::to_string_pretty(&doc).context("Failed to serialize graph to JSON")
    }

    /// Export the `comp1,comp2,count` edge table
    pub fn to_edge_list_csv(&self) -> Result<String> {
        let mut wtr = csv::Writer::from_writer(Vec::new());
        wtr.write_record(["comp1", "comp2", "count"])?;
        for edge in self.edges() {
            let count = edge.count.to_string();
            wtr.write_record([edge.pair.first(), edge.pair.second(), count.as_str()])?;
        }
        let bytes = wtr.into_inner().context("Failed to flush edge list")?;
        String::from_utf8(bytes).context("Edge list is not valid UTF-8")
    }
}
