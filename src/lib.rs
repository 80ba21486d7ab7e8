// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Cobidder library - co-bidding graphs from auction bid tables
//!
//! Companies that bid on the same auction block are linked; the weight of
//! each link is the number of blocks the two companies bid on together.
//!
//! ```
//! use cobidder::prelude::*;
//!
//! let bids = vec![
//!     Bid::new("1", "X", 50.0),
//!     Bid::new("1", "Y", 60.0),
//!     Bid::new("2", "X", 10.0),
//!     Bid::new("2", "Y", 20.0),
//! ];
//! let graph = build_graph(&bids, &BuildOptions::default());
//! assert_eq!(graph.weight("Y", "X"), Some(2));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod builder;
pub mod commands;
pub mod config;
pub mod error;
pub mod graph;
pub mod ingest;

/// Core data types of the co-bidding model
pub mod types {
    use serde::Serialize;
    use std::collections::BTreeSet;

    // =========================================================================
    // Bid (input row)
    // =========================================================================

    /// One row of the bid table
    #[derive(Debug, Clone, PartialEq, Serialize)]
    pub struct Bid {
        /// Auction lot identifier
        pub block_code: String,
        /// Bidding entity identifier
        pub company: String,
        /// Bid as a percentage (0-100 in validated input)
        pub percentage_bid: f64,
    }

    impl Bid {
        /// Create a bid record
        #[must_use]
        pub fn new(
            block_code: impl Into<String>,
            company: impl Into<String>,
            percentage_bid: f64,
        ) -> Self {
            Self {
                block_code: block_code.into(),
                company: company.into(),
                percentage_bid,
            }
        }
    }

    // =========================================================================
    // Company Pair (canonical, unordered)
    // =========================================================================

    /// Unordered pair of distinct companies, stored with `comp1 < comp2`
    #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
    pub struct CompanyPair {
        comp1: String,
        comp2: String,
    }

    impl CompanyPair {
        /// Build the canonical pair for two companies.
        ///
        /// Returns `None` when both sides name the same company, since a
        /// company never co-bids with itself.
        #[must_use]
        pub fn new(a: impl Into<String>, b: impl Into<String>) -> Option<Self> {
            let (a, b) = (a.into(), b.into());
            match a.cmp(&b) {
                std::cmp::Ordering::Less => Some(Self { comp1: a, comp2: b }),
                std::cmp::Ordering::Greater => Some(Self { comp1: b, comp2: a }),
                std::cmp::Ordering::Equal => None,
            }
        }

        /// Lexicographically smaller company
        #[must_use]
        pub fn first(&self) -> &str {
            &self.comp1
        }

        /// Lexicographically larger company
        #[must_use]
        pub fn second(&self) -> &str {
            &self.comp2
        }

        /// Whether `company` is one of the two endpoints
        #[must_use]
        pub fn contains(&self, company: &str) -> bool {
            self.comp1 == company || self.comp2 == company
        }

        /// The endpoint opposite `company`, if `company` is in the pair
        #[must_use]
        pub fn other(&self, company: &str) -> Option<&str> {
            if self.comp1 == company {
                Some(&self.comp2)
            } else if self.comp2 == company {
                Some(&self.comp1)
            } else {
                None
            }
        }
    }

    impl std::fmt::Display for CompanyPair {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{} -- {}", self.comp1, self.comp2)
        }
    }

    /// A company pair together with the number of blocks they co-bid on
    #[derive(Debug, Clone, PartialEq, Eq, Serialize)]
    pub struct PairCount {
        /// The canonical pair
        #[serde(flatten)]
        pub pair: CompanyPair,
        /// Number of distinct blocks both companies bid on
        pub count: usize,
    }

    // =========================================================================
    // Block Group
    // =========================================================================

    /// Distinct companies with a qualifying bid on one block
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct BlockGroup {
        /// Auction lot identifier
        pub block_code: String,
        /// Companies that bid on the block, deduplicated and sorted
        pub companies: BTreeSet<String>,
    }

    impl BlockGroup {
        /// Every canonical pair of companies in this block.
        ///
        /// Companies are iterated in sorted order, so each pair comes out
        /// already canonical. Groups of fewer than two companies yield nothing.
        #[must_use]
        pub fn pairs(&self) -> Vec<CompanyPair> {
            let companies: Vec<&String> = self.companies.iter().collect();
            let n = companies.len();
            let mut pairs = Vec::with_capacity(n * n.saturating_sub(1) / 2);
            for (i, a) in companies.iter().enumerate() {
                for b in &companies[i + 1..] {
                    pairs.push(CompanyPair {
                        comp1: (*a).clone(),
                        comp2: (*b).clone(),
                    });
                }
            }
            pairs
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_pair_is_order_insensitive() {
            let ab = CompanyPair::new("alpha", "beta").unwrap();
            let ba = CompanyPair::new("beta", "alpha").unwrap();

            assert_eq!(ab, ba);
            assert_eq!(ab.first(), "alpha");
            assert_eq!(ab.second(), "beta");
        }

        #[test]
        fn test_pair_rejects_self() {
            assert!(CompanyPair::new("acme", "acme").is_none());
        }

        #[test]
        fn test_pair_other() {
            let pair = CompanyPair::new("b", "a").unwrap();
            assert_eq!(pair.other("a"), Some("b"));
            assert_eq!(pair.other("b"), Some("a"));
            assert_eq!(pair.other("c"), None);
            assert!(pair.contains("a"));
            assert_eq!(pair.to_string(), "a -- b");
        }

        #[test]
        fn test_block_group_pairs() {
            let group = BlockGroup {
                block_code: "7".into(),
                companies: ["c", "a", "b"].iter().map(|s| (*s).to_string()).collect(),
            };

            let pairs = group.pairs();
            assert_eq!(pairs.len(), 3);
            assert_eq!(pairs[0], CompanyPair::new("a", "b").unwrap());
            assert_eq!(pairs[1], CompanyPair::new("a", "c").unwrap());
            assert_eq!(pairs[2], CompanyPair::new("b", "c").unwrap());
        }

        #[test]
        fn test_singleton_group_has_no_pairs() {
            let group = BlockGroup {
                block_code: "3".into(),
                companies: std::iter::once("W".to_string()).collect(),
            };
            assert!(group.pairs().is_empty());
        }
    }
}

/// Prelude for common imports
pub mod prelude {
    pub use crate::builder::{
        build_graph, count_pairs, group_by_block, qualifying_bids, BuildOptions,
    };
    pub use crate::error::IngestError;
    pub use crate::graph::CobidGraph;
    pub use crate::types::*;
    pub use anyhow::{Context, Result};
}
