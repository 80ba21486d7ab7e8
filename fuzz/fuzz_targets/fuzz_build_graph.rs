// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2026 Jonathan D.A. Jewell
#![no_main]

use arbitrary::Arbitrary;
use cobidder::builder::{build_graph, BuildOptions};
use cobidder::types::Bid;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct FuzzBid {
    block: u8,
    company: u8,
    pct: u8,
}

fuzz_target!(|rows: Vec<FuzzBid>| {
    let bids: Vec<Bid> = rows
        .iter()
        .map(|r| {
            let company = format!("c{}", r.company % 32);
            Bid::new(r.block.to_string(), company, f64::from(r.pct % 101))
        })
        .collect();

    let graph = build_graph(&bids, &BuildOptions::default());
    for edge in graph.edges() {
        assert_ne!(edge.pair.first(), edge.pair.second());
        assert!(edge.count >= 1);
        assert_eq!(graph.weight(edge.pair.second(), edge.pair.first()), Some(edge.count));
    }
});
