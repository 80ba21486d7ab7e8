// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2026 Jonathan D.A. Jewell
#![no_main]

use cobidder::builder::{build_graph, BuildOptions};
use cobidder::ingest::read_csv;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(bids) = read_csv(data) {
        for bid in &bids {
            assert!((0.0..=100.0).contains(&bid.percentage_bid));
            assert!(!bid.company.is_empty());
        }
        let _ = build_graph(&bids, &BuildOptions::default());
    }
});
