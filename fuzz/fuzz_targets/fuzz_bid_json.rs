// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2026 Jonathan D.A. Jewell
#![no_main]

use cobidder::ingest::read_json;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(bids) = read_json(data) {
        assert!(bids.iter().all(|b| b.percentage_bid.is_finite()));
    }
});
