// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Integration tests for the cobidder CLI commands

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const BIDS_CSV: &str = "\
block_code,company,percentage_bid
1,X,50
1,Y,60
1,Z,100
2,X,10
2,Y,20
2,W,30
3,V,5
";

/// Write a bid table into the temp dir and return its path
fn write_bids(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

/// A cobidder command isolated from any user configuration
fn cobidder(dir: &TempDir) -> Command {
    let config = dir.path().join("config.toml");
    if !config.exists() {
        fs::write(&config, "").unwrap();
    }
    let mut cmd = Command::cargo_bin("cobidder").unwrap();
    cmd.env("COBIDDER_CONFIG", &config).arg("--quiet");
    cmd
}

#[test]
fn test_build_json_to_stdout() {
    let dir = TempDir::new().unwrap();
    let input = write_bids(&dir, "bids.csv", BIDS_CSV);

    let output = cobidder(&dir).arg("build").arg(&input).output().unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let companies: Vec<&str> = value["companies"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c.as_str().unwrap())
        .collect();
    assert_eq!(companies, vec!["W", "X", "Y"]);

    let edges = value["edges"].as_array().unwrap();
    assert_eq!(edges.len(), 3);
    assert_eq!(edges[2]["comp1"], "X");
    assert_eq!(edges[2]["comp2"], "Y");
    assert_eq!(edges[2]["count"], 2);
}

#[test]
fn test_build_csv_to_file() {
    let dir = TempDir::new().unwrap();
    let input = write_bids(&dir, "bids.csv", BIDS_CSV);
    let out = dir.path().join("edges.csv");

    cobidder(&dir)
        .args(["build", "--emit", "csv", "--output"])
        .arg(&out)
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("3 companies and 3 edges"));

    let written = fs::read_to_string(&out).unwrap();
    assert_eq!(written, "comp1,comp2,count\nW,X,1\nW,Y,1\nX,Y,2\n");
}

#[test]
fn test_build_json_input() {
    let dir = TempDir::new().unwrap();
    let input = write_bids(
        &dir,
        "bids.json",
        r#"[
            {"block_code": 1, "company": "A", "percentage_bid": 10},
            {"block_code": 1, "company": "B", "percentage_bid": 20}
        ]"#,
    );

    cobidder(&dir)
        .args(["build", "--emit", "csv"])
        .arg(&input)
        .assert()
        .success()
        .stdout("comp1,comp2,count\nA,B,1\n");
}

#[test]
fn test_threshold_override() {
    let dir = TempDir::new().unwrap();
    let input = write_bids(&dir, "bids.csv", BIDS_CSV);

    cobidder(&dir)
        .args(["build", "--emit", "csv", "--threshold", "55"])
        .arg(&input)
        .assert()
        .success()
        .stdout("comp1,comp2,count\nW,X,1\nW,Y,1\nX,Y,1\n");
}

#[test]
fn test_threshold_from_config_file() {
    let dir = TempDir::new().unwrap();
    let input = write_bids(&dir, "bids.csv", BIDS_CSV);
    fs::write(dir.path().join("config.toml"), "[build]\nthreshold = 15.0\n").unwrap();

    cobidder(&dir)
        .args(["build", "--emit", "csv"])
        .arg(&input)
        .assert()
        .success()
        .stdout("comp1,comp2,count\n");
}

#[test]
fn test_malformed_row_fails() {
    let dir = TempDir::new().unwrap();
    let input = write_bids(
        &dir,
        "bad.csv",
        "block_code,company,percentage_bid\n1,X,50\n1,Y,lots\n",
    );

    cobidder(&dir)
        .arg("build")
        .arg(&input)
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("row 2").and(predicate::str::contains("percentage_bid")));
}

#[test]
fn test_unknown_extension_needs_format() {
    let dir = TempDir::new().unwrap();
    let input = write_bids(&dir, "bids.txt", BIDS_CSV);

    cobidder(&dir)
        .arg("build")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown input format"));

    cobidder(&dir)
        .args(["build", "--format", "csv", "--emit", "csv"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("X,Y,2"));
}

#[test]
fn test_partners() {
    let dir = TempDir::new().unwrap();
    let input = write_bids(&dir, "bids.csv", BIDS_CSV);

    cobidder(&dir)
        .arg("partners")
        .arg(&input)
        .arg("X")
        .assert()
        .success()
        .stdout(predicate::str::contains("Co-bidders of X (2)"))
        .stdout(predicate::str::contains("2 blocks"));

    cobidder(&dir)
        .arg("partners")
        .arg(&input)
        .arg("V")
        .assert()
        .success()
        .stdout(predicate::str::contains("V has no co-bidders"));
}

#[test]
fn test_top() {
    let dir = TempDir::new().unwrap();
    let input = write_bids(&dir, "bids.csv", BIDS_CSV);

    cobidder(&dir)
        .args(["top", "-n", "1"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Top 1 co-bidding pairs"))
        .stdout(predicate::str::contains("X -- Y"));
}

#[test]
fn test_top_rejects_zero_limit() {
    let dir = TempDir::new().unwrap();
    let input = write_bids(&dir, "bids.csv", BIDS_CSV);

    cobidder(&dir)
        .args(["top", "-n", "0"])
        .arg(&input)
        .assert()
        .failure()
        .stdout(predicate::str::contains("No co-bidding pairs found").not());
}

#[test]
fn test_json_input_with_wrong_cell_type_fails() {
    let dir = TempDir::new().unwrap();
    let input = write_bids(
        &dir,
        "bids.json",
        r#"[
            {"block_code": 1, "company": "A", "percentage_bid": 10},
            {"block_code": 1, "company": true, "percentage_bid": 20}
        ]"#,
    );

    cobidder(&dir)
        .arg("build")
        .arg(&input)
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("row 2").and(predicate::str::contains("company")));
}

#[test]
fn test_rust_log_overrides_quiet() {
    let dir = TempDir::new().unwrap();
    let input = write_bids(&dir, "bids.csv", BIDS_CSV);

    cobidder(&dir)
        .env("RUST_LOG", "info")
        .args(["build", "--emit", "csv"])
        .arg(&input)
        .assert()
        .success()
        .stderr(predicate::str::contains("built co-bidder graph"));

    cobidder(&dir)
        .env_remove("RUST_LOG")
        .args(["build", "--emit", "csv"])
        .arg(&input)
        .assert()
        .success()
        .stderr(predicate::str::contains("built co-bidder graph").not());
}

#[test]
fn test_config_prints_toml() {
    let dir = TempDir::new().unwrap();

    cobidder(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("log_level = \"info\""))
        .stdout(predicate::str::contains("threshold = 100.0"));
}

#[test]
fn test_invalid_config_fails() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("config.toml"), "[build]\nthreshold = 250.0\n").unwrap();

    cobidder(&dir)
        .arg("config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("threshold"));
}
