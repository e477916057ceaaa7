//! CLI Tests
//!
//! Runs whole commands through `cli::run` against the mock server and checks
//! what they print.

mod common;

use clap::Parser;
use common::spawn_mock;
use esbench::cli::{self, Cli};
use tempfile::TempDir;

fn run(args: &[&str]) -> String {
    colored::control::set_override(false);
    let cli = Cli::try_parse_from(args.iter().copied()).unwrap();
    let mut out = Vec::new();
    cli::run(cli, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_ping_prints_cluster() {
    let mock = spawn_mock();
    for transport in ["reqwest", "ureq"] {
        let output = run(&["esbench", "ping", "--url", &mock.url, "--transport", transport]);
        assert_eq!(output, "✓ mock-cluster (mock-node) version 8.13.0\n");
    }
}

#[test]
fn test_ping_unreachable_server_fails() {
    let cli = Cli::try_parse_from(["esbench", "ping", "--url", "http://127.0.0.1:1"]).unwrap();
    let mut out = Vec::new();
    assert!(cli::run(cli, &mut out).is_err());
    assert!(out.is_empty());
}

#[test]
fn test_import_prints_benchmark_tuple() {
    let mock = spawn_mock();
    let output = run(&[
        "esbench",
        "import",
        "--url",
        &mock.url,
        "--transport",
        "ureq",
        "--docs",
        "20",
        "--per-page",
        "10",
        "--seed",
        "1",
        "--index",
        "cli-import",
    ]);

    let lines: Vec<&str> = output.lines().collect();
    // header, four steps, total, tuple, separator
    assert_eq!(lines.len(), 8);
    assert_eq!(lines[0], "import over ureq");
    assert!(lines[6].starts_with("[\"Benchmark\", "), "{}", lines[6]);
    assert!(lines[6].ends_with(']'));
    assert_eq!(lines[7], "-".repeat(80));
    assert_eq!(mock.doc_count("cli-import"), 20);
}

#[test]
fn test_compare_prints_tuples_and_writes_csv() {
    let mock = spawn_mock();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("compare.csv");
    let output = run(&[
        "esbench",
        "compare",
        "--url",
        &mock.url,
        "--docs",
        "5",
        "--per-page",
        "5",
        "--rounds",
        "0",
        "--index",
        "cli",
        "--csv",
        path.to_str().unwrap(),
    ]);

    let tuples: Vec<&str> = output.lines().filter(|l| l.starts_with('[')).collect();
    assert_eq!(tuples.len(), 2);
    assert!(tuples[0].starts_with("[\"reqwest\", "));
    assert!(tuples[1].starts_with("[\"ureq\", "));
    let last = output.lines().last().unwrap();
    assert!(last.contains(" faster than "), "{}", last);

    assert_eq!(mock.doc_count("cli-reqwest"), 5);
    assert_eq!(mock.doc_count("cli-ureq"), 5);
    let rows = csv::Reader::from_path(&path).unwrap().records().count();
    assert_eq!(rows, 16);
}
