#![allow(clippy::unwrap_used)]

use super::*;

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_empty_argv_prints_usage() {
    let dir = tempfile::tempdir().unwrap();
    let file = LedgerFile::new(dir.path().join("ledger.csv"));
    assert!(as_cli(&[], file, ReportOptions::default()).is_ok());
}

#[test]
fn test_unknown_command_fails() {
    let dir = tempfile::tempdir().unwrap();
    let file = LedgerFile::new(dir.path().join("ledger.csv"));
    let err = as_cli(&args(&["ledgerview", "frobnicate"]), file, ReportOptions::default())
        .unwrap_err();
    assert!(err.to_string().contains("frobnicate"));
}

#[test]
fn test_add_then_summary() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.csv");
    let run = |list: &[&str]| as_cli(&args(list), LedgerFile::new(&path), ReportOptions::default());

    run(&["ledgerview", "add", "2024-01-01", "Income", "1000", "Salary"]).unwrap();
    run(&["ledgerview", "add", "2024-01-05", "Expense", "40"]).unwrap();
    run(&["ledgerview", "summary"]).unwrap();

    let ledger = LedgerFile::new(&path).load().unwrap();
    assert_eq!(ledger.len(), 2);
    assert_eq!(ledger.net_worth(), rust_decimal_macros::dec!(960));
}
