#![allow(clippy::unwrap_used)]

use std::io::Write;

use super::*;

#[test]
fn test_empty_config_uses_defaults() {
    let config = Config::parse("").unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.expense_scope, ExpenseScope::Outflows);
    assert_eq!(config.outflow_totals, OutflowTotals::Signed);
}

#[test]
fn test_parse_all_keys() {
    let config = Config::parse(
        r#"
        ledger_path = "/tmp/money.csv"
        expense_scope = "expense-only"
        outflow_totals = "magnitude"
        "#,
    )
    .unwrap();

    assert_eq!(config.ledger_path, Some(PathBuf::from("/tmp/money.csv")));
    let options = config.report_options();
    assert_eq!(options.expense_scope, ExpenseScope::ExpenseOnly);
    assert_eq!(options.outflow_totals, OutflowTotals::Magnitude);
}

#[test]
fn test_unknown_value_is_rejected() {
    assert!(Config::parse("expense_scope = \"everything\"").is_err());
}

#[test]
fn test_unknown_key_is_rejected() {
    assert!(Config::parse("currency = \"EUR\"").is_err());
}

#[test]
fn test_missing_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::load_from_file(&dir.path().join("config.toml")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"outflow_totals = \"magnitude\"\n").unwrap();
    let config = Config::load_from_file(file.path()).unwrap();
    assert_eq!(config.outflow_totals, OutflowTotals::Magnitude);
    assert_eq!(config.expense_scope, ExpenseScope::Outflows);
}

#[test]
fn test_ledger_path_defaults_to_data_dir() {
    let data_dir = Path::new("/data");
    assert_eq!(
        Config::default().ledger_path_in(data_dir),
        PathBuf::from("/data/financial_data.csv")
    );

    let config = Config {
        ledger_path: Some("/elsewhere.csv".into()),
        ..Config::default()
    };
    assert_eq!(config.ledger_path_in(data_dir), PathBuf::from("/elsewhere.csv"));
}
