#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use super::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn raw(date: &str, category: &str, amount: &str, description: &str) -> RawRecord {
    RawRecord {
        date: date.into(),
        category: category.into(),
        amount: amount.into(),
        description: description.into(),
    }
}

fn scenario() -> Ledger {
    Ledger::load(vec![
        raw("2024-01-01", "Income", "1000", "Salary"),
        raw("2024-01-05", "Expense", "-40", "Groceries"),
        raw("2024-02-01", "Income", "500", "Bonus"),
    ])
    .unwrap()
}

fn mixed() -> Ledger {
    Ledger::load(vec![
        raw("2024-01-01", "Income", "1000", "Salary"),
        raw("2024-01-05", "Expense", "-40", "Groceries"),
        raw("2024-01-10", "Investment", "-200", "Index fund"),
        raw("2024-01-20", "Savings", "-100", "Rainy day"),
    ])
    .unwrap()
}

// ── load ──────────────────────────────────────────────────────

#[test]
fn test_load_preserves_order_and_fields() {
    let ledger = Ledger::load(vec![
        raw("2024-02-01", "Income", "500", "later first"),
        raw("2024-01-01", "Expense", "-10", "earlier second"),
    ])
    .unwrap();

    assert_eq!(ledger.len(), 2);
    let txns = ledger.transactions();
    assert_eq!(txns[0].date(), date(2024, 2, 1));
    assert_eq!(txns[0].description(), "later first");
    assert_eq!(txns[1].category(), Category::Expense);
    assert_eq!(txns[1].amount(), dec!(-10));
}

#[test]
fn test_load_trusts_stored_sign() {
    let ledger = Ledger::load(vec![raw("2024-01-01", "Expense", "15", "refund")]).unwrap();
    assert_eq!(ledger.transactions()[0].amount(), dec!(15));
}

#[test]
fn test_load_empty() {
    let ledger = Ledger::load(Vec::new()).unwrap();
    assert!(ledger.is_empty());
}

#[test]
fn test_load_malformed_date_rejects_whole_load() {
    let err = Ledger::load(vec![
        raw("2024-01-01", "Income", "100", ""),
        raw("not a date", "Income", "100", ""),
    ])
    .unwrap_err();
    assert!(matches!(err, LedgerError::MalformedRow { row: 2, .. }));
}

#[test]
fn test_load_malformed_amount() {
    let err = Ledger::load(vec![raw("2024-01-01", "Income", "lots", "")]).unwrap_err();
    assert!(matches!(err, LedgerError::MalformedRow { row: 1, .. }));

    let err = Ledger::load(vec![raw("2024-01-01", "Income", "", "")]).unwrap_err();
    assert!(matches!(err, LedgerError::MalformedRow { row: 1, .. }));
}

#[test]
fn test_load_invalid_category() {
    let err = Ledger::load(vec![raw("2024-01-01", "Salary", "100", "")]).unwrap_err();
    assert_eq!(
        err,
        LedgerError::InvalidCategory {
            row: 1,
            value: "Salary".into()
        }
    );
}

#[test]
fn test_load_accepts_timestamp_dates() {
    let ledger = Ledger::load(vec![raw("2024-03-01 00:00:00", "Income", "1", "")]).unwrap();
    assert_eq!(ledger.transactions()[0].date(), date(2024, 3, 1));
}

#[test]
fn test_load_rejects_amounts_that_overflow_totals() {
    let max = Decimal::MAX.to_string();
    let err = Ledger::load(vec![
        raw("2024-01-01", "Income", &max, ""),
        raw("2024-01-02", "Income", "1", ""),
    ])
    .unwrap_err();
    assert!(matches!(err, LedgerError::MalformedRow { row: 2, .. }));

    // opposite signs still count against the gross total
    let neg = (-Decimal::MAX).to_string();
    let err = Ledger::load(vec![
        raw("2024-01-01", "Income", &max, ""),
        raw("2024-01-02", "Expense", &neg, ""),
    ])
    .unwrap_err();
    assert!(matches!(err, LedgerError::MalformedRow { row: 2, .. }));
}

#[test]
fn test_largest_loadable_ledger_aggregates() {
    let ledger = Ledger::load(vec![raw("2024-01-01", "Expense", &(-Decimal::MAX).to_string(), "")])
        .unwrap();
    let options = ReportOptions::default();
    assert_eq!(ledger.summary(&options).expenses, Decimal::MAX);
    assert_eq!(
        ledger.series(&options).expense_by_category[&Category::Expense],
        Decimal::MAX
    );
}

// ── append ────────────────────────────────────────────────────

#[test]
fn test_append_expense_on_empty_ledger() {
    let mut ledger = Ledger::new();
    let txn = ledger
        .append(date(2024, 3, 1), Category::Expense, "25", "x")
        .unwrap();

    assert_eq!(txn.amount(), dec!(-25));
    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger.transactions()[0], txn);
}

#[test]
fn test_append_respects_sign_invariant() {
    let mut ledger = Ledger::new();
    for &category in Category::all() {
        let txn = ledger.append(date(2024, 1, 1), category, "-12.50", "").unwrap();
        if category == Category::Income {
            assert_eq!(txn.amount(), dec!(12.50));
        } else {
            assert_eq!(txn.amount(), dec!(-12.50));
        }
    }
}

#[test]
fn test_append_invalid_amount_leaves_ledger_untouched() {
    let mut ledger = scenario();
    let before = ledger.clone();

    let err = ledger
        .append(date(2024, 3, 1), Category::Income, "twelve", "")
        .unwrap_err();

    assert_eq!(
        err,
        LedgerError::InvalidAmount {
            value: "twelve".into()
        }
    );
    assert_eq!(ledger, before);
}

#[test]
fn test_append_overflowing_amount_leaves_ledger_untouched() {
    let mut ledger = Ledger::new();
    ledger
        .append(date(2024, 1, 1), Category::Income, &Decimal::MAX.to_string(), "")
        .unwrap();
    let before = ledger.clone();

    let err = ledger
        .append(date(2024, 1, 2), Category::Savings, "1", "")
        .unwrap_err();

    assert_eq!(err, LedgerError::InvalidAmount { value: "1".into() });
    assert_eq!(ledger, before);
    assert_eq!(ledger.total_income(), Decimal::MAX);
}

#[test]
fn test_append_goes_to_the_end_not_by_date() {
    let mut ledger = scenario();
    ledger
        .append(date(2023, 12, 31), Category::Income, "1", "backdated")
        .unwrap();
    assert_eq!(ledger.transactions().last().unwrap().description(), "backdated");
}

// ── totals ────────────────────────────────────────────────────

#[test]
fn test_scenario_totals() {
    let ledger = scenario();
    assert_eq!(ledger.total_income(), dec!(1500));
    assert_eq!(ledger.total_expenses(ExpenseScope::Outflows), dec!(40));
    assert_eq!(ledger.total_expenses(ExpenseScope::ExpenseOnly), dec!(40));
    assert_eq!(ledger.net_worth(), dec!(1460));
}

#[test]
fn test_total_income_matches_income_category() {
    let mut ledger = mixed();
    ledger.append(date(2024, 2, 1), Category::Income, "99.99", "").unwrap();
    ledger.append(date(2024, 2, 2), Category::Savings, "5", "").unwrap();
    assert_eq!(
        ledger.total_income() - ledger.total_by_category(Category::Income),
        Decimal::ZERO
    );
}

#[test]
fn test_expense_scope() {
    let ledger = mixed();
    assert_eq!(ledger.total_expenses(ExpenseScope::Outflows), dec!(340));
    assert_eq!(ledger.total_expenses(ExpenseScope::ExpenseOnly), dec!(40));
}

#[test]
fn test_total_by_category_is_signed() {
    let ledger = mixed();
    assert_eq!(ledger.total_by_category(Category::Investment), dec!(-200));
    assert_eq!(ledger.total_by_category(Category::Savings), dec!(-100));
    assert_eq!(ledger.total_by_category(Category::Income), dec!(1000));
}

#[test]
fn test_reported_total_modes() {
    let ledger = mixed();
    assert_eq!(
        ledger.reported_total(Category::Investment, OutflowTotals::Signed),
        dec!(-200)
    );
    assert_eq!(
        ledger.reported_total(Category::Investment, OutflowTotals::Magnitude),
        dec!(200)
    );
}

#[test]
fn test_summary_applies_options() {
    let ledger = mixed();
    let options = ReportOptions {
        expense_scope: ExpenseScope::ExpenseOnly,
        outflow_totals: OutflowTotals::Magnitude,
    };
    let summary = ledger.summary(&options);
    assert_eq!(summary.income, dec!(1000));
    assert_eq!(summary.expenses, dec!(40));
    assert_eq!(summary.investments, dec!(200));
    assert_eq!(summary.savings, dec!(100));
    assert_eq!(summary.net_worth, dec!(660));
    assert_eq!(summary.count, 4);
}

// ── records ───────────────────────────────────────────────────

#[test]
fn test_records_roundtrip() {
    let mut ledger = mixed();
    ledger
        .append(date(2024, 2, 3), Category::Expense, "3.75", "coffee, large")
        .unwrap();

    let reloaded = Ledger::load(ledger.to_records()).unwrap();
    assert_eq!(reloaded, ledger);
}

#[test]
fn test_records_shape() {
    let records = scenario().to_records();
    assert_eq!(records.len(), 3);
    assert_eq!(records[1], raw("2024-01-05", "Expense", "-40", "Groceries"));
}

// ── parsing helpers ───────────────────────────────────────────

#[test]
fn test_parse_amount() {
    assert_eq!(parse_amount("12.5"), Some(dec!(12.5)));
    assert_eq!(parse_amount(" -3 "), Some(dec!(-3)));
    assert_eq!(parse_amount("1e3"), Some(dec!(1000)));
    assert_eq!(parse_amount("abc"), None);
    assert_eq!(parse_amount(""), None);
}

#[test]
fn test_parse_date_formats() {
    assert_eq!(parse_date("2024-01-15"), Some(date(2024, 1, 15)));
    assert_eq!(parse_date("2024/01/15"), Some(date(2024, 1, 15)));
    assert_eq!(parse_date("01/15/2024"), Some(date(2024, 1, 15)));
    assert_eq!(parse_date("2024-01-15T08:30:00"), Some(date(2024, 1, 15)));
    assert_eq!(parse_date("2024-13-01"), None);
    assert_eq!(parse_date(""), None);
}
