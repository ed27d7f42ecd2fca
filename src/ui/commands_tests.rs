#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use super::app::{App, Screen};
use super::commands::*;
use crate::ledger::ReportOptions;
use crate::models::Category;
use crate::session::Session;
use crate::storage::LedgerFile;
use crate::view::ViewMode;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
}

fn session_in(dir: &tempfile::TempDir) -> Session {
    Session::open(
        LedgerFile::new(dir.path().join("ledger.csv")),
        ReportOptions::default(),
    )
    .unwrap()
}

// ── parse_add_args ────────────────────────────────────────────

#[test]
fn test_parse_add_full() {
    let args = parse_add_args("2024-01-15 Expense 4.50 Flat white, oat", today()).unwrap();
    assert_eq!(args.date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
    assert_eq!(args.category, Category::Expense);
    assert_eq!(args.amount, "4.50");
    assert_eq!(args.description, "Flat white, oat");
}

#[test]
fn test_parse_add_today_without_description() {
    let args = parse_add_args("today Income 1000", today()).unwrap();
    assert_eq!(args.date, today());
    assert!(args.description.is_empty());
}

#[test]
fn test_parse_add_rejects_bad_input() {
    assert!(parse_add_args("", today()).is_err());
    assert!(parse_add_args("2024-01-15 Expense", today()).is_err());
    assert!(parse_add_args("yesterday Expense 5", today()).is_err());

    let err = parse_add_args("2024-01-15 Food 5", today()).unwrap_err();
    assert!(err.contains("Invalid category"));
}

#[test]
fn test_parse_add_tolerates_extra_whitespace() {
    let args = parse_add_args("  2024-01-01  Expense\t5   Rent  due ", today()).unwrap();
    assert_eq!(args.category, Category::Expense);
    assert_eq!(args.amount, "5");
    assert_eq!(args.description, "Rent  due");
}

#[test]
fn test_parse_add_passes_amount_through() {
    // numeric validation belongs to the ledger
    let args = parse_add_args("2024-01-15 Savings lots", today()).unwrap();
    assert_eq!(args.amount, "lots");
}

// ── handle_command ────────────────────────────────────────────

#[test]
fn test_add_command_appends_and_refreshes() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session_in(&dir);
    let mut app = App::new();

    handle_command("add 2024-03-01 Expense 25 x", &mut app, &mut session);

    assert_eq!(session.ledger().len(), 1);
    assert_eq!(app.transactions.len(), 1);
    assert_eq!(app.summary.expenses, dec!(25));
    assert!(app.status_message.starts_with("Added Expense"));
}

#[test]
fn test_add_command_bad_amount_reports_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session_in(&dir);
    let mut app = App::new();

    handle_command("add 2024-03-01 Expense abc", &mut app, &mut session);

    assert!(session.ledger().is_empty());
    assert!(app.status_message.contains("Invalid amount"));
}

#[test]
fn test_view_command() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session_in(&dir);
    let mut app = App::new();
    app.screen = Screen::Transactions;

    handle_command("view by-month", &mut app, &mut session);
    assert_eq!(app.view.mode(), ViewMode::IncomeExpenseByMonth);
    assert_eq!(app.screen, Screen::Dashboard);

    handle_command("v", &mut app, &mut session);
    assert_eq!(app.view.mode(), ViewMode::NetWorth);

    handle_command("view pie", &mut app, &mut session);
    assert_eq!(app.view.mode(), ViewMode::NetWorth);
    assert!(app.status_message.contains("Unknown view"));
}

#[test]
fn test_reload_reports_unsaved_until_written() {
    let dir = tempfile::tempdir().unwrap();
    let blocked = dir.path().join("missing").join("ledger.csv");
    let mut session = Session::open(LedgerFile::new(&blocked), ReportOptions::default()).unwrap();
    let mut app = App::new();

    handle_command("add 2024-03-01 Income 10 pay", &mut app, &mut session);
    assert!(app.status_message.starts_with("Error:"));
    assert!(app.unsaved);

    handle_command("reload", &mut app, &mut session);
    assert!(app.status_message.contains(":write"));
    assert_eq!(session.ledger().len(), 1);

    std::fs::create_dir_all(blocked.parent().unwrap()).unwrap();
    handle_command("write", &mut app, &mut session);
    assert!(!app.unsaved);
    assert!(app.status_message.starts_with("Wrote 1 transactions"));

    handle_command("reload", &mut app, &mut session);
    assert_eq!(session.ledger().len(), 1);
    assert_eq!(app.transactions.len(), 1);
}

#[test]
fn test_unknown_command_suggests() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session_in(&dir);
    let mut app = App::new();

    handle_command("exprt", &mut app, &mut session);
    assert!(app.status_message.contains(":export"));
}

#[test]
fn test_quit_command() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session_in(&dir);
    let mut app = App::new();

    handle_command("q", &mut app, &mut session);
    assert!(!app.running);
}

#[test]
fn test_every_command_has_description() {
    for (name, cmd) in COMMANDS.iter() {
        assert!(!cmd.description.is_empty(), ":{name} has no description");
    }
}
