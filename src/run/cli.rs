use anyhow::{Context, Result};
use std::path::Path;

use crate::ledger::{ExpenseScope, OutflowTotals, ReportOptions};
use crate::session::Session;
use crate::storage::LedgerFile;
use crate::ui::commands::{parse_add_args, ADD_USAGE};
use crate::ui::util::format_amount;
use crate::view::{Chart, ViewMode, ViewSelector};

pub(crate) fn as_cli(args: &[String], file: LedgerFile, options: ReportOptions) -> Result<()> {
    let Some(command) = args.get(1) else {
        print_usage();
        return Ok(());
    };
    match command.as_str() {
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("ledgerview {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        "summary" | "s" => cli_summary(&Session::open(file, options)?),
        "add" => cli_add(&args[2..], &mut Session::open(file, options)?),
        "series" => cli_series(&args[2..], &Session::open(file, options)?),
        "export" => cli_export(&args[2..], &Session::open(file, options)?),
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("LedgerView — personal finance ledger viewer");
    println!();
    println!("Usage: ledgerview [--file <ledger.csv>] [command]");
    println!();
    println!("Commands:");
    println!("  (none)                        Launch interactive TUI");
    println!("  summary                       Print income, expense and net worth totals");
    println!("  add {ADD_USAGE}");
    println!("                                Append a transaction and save the ledger");
    println!("  series [view]                 Print a chart series");
    println!("                                (net-worth, by-category, by-month; default: all)");
    println!("  export <path>                 Write the ledger to another CSV file");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
}

fn cli_summary(session: &Session) -> Result<()> {
    let summary = session.summary();
    let options = session.options();

    println!("LedgerView — {}", session.path().display());
    println!("{}", "─".repeat(40));
    println!("  Total Income:       {:>16}", format_amount(summary.income));
    println!("  Total Expenses:     {:>16}", format_amount(summary.expenses));
    println!("  Total Investments:  {:>16}", format_amount(summary.investments));
    println!("  Total Savings:      {:>16}", format_amount(summary.savings));
    println!("  Net Worth:          {:>16}", format_amount(summary.net_worth));
    println!("  Transactions:       {:>16}", summary.count);
    println!();
    println!(
        "  expenses: {} | investment/savings totals: {}",
        match options.expense_scope {
            ExpenseScope::Outflows => "all outflows",
            ExpenseScope::ExpenseOnly => "Expense category only",
        },
        match options.outflow_totals {
            OutflowTotals::Signed => "signed",
            OutflowTotals::Magnitude => "magnitude",
        }
    );
    Ok(())
}

fn cli_add(args: &[String], session: &mut Session) -> Result<()> {
    let today = chrono::Local::now().date_naive();
    let parsed = parse_add_args(&args.join(" "), today).map_err(anyhow::Error::msg)?;
    let txn = session.submit(
        parsed.date,
        parsed.category,
        &parsed.amount,
        &parsed.description,
    )?;
    println!(
        "Added {} {} on {} ({} transactions in {})",
        txn.category(),
        format_amount(txn.amount()),
        txn.date(),
        session.ledger().len(),
        session.path().display()
    );
    Ok(())
}

fn cli_series(args: &[String], session: &Session) -> Result<()> {
    let modes: Vec<ViewMode> = match args.first() {
        Some(name) => vec![ViewMode::parse(name)
            .with_context(|| format!("Unknown series: {name} (net-worth, by-category, by-month)"))?],
        None => ViewMode::all().to_vec(),
    };

    if session.ledger().is_empty() {
        println!("Ledger is empty: {}", session.path().display());
        return Ok(());
    }

    let series = session.series();
    let mut selector = ViewSelector::new();
    for mode in modes {
        selector.select(mode);
        println!("{} [{}]", selector.layout().title, mode.series().as_str());
        println!("{}", "─".repeat(40));
        match selector.chart(&series) {
            Chart::NetWorth(points) => {
                for (date, value) in points {
                    println!("  {date}  {:>16}", format_amount(*value));
                }
            }
            Chart::ExpensesByCategory(slices) => {
                for (category, value) in slices {
                    println!("  {:<12}{:>16}", category.as_str(), format_amount(*value));
                }
            }
            Chart::IncomeExpenseByMonth { income, expenses } => {
                println!("  {:<9}{:>16}{:>16}", "Month", "Income", "Expenses");
                for month in series.months() {
                    let cell = |v: Option<&rust_decimal::Decimal>| {
                        v.map(|d| format_amount(*d)).unwrap_or_else(|| "-".into())
                    };
                    println!(
                        "  {:<9}{:>16}{:>16}",
                        month.to_string(),
                        cell(income.get(&month)),
                        cell(expenses.get(&month))
                    );
                }
            }
        }
        println!();
    }
    Ok(())
}

fn cli_export(args: &[String], session: &Session) -> Result<()> {
    let Some(target) = args.first() else {
        anyhow::bail!("Usage: ledgerview export <path>");
    };
    let path = super::shellexpand(target);
    let count = session.export(Path::new(&path))?;
    println!("Exported {count} transactions to {path}");
    Ok(())
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
