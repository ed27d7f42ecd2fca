use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::LazyLock;

use super::app::{App, Screen};
use crate::ledger::parse_date;
use crate::models::Category;
use crate::session::Session;
use crate::view::ViewMode;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut Session) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit", cmd_quit, r);
    register_command!("quit", "Quit", cmd_quit, r);
    register_command!("d", "Go to Dashboard", cmd_dashboard, r);
    register_command!("dashboard", "Go to Dashboard", cmd_dashboard, r);
    register_command!("t", "Go to Transactions", cmd_transactions, r);
    register_command!("transactions", "Go to Transactions", cmd_transactions, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!(
        "add",
        "Add transaction (e.g. :add 2024-01-15 Expense 4.50 Coffee)",
        cmd_add,
        r
    );
    register_command!(
        "a",
        "Add transaction (e.g. :a today Income 1000 Salary)",
        cmd_add,
        r
    );
    register_command!(
        "view",
        "Switch chart (net-worth, by-category, by-month)",
        cmd_view,
        r
    );
    register_command!("v", "Switch chart", cmd_view, r);
    register_command!(
        "export",
        "Export ledger to CSV (e.g. :export ~/ledger.csv)",
        cmd_export,
        r
    );
    register_command!("reload", "Reload the ledger file from disk", cmd_reload, r);
    register_command!("write", "Write the ledger file now", cmd_write, r);
    register_command!("w", "Write the ledger file now", cmd_write, r);

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App, session: &mut Session) {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        if let Err(e) = (cmd.run)(args, app, session) {
            tracing::warn!(command = cmd_name, error = %e, "command failed");
            app.set_status(format!("Error: {e:#}"));
        }
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| levenshtein(input, k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Arguments of `:add` and the CLI `add` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AddArgs {
    pub(crate) date: NaiveDate,
    pub(crate) category: Category,
    pub(crate) amount: String,
    pub(crate) description: String,
}

pub(crate) const ADD_USAGE: &str = "<date> <Income|Expense|Investment|Savings> <amount> [description]";

/// Split `<date> <category> <amount> [description...]`. The amount is passed
/// through untouched; the ledger decides whether it is numeric.
pub(crate) fn parse_add_args(args: &str, today: NaiveDate) -> Result<AddArgs, String> {
    let (date, rest) = next_field(args);
    let (category, rest) = next_field(rest);
    let (amount, rest) = next_field(rest);
    if amount.is_empty() {
        return Err(format!("Usage: add {ADD_USAGE}"));
    }
    let description = rest.trim().to_string();

    let date = if date.eq_ignore_ascii_case("today") {
        today
    } else {
        parse_date(date).ok_or_else(|| format!("Invalid date: {date}"))?
    };
    let category = Category::parse(category).ok_or_else(|| {
        let names: Vec<&str> = Category::all().iter().map(|c| c.as_str()).collect();
        format!("Invalid category: {category} (expected one of {})", names.join(", "))
    })?;

    Ok(AddArgs {
        date,
        category,
        amount: amount.to_string(),
        description,
    })
}

/// Split off the first whitespace-delimited field.
fn next_field(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.split_once(char::is_whitespace) {
        Some((head, tail)) => (head, tail.trim_start()),
        None => (s, ""),
    }
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _session: &mut Session) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_dashboard(_args: &str, app: &mut App, session: &mut Session) -> anyhow::Result<()> {
    app.screen = Screen::Dashboard;
    app.refresh(session);
    Ok(())
}

fn cmd_transactions(_args: &str, app: &mut App, session: &mut Session) -> anyhow::Result<()> {
    app.screen = Screen::Transactions;
    app.refresh(session);
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _session: &mut Session) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_add(args: &str, app: &mut App, session: &mut Session) -> anyhow::Result<()> {
    let today = chrono::Local::now().date_naive();
    let parsed = match parse_add_args(args, today) {
        Ok(p) => p,
        Err(msg) => {
            app.set_status(msg);
            return Ok(());
        }
    };

    let result = session.submit(
        parsed.date,
        parsed.category,
        &parsed.amount,
        &parsed.description,
    );
    // Refresh even on a failed write: the append itself may have succeeded.
    app.refresh(session);
    let txn = result?;
    app.set_status(format!(
        "Added {} {} {} on {}",
        txn.category(),
        super::util::format_amount(txn.amount()),
        txn.description(),
        txn.date()
    ));
    Ok(())
}

fn cmd_view(args: &str, app: &mut App, _session: &mut Session) -> anyhow::Result<()> {
    if args.is_empty() {
        app.view.next();
    } else {
        match ViewMode::parse(args) {
            Some(mode) => app.view.select(mode),
            None => {
                app.set_status(format!(
                    "Unknown view: {args}. Use net-worth, by-category or by-month"
                ));
                return Ok(());
            }
        }
    }
    app.screen = Screen::Dashboard;
    app.set_status(format!("View: {}", app.view.mode()));
    Ok(())
}

fn cmd_export(args: &str, app: &mut App, session: &mut Session) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :export <path>");
        return Ok(());
    }
    let path = crate::run::shellexpand(args);
    let count = session.export(std::path::Path::new(&path))?;
    app.set_status(format!("Exported {count} transactions to {path}"));
    Ok(())
}

fn cmd_write(_args: &str, app: &mut App, session: &mut Session) -> anyhow::Result<()> {
    session.persist()?;
    app.refresh(session);
    app.set_status(format!(
        "Wrote {} transactions to {}",
        session.ledger().len(),
        session.path().display()
    ));
    Ok(())
}

fn cmd_reload(_args: &str, app: &mut App, session: &mut Session) -> anyhow::Result<()> {
    session.reload()?;
    app.refresh(session);
    app.set_status(format!("Reloaded {} transactions", session.ledger().len()));
    Ok(())
}
