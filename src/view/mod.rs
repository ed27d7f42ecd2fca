//! Chart view selection.
//!
//! A [`ViewSelector`] holds exactly one active [`ViewMode`]. Each mode maps to
//! the series it shows and the layout hints the renderer needs; the selector
//! itself never touches transaction data.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::ledger::{DerivedSeries, YearMonth};
use crate::models::Category;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum ViewMode {
    #[default]
    NetWorth,
    ExpensesByCategory,
    IncomeExpenseByMonth,
}

impl ViewMode {
    pub(crate) fn all() -> &'static [ViewMode] {
        &[
            Self::NetWorth,
            Self::ExpensesByCategory,
            Self::IncomeExpenseByMonth,
        ]
    }

    /// Names accepted by `:view` and the `series` CLI command.
    pub(crate) fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "net-worth" | "networth" | "nw" | "year" => Some(Self::NetWorth),
            "by-category" | "category" | "expenses" | "cat" => Some(Self::ExpensesByCategory),
            "by-month" | "month" | "monthly" => Some(Self::IncomeExpenseByMonth),
            _ => None,
        }
    }

    pub(crate) fn series(&self) -> SeriesName {
        match self {
            Self::NetWorth => SeriesName::NetWorth,
            Self::ExpensesByCategory => SeriesName::ExpensesByCategory,
            Self::IncomeExpenseByMonth => SeriesName::IncomeExpenseByMonth,
        }
    }

    /// One flag per entry of [`SeriesName::ORDER`]; exactly one is set.
    pub(crate) fn visibility(&self) -> [bool; 3] {
        let active = self.series();
        SeriesName::ORDER.map(|s| s == active)
    }

    pub(crate) fn layout(&self) -> ChartLayout {
        match self {
            Self::NetWorth => ChartLayout {
                title: "Net Worth by Year",
                x_axis: Some("Year"),
                y_axis: Some("Net Worth"),
                legend: LegendOrientation::Vertical,
            },
            Self::ExpensesByCategory => ChartLayout {
                title: "Expenses by Category",
                x_axis: None,
                y_axis: None,
                legend: LegendOrientation::Horizontal,
            },
            Self::IncomeExpenseByMonth => ChartLayout {
                title: "Income and Expenses by Month",
                x_axis: Some("Month"),
                y_axis: Some("Amount"),
                legend: LegendOrientation::Vertical,
            },
        }
    }
}

impl std::fmt::Display for ViewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetWorth => write!(f, "Net Worth"),
            Self::ExpensesByCategory => write!(f, "Expenses by Category"),
            Self::IncomeExpenseByMonth => write!(f, "Income and Expenses by Month"),
        }
    }
}

/// The plotted datasets, in the order the renderer lays them out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SeriesName {
    NetWorth,
    ExpensesByCategory,
    IncomeExpenseByMonth,
}

impl SeriesName {
    pub(crate) const ORDER: [SeriesName; 3] = [
        Self::NetWorth,
        Self::ExpensesByCategory,
        Self::IncomeExpenseByMonth,
    ];

    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::NetWorth => "net_worth_by_date",
            Self::ExpensesByCategory => "expense_by_category",
            Self::IncomeExpenseByMonth => "income_expense_by_month",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LegendOrientation {
    Vertical,
    Horizontal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ChartLayout {
    pub(crate) title: &'static str,
    pub(crate) x_axis: Option<&'static str>,
    pub(crate) y_axis: Option<&'static str>,
    pub(crate) legend: LegendOrientation,
}

/// The active dataset, borrowed from a [`DerivedSeries`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Chart<'a> {
    NetWorth(&'a BTreeMap<NaiveDate, Decimal>),
    ExpensesByCategory(&'a BTreeMap<Category, Decimal>),
    IncomeExpenseByMonth {
        income: &'a BTreeMap<YearMonth, Decimal>,
        expenses: &'a BTreeMap<YearMonth, Decimal>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct ViewSelector {
    mode: ViewMode,
}

impl ViewSelector {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn mode(&self) -> ViewMode {
        self.mode
    }

    pub(crate) fn select(&mut self, mode: ViewMode) {
        tracing::debug!(from = %self.mode, to = %mode, "view selected");
        self.mode = mode;
    }

    pub(crate) fn next(&mut self) {
        let modes = ViewMode::all();
        let idx = modes.iter().position(|m| *m == self.mode).unwrap_or(0);
        self.select(modes[(idx + 1) % modes.len()]);
    }

    pub(crate) fn previous(&mut self) {
        let modes = ViewMode::all();
        let idx = modes.iter().position(|m| *m == self.mode).unwrap_or(0);
        let prev = if idx == 0 { modes.len() - 1 } else { idx - 1 };
        self.select(modes[prev]);
    }

    pub(crate) fn visibility(&self) -> [bool; 3] {
        self.mode.visibility()
    }

    pub(crate) fn layout(&self) -> ChartLayout {
        self.mode.layout()
    }

    pub(crate) fn chart<'a>(&self, series: &'a DerivedSeries) -> Chart<'a> {
        match self.mode {
            ViewMode::NetWorth => Chart::NetWorth(&series.net_worth_by_date),
            ViewMode::ExpensesByCategory => Chart::ExpensesByCategory(&series.expense_by_category),
            ViewMode::IncomeExpenseByMonth => Chart::IncomeExpenseByMonth {
                income: &series.income_by_month,
                expenses: &series.expense_by_month,
            },
        }
    }
}
