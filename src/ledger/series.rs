use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use super::ExpenseScope;
use crate::models::{Category, Transaction};

/// Calendar month bucket used by the monthly series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct YearMonth {
    pub(crate) year: i32,
    pub(crate) month: u32,
}

impl YearMonth {
    pub(crate) fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    pub(crate) fn of(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month())
    }
}

impl std::fmt::Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// The three chart datasets, always computed fresh from a ledger snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct DerivedSeries {
    pub(crate) net_worth_by_date: BTreeMap<NaiveDate, Decimal>,
    pub(crate) expense_by_category: BTreeMap<Category, Decimal>,
    pub(crate) income_by_month: BTreeMap<YearMonth, Decimal>,
    pub(crate) expense_by_month: BTreeMap<YearMonth, Decimal>,
}

impl DerivedSeries {
    pub(crate) fn compute(transactions: &[Transaction], scope: ExpenseScope) -> Self {
        Self {
            net_worth_by_date: net_worth_by_date(transactions),
            expense_by_category: expense_by_category(transactions, scope),
            income_by_month: income_by_month(transactions),
            expense_by_month: expense_by_month(transactions, scope),
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.net_worth_by_date.is_empty()
            && self.expense_by_category.is_empty()
            && self.income_by_month.is_empty()
            && self.expense_by_month.is_empty()
    }

    /// Every month that has income or expenses, in order.
    pub(crate) fn months(&self) -> Vec<YearMonth> {
        let mut months: Vec<YearMonth> = self
            .income_by_month
            .keys()
            .chain(self.expense_by_month.keys())
            .copied()
            .collect();
        months.sort();
        months.dedup();
        months
    }
}

/// Running balance, one point per distinct date.
pub(crate) fn net_worth_by_date(transactions: &[Transaction]) -> BTreeMap<NaiveDate, Decimal> {
    let mut per_day: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for txn in transactions {
        *per_day.entry(txn.date()).or_insert(Decimal::ZERO) += txn.amount();
    }

    let mut running = Decimal::ZERO;
    per_day
        .into_iter()
        .map(|(date, amount)| {
            running += amount;
            (date, running)
        })
        .collect()
}

pub(crate) fn expense_by_category(
    transactions: &[Transaction],
    scope: ExpenseScope,
) -> BTreeMap<Category, Decimal> {
    let mut totals = BTreeMap::new();
    for txn in transactions.iter().filter(|t| scope.includes(t)) {
        *totals.entry(txn.category()).or_insert(Decimal::ZERO) += txn.abs_amount();
    }
    totals
}

pub(crate) fn income_by_month(transactions: &[Transaction]) -> BTreeMap<YearMonth, Decimal> {
    let mut totals = BTreeMap::new();
    for txn in transactions.iter().filter(|t| t.is_income()) {
        *totals.entry(YearMonth::of(txn.date())).or_insert(Decimal::ZERO) += txn.amount();
    }
    totals
}

pub(crate) fn expense_by_month(
    transactions: &[Transaction],
    scope: ExpenseScope,
) -> BTreeMap<YearMonth, Decimal> {
    let mut totals = BTreeMap::new();
    for txn in transactions.iter().filter(|t| scope.includes(t)) {
        *totals.entry(YearMonth::of(txn.date())).or_insert(Decimal::ZERO) += txn.abs_amount();
    }
    totals
}

#[cfg(test)]
#[path = "series_tests.rs"]
mod tests;
