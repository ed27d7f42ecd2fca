mod series;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::LedgerError;
use crate::models::{Category, Transaction};

pub(crate) use series::{DerivedSeries, YearMonth};

/// One row of the persisted log, before any parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct RawRecord {
    #[serde(rename = "Date")]
    pub(crate) date: String,
    #[serde(rename = "Category")]
    pub(crate) category: String,
    #[serde(rename = "Amount")]
    pub(crate) amount: String,
    #[serde(rename = "Description", default)]
    pub(crate) description: String,
}

/// Which outflows count as "expenses" in totals and charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum ExpenseScope {
    /// Every negative amount, whatever its category.
    #[default]
    Outflows,
    /// Only negative amounts in the Expense category.
    ExpenseOnly,
}

impl ExpenseScope {
    pub(crate) fn includes(&self, txn: &Transaction) -> bool {
        txn.is_expense()
            && match self {
                Self::Outflows => true,
                Self::ExpenseOnly => txn.category() == Category::Expense,
            }
    }
}

/// How Investment and Savings totals are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum OutflowTotals {
    #[default]
    Signed,
    Magnitude,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct ReportOptions {
    pub(crate) expense_scope: ExpenseScope,
    pub(crate) outflow_totals: OutflowTotals,
}

/// Headline figures shown on the dashboard and by `summary`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Summary {
    pub(crate) income: Decimal,
    pub(crate) expenses: Decimal,
    pub(crate) investments: Decimal,
    pub(crate) savings: Decimal,
    pub(crate) net_worth: Decimal,
    pub(crate) count: usize,
}

/// Append-only, arrival-ordered collection of transactions.
///
/// `gross` is the sum of every amount's magnitude. Any total, running
/// balance or bucket the ledger derives is bounded by it, so keeping it
/// representable keeps every aggregate free of overflow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Ledger {
    transactions: Vec<Transaction>,
    gross: Decimal,
}

impl Ledger {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Parse raw rows into a ledger. Any bad row rejects the whole load.
    /// Amount signs are trusted as stored.
    pub(crate) fn load<I>(records: I) -> Result<Self, LedgerError>
    where
        I: IntoIterator<Item = RawRecord>,
    {
        let mut transactions = Vec::new();
        let mut gross = Decimal::ZERO;
        for (i, record) in records.into_iter().enumerate() {
            let row = i + 1;
            let date = parse_date(&record.date).ok_or_else(|| LedgerError::MalformedRow {
                row,
                reason: format!("could not parse date '{}'", record.date),
            })?;
            let category =
                Category::parse(&record.category).ok_or_else(|| LedgerError::InvalidCategory {
                    row,
                    value: record.category.clone(),
                })?;
            let amount = parse_amount(&record.amount).ok_or_else(|| LedgerError::MalformedRow {
                row,
                reason: format!("could not parse amount '{}'", record.amount),
            })?;
            gross = gross
                .checked_add(amount.abs())
                .ok_or_else(|| LedgerError::MalformedRow {
                    row,
                    reason: format!("amount '{}' overflows the ledger totals", record.amount),
                })?;
            transactions.push(Transaction::restored(
                date,
                category,
                amount,
                record.description,
            ));
        }
        tracing::debug!(count = transactions.len(), "ledger loaded");
        Ok(Self {
            transactions,
            gross,
        })
    }

    /// Append a user-entered transaction. The magnitude's sign is discarded and
    /// re-derived from the category. A non-numeric magnitude, or one too large
    /// for the ledger totals, is rejected and the ledger is untouched.
    pub(crate) fn append(
        &mut self,
        date: NaiveDate,
        category: Category,
        raw_magnitude: &str,
        description: impl Into<String>,
    ) -> Result<Transaction, LedgerError> {
        let magnitude = parse_amount(raw_magnitude).ok_or_else(|| LedgerError::InvalidAmount {
            value: raw_magnitude.to_string(),
        })?;
        let gross = self
            .gross
            .checked_add(magnitude.abs())
            .ok_or_else(|| LedgerError::InvalidAmount {
                value: raw_magnitude.to_string(),
            })?;
        let txn = Transaction::from_magnitude(date, category, magnitude, description.into());
        tracing::debug!(%date, %category, amount = %txn.amount(), "transaction appended");
        self.gross = gross;
        self.transactions.push(txn.clone());
        Ok(txn)
    }

    pub(crate) fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub(crate) fn len(&self) -> usize {
        self.transactions.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub(crate) fn total_income(&self) -> Decimal {
        self.transactions
            .iter()
            .filter(|t| t.is_income())
            .map(Transaction::amount)
            .sum()
    }

    pub(crate) fn total_expenses(&self, scope: ExpenseScope) -> Decimal {
        self.transactions
            .iter()
            .filter(|t| scope.includes(t))
            .map(Transaction::amount)
            .sum::<Decimal>()
            .abs()
    }

    /// Raw signed sum of one category.
    pub(crate) fn total_by_category(&self, category: Category) -> Decimal {
        self.transactions
            .iter()
            .filter(|t| t.category() == category)
            .map(Transaction::amount)
            .sum()
    }

    pub(crate) fn reported_total(&self, category: Category, mode: OutflowTotals) -> Decimal {
        let total = self.total_by_category(category);
        match mode {
            OutflowTotals::Signed => total,
            OutflowTotals::Magnitude => total.abs(),
        }
    }

    pub(crate) fn net_worth(&self) -> Decimal {
        self.transactions.iter().map(Transaction::amount).sum()
    }

    pub(crate) fn summary(&self, options: &ReportOptions) -> Summary {
        Summary {
            income: self.total_income(),
            expenses: self.total_expenses(options.expense_scope),
            investments: self.reported_total(Category::Investment, options.outflow_totals),
            savings: self.reported_total(Category::Savings, options.outflow_totals),
            net_worth: self.net_worth(),
            count: self.len(),
        }
    }

    pub(crate) fn series(&self, options: &ReportOptions) -> DerivedSeries {
        DerivedSeries::compute(&self.transactions, options.expense_scope)
    }

    /// Rows for writing back, one per transaction in ledger order.
    pub(crate) fn to_records(&self) -> Vec<RawRecord> {
        self.transactions
            .iter()
            .map(|t| RawRecord {
                date: t.date().format("%Y-%m-%d").to_string(),
                category: t.category().as_str().to_string(),
                amount: t.amount().to_string(),
                description: t.description().to_string(),
            })
            .collect()
    }
}

pub(crate) fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    for fmt in ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    // Timestamps written by spreadsheet tools; the time of day is dropped.
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    None
}

pub(crate) fn parse_amount(s: &str) -> Option<Decimal> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}

#[cfg(test)]
mod tests;
