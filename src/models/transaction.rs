use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::Category;

/// A single ledger entry. Fields are private so the sign convention can only
/// be established by the two constructors below.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Transaction {
    date: NaiveDate,
    category: Category,
    amount: Decimal,
    description: String,
}

impl Transaction {
    /// Build from a user-entered magnitude. Income keeps `|magnitude|`, every
    /// other category stores `-|magnitude|`.
    pub(crate) fn from_magnitude(
        date: NaiveDate,
        category: Category,
        magnitude: Decimal,
        description: String,
    ) -> Self {
        let magnitude = magnitude.abs();
        let amount = if category.is_inflow() {
            magnitude
        } else {
            -magnitude
        };
        Self {
            date,
            category,
            amount,
            description,
        }
    }

    /// Build from a stored row whose amount is already signed.
    pub(crate) fn restored(
        date: NaiveDate,
        category: Category,
        amount: Decimal,
        description: String,
    ) -> Self {
        Self {
            date,
            category,
            amount,
            description,
        }
    }

    pub(crate) fn date(&self) -> NaiveDate {
        self.date
    }

    pub(crate) fn category(&self) -> Category {
        self.category
    }

    pub(crate) fn amount(&self) -> Decimal {
        self.amount
    }

    pub(crate) fn description(&self) -> &str {
        &self.description
    }

    pub(crate) fn is_income(&self) -> bool {
        self.amount > Decimal::ZERO
    }

    pub(crate) fn is_expense(&self) -> bool {
        self.amount < Decimal::ZERO
    }

    pub(crate) fn abs_amount(&self) -> Decimal {
        self.amount.abs()
    }
}
