/// The fixed set of transaction categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) enum Category {
    Income,
    Expense,
    Investment,
    Savings,
}

impl Category {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
            Self::Investment => "Investment",
            Self::Savings => "Savings",
        }
    }

    /// Exact match on the canonical name, ignoring surrounding whitespace.
    pub(crate) fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "Income" => Some(Self::Income),
            "Expense" => Some(Self::Expense),
            "Investment" => Some(Self::Investment),
            "Savings" => Some(Self::Savings),
            _ => None,
        }
    }

    pub(crate) fn all() -> &'static [Category] {
        &[
            Self::Income,
            Self::Expense,
            Self::Investment,
            Self::Savings,
        ]
    }

    /// Income is the only inflow; every other category moves money out.
    pub(crate) fn is_inflow(&self) -> bool {
        matches!(self, Self::Income)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
