use crate::ledger::{DerivedSeries, Summary};
use crate::models::Transaction;
use crate::session::Session;
use crate::view::ViewSelector;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Dashboard,
    Transactions,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[Self::Dashboard, Self::Transactions]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dashboard => write!(f, "Dashboard"),
            Self::Transactions => write!(f, "Transactions"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
        }
    }
}

/// Presentation state. Everything derived from the ledger is a snapshot
/// taken by [`App::refresh`]; the ledger itself lives in the [`Session`].
pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,

    // Dashboard
    pub(crate) view: ViewSelector,
    pub(crate) summary: Summary,
    pub(crate) series: DerivedSeries,

    // Transactions
    pub(crate) transactions: Vec<Transaction>,
    pub(crate) transaction_index: usize,
    pub(crate) transaction_scroll: usize,

    pub(crate) ledger_path: String,
    pub(crate) unsaved: bool,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new() -> Self {
        Self {
            running: true,
            screen: Screen::Dashboard,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,

            view: ViewSelector::new(),
            summary: Summary::default(),
            series: DerivedSeries::default(),

            transactions: Vec::new(),
            transaction_index: 0,
            transaction_scroll: 0,

            ledger_path: String::new(),
            unsaved: false,

            visible_rows: 20,
        }
    }

    /// Recompute every derived figure from the session's ledger.
    pub(crate) fn refresh(&mut self, session: &Session) {
        self.summary = session.summary();
        self.series = session.series();
        self.transactions = session.ledger().transactions().to_vec();
        self.ledger_path = session.path().display().to_string();
        self.unsaved = session.has_unsaved();
        if self.transaction_index >= self.transactions.len() && !self.transactions.is_empty() {
            self.transaction_index = self.transactions.len() - 1;
        }
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
