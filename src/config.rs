use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::ledger::{ExpenseScope, OutflowTotals, ReportOptions};

pub(crate) const DEFAULT_LEDGER_FILE: &str = "financial_data.csv";

/// Settings read from `config.toml`. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Config {
    pub(crate) ledger_path: Option<PathBuf>,
    pub(crate) expense_scope: ExpenseScope,
    pub(crate) outflow_totals: OutflowTotals,
}

impl Config {
    pub(crate) fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).context("Invalid config")
    }

    /// Load from `path`, falling back to defaults when the file is absent.
    pub(crate) fn load_from_file(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("In {}", path.display()))
    }

    pub(crate) fn report_options(&self) -> ReportOptions {
        ReportOptions {
            expense_scope: self.expense_scope,
            outflow_totals: self.outflow_totals,
        }
    }

    /// The configured log path, or `financial_data.csv` in `data_dir`.
    pub(crate) fn ledger_path_in(&self, data_dir: &Path) -> PathBuf {
        self.ledger_path
            .clone()
            .unwrap_or_else(|| data_dir.join(DEFAULT_LEDGER_FILE))
    }
}

/// Platform data and config directories, created on demand.
pub(crate) struct Dirs {
    pub(crate) data_dir: PathBuf,
    pub(crate) config_file: PathBuf,
}

impl Dirs {
    pub(crate) fn locate() -> Result<Self> {
        let proj_dirs = directories::ProjectDirs::from("com", "ledgerview", "LedgerView")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        let data_dir = proj_dirs.data_dir().to_path_buf();
        std::fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
        Ok(Self {
            data_dir,
            config_file: proj_dirs.config_dir().join("config.toml"),
        })
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
