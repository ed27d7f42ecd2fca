use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::path::Path;

use crate::ledger::{DerivedSeries, Ledger, ReportOptions, Summary};
use crate::models::{Category, Transaction};
use crate::storage::{self, LedgerFile};

/// One running session: the ledger, where it is persisted, and how it is
/// reported. Handlers receive it explicitly; there is no ambient state.
pub(crate) struct Session {
    ledger: Ledger,
    file: LedgerFile,
    options: ReportOptions,
    unsaved: bool,
}

impl Session {
    pub(crate) fn open(file: LedgerFile, options: ReportOptions) -> Result<Self> {
        let ledger = file.load()?;
        Ok(Self {
            ledger,
            file,
            options,
            unsaved: false,
        })
    }

    pub(crate) fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub(crate) fn path(&self) -> &Path {
        self.file.path()
    }

    pub(crate) fn options(&self) -> &ReportOptions {
        &self.options
    }

    /// True while the ledger holds appends the file does not have yet.
    pub(crate) fn has_unsaved(&self) -> bool {
        self.unsaved
    }

    pub(crate) fn summary(&self) -> Summary {
        self.ledger.summary(&self.options)
    }

    pub(crate) fn series(&self) -> DerivedSeries {
        self.ledger.series(&self.options)
    }

    /// Append a transaction and write the log back.
    ///
    /// A rejected amount leaves both the ledger and the file alone. A failed
    /// write is reported, but the appended transaction stays in memory and is
    /// written by the next successful persist.
    pub(crate) fn submit(
        &mut self,
        date: NaiveDate,
        category: Category,
        raw_magnitude: &str,
        description: &str,
    ) -> Result<Transaction> {
        let txn = self
            .ledger
            .append(date, category, raw_magnitude, description)?;
        tracing::info!(%date, %category, amount = %txn.amount(), "transaction added");
        self.unsaved = true;
        self.persist()?;
        Ok(txn)
    }

    pub(crate) fn persist(&mut self) -> Result<()> {
        self.file.save(&self.ledger).map_err(|e| {
            tracing::error!(path = %self.file.path().display(), error = %e, "persist failed");
            e
        })?;
        self.unsaved = false;
        Ok(())
    }

    /// Replace the in-memory ledger with the file's current contents.
    /// Refused while there are unsaved appends.
    pub(crate) fn reload(&mut self) -> Result<()> {
        if self.unsaved {
            anyhow::bail!(
                "Unsaved transactions not yet written to {}; run :write first",
                self.file.path().display()
            );
        }
        self.ledger = self.file.load()?;
        Ok(())
    }

    pub(crate) fn export(&self, path: &Path) -> Result<usize> {
        storage::write_records(path, &self.ledger.to_records())
            .with_context(|| format!("Export to {} failed", path.display()))?;
        tracing::info!(path = %path.display(), count = self.ledger.len(), "ledger exported");
        Ok(self.ledger.len())
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
