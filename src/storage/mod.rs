use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::ledger::{Ledger, RawRecord};

pub(crate) const HEADER: [&str; 4] = ["Date", "Category", "Amount", "Description"];

/// The flat CSV log a ledger is loaded from and written back to.
#[derive(Debug, Clone)]
pub(crate) struct LedgerFile {
    path: PathBuf,
}

impl LedgerFile {
    pub(crate) fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the log. A missing file is an empty ledger.
    pub(crate) fn load(&self) -> Result<Ledger> {
        if !self.path.exists() {
            tracing::info!(path = %self.path.display(), "ledger file not found, starting empty");
            return Ok(Ledger::new());
        }
        let records = read_records(&self.path)?;
        let ledger = Ledger::load(records)
            .with_context(|| format!("Failed to load ledger from {}", self.path.display()))?;
        tracing::info!(
            path = %self.path.display(),
            count = ledger.len(),
            "ledger loaded"
        );
        Ok(ledger)
    }

    pub(crate) fn save(&self, ledger: &Ledger) -> Result<()> {
        write_records(&self.path, &ledger.to_records())?;
        tracing::debug!(path = %self.path.display(), count = ledger.len(), "ledger saved");
        Ok(())
    }
}

pub(crate) fn read_records(path: &Path) -> Result<Vec<RawRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_path(path)
        .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;

    let headers = rdr.headers().context("Failed to read CSV header")?.clone();
    for column in HEADER {
        if !headers.iter().any(|h| h == column) {
            anyhow::bail!(
                "{}: missing column '{column}' (expected header {})",
                path.display(),
                HEADER.join(",")
            );
        }
    }

    let mut records = Vec::new();
    for (i, result) in rdr.deserialize::<RawRecord>().enumerate() {
        let record = result.with_context(|| format!("Row {}: failed to read CSV record", i + 1))?;
        records.push(record);
    }
    Ok(records)
}

/// Rewrite `path` with a header and one row per record.
pub(crate) fn write_records(path: &Path, records: &[RawRecord]) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;
    write_to(BufWriter::new(file), records)
        .with_context(|| format!("Failed to write CSV file: {}", path.display()))
}

pub(crate) fn write_to<W: Write>(writer: W, records: &[RawRecord]) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record(HEADER)?;
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}
