use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const ENV_VAR: &str = "LEDGERVIEW_LOG";

fn filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_env(ENV_VAR).unwrap_or_else(|_| EnvFilter::new(default))
}

/// CLI runs log to stderr, quiet unless asked.
pub(crate) fn init_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter("ledgerview=warn"))
        .with_writer(std::io::stderr)
        .try_init();
}

/// The TUI owns the terminal, so logs are appended to a file instead.
pub(crate) fn init_file(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter("ledgerview=info"))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
    Ok(())
}
