mod config;
mod error;
mod ledger;
mod logging;
mod models;
mod run;
mod session;
mod storage;
mod ui;
mod view;

use anyhow::Result;
use std::path::PathBuf;

use config::{Config, Dirs};
use session::Session;
use storage::LedgerFile;

fn main() -> Result<()> {
    let (file_override, args) = take_file_flag(std::env::args().collect())?;
    let dirs = Dirs::locate()?;
    let config = Config::load_from_file(&dirs.config_file)?;
    let path = file_override
        .map(|p| PathBuf::from(run::shellexpand(&p)))
        .unwrap_or_else(|| config.ledger_path_in(&dirs.data_dir));
    let file = LedgerFile::new(path);

    match args.len() {
        1 => {
            logging::init_file(&dirs.data_dir.join("ledgerview.log"))?;
            let mut session = Session::open(file, config.report_options())?;
            run::as_tui(&mut session)
        }
        _ => {
            logging::init_stderr();
            run::as_cli(&args, file, config.report_options())
        }
    }
}

/// Pull `--file <path>` out of the argument list.
fn take_file_flag(mut args: Vec<String>) -> Result<(Option<String>, Vec<String>)> {
    let Some(pos) = args.iter().position(|a| a == "--file" || a == "-f") else {
        return Ok((None, args));
    };
    if pos + 1 >= args.len() {
        anyhow::bail!("--file requires a path");
    }
    let path = args.remove(pos + 1);
    args.remove(pos);
    Ok((Some(path), args))
}
