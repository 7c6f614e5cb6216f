//! Log output. The terminal UI owns stdout, so interactive runs log only to
//! a file; one-shot runs log to stderr.

use std::{
    fs::{File, OpenOptions},
    path::{Path, PathBuf},
    sync::Mutex,
};

use anyhow::{Context, Result, anyhow};
use tracing::Subscriber;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;

pub const LOG_ENV: &str = "METCAST_LOG";
const DEFAULT_DIRECTIVE: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogSink {
    File(PathBuf),
    Stderr,
    Disabled,
}

#[must_use]
pub fn sink_for(cli: &Cli) -> LogSink {
    match (&cli.log_file, cli.one_shot) {
        (Some(path), _) => LogSink::File(path.clone()),
        (None, true) => LogSink::Stderr,
        (None, false) => LogSink::Disabled,
    }
}

/// `METCAST_LOG` when set and valid, `info` otherwise.
#[must_use]
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

pub fn open_log_file(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))
}

pub fn file_subscriber(file: File, filter: EnvFilter) -> impl Subscriber + Send + Sync {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .finish()
}

pub fn init(cli: &Cli) -> Result<()> {
    let installed = match sink_for(cli) {
        LogSink::Disabled => return Ok(()),
        LogSink::Stderr => tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .with_writer(std::io::stderr)
            .try_init(),
        LogSink::File(path) => {
            let subscriber = file_subscriber(open_log_file(&path)?, env_filter());
            tracing::subscriber::set_global_default(subscriber).map_err(Into::into)
        }
    };
    installed.map_err(|err| anyhow!("installing log subscriber: {err}"))
}
