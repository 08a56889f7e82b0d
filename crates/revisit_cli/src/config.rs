//! Runtime configuration resolved from command-line options.

use crate::cli::Cli;
use anyhow::Context;
use revisit_core::{default_log_level, DayKey, LogSink};
use std::path::PathBuf;

/// Settings shared by every command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerConfig {
    pub data_file: PathBuf,
    pub today: DayKey,
    pub assume_yes: bool,
    pub log_level: String,
    pub log_sink: LogSink,
}

impl TrackerConfig {
    /// Resolves options, falling back to the local date and the sink's default level.
    pub fn from_cli(cli: &Cli) -> anyhow::Result<Self> {
        let today = match cli.today.as_deref() {
            Some(value) => DayKey::parse(value.trim()).context("invalid --today value")?,
            None => DayKey::today_local(),
        };
        let log_sink = match &cli.log_dir {
            Some(dir) => LogSink::Directory(dir.clone()),
            None => LogSink::Stderr,
        };

        Ok(Self {
            data_file: cli.data_file.clone(),
            today,
            assume_yes: cli.yes,
            log_level: cli
                .log_level
                .clone()
                .unwrap_or_else(|| default_log_level(&log_sink).to_string()),
            log_sink,
        })
    }
}
