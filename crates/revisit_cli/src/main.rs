//! revisit CLI: spaced-repetition work log.
//!
//! # Responsibility
//! - Parse options, start logging and check the data file.
//! - Dispatch one command against a file-backed `ReviewService`.
//! - Map failures to a non-zero exit status.

mod cli;
mod commands;
mod config;
mod prompt;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Commands};
use commands::CompletionTarget;
use config::TrackerConfig;
use log::{error, info};
use revisit_core::{
    flush_logging, init_logging, JsonFileRepository, ReviewService, StoreRepository,
};
use std::io::{self, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let code = match run(cli) {
        Ok(code) => code,
        Err(err) => {
            error!("event=command module=cli status=error");
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    };
    flush_logging();
    code
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = TrackerConfig::from_cli(&cli)?;
    init_logging(config.log_level.as_str(), config.log_sink.clone())
        .context("failed to initialize logging")?;

    let repo = JsonFileRepository::new(&config.data_file);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let command = cli.command.unwrap_or(Commands::Agenda);

    if let Commands::Init = command {
        repo.create_empty()
            .with_context(|| format!("cannot initialize {}", config.data_file.display()))?;
        writeln!(out, "Created {}.", config.data_file.display())?;
        return Ok(ExitCode::SUCCESS);
    }
    if let Commands::Schedule { date } = &command {
        commands::schedule(date, &mut out)?;
        return Ok(ExitCode::SUCCESS);
    }

    let ready = prompt::ensure_data_file(
        &repo,
        config.data_file.as_path(),
        config.assume_yes,
        &mut io::stdin().lock(),
        &mut out,
    )?;
    if !ready {
        eprintln!("The application cannot run without the data file. Exiting.");
        return Ok(ExitCode::FAILURE);
    }

    let mut service = ReviewService::open(repo)
        .with_context(|| format!("cannot load {}", config.data_file.display()))?;
    info!(
        "event=command module=cli status=start today={} days={}",
        config.today,
        service.store().len()
    );

    match command {
        Commands::Agenda => commands::agenda(&service, config.today, &mut out)?,
        Commands::Add { content } => {
            commands::add(&mut service, config.today, content.as_str(), &mut out)?
        }
        Commands::AddPast { date, content } => {
            commands::add_past(&mut service, date.as_str(), content.as_str(), &mut out)?
        }
        Commands::Complete { row, id } => {
            let target = match (id, row) {
                (Some(id), _) => CompletionTarget::Id(id),
                (None, Some(row)) => CompletionTarget::Row(row),
                (None, None) => anyhow::bail!("complete needs a row number or --id"),
            };
            commands::complete(&mut service, config.today, target, &mut out)?
        }
        Commands::Day { date } => commands::day(&service, date.as_str(), &mut out)?,
        Commands::Init | Commands::Schedule { .. } => {}
    }

    info!("event=command module=cli status=ok");
    Ok(ExitCode::SUCCESS)
}
