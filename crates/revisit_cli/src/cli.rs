//! Command-line surface.

use clap::{Parser, Subcommand};
use revisit_core::TaskId;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "revisit", version, about = "Spaced-repetition work log")]
pub struct Cli {
    /// JSON document holding the review store.
    #[arg(long, global = true, default_value = "task_data.json")]
    pub data_file: PathBuf,

    /// Treat this YYYY-MM-DD date as today instead of the local date.
    #[arg(long, global = true)]
    pub today: Option<String>,

    /// Create a missing data file without asking.
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,

    /// Log level: trace|debug|info|warn|error. Stderr logging defaults to warn.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Absolute directory for rolling log files; logs go to stderr when unset.
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create an empty data file.
    Init,

    /// List unfinished reviews followed by today's reviews (default).
    Agenda,

    /// Log work done today and schedule its reviews.
    Add {
        /// Work item text.
        content: String,
    },

    /// Log work done on an earlier (or any) day and schedule its reviews.
    AddPast {
        /// Day the work was done, YYYY-MM-DD.
        date: String,
        /// Work item text.
        content: String,
    },

    /// Mark a review as completed, by agenda row or by id.
    Complete {
        /// Row number as printed by `agenda`.
        #[arg(required_unless_present = "id")]
        row: Option<usize>,

        /// Review id as printed by `agenda`; stable across invocations.
        #[arg(long, conflicts_with = "row")]
        id: Option<TaskId>,
    },

    /// Show work done and reviews stored under one day.
    Day {
        /// Day to show, YYYY-MM-DD.
        date: String,
    },

    /// Preview the review days for work done on a given day.
    Schedule {
        /// Start day, YYYY-MM-DD.
        date: String,
    },
}

#[cfg(test)]
mod tests {
    use super::{Cli, Commands};
    use clap::{CommandFactory, Parser};

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_options_parse_after_subcommand() {
        let cli = Cli::parse_from([
            "revisit",
            "add-past",
            "2023-12-25",
            "X",
            "--today",
            "2024-01-01",
            "--data-file",
            "/tmp/store.json",
        ]);
        assert_eq!(cli.today.as_deref(), Some("2024-01-01"));
        assert!(matches!(
            cli.command,
            Some(Commands::AddPast { ref date, ref content }) if date == "2023-12-25" && content == "X"
        ));
    }

    #[test]
    fn complete_takes_row_or_id() {
        let cli = Cli::parse_from(["revisit", "complete", "2"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Complete { row: Some(2), id: None })
        ));

        let id = "67e55044-10b1-426f-9247-bb680e5fe0c8";
        let cli = Cli::parse_from(["revisit", "complete", "--id", id]);
        assert!(matches!(
            cli.command,
            Some(Commands::Complete { row: None, id: Some(parsed) }) if parsed.to_string() == id
        ));

        assert!(Cli::try_parse_from(["revisit", "complete"]).is_err());
        assert!(Cli::try_parse_from(["revisit", "complete", "1", "--id", id]).is_err());
        assert!(Cli::try_parse_from(["revisit", "complete", "--id", "not-a-uuid"]).is_err());
    }

    #[test]
    fn agenda_is_optional() {
        let cli = Cli::parse_from(["revisit"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.data_file.to_str(), Some("task_data.json"));
    }
}
