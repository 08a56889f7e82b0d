//! Startup check for the backing data file.

use anyhow::Context;
use log::info;
use revisit_core::StoreRepository;
use std::io::{BufRead, Write};
use std::path::Path;

/// Makes sure the store document exists before a command runs.
///
/// Asks on `input` unless `assume_yes` is set. Returns `false` when the user
/// declines, in which case nothing is created.
pub fn ensure_data_file<R, I, O>(
    repo: &R,
    location: &Path,
    assume_yes: bool,
    input: &mut I,
    output: &mut O,
) -> anyhow::Result<bool>
where
    R: StoreRepository,
    I: BufRead,
    O: Write,
{
    if repo.exists() {
        return Ok(true);
    }

    if !assume_yes {
        write!(
            output,
            "{} not found. Create a new data file? [y/N] ",
            location.display()
        )?;
        output.flush()?;

        let mut answer = String::new();
        input.read_line(&mut answer).context("failed to read answer")?;
        if !is_yes(answer.as_str()) {
            info!("event=data_file_check module=cli status=declined");
            return Ok(false);
        }
    }

    repo.create_empty().context("failed to create data file")?;
    writeln!(output, "Created {}.", location.display())?;
    info!("event=data_file_check module=cli status=created");
    Ok(true)
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::ensure_data_file;
    use revisit_core::{InMemoryRepository, StoreRepository};
    use std::io::Cursor;
    use std::path::Path;

    fn check(repo: &InMemoryRepository, assume_yes: bool, answer: &str) -> (bool, String) {
        let mut output = Vec::new();
        let ready = ensure_data_file(
            repo,
            Path::new("task_data.json"),
            assume_yes,
            &mut Cursor::new(answer),
            &mut output,
        )
        .unwrap();
        (ready, String::from_utf8(output).unwrap())
    }

    #[test]
    fn existing_file_skips_prompt() {
        let repo = InMemoryRepository::with_document("{}");
        let (ready, output) = check(&repo, false, "");
        assert!(ready);
        assert!(output.is_empty());
    }

    #[test]
    fn yes_answer_creates_empty_store() {
        let repo = InMemoryRepository::new();
        let (ready, output) = check(&repo, false, " YES \n");
        assert!(ready);
        assert!(repo.load().unwrap().is_empty());
        assert!(output.starts_with("task_data.json not found."));
        assert!(output.contains("Created task_data.json."));
    }

    #[test]
    fn other_answers_decline() {
        for answer in ["n\n", "\n", ""] {
            let repo = InMemoryRepository::new();
            let (ready, _) = check(&repo, false, answer);
            assert!(!ready, "answer {answer:?}");
            assert!(!repo.exists());
        }
    }

    #[test]
    fn assume_yes_creates_without_prompt() {
        let repo = InMemoryRepository::new();
        let (ready, output) = check(&repo, true, "");
        assert!(ready);
        assert!(repo.exists());
        assert!(!output.contains("[y/N]"));
    }
}
