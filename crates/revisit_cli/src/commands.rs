//! Command handlers.
//!
//! Each handler drives one `ReviewService` call and writes user-facing text to
//! `out`. Diagnostics go through `log`, never to `out`.

use anyhow::{bail, Context};
use revisit_core::{
    compute_review_dates, Agenda, CompletionOutcome, DayKey, ReviewService, StoreRepository,
    TaskId,
};
use std::io::Write;

const FLAG_MARKER: &str = "!";

/// Prints unfinished reviews, then today's reviews, numbered from 1.
///
/// Each row ends with the review id accepted by `complete --id`.
pub fn agenda<R: StoreRepository, W: Write>(
    service: &ReviewService<R>,
    today: DayKey,
    out: &mut W,
) -> anyhow::Result<()> {
    write_agenda(&service.agenda(today), out)
}

pub fn add<R: StoreRepository, W: Write>(
    service: &mut ReviewService<R>,
    today: DayKey,
    content: &str,
    out: &mut W,
) -> anyhow::Result<()> {
    let logged = service.add_today_task(today, content)?;
    writeln!(out, "Today's task has been added.")?;
    writeln!(
        out,
        "Next review: {}",
        logged
            .reviews
            .first()
            .map_or_else(|| "-".to_string(), |review| review.date.to_string())
    )?;
    Ok(())
}

pub fn add_past<R: StoreRepository, W: Write>(
    service: &mut ReviewService<R>,
    date: &str,
    content: &str,
    out: &mut W,
) -> anyhow::Result<()> {
    let logged = service.add_past_task(date, content)?;
    writeln!(out, "Task for {} has been added.", logged.date)?;
    Ok(())
}

/// How `complete` picks its review.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionTarget {
    /// 1-based row of the agenda rebuilt for `today`.
    Row(usize),
    /// Review id as printed by `agenda`; unaffected by later additions.
    Id(TaskId),
}

/// Completes one review and names it in the confirmation.
pub fn complete<R: StoreRepository, W: Write>(
    service: &mut ReviewService<R>,
    today: DayKey,
    target: CompletionTarget,
    out: &mut W,
) -> anyhow::Result<()> {
    let (date, id, content) = match target {
        CompletionTarget::Row(row) => {
            let agenda = service.agenda(today);
            match row.checked_sub(1).and_then(|index| agenda.select(index)) {
                Some(selected) => (selected.date, selected.task_id, selected.content.clone()),
                None => bail!(
                    "no agenda row {row}; the agenda has {} row(s)",
                    agenda.len()
                ),
            }
        }
        CompletionTarget::Id(id) => match service.find_review(id) {
            Some((date, task)) => (date, id, task.content.clone()),
            None => bail!("no review with id {id}"),
        },
    };

    match service.mark_complete_by_id(date, id)? {
        CompletionOutcome::Completed => {
            writeln!(out, "Completed: {content} (due {date})")?;
        }
        CompletionOutcome::AlreadyCompleted => {
            writeln!(out, "Already completed: {content} (due {date})")?;
        }
        CompletionOutcome::NotFound => {
            writeln!(out, "Could not find the selected task.")?;
        }
    }
    Ok(())
}

/// Prints one day's work log and reviews.
pub fn day<R: StoreRepository, W: Write>(
    service: &ReviewService<R>,
    date: &str,
    out: &mut W,
) -> anyhow::Result<()> {
    let date = DayKey::parse(date.trim())?;
    let Some(record) = service.day(date) else {
        writeln!(out, "Nothing recorded for {date}.")?;
        return Ok(());
    };

    writeln!(out, "{date}")?;
    writeln!(out, "Work done:")?;
    if record.work_done.is_empty() {
        writeln!(out, "  (none)")?;
    }
    for item in &record.work_done {
        writeln!(out, "  - {item}")?;
    }
    writeln!(out, "Reviews:")?;
    if record.review_tasks.is_empty() {
        writeln!(out, "  (none)")?;
    }
    for task in &record.review_tasks {
        let mark = if task.completed { "x" } else { " " };
        writeln!(out, "  [{mark}] {}", task.content)?;
    }
    Ok(())
}

/// Prints the review days for work done on `date`.
pub fn schedule<W: Write>(date: &str, out: &mut W) -> anyhow::Result<()> {
    let start = DayKey::parse(date.trim())?;
    let reviews = compute_review_dates(start).context("cannot schedule reviews")?;
    for review in reviews {
        writeln!(out, "{:<15} {}", review.label, review.date)?;
    }
    Ok(())
}

fn write_agenda<W: Write>(agenda: &Agenda, out: &mut W) -> anyhow::Result<()> {
    writeln!(out, "Today's date: {}", agenda.today())?;
    if agenda.is_empty() {
        writeln!(out, "Nothing to review.")?;
        return Ok(());
    }

    writeln!(out, "Tasks to review:")?;
    let width = agenda.len().to_string().len();
    for (index, row) in agenda.rows().iter().enumerate() {
        let marker = if row.is_flagged() { FLAG_MARKER } else { " " };
        writeln!(
            out,
            "{:>width$}. {marker} {}  id={}",
            index + 1,
            row.label(),
            row.task_id,
            width = width
        )?;
    }
    Ok(())
}
