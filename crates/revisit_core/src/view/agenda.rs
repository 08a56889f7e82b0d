//! Agenda projection: overdue reviews followed by today's reviews.
//!
//! # Invariants
//! - Unfinished rows come only from days strictly before `today` and are
//!   always pending.
//! - Unfinished rows are ordered by date ascending, keeping per-day order.
//! - Today's rows include completed reviews; only pending ones are flagged.

use crate::model::day::{DayKey, TaskId};
use crate::model::store::TaskStore;

/// Which section of the agenda a row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgendaRowKind {
    /// Pending review from an earlier day.
    Unfinished,
    /// Review due today.
    Today,
}

/// One selectable agenda row and the review it refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgendaRow {
    pub kind: AgendaRowKind,
    /// Day the review is stored under.
    pub date: DayKey,
    pub task_id: TaskId,
    pub content: String,
    pub completed: bool,
}

impl AgendaRow {
    /// Display text for the row.
    ///
    /// Unfinished rows carry an `(Unfinished YYYY-MM-DD) ` prefix.
    pub fn label(&self) -> String {
        match self.kind {
            AgendaRowKind::Unfinished => format!("(Unfinished {}) {}", self.date, self.content),
            AgendaRowKind::Today => self.content.clone(),
        }
    }

    /// Whether the row should be visually highlighted.
    pub fn is_flagged(&self) -> bool {
        !self.completed
    }
}

/// Rendered agenda with its row side-table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Agenda {
    today: DayKey,
    rows: Vec<AgendaRow>,
}

impl Agenda {
    /// Builds the agenda for `today` from the current store state.
    ///
    /// `days_before` walks days in ascending order, so unfinished rows need
    /// no further sorting.
    pub fn build(store: &TaskStore, today: DayKey) -> Self {
        let mut rows: Vec<AgendaRow> = store
            .days_before(today)
            .flat_map(|(date, record)| {
                record.pending_reviews().map(move |task| AgendaRow {
                    kind: AgendaRowKind::Unfinished,
                    date,
                    task_id: task.id,
                    content: task.content.clone(),
                    completed: false,
                })
            })
            .collect();

        if let Some(record) = store.day(today) {
            rows.extend(record.review_tasks.iter().map(|task| AgendaRow {
                kind: AgendaRowKind::Today,
                date: today,
                task_id: task.id,
                content: task.content.clone(),
                completed: task.completed,
            }));
        }

        Self { today, rows }
    }

    pub fn today(&self) -> DayKey {
        self.today
    }

    pub fn rows(&self) -> &[AgendaRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Resolves a zero-based row index to the review it shows.
    pub fn select(&self, index: usize) -> Option<&AgendaRow> {
        self.rows.get(index)
    }

    pub fn unfinished(&self) -> impl Iterator<Item = &AgendaRow> {
        self.rows
            .iter()
            .filter(|row| row.kind == AgendaRowKind::Unfinished)
    }

    pub fn due_today(&self) -> impl Iterator<Item = &AgendaRow> {
        self.rows
            .iter()
            .filter(|row| row.kind == AgendaRowKind::Today)
    }
}
