//! Review use-case service.
//!
//! # Responsibility
//! - Own the in-memory store and the repository it is flushed to.
//! - Log work items and fan them out into scheduled reviews.
//! - Complete reviews selected by id or by content.
//!
//! # Invariants
//! - Every successful mutation is persisted before the call returns.
//! - A failed call leaves the in-memory store exactly as it was.
//! - Reviews are never removed or un-completed.

use crate::model::day::{DayKey, DayKeyError, DayRecord, ReviewTask, TaskId};
use crate::model::store::TaskStore;
use crate::repo::store_repo::{RepoError, StoreRepository};
use crate::schedule::{compute_review_dates, ScheduleError, ScheduledReview};
use crate::view::agenda::Agenda;
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for review use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Caller-supplied date text is not a valid day.
    InvalidDate(DayKeyError),
    /// Work item text is empty after trimming.
    EmptyContent,
    /// Review days could not be computed.
    Schedule(ScheduleError),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDate(err) => write!(f, "{err}"),
            Self::EmptyContent => write!(f, "task content cannot be empty"),
            Self::Schedule(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidDate(err) => Some(err),
            Self::EmptyContent => None,
            Self::Schedule(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<DayKeyError> for ServiceError {
    fn from(value: DayKeyError) -> Self {
        Self::InvalidDate(value)
    }
}

impl From<ScheduleError> for ServiceError {
    fn from(value: ScheduleError) -> Self {
        Self::Schedule(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Result of logging one work item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedTask {
    /// Day the work was logged under.
    pub date: DayKey,
    /// Trimmed work item text.
    pub content: String,
    /// Review days created for the item, in interval order.
    pub reviews: Vec<ScheduledReview>,
}

/// Outcome of a completion request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// A pending review was flipped to completed and persisted.
    Completed,
    /// The matched review was already completed; nothing was written.
    AlreadyCompleted,
    /// No review matched on that day.
    NotFound,
}

impl CompletionOutcome {
    /// Whether the matched review is completed after the call.
    pub fn is_completed(self) -> bool {
        matches!(self, Self::Completed | Self::AlreadyCompleted)
    }
}

/// Use-case service over one store and its repository.
pub struct ReviewService<R: StoreRepository> {
    repo: R,
    store: TaskStore,
}

impl<R: StoreRepository> ReviewService<R> {
    /// Loads the store from `repo`.
    ///
    /// # Errors
    /// - Returns repository errors (missing or malformed document) unchanged.
    pub fn open(repo: R) -> ServiceResult<Self> {
        let store = repo.load()?;
        Ok(Self { repo, store })
    }

    /// Wraps an already loaded store without touching the repository.
    pub fn with_store(repo: R, store: TaskStore) -> Self {
        Self { repo, store }
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    /// Returns the record stored under `date`.
    pub fn day(&self, date: DayKey) -> Option<&DayRecord> {
        self.store.day(date)
    }

    /// Finds a review by id, returning the day it is due on.
    pub fn find_review(&self, id: TaskId) -> Option<(DayKey, &ReviewTask)> {
        self.store.find_review(id)
    }

    /// Builds the agenda visible on `today`.
    pub fn agenda(&self, today: DayKey) -> Agenda {
        Agenda::build(&self.store, today)
    }

    /// Logs `content` as done on `today` and schedules its reviews.
    pub fn add_today_task(&mut self, today: DayKey, content: &str) -> ServiceResult<LoggedTask> {
        self.log_work(today, content)
    }

    /// Logs `content` under a caller-supplied `YYYY-MM-DD` date.
    ///
    /// # Errors
    /// - `ServiceError::InvalidDate` when `date` is not a valid day; nothing is mutated.
    pub fn add_past_task(&mut self, date: &str, content: &str) -> ServiceResult<LoggedTask> {
        let date = DayKey::parse(date.trim()).map_err(|err| {
            warn!("event=task_add module=service status=rejected error_code=invalid_date");
            ServiceError::from(err)
        })?;
        self.log_work(date, content)
    }

    /// Completes the first review on `date` whose content equals `content`.
    ///
    /// Duplicate contents on one day are indistinguishable here; prefer
    /// `mark_complete_by_id` when the id is known.
    pub fn mark_complete(
        &mut self,
        date: DayKey,
        content: &str,
    ) -> ServiceResult<CompletionOutcome> {
        self.complete_with(date, |record| record.first_review_by_content_mut(content))
    }

    /// Completes the review with `id` on `date`.
    pub fn mark_complete_by_id(
        &mut self,
        date: DayKey,
        id: TaskId,
    ) -> ServiceResult<CompletionOutcome> {
        self.complete_with(date, |record| record.review_by_id_mut(id))
    }

    fn log_work(&mut self, date: DayKey, content: &str) -> ServiceResult<LoggedTask> {
        let content = content.trim();
        if content.is_empty() {
            warn!("event=task_add module=service status=rejected error_code=empty_content");
            return Err(ServiceError::EmptyContent);
        }

        let reviews = compute_review_dates(date)?;
        let snapshot = self.store.clone();

        self.store.record_work(date, content);
        for review in &reviews {
            self.store.push_review(review.date, ReviewTask::new(content));
        }
        self.persist(snapshot)?;

        info!(
            "event=task_add module=service status=ok date={} reviews={}",
            date,
            reviews.len()
        );
        Ok(LoggedTask {
            date,
            content: content.to_string(),
            reviews,
        })
    }

    fn complete_with<F>(&mut self, date: DayKey, select: F) -> ServiceResult<CompletionOutcome>
    where
        F: FnOnce(&mut DayRecord) -> Option<&mut ReviewTask>,
    {
        let snapshot = self.store.clone();
        let flipped = match self.store.day_mut(date).and_then(select) {
            Some(task) => task.complete(),
            None => {
                warn!("event=task_complete module=service status=not_found date={date}");
                return Ok(CompletionOutcome::NotFound);
            }
        };

        if !flipped {
            debug!("event=task_complete module=service status=noop date={date}");
            return Ok(CompletionOutcome::AlreadyCompleted);
        }

        self.persist(snapshot)?;
        info!("event=task_complete module=service status=ok date={date}");
        Ok(CompletionOutcome::Completed)
    }

    fn persist(&mut self, snapshot: TaskStore) -> ServiceResult<()> {
        if let Err(err) = self.repo.save(&self.store) {
            self.store = snapshot;
            warn!("event=store_rollback module=service status=ok reason=save_failed");
            return Err(err.into());
        }
        Ok(())
    }
}
