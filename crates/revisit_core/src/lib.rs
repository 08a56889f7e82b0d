//! Core domain logic for revisit, a spaced-repetition work log.
//! This crate is the single source of truth for business invariants.

pub mod logging;
pub mod model;
pub mod repo;
pub mod schedule;
pub mod service;
pub mod view;

pub use logging::{
    default_log_level, flush_logging, init_logging, logging_status, LogSink, LoggingError,
};
pub use model::day::{DayKey, DayKeyError, DayRecord, ReviewTask, TaskId};
pub use model::store::TaskStore;
pub use repo::store_repo::{
    decode_store, encode_store, InMemoryRepository, JsonFileRepository, RepoError, RepoResult,
    StoreRepository,
};
pub use schedule::{
    compute_review_dates, ReviewInterval, ScheduleError, ScheduledReview, REVIEW_INTERVALS,
};
pub use service::review_service::{
    CompletionOutcome, LoggedTask, ReviewService, ServiceError, ServiceResult,
};
pub use view::agenda::{Agenda, AgendaRow, AgendaRowKind};
