//! Domain model for the day-keyed review store.
//!
//! # Responsibility
//! - Define the canonical shapes persisted in the store document.
//! - Keep date validation and task lifecycle rules next to the data.
//!
//! # Invariants
//! - Every day record is addressed by a validated `DayKey`.
//! - Review tasks only ever move from pending to completed.

pub mod day;
pub mod store;
