//! Presentation projections over the store.
//!
//! # Responsibility
//! - Turn store state into rows a front end can list and select from.
//! - Keep selection identity in an explicit row table, never in display text.

pub mod agenda;
