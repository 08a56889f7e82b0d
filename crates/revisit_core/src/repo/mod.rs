//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the whole-store load/save contract.
//! - Isolate file and JSON encoding details from the service layer.
//!
//! # Invariants
//! - Repositories never hand out a partially decoded store.

pub mod store_repo;
