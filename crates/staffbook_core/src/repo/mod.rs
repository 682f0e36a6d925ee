//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts for employee records.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - The repository is the sole reader and writer of persisted employee state.
//! - Every write is one atomic unit; a failed write leaves the store unchanged.

pub mod employee_repo;
