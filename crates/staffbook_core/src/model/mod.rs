//! Canonical employee data model.
//!
//! # Responsibility
//! - Define the single record shape every import layout is mapped into.
//! - Own the sentinel-scrubbing rule for optional text fields.
//!
//! # Invariants
//! - Every persisted record is identified by a store-assigned `EmployeeId`.
//! - `nom`, `email` and `salaire` are always present on a persisted record.
//! - Optional fields are `None` rather than blank or placeholder text.

pub mod employee;
