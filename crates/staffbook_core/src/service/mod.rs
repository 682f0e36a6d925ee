//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate normalizer, repository and spreadsheet calls into use-case APIs.
//! - Convert expected failures into report envelopes so callers need no
//!   error-handling logic of their own for import/export/edit paths.

pub mod employee_service;
pub mod report;
