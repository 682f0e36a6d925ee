//! Import normalization: raw spreadsheet tables to canonical employee rows.
//!
//! # Responsibility
//! - Describe raw tabular input independent of the file format it came from.
//! - Detect which known source layout a table follows.
//! - Map variant column labels onto the canonical schema and scrub sentinels.
//!
//! # Invariants
//! - Normalization is pure: it owns no state and never touches the store.
//! - Required columns are checked before any row is produced.

pub mod aliases;
pub mod normalizer;
pub mod table;

pub use aliases::{AliasTable, FormatVariant, FORMAT_VARIANTS};
pub use normalizer::{FormatReport, ImportError, ImportNormalizer, Normalized};
pub use table::{Cell, RawTable};
