//! Error classification shared by the import/export report envelopes.
//!
//! Layer errors (`DbError`, `RepoError`, `SheetError`, `ImportError`) keep
//! their own detail; [`ErrorKind`] is the coarse, machine-usable category the
//! calling layer branches on.

use crate::db::DbError;
use crate::repo::employee_repo::RepoError;
use rusqlite::ErrorCode;
use serde::{Deserialize, Serialize};

/// Coarse failure category surfaced in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Import source has no data rows.
    EmptyInput,
    /// A required column is absent by name.
    MissingColumn,
    /// Reading or writing a backing file failed.
    FileAccess,
    /// Anything else; the report still carries the underlying message.
    Unclassified,
}

impl DbError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Sqlite(rusqlite::Error::SqliteFailure(failure, _)) => match failure.code {
                ErrorCode::CannotOpen
                | ErrorCode::ReadOnly
                | ErrorCode::PermissionDenied
                | ErrorCode::DatabaseCorrupt
                | ErrorCode::NotADatabase
                | ErrorCode::SystemIoFailure
                | ErrorCode::DiskFull => ErrorKind::FileAccess,
                _ => ErrorKind::Unclassified,
            },
            _ => ErrorKind::Unclassified,
        }
    }
}

impl RepoError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Db(err) => err.kind(),
            _ => ErrorKind::Unclassified,
        }
    }
}
