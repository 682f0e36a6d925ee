//! Spreadsheet file collaborators: reading imports, writing exports.
//!
//! # Responsibility
//! - Turn `.xlsx`/`.xls`/`.ods`/`.csv` files into [`RawTable`]s.
//! - Serialize the full employee set back to `.xlsx` or `.csv`.
//!
//! # Invariants
//! - Every failure maps to [`ErrorKind::FileAccess`]; not-found, corrupt and
//!   unreadable files are not distinguished further by callers.
//!
//! [`RawTable`]: crate::import::RawTable

use crate::error::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

mod reader;
mod writer;

pub use reader::read_table;
pub use writer::{write_employees, EXPORT_COLUMNS};

pub type SheetResult<T> = Result<T, SheetError>;

#[derive(Debug, Error)]
pub enum SheetError {
    #[error("file not found: {}", .path.display())]
    NotFound { path: PathBuf },
    #[error("file is empty or corrupt: {}: {message}", .path.display())]
    Unreadable { path: PathBuf, message: String },
    #[error("unsupported spreadsheet extension `{extension}` for {}", .path.display())]
    UnsupportedFormat { path: PathBuf, extension: String },
    #[error("permission denied: {} may be open in another program", .path.display())]
    PermissionDenied { path: PathBuf },
    #[error("failed to write {}: {message}", .path.display())]
    Write { path: PathBuf, message: String },
}

impl SheetError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::FileAccess
    }
}

/// File layouts understood by the readers and writers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetFormat {
    /// Office Open XML workbook; the only workbook flavour that can be written.
    Xlsx,
    /// Legacy or alternative workbooks, read-only (`.xls`, `.xlsb`, `.ods`, `.xlsm`).
    OtherWorkbook,
    Csv,
}

impl SheetFormat {
    pub fn from_path(path: &Path) -> SheetResult<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "xlsx" => Ok(Self::Xlsx),
            "xlsm" | "xls" | "xlsb" | "ods" => Ok(Self::OtherWorkbook),
            "csv" => Ok(Self::Csv),
            _ => Err(SheetError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension,
            }),
        }
    }
}
