//! Report envelopes returned to the calling layer.
//!
//! Every envelope carries a success flag, a human-readable message and, on
//! failure, a machine-usable [`ErrorKind`]. No stack traces, only messages.

use crate::error::ErrorKind;
use crate::import::ImportError;
use crate::repo::employee_repo::RepoError;
use crate::sheet::SheetError;
use serde::Serialize;
use std::path::PathBuf;

/// Outcome of an import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub success: bool,
    pub message: String,
    /// Rows appended to the store.
    pub imported: usize,
    /// 0 on success, 1 on failure (imports are all-or-nothing).
    pub errors: usize,
    /// The failure message, or on success one line per salary stored as 0.
    pub error_details: Vec<String>,
    pub error_kind: Option<ErrorKind>,
    /// Detected source layout, when the table was readable.
    pub format_label: Option<String>,
}

impl ImportReport {
    pub(crate) fn success(imported: usize, format_label: String, notes: Vec<String>) -> Self {
        let message = match notes.len() {
            0 => format!("{imported} employees imported"),
            coerced => format!("{imported} employees imported, {coerced} salaries stored as 0"),
        };
        Self {
            success: true,
            message,
            imported,
            errors: 0,
            error_details: notes,
            error_kind: None,
            format_label: Some(format_label),
        }
    }

    pub(crate) fn failure(err: &ImportError, format_label: Option<String>) -> Self {
        let kind = err.kind();
        let message = match kind {
            ErrorKind::Unclassified => format!("import failed: {err}"),
            _ => err.to_string(),
        };
        Self {
            success: false,
            error_details: vec![message.clone()],
            message,
            imported: 0,
            errors: 1,
            error_kind: Some(kind),
            format_label,
        }
    }
}

/// Outcome of an export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportReport {
    pub success: bool,
    pub message: String,
    pub exported: usize,
    /// Written file, on success.
    pub path: Option<PathBuf>,
    pub error_kind: Option<ErrorKind>,
}

impl ExportReport {
    pub(crate) fn success(exported: usize, path: PathBuf) -> Self {
        Self {
            success: true,
            message: format!("{exported} employees exported to {}", path.display()),
            exported,
            path: Some(path),
            error_kind: None,
        }
    }

    pub(crate) fn nothing_to_export() -> Self {
        Self {
            success: false,
            message: "no data to export".to_string(),
            exported: 0,
            path: None,
            error_kind: Some(ErrorKind::EmptyInput),
        }
    }

    pub(crate) fn from_sheet_error(err: &SheetError) -> Self {
        Self {
            success: false,
            message: err.to_string(),
            exported: 0,
            path: None,
            error_kind: Some(err.kind()),
        }
    }

    pub(crate) fn from_repo_error(err: &RepoError) -> Self {
        Self {
            success: false,
            message: format!("export failed: {err}"),
            exported: 0,
            path: None,
            error_kind: Some(err.kind()),
        }
    }
}

/// Outcome of a single store mutation (update, delete, clear).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionReport {
    pub success: bool,
    pub message: String,
    /// Records changed or removed.
    pub affected: usize,
    pub error_kind: Option<ErrorKind>,
}

impl ActionReport {
    pub(crate) fn success(message: impl Into<String>, affected: usize) -> Self {
        Self {
            success: true,
            message: message.into(),
            affected,
            error_kind: None,
        }
    }

    pub(crate) fn failure(err: &RepoError) -> Self {
        Self {
            success: false,
            message: err.to_string(),
            affected: 0,
            error_kind: Some(err.kind()),
        }
    }
}
